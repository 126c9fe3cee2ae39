use tracing::{info, warn};

use super::envelope::build_envelope;
use crate::errors::{ForwarderError, Result};
use crate::models::upload::entities::Identity;
use crate::models::upload::requests::UploadRequest;
use crate::models::upload::responses::ForwardReceipt;
use crate::upstream::Upstream;
use crate::utils::submission_url;

/// 转发一次上传
///
/// 顺序：校验文件 -> 校验配置 -> 构建信封 -> 单次 POST。
/// 前两步失败时不会发起任何网络请求。任何完成的 HTTP 交互（包括非 2xx）都视为成功，
/// 响应体原样返回。
pub async fn handle(
    upstream: &dyn Upstream,
    upload: Option<UploadRequest>,
    endpoint: Option<&str>,
    identity: Option<&Identity>,
) -> Result<ForwardReceipt> {
    let upload = match upload {
        Some(upload) if !upload.payload.is_empty() => upload,
        _ => return Err(ForwarderError::validation("file is required")),
    };

    let endpoint = match endpoint.map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => endpoint,
        _ => {
            return Err(ForwarderError::configuration(
                "The upstream endpoint is not configured",
            ));
        }
    };

    let envelope = build_envelope(&upload, identity);
    let body = serde_json::to_vec(&envelope)
        .map_err(|e| ForwarderError::serialization(format!("Submission failed: {e}")))?;
    let url = submission_url(endpoint);

    info!(
        correlation_id = %envelope.correlation_id,
        user_id = %envelope.user_id,
        file_name = %envelope.file_name,
        document_type = %envelope.document_type,
        size = upload.payload.len(),
        "Forwarding upload to {}",
        url
    );

    match upstream.post_json(&url, body).await {
        Ok(response) => {
            info!(
                correlation_id = %envelope.correlation_id,
                status = response.status,
                "Upstream responded"
            );
            Ok(ForwardReceipt {
                correlation_id: envelope.correlation_id,
                upstream_status: response.status,
                body: response.body,
                submitted_at: envelope.submitted_at,
            })
        }
        Err(err) => {
            warn!(
                correlation_id = %envelope.correlation_id,
                "Upstream submission failed: {}",
                err
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::testing::{RecordingUpstream, Reply};

    const ENDPOINT: &str = "https://x.test/api";

    fn sample(document_type: Option<&str>) -> Option<UploadRequest> {
        Some(UploadRequest::new(
            b"%PDF-1.4 sample".to_vec(),
            "bill.pdf",
            document_type.map(str::to_string),
        ))
    }

    #[tokio::test]
    async fn test_missing_file_makes_no_call() {
        let upstream = RecordingUpstream::responding(200, "ok");

        let err = handle(&upstream, None, Some(ENDPOINT), None)
            .await
            .unwrap_err();
        assert_eq!(err, ForwarderError::validation("file is required"));

        let empty = Some(UploadRequest::new(Vec::new(), "empty.pdf", None));
        let err = handle(&upstream, empty, Some(ENDPOINT), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ForwarderError::Validation(_)));

        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_endpoint_makes_no_call() {
        let upstream = RecordingUpstream::responding(200, "ok");

        for endpoint in [None, Some(""), Some("   ")] {
            let err = handle(&upstream, sample(None), endpoint, None)
                .await
                .unwrap_err();
            assert!(matches!(err, ForwarderError::Configuration(_)));
        }
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_validation_checked_before_configuration() {
        let upstream = RecordingUpstream::responding(200, "ok");
        let err = handle(&upstream, None, None, None).await.unwrap_err();
        assert!(matches!(err, ForwarderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_url_is_normalized() {
        for endpoint in ["https://x.test/api", "https://x.test/api/"] {
            let upstream = RecordingUpstream::responding(200, "ok");
            handle(&upstream, sample(None), Some(endpoint), None)
                .await
                .unwrap();
            assert_eq!(upstream.last_url().as_deref(), Some("https://x.test/api/"));
            assert_eq!(upstream.calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_envelope_sent_upstream() {
        let upstream = RecordingUpstream::responding(200, "accepted");
        let identity = Identity::new("alice");

        let receipt = handle(&upstream, sample(Some("bill")), Some(ENDPOINT), Some(&identity))
            .await
            .unwrap();

        let json = upstream.last_json().unwrap();
        assert_eq!(json["userId"], "alice");
        assert_eq!(json["fileName"], "bill.pdf");
        assert_eq!(json["documentType"], "bill");
        assert_eq!(json["correlationId"], receipt.correlation_id.to_string());
        assert_eq!(receipt.body, "accepted");
    }

    #[tokio::test]
    async fn test_blank_document_type_becomes_invoice() {
        let upstream = RecordingUpstream::responding(200, "ok");
        handle(&upstream, sample(Some("   ")), Some(ENDPOINT), None)
            .await
            .unwrap();

        let json = upstream.last_json().unwrap();
        assert_eq!(json["documentType"], "invoice");
        assert_eq!(json["userId"], "demo");
    }

    #[tokio::test]
    async fn test_server_error_is_still_success() {
        let upstream = RecordingUpstream::responding(500, "oops");
        let receipt = handle(&upstream, sample(None), Some(ENDPOINT), None)
            .await
            .unwrap();

        assert_eq!(receipt.body, "oops");
        assert_eq!(receipt.upstream_status, 500);
    }

    #[tokio::test]
    async fn test_timeout_is_distinct() {
        let upstream = RecordingUpstream::new(Reply::Timeout);
        let err = handle(&upstream, sample(None), Some(ENDPOINT), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ForwarderError::Timeout(_)));
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_cause() {
        let upstream = RecordingUpstream::new(Reply::Fail("connection refused".into()));
        let err = handle(&upstream, sample(None), Some(ENDPOINT), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ForwarderError::Transport(_)));
        assert!(err.message().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_repeated_submissions_get_new_ids() {
        let upstream = RecordingUpstream::responding(200, "ok");
        let first = handle(&upstream, sample(None), Some(ENDPOINT), None)
            .await
            .unwrap();
        let second = handle(&upstream, sample(None), Some(ENDPOINT), None)
            .await
            .unwrap();

        assert_ne!(first.correlation_id, second.correlation_id);
        assert_eq!(upstream.calls(), 2);
    }
}
