use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::upload::status_for;
use crate::errors::ForwarderError;
use crate::middlewares::ResolveIdentity;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::ForwarderService;

fn error_response(err: &ForwarderError) -> HttpResponse {
    HttpResponse::build(status_for(err)).json(ApiResponse::<()>::error_empty(
        ErrorCode::from(err),
        err.message(),
    ))
}

// JSON 版本的上传接口，流程与表单一致
pub async fn handle_upload(
    request: HttpRequest,
    payload: Multipart,
    service: web::Data<ForwarderService>,
) -> ActixResult<HttpResponse> {
    let form = match service.read_upload(payload).await.into_result() {
        Ok(form) => form,
        Err(err) => return Ok(error_response(&err)),
    };

    let identity = ResolveIdentity::extract_identity(&request);
    match service.handle(form.to_request(), identity.as_ref()).await {
        Ok(receipt) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            receipt,
            "Upload forwarded to upstream",
        ))),
        Err(err) => Ok(error_response(&err)),
    }
}

// 配置路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1").route("/uploads", web::post().to(handle_upload)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{multipart_body, test_service};
    use crate::upstream::testing::RecordingUpstream;
    use actix_web::{App, http::StatusCode, http::header::CONTENT_TYPE, test};
    use std::sync::Arc;

    async fn post(
        upstream: Arc<RecordingUpstream>,
        max_upload_size: usize,
        parts: &[(&str, Option<&str>, &str)],
    ) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_service(
                    upstream,
                    Some("https://x.test/api/"),
                    max_upload_size,
                )))
                .configure(configure_api_routes),
        )
        .await;

        let (content_type, body) = multipart_body(parts);
        let req = test::TestRequest::post()
            .uri("/api/v1/uploads")
            .insert_header((CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let json: serde_json::Value = test::read_body_json(resp).await;
        (status, json)
    }

    #[actix_web::test]
    async fn test_success_returns_raw_body() {
        let upstream = Arc::new(RecordingUpstream::responding(500, "oops"));
        let (status, json) = post(
            upstream.clone(),
            0,
            &[("file", Some("bill.pdf"), "%PDF"), ("documentType", None, "bill")],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["body"], "oops");
        assert_eq!(json["data"]["upstreamStatus"], 500);
        assert_eq!(upstream.last_url().as_deref(), Some("https://x.test/api/"));

        let sent = upstream.last_json().unwrap();
        assert_eq!(sent["documentType"], "bill");
        assert_eq!(sent["correlationId"], json["data"]["correlationId"]);
    }

    #[actix_web::test]
    async fn test_missing_file() {
        let upstream = Arc::new(RecordingUpstream::responding(200, "ok"));
        let (status, json) = post(upstream.clone(), 0, &[("documentType", None, "bill")]).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], ErrorCode::FileRequired as i32);
        assert_eq!(json["message"], "file is required");
        assert_eq!(upstream.calls(), 0);
    }

    #[actix_web::test]
    async fn test_size_limit() {
        let upstream = Arc::new(RecordingUpstream::responding(200, "ok"));
        let (status, json) = post(
            upstream.clone(),
            4,
            &[("file", Some("big.pdf"), "0123456789")],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], ErrorCode::UploadRejected as i32);
        assert_eq!(json["message"], "file exceeds the configured size limit");
        assert_eq!(upstream.calls(), 0);
    }

    #[actix_web::test]
    async fn test_second_file_rejected() {
        let upstream = Arc::new(RecordingUpstream::responding(200, "ok"));
        let (status, json) = post(
            upstream.clone(),
            0,
            &[("file", Some("a.pdf"), "a"), ("file", Some("b.pdf"), "b")],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], ErrorCode::UploadRejected as i32);
        assert_eq!(json["message"], "only one file can be uploaded at a time");
        assert_eq!(upstream.calls(), 0);
    }

    #[actix_web::test]
    async fn test_missing_file_name_defaults() {
        let upstream = Arc::new(RecordingUpstream::responding(200, "ok"));
        let (status, _) = post(upstream.clone(), 0, &[("file", Some(""), "data")]).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(upstream.last_json().unwrap()["fileName"], "uploaded.pdf");
    }
}
