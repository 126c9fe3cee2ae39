use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use crate::models::upload::entities::{Identity, SubmissionEnvelope};
use crate::models::upload::requests::UploadRequest;

/// 没有身份信息时使用的用户 ID
pub const FALLBACK_USER_ID: &str = "demo";
/// 文档类型为空白时的默认值
pub const DEFAULT_DOCUMENT_TYPE: &str = "invoice";

/// 空白或缺失的文档类型替换为 `invoice`，其余原样保留
pub fn normalize_document_type(document_type: Option<&str>) -> String {
    match document_type {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => DEFAULT_DOCUMENT_TYPE.to_string(),
    }
}

/// 解析当前用户 ID
pub fn resolve_user_id(identity: Option<&Identity>) -> String {
    identity
        .map(|id| id.user_id.as_str())
        .filter(|id| !id.trim().is_empty())
        .unwrap_or(FALLBACK_USER_ID)
        .to_string()
}

/// 由上传请求构建信封；关联 ID、用户 ID、时间戳总是在这里填充
pub fn build_envelope(upload: &UploadRequest, identity: Option<&Identity>) -> SubmissionEnvelope {
    SubmissionEnvelope {
        correlation_id: Uuid::new_v4(),
        user_id: resolve_user_id(identity),
        file_name: upload.file_name.clone(),
        document_base64: STANDARD.encode(&upload.payload),
        document_type: normalize_document_type(upload.document_type.as_deref()),
        submitted_at: chrono::Utc::now(),
    }
}
