use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 当前请求的身份（可选），由身份解析中间件写入请求扩展
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// 发送给上游的 JSON 信封
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEnvelope {
    pub correlation_id: Uuid,
    pub user_id: String,
    pub file_name: String,
    pub document_base64: String,
    pub document_type: String,
    /// 提交时间，只用于日志与回执，不进入线上报文
    #[serde(skip, default = "chrono::Utc::now")]
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
