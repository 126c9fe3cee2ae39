use serde::Serialize;
use uuid::Uuid;

/// 一次完成的上游交互（不区分状态码）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardReceipt {
    /// 本次提交生成的关联 ID
    pub correlation_id: Uuid,
    /// 上游 HTTP 状态码，仅供展示
    pub upstream_status: u16,
    /// 上游原始响应体
    pub body: String,
    /// 提交时间
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
