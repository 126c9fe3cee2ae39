//! 上游接口抽象
//!
//! 转发器只依赖 `Upstream` trait，生产环境使用基于 reqwest 的 `HttpUpstream`，
//! 测试中使用记录调用次数的替身。

use crate::errors::Result;

pub mod http;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpUpstream;

/// 一次完成的 HTTP 交互，不解释状态码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait::async_trait]
pub trait Upstream: Send + Sync {
    /// 以 `application/json` POST 已序列化的请求体，返回原始响应文本
    ///
    /// 超时返回 `ForwarderError::Timeout`，其它传输错误返回 `ForwarderError::Transport`。
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<UpstreamResponse>;
}
