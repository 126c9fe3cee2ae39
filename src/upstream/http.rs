use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

use super::{Upstream, UpstreamResponse};
use crate::errors::{ForwarderError, Result, error_chain};

/// 基于 reqwest 的上游实现
///
/// 不附加任何认证头：当前部署模式下上游是开放的。
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
}

impl HttpUpstream {
    /// `timeout` 为 None 时使用 reqwest 默认行为
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            ForwarderError::transport(format!("Failed to create HTTP client: {}", error_chain(&e)))
        })?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Upstream for HttpUpstream {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<UpstreamResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Upstream {} answered with status {}", url, status);

        Ok(UpstreamResponse { status, body })
    }
}
