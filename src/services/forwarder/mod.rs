pub mod envelope;
pub mod intake;
pub mod submit;

use actix_multipart::Multipart;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::upload::entities::Identity;
use crate::models::upload::requests::UploadRequest;
use crate::models::upload::responses::ForwardReceipt;
use crate::upstream::Upstream;

/// 上传转发服务
///
/// 持有上游客户端、上游地址与大小限制；请求之间不共享任何可变状态。
#[derive(Clone)]
pub struct ForwarderService {
    upstream: Arc<dyn Upstream>,
    endpoint: Option<String>,
    max_upload_size: usize,
}

impl ForwarderService {
    pub fn new(
        upstream: Arc<dyn Upstream>,
        endpoint: Option<String>,
        max_upload_size: usize,
    ) -> Self {
        Self {
            upstream,
            endpoint,
            max_upload_size,
        }
    }

    pub fn from_config(upstream: Arc<dyn Upstream>, config: &AppConfig) -> Self {
        Self::new(
            upstream,
            config.upstream_endpoint().map(str::to_string),
            config.upload.max_size,
        )
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    // 读取上传表单
    pub async fn read_upload(&self, payload: Multipart) -> intake::UploadIntake {
        intake::read_upload(payload, self.max_upload_size).await
    }

    // 转发到上游
    pub async fn handle(
        &self,
        upload: Option<UploadRequest>,
        identity: Option<&Identity>,
    ) -> Result<ForwardReceipt> {
        submit::handle(self.upstream.as_ref(), upload, self.endpoint(), identity).await
    }
}
