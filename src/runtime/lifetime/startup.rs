use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::ForwarderService;
use crate::upstream::{HttpUpstream, Upstream};

pub struct StartupContext {
    pub forwarder: ForwarderService,
}

/// 创建上游客户端
fn create_upstream(config: &AppConfig) -> Result<Arc<dyn Upstream>> {
    let timeout = config.upstream_timeout();
    match timeout {
        Some(t) => debug!("Upstream timeout set to {} ms", t.as_millis()),
        None => debug!("Upstream timeout disabled, using HTTP client default"),
    }
    Ok(Arc::new(HttpUpstream::new(timeout)?))
}

/// 启动前准备：构建上游客户端与转发服务
///
/// 上游地址缺失不会阻止启动，只会在提交时返回配置错误。
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let upstream = create_upstream(config)?;
    let forwarder = ForwarderService::from_config(upstream, config);

    match forwarder.endpoint() {
        Some(endpoint) => warn!("Forwarding uploads to {}", endpoint),
        None => warn!(
            "Upstream endpoint is not configured (set UPSTREAM_ENDPOINT); submissions will be rejected"
        ),
    }

    if config.upload.max_size == 0 {
        debug!("Upload size is unbounded");
    } else {
        debug!("Upload size limited to {} bytes", config.upload.max_size);
    }

    if config.jwt.demo_endpoint {
        warn!("Demo token endpoint is enabled at /api/v1/demo/token");
    }

    Ok(StartupContext { forwarder })
}
