use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Upstream, UpstreamResponse};
use crate::errors::{ForwarderError, Result};

/// 替身的预设行为
#[derive(Debug, Clone)]
pub enum Reply {
    Respond { status: u16, body: String },
    Timeout,
    Fail(String),
}

/// 记录调用次数、最后一次 URL 与请求体的上游替身
pub struct RecordingUpstream {
    reply: Reply,
    calls: AtomicUsize,
    last_url: Mutex<Option<String>>,
    last_body: Mutex<Option<Vec<u8>>>,
}

impl RecordingUpstream {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_url: Mutex::new(None),
            last_body: Mutex::new(None),
        }
    }

    pub fn responding(status: u16, body: &str) -> Self {
        Self::new(Reply::Respond {
            status,
            body: body.to_string(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }

    pub fn last_json(&self) -> Option<serde_json::Value> {
        self.last_body
            .lock()
            .unwrap()
            .as_ref()
            .map(|body| serde_json::from_slice(body).unwrap())
    }
}

#[async_trait::async_trait]
impl Upstream for RecordingUpstream {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<UpstreamResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(url.to_string());
        *self.last_body.lock().unwrap() = Some(body);

        match &self.reply {
            Reply::Respond { status, body } => Ok(UpstreamResponse {
                status: *status,
                body: body.clone(),
            }),
            Reply::Timeout => Err(ForwarderError::timeout(
                "The upstream endpoint did not respond in time",
            )),
            Reply::Fail(msg) => Err(ForwarderError::transport(format!(
                "Submission failed: {msg}"
            ))),
        }
    }
}
