use std::sync::Arc;

use crate::config::AppSettings;
use crate::services::ForwarderService;
use crate::upstream::testing::RecordingUpstream;

const BOUNDARY: &str = "----forwarder-test-boundary";

pub fn settings() -> AppSettings {
    AppSettings {
        system_name: "Upload Forwarder".to_string(),
        environment: "test".to_string(),
        log_level: "debug".to_string(),
    }
}

pub fn test_service(
    upstream: Arc<RecordingUpstream>,
    endpoint: Option<&str>,
    max_upload_size: usize,
) -> ForwarderService {
    ForwarderService::new(upstream, endpoint.map(str::to_string), max_upload_size)
}

/// 构造 multipart/form-data 请求体：(字段名, 文件名, 内容)
pub fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
