use crate::errors::ForwarderError;

/// API 响应中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 1000,
    FileRequired = 1001,
    UpstreamNotConfigured = 1002,
    UpstreamTimeout = 1003,
    UpstreamUnreachable = 1004,
    TokenIssueFailed = 1005,
    UploadRejected = 1006,
}

impl From<&ForwarderError> for ErrorCode {
    fn from(err: &ForwarderError) -> Self {
        match err {
            ForwarderError::Validation(_) => ErrorCode::FileRequired,
            ForwarderError::UploadRejected(_) => ErrorCode::UploadRejected,
            ForwarderError::Multipart(_) => ErrorCode::BadRequest,
            ForwarderError::Configuration(_) => ErrorCode::UpstreamNotConfigured,
            ForwarderError::Timeout(_) => ErrorCode::UpstreamTimeout,
            ForwarderError::Transport(_) | ForwarderError::Serialization(_) => {
                ErrorCode::UpstreamUnreachable
            }
            ForwarderError::Token(_) => ErrorCode::TokenIssueFailed,
        }
    }
}
