//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_forwarder_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum ForwarderError {
            $($variant(String),)*
        }

        impl ForwarderError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ForwarderError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ForwarderError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ForwarderError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ForwarderError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ForwarderError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_forwarder_errors! {
    Validation("E001", "Validation Error"),
    Configuration("E002", "Configuration Error"),
    Timeout("E003", "Upstream Timeout"),
    Transport("E004", "Upstream Transport Error"),
    Serialization("E005", "Serialization Error"),
    Token("E006", "Token Error"),
    Multipart("E007", "Multipart Error"),
    UploadRejected("E008", "Upload Rejected"),
}

impl ForwarderError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ForwarderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ForwarderError {}

/// 展开错误链，reqwest 的顶层错误信息通常不包含真正的原因
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

// 为常见的错误类型实现 From trait
impl From<reqwest::Error> for ForwarderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ForwarderError::Timeout("The upstream endpoint did not respond in time".to_string())
        } else {
            ForwarderError::Transport(format!("Submission failed: {}", error_chain(&err)))
        }
    }
}

impl From<serde_json::Error> for ForwarderError {
    fn from(err: serde_json::Error) -> Self {
        ForwarderError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ForwarderError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ForwarderError::Token(err.to_string())
    }
}

impl From<actix_multipart::MultipartError> for ForwarderError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        ForwarderError::Multipart(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ForwarderError>;
