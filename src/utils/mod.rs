pub mod html;
pub mod jwt;
pub mod parameter_error_handler;
pub mod url;

pub use html::escape_html;
pub use jwt::DemoTokenIssuer;
pub use parameter_error_handler::json_error_handler;
pub use url::submission_url;
