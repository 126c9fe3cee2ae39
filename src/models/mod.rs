pub mod common;
pub mod token;
pub mod upload;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;
