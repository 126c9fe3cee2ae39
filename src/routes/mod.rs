pub mod api;

pub mod frontend;

pub mod system;

pub mod token;

pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use api::configure_api_routes;
pub use frontend::configure_frontend_routes;
pub use system::configure_system_routes;
pub use token::configure_token_routes;
pub use upload::configure_upload_routes;
