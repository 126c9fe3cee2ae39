pub mod forwarder;

pub use forwarder::ForwarderService;
