pub mod resolve_identity;

pub use resolve_identity::ResolveIdentity;
