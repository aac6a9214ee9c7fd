pub mod extractor;
pub mod identity;
pub mod middleware;
pub mod role_cache;

pub use identity::AuthContext;
pub use role_cache::RoleCache;
