pub mod cache;
pub mod resolve_hostname;

// Re-export use cases
pub use cache::{LoadCacheUseCase, PersistCacheUseCase};
pub use resolve_hostname::ResolveHostnameUseCase;
