mod load_cache;
mod persist_cache;

pub use load_cache::LoadCacheUseCase;
pub use persist_cache::PersistCacheUseCase;
