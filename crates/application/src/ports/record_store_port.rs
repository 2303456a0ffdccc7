use async_trait::async_trait;
use ferrous_recursor_domain::DomainError;
use std::path::Path;

/// Port for moving the record cache to and from disk.
#[async_trait]
pub trait RecordStorePort: Send + Sync {
    /// Replace the in-memory records with the contents of `path`.
    /// Unreadable files leave the store empty. Returns the number of live
    /// records loaded.
    async fn load_from(&self, path: &Path) -> usize;

    /// Write every live record to `path`, returning how many were written.
    fn persist_to(&self, path: &Path) -> Result<usize, DomainError>;
}
