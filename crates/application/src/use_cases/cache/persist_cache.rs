use crate::ports::RecordStorePort;
use ferrous_recursor_domain::DomainError;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub struct PersistCacheUseCase {
    store: Arc<dyn RecordStorePort>,
    path: PathBuf,
}

impl PersistCacheUseCase {
    pub fn new(store: Arc<dyn RecordStorePort>, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }

    pub fn execute(&self) -> Result<usize, DomainError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DomainError::Persistence(format!(
                        "Cannot create cache directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        match self.store.persist_to(&self.path) {
            Ok(written) => {
                info!(
                    path = %self.path.display(),
                    records = written,
                    "Record cache persisted"
                );
                Ok(written)
            }
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Failed to persist record cache");
                Err(e)
            }
        }
    }
}
