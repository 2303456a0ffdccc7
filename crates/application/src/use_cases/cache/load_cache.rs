use crate::ports::RecordStorePort;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct LoadCacheUseCase {
    store: Arc<dyn RecordStorePort>,
    path: PathBuf,
}

impl LoadCacheUseCase {
    pub fn new(store: Arc<dyn RecordStorePort>, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }

    pub async fn execute(&self) -> usize {
        let loaded = self.store.load_from(&self.path).await;
        info!(
            path = %self.path.display(),
            records = loaded,
            "Record cache loaded"
        );
        loaded
    }
}
