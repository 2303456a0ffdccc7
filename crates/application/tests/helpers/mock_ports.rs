#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_recursor_application::ports::{DnsResolver, RecordStorePort};
use ferrous_recursor_domain::{DomainError, DomainName, Resolution};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

pub struct MockDnsResolver {
    responses: Arc<RwLock<HashMap<String, Resolution>>>,
    error_responses: Arc<std::sync::RwLock<HashMap<String, DomainError>>>,
    calls: AtomicUsize,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            error_responses: Arc::new(std::sync::RwLock::new(HashMap::new())),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn set_response(&self, hostname: &str, resolution: Resolution) {
        self.responses
            .write()
            .await
            .insert(hostname.to_string(), resolution);
    }

    pub fn set_response_error(&self, hostname: &str, error: DomainError) {
        self.error_responses
            .write()
            .unwrap()
            .insert(hostname.to_string(), error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, hostname: &DomainName) -> Result<Resolution, DomainError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if let Some(err) = self
            .error_responses
            .read()
            .unwrap()
            .get(hostname.as_str())
            .cloned()
        {
            return Err(err);
        }

        self.responses
            .read()
            .await
            .get(hostname.as_str())
            .cloned()
            .ok_or_else(|| DomainError::ServersExhausted(hostname.to_string()))
    }
}

/// In-memory store that records which paths it was asked to use.
pub struct MockRecordStore {
    records: AtomicUsize,
    loaded_from: Mutex<Vec<PathBuf>>,
    persisted_to: Mutex<Vec<PathBuf>>,
    fail_persist: bool,
}

impl MockRecordStore {
    pub fn new(records: usize) -> Self {
        Self {
            records: AtomicUsize::new(records),
            loaded_from: Mutex::new(Vec::new()),
            persisted_to: Mutex::new(Vec::new()),
            fail_persist: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_persist: true,
            ..Self::new(0)
        }
    }

    pub fn loaded_from(&self) -> Vec<PathBuf> {
        self.loaded_from.lock().unwrap().clone()
    }

    pub fn persisted_to(&self) -> Vec<PathBuf> {
        self.persisted_to.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStorePort for MockRecordStore {
    async fn load_from(&self, path: &Path) -> usize {
        self.loaded_from.lock().unwrap().push(path.to_path_buf());
        self.records.load(Ordering::Relaxed)
    }

    fn persist_to(&self, path: &Path) -> Result<usize, DomainError> {
        if self.fail_persist {
            return Err(DomainError::Persistence("disk full".to_string()));
        }
        self.persisted_to.lock().unwrap().push(path.to_path_buf());
        Ok(self.records.load(Ordering::Relaxed))
    }
}
