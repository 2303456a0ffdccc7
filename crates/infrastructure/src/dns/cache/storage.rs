use super::clock::{Clock, SystemClock};
use super::entry::CachedRecord;
use super::persistence::{self, PersistedRecord};
use async_trait::async_trait;
use dashmap::DashMap;
use ferrous_recursor_application::ports::RecordStorePort;
use ferrous_recursor_domain::{
    CacheConfig, DomainError, DomainName, RecordClass, RecordType, ResourceRecord,
};
use rustc_hash::FxBuildHasher;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct CacheSettings {
    /// When > 0, every stored record carries this TTL instead of its own.
    pub ttl_override: i64,
    pub cacheable_types: Vec<RecordType>,
    pub load_attempts: u32,
    pub load_retry_delay: Duration,
}

impl CacheSettings {
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            ttl_override: config.ttl_override,
            cacheable_types: config.cacheable_types.clone(),
            load_attempts: config.load_attempts.max(1),
            load_retry_delay: Duration::from_millis(config.load_retry_delay_ms),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

/// TTL-bounded resource-record cache.
///
/// Records are grouped by owner name. Expired records are dropped lazily,
/// when a lookup touches their `(name, type, class)` triple or when the cache
/// is persisted; nothing sweeps in the background.
pub struct RecordCache {
    records: DashMap<DomainName, Vec<CachedRecord>, FxBuildHasher>,
    settings: CacheSettings,
    clock: Arc<dyn Clock>,
}

impl RecordCache {
    pub fn new(settings: CacheSettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: CacheSettings, clock: Arc<dyn Clock>) -> Self {
        debug!(
            ttl_override = settings.ttl_override,
            cacheable_types = ?settings.cacheable_types,
            "Initializing record cache"
        );

        Self {
            records: DashMap::with_hasher(FxBuildHasher),
            settings,
            clock,
        }
    }

    pub fn is_cacheable(&self, record_type: RecordType) -> bool {
        self.settings.cacheable_types.contains(&record_type)
    }

    /// All live records for the exact `(name, record_type, class)` triple.
    pub fn lookup(
        &self,
        name: &DomainName,
        record_type: RecordType,
        class: RecordClass,
    ) -> Vec<ResourceRecord> {
        let now = self.clock.now_secs();

        let (found, now_empty) = {
            let Some(mut slot) = self.records.get_mut(name) else {
                return Vec::new();
            };

            let before = slot.len();
            slot.retain(|entry| {
                !(entry.record.matches(name, record_type, class) && entry.is_expired(now))
            });
            let purged = before - slot.len();
            if purged > 0 {
                debug!(name = %name, record_type = %record_type, purged, "Purged expired records");
            }

            let found: Vec<ResourceRecord> = slot
                .iter()
                .filter(|entry| entry.record.matches(name, record_type, class))
                .map(|entry| entry.record.clone())
                .collect();
            (found, slot.is_empty())
        };

        if now_empty {
            self.records.remove_if(name, |_, slot| slot.is_empty());
        }

        found
    }

    /// Store `record`, replacing any record with the same owner and rdata.
    ///
    /// The cache is untouched when the record is rejected.
    pub fn add(&self, mut record: ResourceRecord) -> Result<(), DomainError> {
        if record.ttl <= 0 {
            return Err(DomainError::InvalidTtl {
                name: record.name.to_string(),
                ttl: record.ttl,
            });
        }
        if !self.is_cacheable(record.record_type) {
            return Err(DomainError::UnsupportedType(record.record_type));
        }

        if self.settings.ttl_override > 0 {
            record.ttl = self.settings.ttl_override;
        }

        let stored_at = self.clock.now_secs();
        self.store(CachedRecord::new(record, stored_at));
        Ok(())
    }

    fn store(&self, entry: CachedRecord) {
        let mut slot = self.records.entry(entry.record.name.clone()).or_default();
        slot.retain(|existing| existing.record.rdata != entry.record.rdata);
        slot.push(entry);
    }

    /// Number of stored records, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.records.iter().map(|slot| slot.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records.clear();
    }

    /// Drop every expired record. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_secs();
        let mut removed = 0;

        self.records.retain(|_, slot| {
            let before = slot.len();
            slot.retain(|entry| !entry.is_expired(now));
            removed += before - slot.len();
            !slot.is_empty()
        });

        removed
    }

    /// Live entries, ordered by name so the persisted file is stable.
    pub fn snapshot(&self) -> Vec<CachedRecord> {
        let now = self.clock.now_secs();
        let mut entries: Vec<CachedRecord> = self
            .records
            .iter()
            .flat_map(|slot| {
                slot.value()
                    .iter()
                    .filter(|entry| !entry.is_expired(now))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();

        entries.sort_by(|a, b| {
            a.record
                .name
                .cmp(&b.record.name)
                .then_with(|| a.record.record_type.to_u16().cmp(&b.record.record_type.to_u16()))
                .then_with(|| a.stored_at.cmp(&b.stored_at))
        });
        entries
    }

    /// Drop expired records and write the rest to `path`.
    pub fn persist(&self, path: &Path) -> Result<usize, DomainError> {
        let purged = self.purge_expired();
        let entries = self.snapshot();

        let persisted: Vec<PersistedRecord> = entries.iter().map(PersistedRecord::from).collect();
        let contents = persistence::encode(&persisted)?;
        persistence::write_atomic(path, &contents)?;

        debug!(
            path = %path.display(),
            written = persisted.len(),
            purged,
            "Record cache written"
        );
        Ok(persisted.len())
    }

    /// Repopulate the cache from `path`.
    ///
    /// A missing file yields an empty cache. A file that fails to decode is
    /// re-read up to `load_attempts` times, since another process may be
    /// in the middle of replacing it; after that the cache is left empty.
    pub async fn load(&self, path: &Path) -> usize {
        let attempts = self.settings.load_attempts.max(1);

        for attempt in 1..=attempts {
            let contents = match tokio::fs::read_to_string(path).await {
                Ok(contents) => contents,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    info!(path = %path.display(), "No cache file, starting empty");
                    self.clear();
                    return 0;
                }
                Err(e) => {
                    debug!(path = %path.display(), attempt, error = %e, "Cache file unreadable");
                    self.pause_before_retry(attempt, attempts).await;
                    continue;
                }
            };

            match persistence::decode(&contents) {
                Ok(persisted) => return self.replace_with(persisted),
                Err(e) => {
                    debug!(path = %path.display(), attempt, error = %e, "Cache file corrupt");
                    self.pause_before_retry(attempt, attempts).await;
                }
            }
        }

        warn!(
            path = %path.display(),
            attempts,
            "Giving up on cache file, starting with an empty cache"
        );
        self.clear();
        0
    }

    async fn pause_before_retry(&self, attempt: u32, attempts: u32) {
        if attempt < attempts && !self.settings.load_retry_delay.is_zero() {
            tokio::time::sleep(self.settings.load_retry_delay).await;
        }
    }

    fn replace_with(&self, persisted: Vec<PersistedRecord>) -> usize {
        self.clear();
        let now = self.clock.now_secs();
        let mut loaded = 0;

        for row in persisted {
            let entry = match row.into_cached() {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "Skipping undecodable cache row");
                    continue;
                }
            };

            if entry.record.ttl <= 0
                || !self.is_cacheable(entry.record.record_type)
                || entry.is_expired(now)
            {
                continue;
            }

            self.store(entry);
            loaded += 1;
        }

        loaded
    }
}

#[async_trait]
impl RecordStorePort for RecordCache {
    async fn load_from(&self, path: &Path) -> usize {
        self.load(path).await
    }

    fn persist_to(&self, path: &Path) -> Result<usize, DomainError> {
        self.persist(path)
    }
}
