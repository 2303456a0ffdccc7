//! On-disk form of the record cache.
//!
//! The file is a pretty-printed JSON array, one object per live record:
//!
//! ```json
//! [
//!   {
//!     "name": "gaia.cs.umass.edu",
//!     "type": "A",
//!     "class": "IN",
//!     "ttl": 3600,
//!     "rdata": "128.119.245.12",
//!     "stored_at": 1760433600
//!   }
//! ]
//! ```

use super::entry::CachedRecord;
use ferrous_recursor_domain::{
    DomainError, DomainName, RecordClass, RecordData, RecordType, ResourceRecord,
};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub name: DomainName,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub class: RecordClass,
    pub ttl: i64,
    pub rdata: String,
    pub stored_at: u64,
}

impl From<&CachedRecord> for PersistedRecord {
    fn from(entry: &CachedRecord) -> Self {
        Self {
            name: entry.record.name.clone(),
            record_type: entry.record.record_type,
            class: entry.record.class,
            ttl: entry.record.ttl,
            rdata: entry.record.rdata.to_text(),
            stored_at: entry.stored_at,
        }
    }
}

impl PersistedRecord {
    pub fn into_cached(self) -> Result<CachedRecord, DomainError> {
        let rdata = RecordData::from_text(self.record_type, &self.rdata)?;
        let record = ResourceRecord::new(self.name, self.record_type, self.class, self.ttl, rdata);
        Ok(CachedRecord::new(record, self.stored_at))
    }
}

pub fn encode(records: &[PersistedRecord]) -> Result<String, DomainError> {
    serde_json::to_string_pretty(records)
        .map_err(|e| DomainError::Persistence(format!("Failed to encode cache: {}", e)))
}

pub fn decode(contents: &str) -> Result<Vec<PersistedRecord>, DomainError> {
    serde_json::from_str(contents)
        .map_err(|e| DomainError::Persistence(format!("Failed to decode cache: {}", e)))
}

/// Write `contents` next to `path` and rename it into place, so readers see
/// either the previous file or the complete new one.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), DomainError> {
    let tmp_path = temp_path_for(path);

    let write = || -> std::io::Result<()> {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        std::fs::rename(&tmp_path, path)
    };

    write().map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        DomainError::IoError(format!("Failed to write {}: {}", path.display(), e))
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "cache".into());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_form_uses_type_key() {
        let record = PersistedRecord {
            name: DomainName::parse("nl").unwrap(),
            record_type: RecordType::NS,
            class: RecordClass::IN,
            ttl: 172800,
            rdata: "ns1.dns.nl".to_string(),
            stored_at: 42,
        };
        let json = encode(std::slice::from_ref(&record)).unwrap();
        assert!(json.contains("\"type\": \"NS\""));
        assert!(json.contains("\"class\": \"IN\""));
        assert_eq!(decode(&json).unwrap(), vec![record]);
    }

    #[test]
    fn test_bad_rdata_fails_conversion() {
        let record = PersistedRecord {
            name: DomainName::parse("wiki.nl").unwrap(),
            record_type: RecordType::A,
            class: RecordClass::IN,
            ttl: 60,
            rdata: "ns1.dns.nl".to_string(),
            stored_at: 0,
        };
        assert!(record.into_cached().is_err());
    }

    #[test]
    fn test_truncated_file_fails_decode() {
        assert!(matches!(
            decode("[{\"name\": \"wiki.nl\", \"type\""),
            Err(DomainError::Persistence(_))
        ));
    }
}
