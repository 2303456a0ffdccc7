use serde::{Deserialize, Serialize};

use crate::dns_record::RecordType;

/// Record cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_false")]
    pub enabled: bool,

    /// When > 0, replaces the TTL of every record entering the cache
    #[serde(default)]
    pub ttl_override: i64,

    /// Cache file loaded at startup and written at shutdown
    #[serde(default = "default_cache_path")]
    pub path: String,

    /// Record types admitted into the cache
    #[serde(default = "default_cacheable_types")]
    pub cacheable_types: Vec<RecordType>,

    /// Decode attempts before a corrupt cache file is ignored
    #[serde(default = "default_load_attempts")]
    pub load_attempts: u32,

    /// Pause between decode attempts in milliseconds
    #[serde(default = "default_load_retry_delay_ms")]
    pub load_retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_override: 0,
            path: default_cache_path(),
            cacheable_types: default_cacheable_types(),
            load_attempts: default_load_attempts(),
            load_retry_delay_ms: default_load_retry_delay_ms(),
        }
    }
}

fn default_false() -> bool {
    false
}

fn default_cache_path() -> String {
    "cache/cache.json".to_string()
}

fn default_cacheable_types() -> Vec<RecordType> {
    vec![RecordType::A, RecordType::NS, RecordType::CNAME]
}

fn default_load_attempts() -> u32 {
    3
}

fn default_load_retry_delay_ms() -> u64 {
    50
}
