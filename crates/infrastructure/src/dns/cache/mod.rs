pub mod clock;
pub mod entry;
pub mod persistence;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CachedRecord;
pub use persistence::PersistedRecord;
pub use storage::{CacheSettings, RecordCache};
