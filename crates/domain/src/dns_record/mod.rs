pub mod record;
pub mod record_class;
pub mod record_data;
pub mod record_type;

pub use record::ResourceRecord;
pub use record_class::RecordClass;
pub use record_data::{RecordData, SoaData};
pub use record_type::RecordType;
