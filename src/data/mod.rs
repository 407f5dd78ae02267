//! Data module - CSV loading and cleaning

pub mod icmp;
mod cleaner;
mod loader;
mod record;

pub use cleaner::{
    coerce_type_code, fill_missing_type, map_type, parse_datetime, prepare, prepare_file,
    DataCleaner,
};
pub use loader::{DataLoader, MalformedSourceError, REQUIRED_COLUMNS};
pub use record::{CanonicalDataset, CanonicalRecord, CleaningStats, RawRecord};
