//! Record Types
//! Raw rows as read from the export and the cleaned, typed rows built from them.

use crate::data::icmp::{code_for_label, UNKNOWN_TYPE};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Format used when canonical timestamps are written back out as text.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One row of the export, every field still untyped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub host: Option<String>,
    pub src: Option<String>,
    pub dst: Option<String>,
    pub proto: Option<String>,
    pub type_code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub datetime: Option<String>,
}

/// A cleaned row, safe for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub host: Option<String>,
    pub src: Option<String>,
    pub dst: Option<String>,
    pub proto: Option<String>,
    /// Mapped ICMP label, or `Unknown`.
    pub attack_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub datetime: NaiveDateTime,
}

impl CanonicalRecord {
    /// Calendar day of the event, timezone-naive.
    pub fn day(&self) -> NaiveDate {
        self.datetime.date()
    }

    /// Render back into the raw export shape, labels turned back into codes.
    pub fn to_raw(&self) -> RawRecord {
        let code = code_for_label(&self.attack_type).unwrap_or(UNKNOWN_TYPE);
        RawRecord {
            host: self.host.clone(),
            src: self.src.clone(),
            dst: self.dst.clone(),
            proto: self.proto.clone(),
            type_code: Some(code.to_string()),
            latitude: Some(self.latitude.to_string()),
            longitude: Some(self.longitude.to_string()),
            datetime: Some(self.datetime.format(DATETIME_FORMAT).to_string()),
        }
    }
}

/// Bookkeeping from one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    pub raw_rows: usize,
    pub dropped_missing_coordinates: usize,
    pub missing_type: usize,
    pub unmapped_type: usize,
}

/// The cleaned table. Immutable once built; only the cleaner constructs it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalDataset {
    records: Vec<CanonicalRecord>,
    stats: CleaningStats,
}

impl CanonicalDataset {
    pub(crate) fn from_parts(records: Vec<CanonicalRecord>, stats: CleaningStats) -> Self {
        Self { records, stats }
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cleaning_stats(&self) -> CleaningStats {
        self.stats
    }

    /// Rows in the source before cleaning.
    pub fn raw_row_count(&self) -> usize {
        self.stats.raw_rows
    }

    /// Raw form of every record, for feeding back through the cleaner.
    pub fn to_raw_records(&self) -> Vec<RawRecord> {
        self.records.iter().map(CanonicalRecord::to_raw).collect()
    }
}

impl<'a> IntoIterator for &'a CanonicalDataset {
    type Item = &'a CanonicalRecord;
    type IntoIter = std::slice::Iter<'a, CanonicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_datetime;

    fn record(attack_type: &str, datetime: &str) -> CanonicalRecord {
        CanonicalRecord {
            host: Some("groucho-oregon".to_string()),
            src: Some("1511998111".to_string()),
            dst: None,
            proto: Some("ICMP".to_string()),
            attack_type: attack_type.to_string(),
            latitude: 45.5,
            longitude: -122.68,
            datetime: parse_datetime(datetime).expect("valid datetime"),
        }
    }

    #[test]
    fn to_raw_restores_code_from_label() {
        let raw = record("Echo Request (ICMP)", "2013-03-03 21:53:59").to_raw();
        assert_eq!(raw.type_code.as_deref(), Some("8.0"));
        assert_eq!(raw.latitude.as_deref(), Some("45.5"));
        assert_eq!(raw.longitude.as_deref(), Some("-122.68"));
        assert_eq!(raw.datetime.as_deref(), Some("2013-03-03 21:53:59"));
        assert_eq!(raw.dst, None);
    }

    #[test]
    fn to_raw_keeps_fractional_seconds() {
        let raw = record("Unknown", "2013-03-03 21:53:59.250").to_raw();
        assert_eq!(raw.type_code.as_deref(), Some("Unknown"));
        assert_eq!(raw.datetime.as_deref(), Some("2013-03-03 21:53:59.250"));
    }

    #[test]
    fn day_truncates_time() {
        let rec = record("Unknown", "2013-03-03 23:59:59");
        assert_eq!(rec.day(), NaiveDate::from_ymd_opt(2013, 3, 3).expect("date"));
    }

    #[test]
    fn default_dataset_is_empty() {
        let dataset = CanonicalDataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.raw_row_count(), 0);
        assert!(dataset.to_raw_records().is_empty());
    }
}
