//! Data Cleaner Module
//! Turns raw export rows into the canonical dataset.
//!
//! Per row, in order: coerce and fill the ICMP type code, drop rows without
//! coordinates, parse the timestamp (a bad one fails the whole load), then map
//! the code to its label.

use crate::config::PipelineConfig;
use crate::data::icmp::{is_known_code, label_for_code, UNKNOWN_TYPE};
use crate::data::loader::{is_missing, DataLoader, MalformedSourceError};
use crate::data::record::{CanonicalDataset, CanonicalRecord, CleaningStats, RawRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

/// Timestamp layouts, tried in order. Two-digit years come before four-digit
/// ones because `%Y` would happily read `13` as year 13.
const DATETIME_FORMATS: [&str; 12] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];

/// Load and clean a CSV stream in one go.
pub fn prepare<R: Read>(
    source: R,
    config: &PipelineConfig,
) -> Result<CanonicalDataset, MalformedSourceError> {
    let raw = DataLoader::new(config).load(source)?;
    DataCleaner::new(config).clean(raw)
}

/// Load and clean a CSV file.
pub fn prepare_file(
    path: impl AsRef<Path>,
    config: &PipelineConfig,
) -> Result<CanonicalDataset, MalformedSourceError> {
    let raw = DataLoader::new(config).load_file(path)?;
    DataCleaner::new(config).clean(raw)
}

/// Render a type cell as a code string. Numbers take their float form so `8`
/// and `8.0` name the same code; missing cells stay `None`.
pub fn coerce_type_code(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if is_missing(value) {
        return None;
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(format!("{number:?}")),
        _ => Some(value.to_string()),
    }
}

/// Missing codes become the literal `Unknown` before any label lookup.
pub fn fill_missing_type(code: Option<String>) -> String {
    code.unwrap_or_else(|| UNKNOWN_TYPE.to_string())
}

/// Label for a filled code.
pub fn map_type(code: &str) -> &'static str {
    label_for_code(code)
}

/// Parse a timestamp in any of the accepted layouts. Offsets are dropped and
/// the wall-clock time kept.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Applies the cleaning steps to raw rows.
pub struct DataCleaner<'a> {
    config: &'a PipelineConfig,
}

impl<'a> DataCleaner<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    pub fn clean(&self, raw: Vec<RawRecord>) -> Result<CanonicalDataset, MalformedSourceError> {
        let mut stats = CleaningStats {
            raw_rows: raw.len(),
            ..CleaningStats::default()
        };
        let mut records = Vec::with_capacity(raw.len());

        for (idx, row) in raw.into_iter().enumerate() {
            // 1-based data row, header excluded
            let row_number = idx + 1;

            let code = coerce_type_code(row.type_code.as_deref());
            if code.is_none() {
                stats.missing_type += 1;
            }
            let code = fill_missing_type(code);

            let Some((latitude, longitude)) = Self::coordinates(&row, row_number)? else {
                stats.dropped_missing_coordinates += 1;
                continue;
            };

            let datetime = match row.datetime.as_deref() {
                Some(text) if !is_missing(text) => parse_datetime(text).ok_or_else(|| {
                    MalformedSourceError::UnparseableDatetime {
                        row: row_number,
                        value: text.to_string(),
                    }
                })?,
                _ => return Err(MalformedSourceError::MissingDatetime { row: row_number }),
            };

            if !is_known_code(&code) {
                stats.unmapped_type += 1;
            }

            records.push(CanonicalRecord {
                host: row.host,
                src: row.src,
                dst: row.dst,
                proto: row.proto,
                attack_type: map_type(&code).to_string(),
                latitude,
                longitude,
                datetime,
            });
        }

        self.report(&stats);
        tracing::info!(
            "Cleaned {} of {} rows into canonical records",
            records.len(),
            stats.raw_rows
        );

        Ok(CanonicalDataset::from_parts(records, stats))
    }

    /// `None` when either coordinate is missing; an error when one is present
    /// but not a number.
    fn coordinates(
        row: &RawRecord,
        row_number: usize,
    ) -> Result<Option<(f64, f64)>, MalformedSourceError> {
        let (Some(lat), Some(lon)) = (row.latitude.as_deref(), row.longitude.as_deref()) else {
            return Ok(None);
        };
        if is_missing(lat) || is_missing(lon) {
            return Ok(None);
        }

        let latitude = Self::parse_coordinate(lat, "latitude", row_number)?;
        let longitude = Self::parse_coordinate(lon, "longitude", row_number)?;
        if latitude.is_nan() || longitude.is_nan() {
            return Ok(None);
        }
        Ok(Some((latitude, longitude)))
    }

    fn parse_coordinate(
        value: &str,
        column: &'static str,
        row_number: usize,
    ) -> Result<f64, MalformedSourceError> {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| MalformedSourceError::UnparseableCoordinate {
                row: row_number,
                column,
                value: value.to_string(),
            })
    }

    fn report(&self, stats: &CleaningStats) {
        if stats.dropped_missing_coordinates > 0 {
            self.config.report_quality(format_args!(
                "Dropped {} rows without latitude/longitude",
                stats.dropped_missing_coordinates
            ));
        }
        if stats.missing_type > 0 {
            self.config.report_quality(format_args!(
                "{} rows had no ICMP type code, filled as {UNKNOWN_TYPE}",
                stats.missing_type
            ));
        }
        if stats.unmapped_type > 0 {
            self.config.report_quality(format_args!(
                "{} ICMP type codes outside the label table mapped to {UNKNOWN_TYPE}",
                stats.unmapped_type
            ));
        }
    }
}
