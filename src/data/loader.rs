//! CSV Data Loader Module
//! Reads the honeypot export with Polars and hands back untyped rows.

use crate::config::{PipelineConfig, StrayColumnPolicy};
use crate::data::record::RawRecord;
use polars::prelude::*;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;

/// Columns the pipeline reads. Anything else in the export is ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "host",
    "src",
    "dst",
    "proto",
    "type",
    "latitude",
    "longitude",
    "datetime",
];

/// Cell contents the export uses for "no value".
const MISSING_TOKENS: [&str; 8] = ["", "NaN", "nan", "NA", "N/A", "null", "NULL", "None"];

pub(crate) fn is_missing(value: &str) -> bool {
    MISSING_TOKENS.contains(&value.trim())
}

/// The source could not be turned into a canonical dataset.
#[derive(Error, Debug)]
pub enum MalformedSourceError {
    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Required column missing: {0}")]
    MissingColumn(String),
    #[error("Stray export column missing: {0}")]
    MissingStrayColumn(String),
    #[error("Row {row}: {column} is not a number: {value:?}")]
    UnparseableCoordinate {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("Row {row}: datetime is missing")]
    MissingDatetime { row: usize },
    #[error("Row {row}: unparseable datetime {value:?}")]
    UnparseableDatetime { row: usize, value: String },
}

/// Handles CSV loading with Polars, every column read as text.
pub struct DataLoader<'a> {
    config: &'a PipelineConfig,
}

impl<'a> DataLoader<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Load raw rows from a CSV file on disk.
    pub fn load_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<RawRecord>, MalformedSourceError> {
        let path = path.as_ref();
        tracing::info!("Reading honeypot export from {}", path.display());
        self.load(File::open(path)?)
    }

    /// Load raw rows from any byte stream holding CSV text.
    pub fn load<R: Read>(&self, source: R) -> Result<Vec<RawRecord>, MalformedSourceError> {
        let df = self.read_frame(source)?;
        Self::records(&df)
    }

    /// Parse the CSV, check the schema and strip the stray export column.
    pub fn read_frame<R: Read>(&self, mut source: R) -> Result<DataFrame, MalformedSourceError> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        let blank_headers = blank_header_positions(&bytes);

        // A zero schema inference length keeps every column as String, so
        // coercion stays under the cleaner's control.
        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        Self::name_blank_headers(&mut df, &blank_headers)?;
        tracing::debug!(
            "Parsed {} rows, columns: {:?}",
            df.height(),
            Self::column_names(&df)
        );

        let names = Self::column_names(&df);
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|required| !names.iter().any(|name| name == *required))
        {
            return Err(MalformedSourceError::MissingColumn(missing.to_string()));
        }

        self.drop_stray_column(&mut df, &names)?;
        Ok(df)
    }

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Polars names blank header cells `column_{n}` (1-based); the export's
    /// own convention is `Unnamed: {index}` (0-based). Only cells that were
    /// blank in the source are renamed.
    fn name_blank_headers(
        df: &mut DataFrame,
        blank: &[usize],
    ) -> Result<(), MalformedSourceError> {
        let names = Self::column_names(df);
        for (idx, name) in names.iter().enumerate() {
            if blank.contains(&idx) {
                df.rename(name, format!("Unnamed: {idx}").into())?;
            }
        }
        Ok(())
    }

    fn drop_stray_column(
        &self,
        df: &mut DataFrame,
        names: &[String],
    ) -> Result<(), MalformedSourceError> {
        let stray = self.config.stray_column.as_str();
        if names.iter().any(|name| name == stray) {
            df.drop_in_place(stray)?;
            tracing::debug!("Dropped stray column {:?}", stray);
            return Ok(());
        }

        match self.config.stray_policy {
            StrayColumnPolicy::Require => {
                Err(MalformedSourceError::MissingStrayColumn(stray.to_string()))
            }
            StrayColumnPolicy::Tolerate => {
                self.config
                    .report_quality(format_args!("Stray column {stray:?} not present in source"));
                Ok(())
            }
        }
    }

    /// Extract the pipeline's columns row by row.
    pub fn records(df: &DataFrame) -> Result<Vec<RawRecord>, MalformedSourceError> {
        let [host, src, dst, proto, type_code, latitude, longitude, datetime] =
            REQUIRED_COLUMNS.map(|name| Self::string_column(df, name));

        let mut host = host?.into_iter();
        let mut src = src?.into_iter();
        let mut dst = dst?.into_iter();
        let mut proto = proto?.into_iter();
        let mut type_code = type_code?.into_iter();
        let mut latitude = latitude?.into_iter();
        let mut longitude = longitude?.into_iter();
        let mut datetime = datetime?.into_iter();

        let records = (0..df.height())
            .map(|_| RawRecord {
                host: host.next().flatten(),
                src: src.next().flatten(),
                dst: dst.next().flatten(),
                proto: proto.next().flatten(),
                type_code: type_code.next().flatten(),
                latitude: latitude.next().flatten(),
                longitude: longitude.next().flatten(),
                datetime: datetime.next().flatten(),
            })
            .collect();

        Ok(records)
    }

    fn string_column(
        df: &DataFrame,
        name: &str,
    ) -> Result<Vec<Option<String>>, MalformedSourceError> {
        let column = df
            .column(name)
            .map_err(|_| MalformedSourceError::MissingColumn(name.to_string()))?;
        let as_text = column.cast(&DataType::String)?;
        let values = as_text.as_materialized_series().str()?;

        Ok(values
            .into_iter()
            .map(|value| value.filter(|v| !is_missing(v)).map(str::to_string))
            .collect())
    }
}

/// Positions of empty cells in the header line. Quoted commas do not split.
fn blank_header_positions(bytes: &[u8]) -> Vec<usize> {
    let line = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    let line = String::from_utf8_lossy(line);
    let line = line.trim_start_matches('\u{feff}').trim_end_matches('\r');

    let mut blank = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut idx = 0;
    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                if cell.trim().is_empty() {
                    blank.push(idx);
                }
                cell.clear();
                idx += 1;
            }
            _ => cell.push(ch),
        }
    }
    if cell.trim().is_empty() {
        blank.push(idx);
    }
    blank
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "host,src,dst,proto,type,latitude,longitude,datetime,";

    fn load(csv: &str, config: &PipelineConfig) -> Result<Vec<RawRecord>, MalformedSourceError> {
        DataLoader::new(config).load(csv.as_bytes())
    }

    #[test]
    fn reads_rows_and_keeps_blanks_as_none() {
        let csv = format!("{HEADER}\nzeppo-norcal,10,20,ICMP,,37.3,,2013-03-03 21:53:59,\n");
        let config = PipelineConfig::new().with_stray_column("Unnamed: 8");
        let rows = load(&csv, &config).expect("load");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].host.as_deref(), Some("zeppo-norcal"));
        assert_eq!(rows[0].type_code, None);
        assert_eq!(rows[0].latitude.as_deref(), Some("37.3"));
        assert_eq!(rows[0].longitude, None);
        assert_eq!(rows[0].datetime.as_deref(), Some("2013-03-03 21:53:59"));
    }

    #[test]
    fn numbers_stay_textual() {
        let csv = format!("{HEADER}\nh,1,2,TCP,8.0,1.50,2,2013-03-03,\n");
        let config = PipelineConfig::new().with_stray_column("Unnamed: 8");
        let rows = load(&csv, &config).expect("load");
        assert_eq!(rows[0].type_code.as_deref(), Some("8.0"));
        assert_eq!(rows[0].latitude.as_deref(), Some("1.50"));
    }

    #[test]
    fn stray_column_is_dropped() {
        let csv = format!("{HEADER}\nh,1,2,TCP,8.0,1,2,2013-03-03,\n");
        let config = PipelineConfig::new().with_stray_column("Unnamed: 8");
        let df = DataLoader::new(&config)
            .read_frame(csv.as_bytes())
            .expect("frame");
        let names = DataLoader::column_names(&df);
        assert_eq!(names.len(), 8);
        assert!(!names.iter().any(|n| n.starts_with("Unnamed")));
    }

    #[test]
    fn missing_stray_column_fails_when_required() {
        let csv = "host,src,dst,proto,type,latitude,longitude,datetime\nh,1,2,TCP,8.0,1,2,2013-03-03\n";
        let err = load(csv, &PipelineConfig::default()).expect_err("must fail");
        assert!(matches!(err, MalformedSourceError::MissingStrayColumn(ref c) if c == "Unnamed: 15"));
    }

    #[test]
    fn missing_stray_column_tolerated_when_configured() {
        let csv = "host,src,dst,proto,type,latitude,longitude,datetime\nh,1,2,TCP,8.0,1,2,2013-03-03\n";
        let config = PipelineConfig::new().with_stray_policy(StrayColumnPolicy::Tolerate);
        let rows = load(csv, &config).expect("load");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let csv = "host,src,proto,type,latitude,longitude,datetime,\nh,1,TCP,8.0,1,2,2013-03-03,\n";
        let err = load(csv, &PipelineConfig::default()).expect_err("must fail");
        assert!(matches!(err, MalformedSourceError::MissingColumn(ref c) if c == "dst"));
    }

    #[test]
    fn missing_tokens_are_absent_in_every_column() {
        let csv = format!("{HEADER}\nNA,null,,NaN,8.0,1,2,2013-03-03,\n");
        let config = PipelineConfig::new().with_stray_column("Unnamed: 8");
        let rows = load(&csv, &config).expect("load");
        assert_eq!(rows[0].host, None);
        assert_eq!(rows[0].src, None);
        assert_eq!(rows[0].dst, None);
        assert_eq!(rows[0].proto, None);
        assert_eq!(rows[0].type_code.as_deref(), Some("8.0"));
    }

    #[test]
    fn literal_column_header_keeps_its_name() {
        let csv = "host,src,dst,proto,type,latitude,longitude,datetime,column_9\n\
                   h,1,2,TCP,8.0,1,2,2013-03-03,x\n";
        let config = PipelineConfig::new().with_stray_column("column_9");
        let df = DataLoader::new(&config)
            .read_frame(csv.as_bytes())
            .expect("frame");
        assert_eq!(DataLoader::column_names(&df).len(), 8);
    }

    #[test]
    fn blank_header_positions_follow_the_header_line() {
        assert_eq!(blank_header_positions(b"a,b,\n1,2,3\n"), vec![2]);
        assert_eq!(blank_header_positions(b"a,,\"x,y\",d\r\n"), vec![1]);
        assert_eq!(blank_header_positions(b"a,column_3,c\n"), Vec::<usize>::new());
    }

    #[test]
    fn header_only_source_yields_no_rows() {
        let config = PipelineConfig::new().with_stray_column("Unnamed: 8");
        let rows = load(&format!("{HEADER}\n"), &config).expect("load");
        assert!(rows.is_empty());
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let config = PipelineConfig::default();
        let err = DataLoader::new(&config)
            .load_file("/definitely/not/here.csv")
            .expect_err("must fail");
        assert!(matches!(err, MalformedSourceError::Io(_)));
    }
}
