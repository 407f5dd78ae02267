//! Stats module - Summary reporter and descriptive statistics

mod descriptive;
mod summary;

pub use descriptive::{describe, percentile, Describe};
pub use summary::{
    summarize, type_frequencies, DatasetSummary, Summary, TypeFrequency, TOP_TYPES,
};
