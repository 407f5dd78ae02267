//! Summary Reporter
//! Dataset-wide counts, covered interval, top attack types and coordinate
//! statistics.

use crate::data::CanonicalDataset;
use crate::stats::descriptive::{describe, Describe};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// How many entries the attack-type frequency table keeps.
pub const TOP_TYPES: usize = 5;

/// Occurrences of one attack type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeFrequency {
    pub attack_type: String,
    pub count: usize,
}

/// Statistics over a non-empty dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub unique_hosts: usize,
    pub first_seen: NaiveDateTime,
    pub last_seen: NaiveDateTime,
    /// Most frequent types, highest count first, ties in first-seen order.
    pub top_types: Vec<TypeFrequency>,
    pub latitude: Describe,
    pub longitude: Describe,
}

/// Result of [`summarize`]. An empty dataset has no interval and no
/// statistics, so it gets its own variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Summary {
    Empty,
    Populated(DatasetSummary),
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        matches!(self, Summary::Empty)
    }

    pub fn as_populated(&self) -> Option<&DatasetSummary> {
        match self {
            Summary::Empty => None,
            Summary::Populated(summary) => Some(summary),
        }
    }
}

/// Compute the dataset summary.
pub fn summarize(dataset: &CanonicalDataset) -> Summary {
    let records = dataset.records();
    let (Some(first_seen), Some(last_seen)) = (
        records.iter().map(|r| r.datetime).min(),
        records.iter().map(|r| r.datetime).max(),
    ) else {
        return Summary::Empty;
    };

    let unique_hosts = records
        .iter()
        .filter_map(|r| r.host.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let latitudes: Vec<f64> = records.iter().map(|r| r.latitude).collect();
    let longitudes: Vec<f64> = records.iter().map(|r| r.longitude).collect();
    let (latitude, longitude) = rayon::join(|| describe(&latitudes), || describe(&longitudes));
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Summary::Empty;
    };

    Summary::Populated(DatasetSummary {
        total_records: records.len(),
        unique_hosts,
        first_seen,
        last_seen,
        top_types: type_frequencies(dataset, TOP_TYPES),
        latitude,
        longitude,
    })
}

/// Attack type counts, highest first, ties kept in first-seen order,
/// truncated to `limit`.
pub fn type_frequencies(dataset: &CanonicalDataset, limit: usize) -> Vec<TypeFrequency> {
    let mut order: Vec<TypeFrequency> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in dataset {
        match index.get(record.attack_type.as_str()) {
            Some(&pos) => order[pos].count += 1,
            None => {
                index.insert(record.attack_type.as_str(), order.len());
                order.push(TypeFrequency {
                    attack_type: record.attack_type.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(limit);
    order
}
