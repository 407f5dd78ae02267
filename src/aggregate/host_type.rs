//! Host×Type Aggregator
//! Dense pivot of record counts per honeypot host and attack type.

use crate::data::CanonicalDataset;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One host's counts for every type column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostTypeRow {
    pub host: String,
    pub counts: BTreeMap<String, usize>,
}

impl HostTypeRow {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Hosts as rows, type labels as columns, both sorted. Every row carries
/// every column, absent combinations as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostTypeMatrix {
    pub types: Vec<String>,
    pub rows: Vec<HostTypeRow>,
}

impl HostTypeMatrix {
    pub fn count(&self, host: &str, attack_type: &str) -> Option<usize> {
        self.rows
            .iter()
            .find(|row| row.host == host)
            .and_then(|row| row.counts.get(attack_type).copied())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest per-host total, the height a stacked chart must fit.
    pub fn max_row_total(&self) -> usize {
        self.rows.iter().map(HostTypeRow::total).max().unwrap_or(0)
    }
}

/// Pivot the dataset into host×type counts. Records without a host are
/// skipped.
pub fn host_type_matrix(dataset: &CanonicalDataset) -> HostTypeMatrix {
    let mut cells: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    let mut types: BTreeSet<&str> = BTreeSet::new();

    for record in dataset {
        let Some(host) = record.host.as_deref() else {
            continue;
        };
        types.insert(record.attack_type.as_str());
        *cells
            .entry(host)
            .or_default()
            .entry(record.attack_type.as_str())
            .or_insert(0) += 1;
    }

    let rows = cells
        .into_iter()
        .map(|(host, observed)| HostTypeRow {
            host: host.to_string(),
            counts: types
                .iter()
                .map(|t| (t.to_string(), observed.get(t).copied().unwrap_or(0)))
                .collect(),
        })
        .collect();

    HostTypeMatrix {
        types: types.into_iter().map(str::to_string).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::data::prepare;

    fn dataset(rows: &[(&str, &str)]) -> CanonicalDataset {
        let mut csv = String::from("host,src,dst,proto,type,latitude,longitude,datetime,\n");
        for (host, code) in rows {
            csv.push_str(&format!("{host},1,2,ICMP,{code},1,2,2024-01-01,\n"));
        }
        let config = PipelineConfig::new().with_stray_column("Unnamed: 8");
        prepare(csv.as_bytes(), &config).expect("prepare")
    }

    #[test]
    fn absent_pairs_are_explicit_zeros() {
        let ds = dataset(&[
            ("groucho-oregon", "8.0"),
            ("groucho-oregon", "8.0"),
            ("zeppo-norcal", "3.0"),
            ("groucho-oregon", ""),
        ]);
        let matrix = host_type_matrix(&ds);

        assert_eq!(
            matrix.types,
            vec![
                "Destination Unreachable (ICMP)",
                "Echo Request (ICMP)",
                "Unknown"
            ]
        );
        assert_eq!(matrix.count("groucho-oregon", "Echo Request (ICMP)"), Some(2));
        assert_eq!(matrix.count("groucho-oregon", "Destination Unreachable (ICMP)"), Some(0));
        assert_eq!(matrix.count("zeppo-norcal", "Echo Request (ICMP)"), Some(0));
        assert_eq!(matrix.count("zeppo-norcal", "Unknown"), Some(0));
        assert!(matrix.rows.iter().all(|row| row.counts.len() == 3));
    }

    #[test]
    fn hosts_are_sorted_and_totals_match() {
        let ds = dataset(&[("b", "0.0"), ("a", "0.0"), ("b", "11.0"), ("c", "0.0")]);
        let matrix = host_type_matrix(&ds);

        let hosts: Vec<&str> = matrix.rows.iter().map(|r| r.host.as_str()).collect();
        assert_eq!(hosts, vec!["a", "b", "c"]);
        assert_eq!(matrix.max_row_total(), 2);
        let total: usize = matrix.rows.iter().map(HostTypeRow::total).sum();
        assert_eq!(total, ds.len());
    }

    #[test]
    fn empty_dataset_gives_empty_matrix() {
        let matrix = host_type_matrix(&CanonicalDataset::default());
        assert!(matrix.is_empty());
        assert!(matrix.types.is_empty());
        assert_eq!(matrix.max_row_total(), 0);
    }
}
