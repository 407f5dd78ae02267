//! Protocol-Share Aggregator
//! Record counts per protocol label, for the attack-vector pie.

use crate::data::CanonicalDataset;
use serde::Serialize;
use std::collections::HashMap;

/// Records seen for one protocol label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolShare {
    pub protocol: String,
    pub count: usize,
}

/// Protocol label → count. Labels are kept verbatim (no case or whitespace
/// folding); entries run from most to least frequent, ties in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProtocolCounts {
    entries: Vec<ProtocolShare>,
}

impl ProtocolCounts {
    pub fn entries(&self) -> &[ProtocolShare] {
        &self.entries
    }

    pub fn get(&self, protocol: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.protocol == protocol)
            .map(|e| e.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records that carried a protocol label.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Percentage of labelled records using `protocol`.
    pub fn share(&self, protocol: &str) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.get(protocol)
            .map(|count| count as f64 * 100.0 / total as f64)
    }
}

/// Count records per distinct `proto` value. Records without one are skipped.
pub fn protocol_counts(dataset: &CanonicalDataset) -> ProtocolCounts {
    let mut entries: Vec<ProtocolShare> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for proto in dataset.iter().filter_map(|r| r.proto.as_deref()) {
        match index.get(proto) {
            Some(&pos) => entries[pos].count += 1,
            None => {
                index.insert(proto, entries.len());
                entries.push(ProtocolShare {
                    protocol: proto.to_string(),
                    count: 1,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    ProtocolCounts { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::data::prepare;

    fn dataset(protos: &[&str]) -> CanonicalDataset {
        let mut csv = String::from("host,src,dst,proto,type,latitude,longitude,datetime,\n");
        for proto in protos {
            csv.push_str(&format!("h,1,2,\"{proto}\",8.0,1,2,2024-01-01,\n"));
        }
        let config = PipelineConfig::new().with_stray_column("Unnamed: 8");
        prepare(csv.as_bytes(), &config).expect("prepare")
    }

    #[test]
    fn counts_each_label_verbatim() {
        let counts = protocol_counts(&dataset(&["TCP", "UDP", "tcp", "TCP", "ICMP", "TCP "]));

        assert_eq!(counts.get("TCP"), Some(2));
        assert_eq!(counts.get("tcp"), Some(1));
        assert_eq!(counts.get("TCP "), Some(1));
        assert_eq!(counts.get("SCTP"), None);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.len(), 5);
        assert_eq!(counts.entries()[0].protocol, "TCP");
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let counts = protocol_counts(&dataset(&["UDP", "ICMP", "ICMP", "UDP", "TCP"]));
        let order: Vec<&str> = counts.entries().iter().map(|e| e.protocol.as_str()).collect();
        assert_eq!(order, vec!["UDP", "ICMP", "TCP"]);
    }

    #[test]
    fn shares_are_percentages() {
        let counts = protocol_counts(&dataset(&["TCP", "TCP", "TCP", "UDP"]));
        assert_eq!(counts.share("TCP"), Some(75.0));
        assert_eq!(counts.share("UDP"), Some(25.0));
        assert_eq!(counts.get("UDP"), Some(1));
    }

    #[test]
    fn empty_dataset_has_no_protocols() {
        let counts = protocol_counts(&CanonicalDataset::default());
        assert!(counts.is_empty());
        assert_eq!(counts.share("TCP"), None);
    }
}
