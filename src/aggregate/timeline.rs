//! Time-Series Aggregator
//! Daily attack counts over the covered interval, zero days included.

use crate::data::CanonicalDataset;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Events seen on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Count records per calendar day, from the first to the last observed day
/// inclusive, in chronological order. Days without events appear with 0.
pub fn daily_counts(dataset: &CanonicalDataset) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in dataset {
        *per_day.entry(record.day()).or_insert(0) += 1;
    }

    let (Some(&first), Some(&last)) = (per_day.keys().next(), per_day.keys().next_back()) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| DailyCount {
            day,
            count: per_day.get(&day).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::data::prepare;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).expect("valid date")
    }

    fn dataset(datetimes: &[&str]) -> CanonicalDataset {
        let mut csv = String::from("host,src,dst,proto,type,latitude,longitude,datetime,\n");
        for dt in datetimes {
            csv.push_str(&format!("h,1,2,ICMP,8.0,1,2,{dt},\n"));
        }
        let config = PipelineConfig::new().with_stray_column("Unnamed: 8");
        prepare(csv.as_bytes(), &config).expect("prepare")
    }

    #[test]
    fn fills_gaps_with_zero() {
        let ds = dataset(&[
            "2024-01-04 08:00:00",
            "2024-01-01 23:59:59",
            "2024-01-01 00:00:00",
            "2024-01-04 12:00:00",
            "2024-01-04 13:00:00",
        ]);
        assert_eq!(
            daily_counts(&ds),
            vec![
                DailyCount { day: day(1), count: 2 },
                DailyCount { day: day(2), count: 0 },
                DailyCount { day: day(3), count: 0 },
                DailyCount { day: day(4), count: 3 },
            ]
        );
    }

    #[test]
    fn single_day_yields_one_bucket() {
        let ds = dataset(&["2024-01-07 10:00", "2024-01-07 11:00"]);
        assert_eq!(daily_counts(&ds), vec![DailyCount { day: day(7), count: 2 }]);
    }

    #[test]
    fn counts_sum_to_record_total() {
        let ds = dataset(&["2024-01-01", "2024-01-09", "2024-01-05", "2024-01-05"]);
        let counts = daily_counts(&ds);
        assert_eq!(counts.len(), 9);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), ds.len());
    }

    #[test]
    fn empty_dataset_has_no_buckets() {
        assert!(daily_counts(&CanonicalDataset::default()).is_empty());
    }
}
