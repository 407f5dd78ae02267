//! Geographic Aggregator
//! One scatter coordinate per record, in dataset order.

use crate::data::CanonicalDataset;
use serde::Serialize;

/// Scatter coordinate, x = longitude, y = latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// Origins of every record. No clipping and no deduplication; bounding the
/// map is the renderer's business.
pub fn geo_points(dataset: &CanonicalDataset) -> Vec<GeoPoint> {
    dataset
        .iter()
        .map(|r| GeoPoint {
            longitude: r.longitude,
            latitude: r.latitude,
        })
        .collect()
}
