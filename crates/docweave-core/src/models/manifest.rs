use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ident::EntryId;

use super::IndexEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadthRecord {
    pub prefix: String,
    pub entry_count: usize,
    pub aggregate_weight: f64,
    pub sample_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthRecord {
    pub depth: usize,
    pub prefix: String,
    pub entry_count: usize,
    pub aggregate_weight: f64,
    pub sample_paths: Vec<String>,
    pub sample_ids: Vec<EntryId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalSnapshot {
    pub breadth_first: Vec<BreadthRecord>,
    pub depth_first: Vec<DepthRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl WeightStats {
    #[must_use]
    pub fn from_weights(weights: impl IntoIterator<Item = f64>) -> Self {
        let mut count = 0_usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for weight in weights {
            count += 1;
            sum += weight;
            min = min.min(weight);
            max = max.max(weight);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            mean: sum / usize_to_f64(count),
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexMetrics {
    pub total_entries: usize,
    pub high_confidence_entries: usize,
    pub preservation_ratio: f64,
    pub tag_cluster_count: usize,
    pub depth_histogram: BTreeMap<usize, usize>,
    pub weight_stats: WeightStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSnapshot {
    pub confidence_threshold: f64,
    pub high_confidence_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexManifest {
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub thresholds: ThresholdSnapshot,
    pub entries: BTreeMap<String, IndexEntry>,
    pub clusters: BTreeMap<String, Vec<String>>,
    pub traversal: TraversalSnapshot,
    pub metrics: IndexMetrics,
}

#[allow(
    clippy::cast_precision_loss,
    reason = "counts feeding ratios and means are far below f64 mantissa range"
)]
pub(crate) const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}
