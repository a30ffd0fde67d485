use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ident::PathwaySignature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Success,
    SourceNotFound,
    Error,
    DryRunSuccess,
}

impl ExecutionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::SourceNotFound => "source_not_found",
            Self::Error => "error",
            Self::DryRunSuccess => "dry_run_success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub signature: PathwaySignature,
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreservationQuality {
    Excellent,
    Good,
    NeedsAttention,
}

impl PreservationQuality {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.95 {
            Self::Excellent
        } else if ratio >= 0.85 {
            Self::Good
        } else {
            Self::NeedsAttention
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Completed,
    DryRunSkipped,
    TargetNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_entries: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_entries: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preservation_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<PreservationQuality>,
}

impl ValidationReport {
    #[must_use]
    pub const fn skipped(status: ValidationStatus) -> Self {
        Self {
            status,
            original_entries: None,
            target_entries: None,
            preservation_ratio: None,
            quality: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorganizationReport {
    pub run_id: String,
    pub executed_at: DateTime<Utc>,
    pub source_root: String,
    pub target_root: String,
    pub dry_run: bool,
    pub results: Vec<ExecutionResult>,
    pub summary: BTreeMap<ExecutionStatus, usize>,
    pub validation: ValidationReport,
}

#[must_use]
pub fn summarize_results(results: &[ExecutionResult]) -> BTreeMap<ExecutionStatus, usize> {
    let mut summary = BTreeMap::new();
    for result in results {
        *summary.entry(result.status).or_insert(0) += 1;
    }
    summary
}
