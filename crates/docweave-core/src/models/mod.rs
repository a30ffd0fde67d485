mod entry;
mod execution;
mod manifest;
mod pathway;
mod search;

pub use entry::{ContentType, EntryContext, IndexEntry};
pub use execution::{
    ExecutionResult, ExecutionStatus, PreservationQuality, ReorganizationReport, ValidationReport,
    ValidationStatus, summarize_results,
};
pub(crate) use manifest::usize_to_f64;
pub use manifest::{
    BreadthRecord, DepthRecord, IndexManifest, IndexMetrics, ThresholdSnapshot, TraversalSnapshot,
    WeightStats,
};
pub use pathway::{DepthBand, Pathway, PathwayContext, PathwayPlan, PlanMetrics, Strategy};
pub use search::SearchHit;
