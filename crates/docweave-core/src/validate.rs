use std::path::Path;

use tracing::info;

use crate::engine::IndexEngine;
use crate::error::Result;
use crate::models::{PreservationQuality, ValidationReport, ValidationStatus, usize_to_f64};

// Re-indexes the target with the original run's settings and grades how many
// entries survived.
pub fn validate(
    original: &IndexEngine,
    target_root: &Path,
    dry_run: bool,
) -> Result<ValidationReport> {
    if dry_run {
        return Ok(ValidationReport::skipped(ValidationStatus::DryRunSkipped));
    }
    if !target_root.is_dir() {
        return Ok(ValidationReport::skipped(ValidationStatus::TargetNotFound));
    }

    let rebuilt = IndexEngine::build(target_root, original.config().clone())?;
    let original_entries = original.len();
    let target_entries = rebuilt.len();
    let ratio = usize_to_f64(target_entries) / usize_to_f64(original_entries.max(1));
    let quality = PreservationQuality::from_ratio(ratio);

    info!(
        "validate: original={} target={} ratio={:.3} quality={:?}",
        original_entries, target_entries, ratio, quality
    );

    Ok(ValidationReport {
        status: ValidationStatus::Completed,
        original_entries: Some(original_entries),
        target_entries: Some(target_entries),
        preservation_ratio: Some(ratio),
        quality: Some(quality),
    })
}
