use crate::config::PlannerConfig;
use crate::engine::IndexEngine;
use crate::models::{IndexEntry, Pathway, PathwayContext};

use super::target_path;

// Same high-confidence cutoff the index metrics count with.
pub(super) fn plan(index: &IndexEngine, config: &PlannerConfig) -> Vec<Pathway> {
    let threshold = index.config().high_confidence_threshold;
    index
        .entries()
        .filter(|entry| entry.confidence >= threshold)
        .map(|entry| {
            let target = target_path(
                &config.preserved_root,
                &entry.content_type.dir_label(),
                entry.file_name(),
            );
            Pathway::new(
                entry.path.clone(),
                target,
                entry.weight,
                PathwayContext::Preservation {
                    content_type: entry.content_type.as_str().to_string(),
                    tags: entry.tags.clone(),
                    confidence: entry.confidence,
                },
                shared_tag_dependencies(index, entry, config),
            )
        })
        .collect()
}

// Index order, first `dependency_cap` matches. Not ranked by overlap.
fn shared_tag_dependencies(
    index: &IndexEngine,
    entry: &IndexEntry,
    config: &PlannerConfig,
) -> Vec<String> {
    index
        .entries()
        .filter(|other| other.path != entry.path)
        .filter(|other| entry.shared_tag_count(other) >= config.min_shared_tags)
        .take(config.dependency_cap)
        .map(|other| other.path.clone())
        .collect()
}
