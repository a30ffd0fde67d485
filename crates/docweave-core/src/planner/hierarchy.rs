use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::PlannerConfig;
use crate::engine::IndexEngine;
use crate::models::{DepthBand, IndexEntry, Pathway, PathwayContext};

use super::target_path;

pub(super) fn plan(index: &IndexEngine, config: &PlannerConfig) -> Vec<Pathway> {
    let mut by_depth: BTreeMap<usize, Vec<&IndexEntry>> = BTreeMap::new();
    for entry in index.entries() {
        by_depth
            .entry(entry.context.directory_depth)
            .or_default()
            .push(entry);
    }

    let mut pathways = Vec::new();
    for (depth, mut bucket) in by_depth {
        bucket.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
        let band = DepthBand::for_depth(depth, config.shallow_max_depth, config.mid_max_depth);
        for (idx, entry) in bucket.into_iter().enumerate() {
            pathways.push(Pathway::new(
                entry.path.clone(),
                target_path(&config.hierarchy_root, band.as_str(), entry.file_name()),
                entry.weight,
                PathwayContext::Hierarchy {
                    band,
                    depth,
                    weight_rank: idx + 1,
                },
                Vec::new(),
            ));
        }
    }
    pathways
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;
    use crate::planner::test_support::{engine, entry};

    fn rank_of(pathways: &[Pathway], source: &str) -> (DepthBand, usize) {
        let pathway = pathways
            .iter()
            .find(|p| p.source_path == source)
            .expect("pathway for source");
        match pathway.context {
            PathwayContext::Hierarchy {
                band, weight_rank, ..
            } => (band, weight_rank),
            _ => panic!("expected hierarchy context"),
        }
    }

    #[test]
    fn buckets_rank_by_weight_and_map_depth_to_bands() {
        let index = engine(vec![
            entry("top.md", ContentType::StructuredText, 0.1, 0.5, &[], &[]),
            entry("a/low.md", ContentType::StructuredText, 0.2, 0.5, &[], &[]),
            entry("b/high.md", ContentType::StructuredText, 0.6, 0.5, &[], &[]),
            entry("a/b/mid.md", ContentType::StructuredText, 0.3, 0.5, &[], &[]),
            entry("a/b/c/d/deep.md", ContentType::StructuredText, 0.3, 0.5, &[], &[]),
        ]);
        let pathways = plan(&index, &PlannerConfig::default());
        assert_eq!(pathways.len(), 5);
        assert!(pathways.iter().all(|p| p.priority == 3));

        assert_eq!(rank_of(&pathways, "top.md"), (DepthBand::Shallow, 1));
        assert_eq!(rank_of(&pathways, "b/high.md"), (DepthBand::Shallow, 1));
        assert_eq!(rank_of(&pathways, "a/low.md"), (DepthBand::Shallow, 2));
        assert_eq!(rank_of(&pathways, "a/b/mid.md"), (DepthBand::Mid, 1));
        assert_eq!(rank_of(&pathways, "a/b/c/d/deep.md"), (DepthBand::Deep, 1));

        let deep = pathways
            .iter()
            .find(|p| p.source_path == "a/b/c/d/deep.md")
            .expect("deep pathway");
        assert_eq!(deep.target_path, "hierarchy/deep/deep.md");
    }

    #[test]
    fn equal_weights_keep_index_order() {
        let index = engine(vec![
            entry("x/b.md", ContentType::StructuredText, 0.3, 0.5, &[], &[]),
            entry("x/a.md", ContentType::StructuredText, 0.3, 0.5, &[], &[]),
        ]);
        let pathways = plan(&index, &PlannerConfig::default());
        assert_eq!(rank_of(&pathways, "x/a.md").1, 1);
        assert_eq!(rank_of(&pathways, "x/b.md").1, 2);
    }
}
