use tracing::debug;

use crate::config::PlannerConfig;
use crate::engine::IndexEngine;
use crate::models::{Pathway, PathwayContext};

use super::target_path;

pub(super) fn plan(index: &IndexEngine, config: &PlannerConfig) -> Vec<Pathway> {
    let mut pathways = Vec::new();
    for (tag, members) in index.clusters().with_min_size(config.min_cluster_size) {
        for path in members {
            let Some(entry) = index.get(path) else {
                debug!("plan: cluster {} member {} not in index", tag, path);
                continue;
            };
            pathways.push(Pathway::new(
                entry.path.clone(),
                target_path(&config.clusters_root, tag, entry.file_name()),
                entry.weight,
                PathwayContext::Clustering {
                    cluster: tag.to_string(),
                    cluster_size: members.len(),
                    tags: entry.tags.clone(),
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

    #[test]
    fn only_clusters_at_minimum_size_produce_pathways() {
        let index = engine(vec![
            entry("a.md", ContentType::StructuredText, 0.2, 0.5, &["big", "small"], &[]),
            entry("b.md", ContentType::StructuredText, 0.2, 0.5, &["big", "small"], &[]),
            entry("c/d.md", ContentType::StructuredText, 0.4, 0.5, &["big"], &[]),
        ]);
        let pathways = plan(&index, &PlannerConfig::default());

        assert_eq!(pathways.len(), 3);
        let targets = pathways
            .iter()
            .map(|p| p.target_path.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            targets,
            vec!["clusters/big/a.md", "clusters/big/b.md", "clusters/big/d.md"]
        );
        for pathway in &pathways {
            assert_eq!(pathway.priority, 2);
            assert!(pathway.dependencies.is_empty());
            assert!(matches!(
                pathway.context,
                PathwayContext::Clustering { cluster_size: 3, .. }
            ));
        }
    }

    #[test]
    fn lowering_min_cluster_size_widens_coverage() {
        let index = engine(vec![
            entry("a.md", ContentType::StructuredText, 0.2, 0.5, &["pair"], &[]),
            entry("b.md", ContentType::StructuredText, 0.2, 0.5, &["pair"], &[]),
        ]);
        let config = PlannerConfig {
            min_cluster_size: 2,
            ..PlannerConfig::default()
        };
        assert_eq!(plan(&index, &config).len(), 2);
        assert!(plan(&index, &PlannerConfig::default()).is_empty());
    }
}
