use crate::config::PlannerConfig;
use crate::engine::IndexEngine;
use crate::models::{Pathway, PathwayContext, usize_to_f64};

use super::target_path;

pub(super) fn plan(index: &IndexEngine, config: &PlannerConfig) -> Vec<Pathway> {
    let total = usize_to_f64(index.len().max(1));
    index
        .entries()
        .filter(|entry| !entry.context.neighbors.is_empty())
        .map(|entry| {
            let neighbor_count = entry.context.neighbors.len();
            Pathway::new(
                entry.path.clone(),
                target_path(&config.networks_root, entry.file_stem(), entry.file_name()),
                entry.weight,
                PathwayContext::Dependency {
                    neighbor_count,
                    network_density: usize_to_f64(neighbor_count) / total,
                },
                entry.context.neighbors.clone(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;
    use crate::planner::test_support::{engine, entry};

    #[test]
    fn entries_with_neighbors_get_network_pathways() {
        let index = engine(vec![
            entry("notes/alpha.md", ContentType::StructuredText, 0.2, 0.5, &[], &[
                "notes/beta.md",
                "notes/gamma.txt",
            ]),
            entry("notes/beta.md", ContentType::StructuredText, 0.2, 0.5, &[], &[
                "notes/alpha.md",
            ]),
            entry("solo/only.md", ContentType::StructuredText, 0.2, 0.5, &[], &[]),
            entry("notes/gamma.txt", ContentType::RawText, 0.2, 0.5, &[], &[]),
        ]);
        let pathways = plan(&index, &PlannerConfig::default());
        assert_eq!(pathways.len(), 2);

        let alpha = &pathways[0];
        assert_eq!(alpha.source_path, "notes/alpha.md");
        assert_eq!(alpha.target_path, "networks/alpha/alpha.md");
        assert_eq!(alpha.priority, 4);
        assert_eq!(
            alpha.dependencies,
            vec!["notes/beta.md".to_string(), "notes/gamma.txt".to_string()]
        );
        match alpha.context {
            PathwayContext::Dependency {
                neighbor_count,
                network_density,
            } => {
                assert_eq!(neighbor_count, 2);
                assert!((network_density - 0.5).abs() < 1e-9);
            }
            _ => panic!("expected dependency context"),
        }
    }
}
