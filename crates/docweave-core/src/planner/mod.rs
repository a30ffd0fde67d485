use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::config::PlannerConfig;
use crate::engine::IndexEngine;
use crate::models::{Pathway, PathwayPlan, PlanMetrics, Strategy, WeightStats};

mod clustering;
mod dependency;
mod hierarchy;
mod preservation;

// Reads one finished index and derives pathways from every strategy. The
// strategies never see each other's output, so a source may appear more than
// once across strategies.
pub struct PathwayPlanner<'a> {
    index: &'a IndexEngine,
    config: &'a PlannerConfig,
}

impl<'a> PathwayPlanner<'a> {
    #[must_use]
    pub const fn new(index: &'a IndexEngine, config: &'a PlannerConfig) -> Self {
        Self { index, config }
    }

    #[must_use]
    pub fn plan(&self) -> PathwayPlan {
        let mut pathways = Vec::new();
        for strategy in Strategy::ALL {
            let produced = self.run_strategy(strategy);
            debug!(
                "plan: strategy={} pathways={}",
                strategy.as_str(),
                produced.len()
            );
            pathways.extend(produced);
        }

        let metrics = plan_metrics(&pathways);
        info!(
            "plan: {} pathways across {} strategies",
            metrics.total_pathways, metrics.strategy_diversity
        );
        PathwayPlan { pathways, metrics }
    }

    #[must_use]
    pub fn run_strategy(&self, strategy: Strategy) -> Vec<Pathway> {
        match strategy {
            Strategy::Preservation => preservation::plan(self.index, self.config),
            Strategy::Clustering => clustering::plan(self.index, self.config),
            Strategy::Hierarchy => hierarchy::plan(self.index, self.config),
            Strategy::Dependency => dependency::plan(self.index, self.config),
        }
    }
}

#[must_use]
pub fn plan_metrics(pathways: &[Pathway]) -> PlanMetrics {
    let mut priority_distribution = BTreeMap::new();
    let mut strategies = BTreeSet::new();
    for pathway in pathways {
        *priority_distribution.entry(pathway.priority).or_insert(0) += 1;
        strategies.insert(pathway.strategy());
    }

    PlanMetrics {
        total_pathways: pathways.len(),
        priority_distribution,
        weight_stats: WeightStats::from_weights(pathways.iter().map(|pathway| pathway.weight)),
        strategy_diversity: strategies.len(),
    }
}

fn target_path(root: &str, group: &str, file_name: &str) -> String {
    format!("{root}/{group}/{file_name}")
}


#[cfg(test)]
mod tests {
    use super::test_support::{engine, entry};
    use super::*;
    use crate::models::ContentType;

    #[test]
    fn plan_concatenates_strategies_in_priority_order() {
        let index = engine(vec![
            entry("a/x.md", ContentType::StructuredText, 0.3, 0.95, &["t"], &["a/y.md"]),
            entry("a/y.md", ContentType::StructuredText, 0.2, 0.5, &["t"], &["a/x.md"]),
            entry("b/z.pdf", ContentType::FormalDocument, 0.4, 0.5, &["t"], &[]),
        ]);
        let config = PlannerConfig::default();
        let plan = PathwayPlanner::new(&index, &config).plan();

        let priorities = plan.pathways.iter().map(|p| p.priority).collect::<Vec<_>>();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);

        assert_eq!(plan.metrics.priority_distribution.get(&1), Some(&1));
        assert_eq!(plan.metrics.priority_distribution.get(&2), Some(&3));
        assert_eq!(plan.metrics.priority_distribution.get(&3), Some(&3));
        assert_eq!(plan.metrics.priority_distribution.get(&4), Some(&2));
        assert_eq!(plan.metrics.total_pathways, 9);
        assert_eq!(plan.metrics.strategy_diversity, 4);
    }

    #[test]
    fn empty_index_yields_empty_plan() {
        let index = engine(Vec::new());
        let config = PlannerConfig::default();
        let plan = PathwayPlanner::new(&index, &config).plan();
        assert!(plan.pathways.is_empty());
        assert_eq!(plan.metrics, PlanMetrics::default());
    }

    #[test]
    fn planning_twice_gives_identical_plans() {
        let index = engine(vec![
            entry("p/a.md", ContentType::StructuredText, 0.3, 0.95, &["x", "y"], &["p/b.md"]),
            entry("p/b.md", ContentType::StructuredText, 0.3, 0.95, &["x", "y"], &["p/a.md"]),
        ]);
        let config = PlannerConfig::default();
        let planner = PathwayPlanner::new(&index, &config);
        assert_eq!(planner.plan(), planner.plan());
    }
}
