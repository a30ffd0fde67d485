use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ident::PathwaySignature;

use super::manifest::WeightStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Preservation,
    Clustering,
    Hierarchy,
    Dependency,
}

impl Strategy {
    pub const ALL: [Self; 4] = [
        Self::Preservation,
        Self::Clustering,
        Self::Hierarchy,
        Self::Dependency,
    ];

    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Preservation => 1,
            Self::Clustering => 2,
            Self::Hierarchy => 3,
            Self::Dependency => 4,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preservation => "preservation",
            Self::Clustering => "clustering",
            Self::Hierarchy => "hierarchy",
            Self::Dependency => "dependency",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthBand {
    Shallow,
    Mid,
    Deep,
}

impl DepthBand {
    #[must_use]
    pub const fn for_depth(depth: usize, shallow_max: usize, mid_max: usize) -> Self {
        if depth <= shallow_max {
            Self::Shallow
        } else if depth <= mid_max {
            Self::Mid
        } else {
            Self::Deep
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shallow => "shallow",
            Self::Mid => "mid",
            Self::Deep => "deep",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PathwayContext {
    Preservation {
        content_type: String,
        tags: Vec<String>,
        confidence: f64,
    },
    Clustering {
        cluster: String,
        cluster_size: usize,
        tags: Vec<String>,
    },
    Hierarchy {
        band: DepthBand,
        depth: usize,
        weight_rank: usize,
    },
    Dependency {
        neighbor_count: usize,
        network_density: f64,
    },
}

impl PathwayContext {
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Preservation { .. } => Strategy::Preservation,
            Self::Clustering { .. } => Strategy::Clustering,
            Self::Hierarchy { .. } => Strategy::Hierarchy,
            Self::Dependency { .. } => Strategy::Dependency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    pub source_path: String,
    pub target_path: String,
    pub weight: f64,
    pub context: PathwayContext,
    pub priority: u8,
    pub dependencies: Vec<String>,
    pub signature: PathwaySignature,
}

impl Pathway {
    // Priority is fixed by the strategy that produced the context.
    #[must_use]
    pub fn new(
        source_path: impl Into<String>,
        target_path: impl Into<String>,
        weight: f64,
        context: PathwayContext,
        dependencies: Vec<String>,
    ) -> Self {
        let source_path = source_path.into();
        let target_path = target_path.into();
        let signature = PathwaySignature::for_pathway(&source_path, &target_path, weight);
        Self {
            priority: context.strategy().priority(),
            source_path,
            target_path,
            weight,
            context,
            dependencies,
            signature,
        }
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.context.strategy()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanMetrics {
    pub total_pathways: usize,
    pub priority_distribution: BTreeMap<u8, usize>,
    pub weight_stats: WeightStats,
    pub strategy_diversity: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathwayPlan {
    pub pathways: Vec<Pathway>,
    pub metrics: PlanMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_follows_strategy() {
        let pathway = Pathway::new(
            "a/b.md",
            "hierarchy/mid/b.md",
            0.4,
            PathwayContext::Hierarchy {
                band: DepthBand::Mid,
                depth: 2,
                weight_rank: 1,
            },
            Vec::new(),
        );
        assert_eq!(pathway.priority, 3);
        assert_eq!(pathway.strategy(), Strategy::Hierarchy);
        assert_eq!(
            pathway.signature,
            PathwaySignature::for_pathway("a/b.md", "hierarchy/mid/b.md", 0.4)
        );
    }

    #[test]
    fn depth_bands_split_at_configured_thresholds() {
        assert_eq!(DepthBand::for_depth(0, 1, 3), DepthBand::Shallow);
        assert_eq!(DepthBand::for_depth(1, 1, 3), DepthBand::Shallow);
        assert_eq!(DepthBand::for_depth(2, 1, 3), DepthBand::Mid);
        assert_eq!(DepthBand::for_depth(3, 1, 3), DepthBand::Mid);
        assert_eq!(DepthBand::for_depth(4, 1, 3), DepthBand::Deep);
    }

    #[test]
    fn context_serializes_with_strategy_tag() {
        let context = PathwayContext::Dependency {
            neighbor_count: 2,
            network_density: 0.5,
        };
        let value = serde_json::to_value(&context).expect("serialize");
        assert_eq!(value["strategy"], "dependency");
        assert_eq!(value["neighbor_count"], 2);
    }
}
