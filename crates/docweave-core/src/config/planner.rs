use serde::{Deserialize, Serialize};

use crate::error::{DocweaveError, Result};

use super::env::read_env_usize;

const ENV_MIN_CLUSTER_SIZE: &str = "DOCWEAVE_MIN_CLUSTER_SIZE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub min_cluster_size: usize,
    pub display_min_cluster_size: usize,
    pub dependency_cap: usize,
    pub min_shared_tags: usize,
    pub preserved_root: String,
    pub clusters_root: String,
    pub hierarchy_root: String,
    pub networks_root: String,
    pub shallow_max_depth: usize,
    pub mid_max_depth: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: 3,
            display_min_cluster_size: 2,
            dependency_cap: 5,
            min_shared_tags: 2,
            preserved_root: "preserved".to_string(),
            clusters_root: "clusters".to_string(),
            hierarchy_root: "hierarchy".to_string(),
            networks_root: "networks".to_string(),
            shallow_max_depth: 1,
            mid_max_depth: 3,
        }
    }
}

impl PlannerConfig {
    pub(super) fn apply_env(&mut self) {
        if let Some(value) = read_env_usize(ENV_MIN_CLUSTER_SIZE, 1) {
            self.min_cluster_size = value;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_cluster_size == 0 {
            return Err(DocweaveError::Validation(
                "min_cluster_size must be at least 1".to_string(),
            ));
        }
        if self.shallow_max_depth > self.mid_max_depth {
            return Err(DocweaveError::Validation(format!(
                "shallow_max_depth ({}) must not exceed mid_max_depth ({})",
                self.shallow_max_depth, self.mid_max_depth
            )));
        }
        for (name, value) in [
            ("preserved_root", &self.preserved_root),
            ("clusters_root", &self.clusters_root),
            ("hierarchy_root", &self.hierarchy_root),
            ("networks_root", &self.networks_root),
        ] {
            if value.trim().is_empty() || value.contains("..") {
                return Err(DocweaveError::Validation(format!(
                    "{name} must be a non-empty relative directory name, got '{value}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_planner_config_is_valid() {
        PlannerConfig::default().validate().expect("valid defaults");
    }

    #[test]
    fn inverted_depth_bands_are_rejected() {
        let config = PlannerConfig {
            shallow_max_depth: 4,
            mid_max_depth: 2,
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parent_escaping_roots_are_rejected() {
        let config = PlannerConfig {
            clusters_root: "../outside".to_string(),
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
