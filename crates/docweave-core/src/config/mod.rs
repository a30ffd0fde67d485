use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocweaveError, Result};

mod env;
mod indexing;
mod planner;

pub use indexing::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_HIGH_CONFIDENCE_THRESHOLD, IndexConfig};
pub use planner::PlannerConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocweaveConfig {
    pub index: IndexConfig,
    pub planner: PlannerConfig,
}

impl DocweaveConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let config: Self = match ext.as_str() {
            "toml" => toml::from_str(&raw)?,
            "yaml" | "yml" => serde_norway::from_str(&raw)?,
            "json" => serde_json::from_str(&raw)?,
            other => {
                return Err(DocweaveError::Config(format!(
                    "unsupported config format '{other}' for {}",
                    path.display()
                )));
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.index.validate()?;
        self.planner.validate()
    }

    fn apply_env(&mut self) {
        self.index.apply_env();
        self.planner.apply_env();
    }
}
