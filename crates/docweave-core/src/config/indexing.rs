use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DocweaveError, Result};

use super::env::{read_env_f64, read_env_usize};

const ENV_CONFIDENCE_THRESHOLD: &str = "DOCWEAVE_CONFIDENCE_THRESHOLD";
const ENV_HIGH_CONFIDENCE_THRESHOLD: &str = "DOCWEAVE_HIGH_CONFIDENCE_THRESHOLD";
const ENV_NEIGHBOR_LIMIT: &str = "DOCWEAVE_NEIGHBOR_LIMIT";

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.954;
pub const DEFAULT_HIGH_CONFIDENCE_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub confidence_threshold: f64,
    pub high_confidence_threshold: f64,
    pub weight_threshold: f64,
    pub allowed_extensions: Vec<String>,
    pub extension_multipliers: BTreeMap<String, f64>,
    pub default_multiplier: f64,
    pub keyword_amplifiers: Vec<String>,
    pub confidence_keyword: String,
    pub pattern_tags: BTreeMap<String, Vec<String>>,
    pub directory_tags: BTreeMap<String, String>,
    pub substring_tags: BTreeMap<String, String>,
    pub skip_markers: Vec<String>,
    pub skip_hidden_dirs: bool,
    pub neighbor_limit: usize,
    pub exclude_globs: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            high_confidence_threshold: DEFAULT_HIGH_CONFIDENCE_THRESHOLD,
            weight_threshold: 0.3,
            allowed_extensions: strings(&[
                "md", "pdf", "html", "txt", "tex", "py", "js", "yaml", "yml",
            ]),
            extension_multipliers: [
                ("pdf", 0.9),
                ("md", 0.8),
                ("tex", 0.95),
                ("py", 0.7),
                ("html", 0.6),
                ("txt", 0.5),
            ]
            .into_iter()
            .map(|(ext, value)| (ext.to_string(), value))
            .collect(),
            default_multiplier: 0.3,
            keyword_amplifiers: strings(&[
                "patent",
                "obiai",
                "dimensional_game_theory",
                "bayesian",
                "consciousness",
                "phenomenological",
                "ontological",
                "epistemic",
                "heart_ai",
                "obicall",
            ]),
            confidence_keyword: "patent".to_string(),
            pattern_tags: default_pattern_tags(),
            directory_tags: [
                ("images", "visual_material"),
                ("proofs", "mathematical_proof"),
            ]
            .into_iter()
            .map(|(dir, tag)| (dir.to_string(), tag.to_string()))
            .collect(),
            substring_tags: [("phases", "developmental_phase")]
                .into_iter()
                .map(|(needle, tag)| (needle.to_string(), tag.to_string()))
                .collect(),
            skip_markers: strings(&[".git", "__pycache__", "node_modules", ".vscode", ".idea"]),
            skip_hidden_dirs: true,
            neighbor_limit: 5,
            exclude_globs: Vec::new(),
        }
    }
}

impl IndexConfig {
    pub(super) fn apply_env(&mut self) {
        if let Some(value) = read_env_f64(ENV_CONFIDENCE_THRESHOLD) {
            self.confidence_threshold = value;
        }
        if let Some(value) = read_env_f64(ENV_HIGH_CONFIDENCE_THRESHOLD) {
            self.high_confidence_threshold = value;
        }
        if let Some(value) = read_env_usize(ENV_NEIGHBOR_LIMIT, 0) {
            self.neighbor_limit = value;
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("confidence_threshold", self.confidence_threshold),
            ("high_confidence_threshold", self.high_confidence_threshold),
            ("weight_threshold", self.weight_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DocweaveError::Validation(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.allowed_extensions.is_empty() {
            return Err(DocweaveError::Validation(
                "allowed_extensions must not be empty".to_string(),
            ));
        }
        if !self.default_multiplier.is_finite() || self.default_multiplier < 0.0 {
            return Err(DocweaveError::Validation(format!(
                "default_multiplier must be a non-negative number, got {}",
                self.default_multiplier
            )));
        }
        if let Some((ext, value)) = self
            .extension_multipliers
            .iter()
            .find(|(_, value)| !value.is_finite() || **value < 0.0)
        {
            return Err(DocweaveError::Validation(format!(
                "extension multiplier for '{ext}' must be a non-negative number, got {value}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn allows_extension(&self, ext: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    #[must_use]
    pub fn multiplier_for(&self, ext: &str) -> f64 {
        self.extension_multipliers
            .get(&ext.to_ascii_lowercase())
            .copied()
            .unwrap_or(self.default_multiplier)
    }
}

fn default_pattern_tags() -> BTreeMap<String, Vec<String>> {
    [
        (
            "obiai",
            &["heart_ai", "consciousness_architecture", "phenomenological_ai"][..],
        ),
        (
            "dimensional_game_theory",
            &["strategic_reasoning", "variadic_spaces", "multi_domain"][..],
        ),
        (
            "bayesian",
            &[
                "bias_mitigation",
                "epistemic_confidence",
                "probabilistic_reasoning",
            ][..],
        ),
        (
            "diram",
            &[
                "memory_architecture",
                "directed_instruction",
                "evolutionary_memory",
            ][..],
        ),
        (
            "formal",
            &["mathematical_proofs", "verification", "formal_systems"][..],
        ),
        (
            "patent",
            &[
                "intellectual_property",
                "innovation_protection",
                "technical_specification",
            ][..],
        ),
        (
            "consciousness",
            &[
                "experiential_preservation",
                "phenomenological_integrity",
                "awareness_architecture",
            ][..],
        ),
    ]
    .into_iter()
    .map(|(pattern, tags)| (pattern.to_string(), strings(tags)))
    .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
