use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path};
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};

use crate::config::IndexConfig;
use crate::error::{DocweaveError, Result};
use crate::models::{ContentType, EntryContext, IndexEntry};

const BASE_CONFIDENCE: f64 = 0.7;
const KEYWORD_BONUS: f64 = 0.1;
const MAX_COUNTED_TAGS: usize = 5;

#[derive(Debug, Clone)]
pub struct Annotator<'a> {
    config: &'a IndexConfig,
    exclude: Option<GlobSet>,
}

impl<'a> Annotator<'a> {
    pub fn new(config: &'a IndexConfig) -> Result<Self> {
        Ok(Self {
            config,
            exclude: build_exclude_set(&config.exclude_globs)?,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &IndexConfig {
        self.config
    }

    // Inclusion filter over a root-relative path. Never touches the filesystem.
    #[must_use]
    pub fn should_index(&self, relative: &Path) -> bool {
        let Some(ext) = extension_of(relative) else {
            return false;
        };
        if !self.config.allows_extension(&ext) {
            return false;
        }
        if self.is_under_skip_marker(relative) {
            return false;
        }
        if let Some(exclude) = &self.exclude
            && exclude.is_match(relative)
        {
            return false;
        }
        true
    }

    #[must_use]
    pub fn is_skipped_dir_name(&self, name: &str) -> bool {
        if self.config.skip_hidden_dirs && (name.starts_with('.') || name == "__pycache__") {
            return true;
        }
        self.config
            .skip_markers
            .iter()
            .any(|marker| marker.eq_ignore_ascii_case(name))
    }

    fn is_under_skip_marker(&self, relative: &Path) -> bool {
        relative.components().any(|component| match component {
            Component::Normal(part) => {
                let part = part.to_string_lossy();
                self.config
                    .skip_markers
                    .iter()
                    .any(|marker| marker.eq_ignore_ascii_case(&part))
            }
            _ => false,
        })
    }

    // Stat failures degrade to zero size/time instead of failing the scan.
    #[must_use]
    pub fn annotate(&self, root: &Path, relative: &Path) -> IndexEntry {
        let path = relative_path_string(relative);
        // Heuristics match on the root-relative path, not the absolute one.
        let lower = path.to_lowercase();
        let ext = extension_of(relative).unwrap_or_default();

        let weight = compute_weight(self.config, &lower, &ext);
        let tags = extract_tags(self.config, relative, &lower);

        let full_path = root.join(relative);
        let (file_size, modified_unix, modified_at) = match fs::metadata(&full_path) {
            Ok(meta) => {
                let modified = meta.modified().ok();
                let unix = modified
                    .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                    .map_or(0.0, |elapsed| elapsed.as_secs_f64());
                let stamp = modified.map(|time| DateTime::<Utc>::from(time).to_rfc3339());
                (meta.len(), unix, stamp)
            }
            Err(err) => {
                warn!("annotate: stat failed for {}: {}", full_path.display(), err);
                (0, 0.0, None)
            }
        };

        let confidence = compute_confidence(self.config, file_size, weight, tags.len(), &lower);
        let context = EntryContext {
            directory_depth: relative.components().count().saturating_sub(1),
            file_size,
            modified_unix,
            modified_at,
            neighbors: self.find_neighbors(root, relative),
        };

        debug!(
            "annotate: {} weight={:.3} confidence={:.3} tags={}",
            path,
            weight,
            confidence,
            tags.len()
        );

        IndexEntry::new(
            path,
            ContentType::from_extension(&ext),
            weight,
            tags,
            context,
            confidence,
        )
    }

    fn find_neighbors(&self, root: &Path, relative: &Path) -> Vec<String> {
        let parent = relative.parent().unwrap_or_else(|| Path::new(""));
        let dir = root.join(parent);
        let read = match fs::read_dir(&dir) {
            Ok(read) => read,
            Err(err) => {
                debug!("annotate: cannot list neighbors in {}: {}", dir.display(), err);
                return Vec::new();
            }
        };

        let own_name = relative.file_name();
        let mut names = read
            .filter_map(std::result::Result::ok)
            .filter(|item| item.file_type().is_ok_and(|kind| kind.is_file()))
            .map(|item| item.file_name())
            .filter(|name| Some(name.as_os_str()) != own_name)
            .collect::<Vec<_>>();
        names.sort();

        names
            .into_iter()
            .map(|name| parent.join(name))
            .filter(|candidate| self.should_index(candidate))
            .take(self.config.neighbor_limit)
            .map(|candidate| relative_path_string(&candidate))
            .collect()
    }
}

#[must_use]
pub fn compute_weight(config: &IndexConfig, lower_path: &str, ext: &str) -> f64 {
    let hits = config
        .keyword_amplifiers
        .iter()
        .filter(|keyword| lower_path.contains(keyword.to_lowercase().as_str()))
        .count();
    let raw = 0.1 * config.multiplier_for(ext) + KEYWORD_BONUS * crate::models::usize_to_f64(hits);
    raw.clamp(0.0, 1.0)
}

#[must_use]
pub fn extract_tags(config: &IndexConfig, relative: &Path, lower_path: &str) -> Vec<String> {
    let mut tags = BTreeSet::new();
    for (pattern, associated) in &config.pattern_tags {
        if lower_path.contains(pattern.to_lowercase().as_str()) {
            tags.extend(associated.iter().cloned());
        }
    }

    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            if let Component::Normal(part) = component
                && let Some(tag) = config.directory_tags.get(part.to_string_lossy().as_ref())
            {
                tags.insert(tag.clone());
            }
        }
    }

    for (needle, tag) in &config.substring_tags {
        if lower_path.contains(needle.to_lowercase().as_str()) {
            tags.insert(tag.clone());
        }
    }

    tags.into_iter().collect()
}

#[must_use]
pub fn compute_confidence(
    config: &IndexConfig,
    file_size: u64,
    weight: f64,
    tag_count: usize,
    lower_path: &str,
) -> f64 {
    let mut confidence = BASE_CONFIDENCE;
    if file_size > 0 {
        confidence += 0.1;
    }
    if weight > config.weight_threshold {
        confidence += 0.1;
    }
    confidence += 0.05 * crate::models::usize_to_f64(tag_count.min(MAX_COUNTED_TAGS));
    let keyword = config.confidence_keyword.to_lowercase();
    if !keyword.is_empty() && lower_path.contains(keyword.as_str()) {
        confidence += 0.1;
    }
    confidence.clamp(0.0, 1.0)
}

#[must_use]
pub fn relative_path_string(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

fn build_exclude_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| DocweaveError::Validation(format!("invalid exclude glob '{pattern}': {e}")))?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .map_err(|e| DocweaveError::Validation(e.to_string()))?;
    Ok(Some(set))
}
