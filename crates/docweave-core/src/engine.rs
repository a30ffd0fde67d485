use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::annotate::Annotator;
use crate::cluster::{InvertedIndex, TagClusters};
use crate::config::IndexConfig;
use crate::error::{DocweaveError, Result};
use crate::models::{
    IndexEntry, IndexManifest, IndexMetrics, SearchHit, ThresholdSnapshot, TraversalSnapshot,
    WeightStats, usize_to_f64,
};
use crate::text::tokenize_set;
use crate::trie::PathTrie;

const PATH_MATCH_POINTS: usize = 2;
const TAG_MATCH_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_seen: usize,
    pub filtered_out: usize,
    pub below_threshold: usize,
    pub walk_errors: usize,
}

// One run's index. Owns every accumulated structure; nothing is global.
#[derive(Debug, Clone)]
pub struct IndexEngine {
    root: PathBuf,
    config: IndexConfig,
    generated_at: DateTime<Utc>,
    entries: BTreeMap<String, IndexEntry>,
    trie: PathTrie,
    clusters: TagClusters,
    inverted: InvertedIndex,
    scan_stats: ScanStats,
}

impl IndexEngine {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: IndexConfig) -> Self {
        Self {
            root: root.into(),
            config,
            generated_at: Utc::now(),
            entries: BTreeMap::new(),
            trie: PathTrie::new(),
            clusters: TagClusters::new(),
            inverted: InvertedIndex::new(),
            scan_stats: ScanStats::default(),
        }
    }

    pub fn build(root: impl Into<PathBuf>, config: IndexConfig) -> Result<Self> {
        let mut engine = Self::new(root, config);
        engine.scan()?;
        Ok(engine)
    }

    fn scan(&mut self) -> Result<()> {
        ensure_root_readable(&self.root)?;
        info!("index: scan start -> {}", self.root.display());

        let config = self.config.clone();
        let annotator = Annotator::new(&config)?;
        let mut stats = ScanStats::default();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|item| keep_entry(item, &annotator));

        for item in walker {
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    stats.walk_errors += 1;
                    warn!("index: walk error: {}", err);
                    continue;
                }
            };
            if !item.file_type().is_file() {
                continue;
            }
            stats.files_seen += 1;

            let Ok(relative) = item.path().strip_prefix(&self.root) else {
                continue;
            };
            if !annotator.should_index(relative) {
                stats.filtered_out += 1;
                continue;
            }

            let entry = annotator.annotate(&self.root, relative);
            if entry.confidence >= self.config.confidence_threshold {
                let _ = self.insert(entry);
            } else {
                stats.below_threshold += 1;
                debug!(
                    "index: skip {} (confidence {:.3} < {:.3})",
                    entry.path, entry.confidence, self.config.confidence_threshold
                );
            }
        }

        self.generated_at = Utc::now();
        self.scan_stats = stats;
        info!(
            "index: done, entries={} (seen={}, filtered={}, below_threshold={}, walk_errors={})",
            self.entries.len(),
            stats.files_seen,
            stats.filtered_out,
            stats.below_threshold,
            stats.walk_errors
        );
        Ok(())
    }

    // Each path enters the trie and postings once; later inserts are ignored.
    pub(crate) fn insert(&mut self, entry: IndexEntry) -> bool {
        if self.entries.contains_key(&entry.path) {
            debug!("index: duplicate insert ignored for {}", entry.path);
            return false;
        }
        self.clusters.insert(&entry);
        self.inverted.insert(&entry);
        self.trie.insert(entry.clone());
        self.entries.insert(entry.path.clone(), entry);
        true
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn config(&self) -> &IndexConfig {
        &self.config
    }

    #[must_use]
    pub const fn scan_stats(&self) -> ScanStats {
        self.scan_stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    #[must_use]
    pub const fn trie(&self) -> &PathTrie {
        &self.trie
    }

    #[must_use]
    pub const fn clusters(&self) -> &TagClusters {
        &self.clusters
    }

    #[must_use]
    pub fn paths_for_token(&self, token: &str) -> Vec<String> {
        self.inverted
            .paths_for(token)
            .map(|paths| paths.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn traversal(&self) -> TraversalSnapshot {
        TraversalSnapshot {
            breadth_first: self.trie.breadth_first(),
            depth_first: self.trie.depth_first(),
        }
    }

    #[must_use]
    pub fn metrics(&self) -> IndexMetrics {
        let total = self.entries.len();
        let high = self
            .entries
            .values()
            .filter(|entry| entry.confidence >= self.config.high_confidence_threshold)
            .count();
        let mut depth_histogram = BTreeMap::new();
        for entry in self.entries.values() {
            *depth_histogram
                .entry(entry.context.directory_depth)
                .or_insert(0) += 1;
        }

        IndexMetrics {
            total_entries: total,
            high_confidence_entries: high,
            preservation_ratio: usize_to_f64(high) / usize_to_f64(total.max(1)),
            tag_cluster_count: self.clusters.len(),
            depth_histogram,
            weight_stats: WeightStats::from_weights(self.entries.values().map(|e| e.weight)),
        }
    }

    #[must_use]
    pub fn manifest(&self) -> IndexManifest {
        IndexManifest {
            generated_at: self.generated_at,
            root: self.root.display().to_string(),
            thresholds: ThresholdSnapshot {
                confidence_threshold: self.config.confidence_threshold,
                high_confidence_threshold: self.config.high_confidence_threshold,
            },
            entries: self.entries.clone(),
            clusters: self.clusters.to_map(),
            traversal: self.traversal(),
            metrics: self.metrics(),
        }
    }

    // Clusters with more than `min_exclusive` members, members sorted.
    #[must_use]
    pub fn display_clusters(&self, min_exclusive: usize) -> BTreeMap<String, Vec<String>> {
        self.clusters
            .iter()
            .filter(|(_, members)| members.len() > min_exclusive)
            .map(|(tag, members)| {
                let mut sorted = members.to_vec();
                sorted.sort();
                (tag.to_string(), sorted)
            })
            .collect()
    }

    #[must_use]
    pub fn high_confidence_entries(&self) -> Vec<&IndexEntry> {
        let mut out = self
            .entries
            .values()
            .filter(|entry| entry.confidence >= self.config.high_confidence_threshold)
            .collect::<Vec<_>>();
        out.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        out
    }

    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let query_tokens = tokenize_set(query);
        if query_tokens.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for entry in self.entries.values() {
            let path_tokens = tokenize_set(&entry.path);
            let tag_tokens = entry
                .tags
                .iter()
                .flat_map(|tag| tokenize_set(tag))
                .collect::<BTreeSet<_>>();
            let path_matches = query_tokens.intersection(&path_tokens).count();
            let tag_matches = query_tokens.intersection(&tag_tokens).count();
            let points = PATH_MATCH_POINTS * path_matches + TAG_MATCH_POINTS * tag_matches;
            let score = usize_to_f64(points) * entry.weight;
            if score > 0.0 {
                hits.push(SearchHit {
                    path: entry.path.clone(),
                    score,
                    path_matches,
                    tag_matches,
                    entry: entry.clone(),
                });
            }
        }

        // Stable sort keeps storage order among ties.
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(limit);
        hits
    }
}

fn ensure_root_readable(root: &Path) -> Result<()> {
    let unreadable = |source| DocweaveError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    };
    let meta = fs::metadata(root).map_err(unreadable)?;
    if !meta.is_dir() {
        return Err(unreadable(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            "scan root is not a directory",
        )));
    }
    fs::read_dir(root).map_err(unreadable)?;
    Ok(())
}

// Prunes skipped directories before descent; the root itself is always kept.
fn keep_entry(item: &DirEntry, annotator: &Annotator<'_>) -> bool {
    if item.depth() == 0 || !item.file_type().is_dir() {
        return true;
    }
    item.file_name()
        .to_str()
        .is_none_or(|name| !annotator.is_skipped_dir_name(name))
}
