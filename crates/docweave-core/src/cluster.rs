use std::collections::{BTreeMap, BTreeSet};

use crate::models::IndexEntry;
use crate::text::tokenize_vec;

// tag -> member paths in insertion order, without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagClusters {
    clusters: BTreeMap<String, Vec<String>>,
}

impl TagClusters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: &IndexEntry) {
        for tag in &entry.tags {
            let members = self.clusters.entry(tag.clone()).or_default();
            if !members.iter().any(|path| path == &entry.path) {
                members.push(entry.path.clone());
            }
        }
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.clusters.get(tag).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.clusters
            .iter()
            .map(|(tag, members)| (tag.as_str(), members.as_slice()))
    }

    #[must_use]
    pub fn with_min_size(&self, min_size: usize) -> Vec<(&str, &[String])> {
        self.iter()
            .filter(|(_, members)| members.len() >= min_size)
            .collect()
    }

    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.clusters.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeSet<String>>,
}

impl InvertedIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: &IndexEntry) {
        let text = format!("{} {}", entry.path, entry.tags.join(" "));
        for token in tokenize_vec(&text) {
            self.postings
                .entry(token)
                .or_default()
                .insert(entry.path.clone());
        }
    }

    #[must_use]
    pub fn paths_for(&self, token: &str) -> Option<&BTreeSet<String>> {
        self.postings.get(&token.to_lowercase())
    }

    #[must_use]
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }
}
