use std::collections::{BTreeMap, VecDeque};

use crate::models::{BreadthRecord, DepthRecord, IndexEntry};
use crate::text::normalize_trie_key;

const SAMPLE_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    entries: Vec<IndexEntry>,
    is_terminal: bool,
    depth: usize,
    aggregate_weight: f64,
}

impl TrieNode {
    fn child(depth: usize) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn children(&self) -> &BTreeMap<char, TrieNode> {
        &self.children
    }

    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub const fn aggregate_weight(&self) -> f64 {
        self.aggregate_weight
    }

    fn sample_paths(&self) -> Vec<String> {
        self.entries
            .iter()
            .take(SAMPLE_LIMIT)
            .map(|entry| entry.path.clone())
            .collect()
    }
}

// Character-keyed prefix tree over normalized paths. Distinct paths that
// normalize to the same key share one terminal node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathTrie {
    root: TrieNode,
    node_count: usize,
}

impl PathTrie {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: IndexEntry) {
        let key = normalize_trie_key(&entry.path);
        let mut current = &mut self.root;
        for ch in key.chars() {
            let depth = current.depth + 1;
            let created = !current.children.contains_key(&ch);
            current = current
                .children
                .entry(ch)
                .or_insert_with(|| TrieNode::child(depth));
            if created {
                self.node_count += 1;
            }
        }
        current.is_terminal = true;
        current.aggregate_weight += entry.weight;
        current.entries.push(entry);
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&TrieNode> {
        let key = normalize_trie_key(path);
        let mut current = &self.root;
        for ch in key.chars() {
            current = current.children.get(&ch)?;
        }
        Some(current)
    }

    #[must_use]
    pub const fn root(&self) -> &TrieNode {
        &self.root
    }

    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.depth_first()
            .iter()
            .map(|record| record.depth)
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn breadth_first(&self) -> Vec<BreadthRecord> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([(&self.root, String::new())]);
        while let Some((node, prefix)) = queue.pop_front() {
            if !node.entries.is_empty() {
                out.push(BreadthRecord {
                    prefix: prefix.clone(),
                    entry_count: node.entries.len(),
                    aggregate_weight: node.aggregate_weight,
                    sample_paths: node.sample_paths(),
                });
            }
            for (ch, child) in &node.children {
                let mut next = prefix.clone();
                next.push(*ch);
                queue.push_back((child, next));
            }
        }
        out
    }

    // Pre-order walk with an explicit stack; children are pushed in reverse so
    // they pop in key order.
    #[must_use]
    pub fn depth_first(&self) -> Vec<DepthRecord> {
        let mut out = Vec::new();
        let mut stack = vec![(&self.root, String::new())];
        while let Some((node, prefix)) = stack.pop() {
            if !node.entries.is_empty() {
                out.push(DepthRecord {
                    depth: node.depth,
                    prefix: prefix.clone(),
                    entry_count: node.entries.len(),
                    aggregate_weight: node.aggregate_weight,
                    sample_paths: node.sample_paths(),
                    sample_ids: node
                        .entries
                        .iter()
                        .take(SAMPLE_LIMIT)
                        .map(|entry| entry.id)
                        .collect(),
                });
            }
            for (ch, child) in node.children.iter().rev() {
                let mut next = prefix.clone();
                next.push(*ch);
                stack.push((child, next));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentType, EntryContext};

    fn entry(path: &str, weight: f64) -> IndexEntry {
        IndexEntry::new(
            path,
            ContentType::StructuredText,
            weight,
            Vec::new(),
            EntryContext {
                directory_depth: path.matches('/').count(),
                file_size: 1,
                modified_unix: 0.0,
                modified_at: None,
                neighbors: Vec::new(),
            },
            0.96,
        )
    }

    #[test]
    fn colliding_normalized_paths_accumulate_at_one_terminal() {
        let mut trie = PathTrie::new();
        trie.insert(entry("docs/a.md", 0.2));
        trie.insert(entry("docs_a.md", 0.3));
        trie.insert(entry("DOCS/A.md", 0.1));

        let node = trie.get("docs/a.md").expect("terminal node");
        assert!(node.is_terminal());
        assert_eq!(node.entries().len(), 3);
        assert!((node.aggregate_weight() - 0.6).abs() < 1e-9);
        assert_eq!(node.depth(), "docs_a.md".chars().count());
    }

    #[test]
    fn only_terminal_nodes_accumulate_weight() {
        let mut trie = PathTrie::new();
        trie.insert(entry("ab.md", 0.5));
        let inner = trie.get("a").expect("inner node");
        assert!(!inner.is_terminal());
        assert!(inner.aggregate_weight().abs() < f64::EPSILON);
        assert!(inner.entries().is_empty());
    }

    #[test]
    fn breadth_first_emits_shallower_terminals_first() {
        let mut trie = PathTrie::new();
        trie.insert(entry("long/path/file.md", 0.4));
        trie.insert(entry("b.md", 0.2));
        trie.insert(entry("a.md", 0.3));

        let records = trie.breadth_first();
        let prefixes = records
            .iter()
            .map(|record| record.prefix.as_str())
            .collect::<Vec<_>>();
        assert_eq!(prefixes, vec!["a.md", "b.md", "long_path_file.md"]);
        assert_eq!(records[0].sample_paths, vec!["a.md".to_string()]);
    }

    #[test]
    fn depth_first_is_preorder_and_reports_depth() {
        let mut trie = PathTrie::new();
        trie.insert(entry("b.md", 0.2));
        trie.insert(entry("a.md", 0.3));
        trie.insert(entry("a.md.bak.md", 0.1));

        let records = trie.depth_first();
        let prefixes = records
            .iter()
            .map(|record| record.prefix.as_str())
            .collect::<Vec<_>>();
        assert_eq!(prefixes, vec!["a.md", "a.md.bak.md", "b.md"]);
        assert_eq!(records[0].depth, 4);
        assert_eq!(records[1].depth, 11);
        assert_eq!(records[0].sample_ids.len(), 1);
        assert_eq!(trie.max_depth(), 11);
    }

    #[test]
    fn traversal_samples_are_capped_at_three() {
        let mut trie = PathTrie::new();
        for path in ["x/y.md", "x_y.md", "X/Y.md", "x\\y.md"] {
            trie.insert(entry(path, 0.1));
        }
        let records = trie.breadth_first();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entry_count, 4);
        assert_eq!(records[0].sample_paths.len(), 3);
    }

    #[test]
    fn empty_trie_traverses_to_nothing() {
        let trie = PathTrie::new();
        assert!(trie.breadth_first().is_empty());
        assert!(trie.depth_first().is_empty());
        assert_eq!(trie.node_count(), 0);
    }
}
