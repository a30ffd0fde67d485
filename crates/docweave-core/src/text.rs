use std::collections::BTreeSet;

#[must_use]
pub fn tokenize_vec(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|x| !x.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[must_use]
pub fn tokenize_set(text: &str) -> BTreeSet<String> {
    tokenize_vec(text).into_iter().collect()
}

// Trie key: lowercase with both separator styles folded into `_`.
#[must_use]
pub fn normalize_trie_key(path: &str) -> String {
    path.to_lowercase().replace(['/', '\\'], "_")
}
