use serde::{Deserialize, Serialize};

use super::IndexEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub path: String,
    pub score: f64,
    pub path_matches: usize,
    pub tag_matches: usize,
    pub entry: IndexEntry,
}
