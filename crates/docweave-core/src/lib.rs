#![allow(
    clippy::missing_errors_doc,
    reason = "every fallible API returns the crate-wide DocweaveError"
)]

pub mod annotate;
pub mod client;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod fs;
pub mod ident;
pub mod models;
pub mod planner;
pub(crate) mod text;
pub mod trie;
pub mod validate;

pub use client::Docweave;
pub use config::{DocweaveConfig, IndexConfig, PlannerConfig};
pub use engine::{IndexEngine, ScanStats};
pub use error::{DocweaveError, ErrorPayload, Result};
pub use executor::Executor;
pub use ident::{EntryId, PathwaySignature, ShortDigest};
pub use planner::PathwayPlanner;
