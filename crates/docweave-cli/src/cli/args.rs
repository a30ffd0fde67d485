use std::path::PathBuf;

use clap::{Args, ValueEnum};

#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Also write the full manifest as JSON to this file.
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(allow_hyphen_values = true)]
    pub query: String,
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TraversalOrder {
    Bfs,
    Dfs,
}

#[derive(Debug, Args)]
pub struct TraverseArgs {
    #[arg(long, value_enum, default_value_t = TraversalOrder::Bfs)]
    pub order: TraversalOrder,
}

#[derive(Debug, Args)]
pub struct ReorganizeArgs {
    /// Root directory the reorganized copies are written under.
    #[arg(long, value_name = "DIR")]
    pub target: PathBuf,
    /// Plan and report without touching the filesystem.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
