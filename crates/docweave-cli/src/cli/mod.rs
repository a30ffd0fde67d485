use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;

#[cfg(test)]
mod tests;

pub use args::{IndexArgs, ReorganizeArgs, SearchArgs, TraversalOrder, TraverseArgs};

#[derive(Debug, Parser)]
#[command(name = "docweave")]
#[command(about = "Annotate, index and reorganize mixed-format document trees", version)]
pub struct Cli {
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Config file (.toml, .yaml, .yml or .json). Env overrides still apply.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Index(IndexArgs),
    Search(SearchArgs),
    Traverse(TraverseArgs),
    Plan,
    Reorganize(ReorganizeArgs),
}

impl Commands {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Index(_) => "index",
            Self::Search(_) => "search",
            Self::Traverse(_) => "traverse",
            Self::Plan => "plan",
            Self::Reorganize(_) => "reorganize",
        }
    }
}
