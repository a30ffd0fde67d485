use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use docweave_core::Docweave;
use docweave_core::models::{IndexMetrics, SearchHit};
use serde::Serialize;

use crate::cli::{Cli, Commands, TraversalOrder};

mod support;

use self::support::{load_config, print_json};

#[derive(Debug, Serialize)]
struct IndexSummary {
    root: String,
    entry_count: usize,
    metrics: IndexMetrics,
    substantial_clusters: BTreeMap<String, Vec<String>>,
    high_confidence: Vec<ConfidentEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported_to: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ConfidentEntry {
    path: String,
    confidence: f64,
}

#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    hits: Vec<SearchHit>,
}

pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let app = Docweave::new(&cli.root, config)
        .with_context(|| format!("failed to index {}", cli.root.display()))?;
    run_with(&app, cli.command)
}

fn run_with(app: &Docweave, command: Commands) -> Result<()> {
    match command {
        Commands::Index(args) => {
            if let Some(path) = &args.export {
                app.export_manifest(path)
                    .with_context(|| format!("failed to export manifest {}", path.display()))?;
            }
            let index = app.index();
            let summary = IndexSummary {
                root: app.root().display().to_string(),
                entry_count: index.len(),
                metrics: index.metrics(),
                substantial_clusters: index
                    .display_clusters(app.config().planner.display_min_cluster_size),
                high_confidence: index
                    .high_confidence_entries()
                    .into_iter()
                    .map(|entry| ConfidentEntry {
                        path: entry.path.clone(),
                        confidence: entry.confidence,
                    })
                    .collect(),
                exported_to: args.export,
            };
            print_json(&summary)?;
        }
        Commands::Search(args) => {
            let hits = app.search(&args.query, args.limit);
            print_json(&SearchOutput {
                query: &args.query,
                hits,
            })?;
        }
        Commands::Traverse(args) => {
            let traversal = app.traversal();
            match args.order {
                TraversalOrder::Bfs => print_json(&traversal.breadth_first)?,
                TraversalOrder::Dfs => print_json(&traversal.depth_first)?,
            }
        }
        Commands::Plan => {
            print_json(&app.plan())?;
        }
        Commands::Reorganize(args) => {
            let report = app
                .reorganize(&args.target, args.dry_run)
                .with_context(|| format!("failed to reorganize into {}", args.target.display()))?;
            print_json(&report)?;
        }
    }
    Ok(())
}
