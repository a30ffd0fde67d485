use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::config::DocweaveConfig;
use crate::engine::IndexEngine;
use crate::error::Result;
use crate::executor::Executor;
use crate::fs::write_json_atomic;
use crate::models::{
    IndexManifest, PathwayPlan, ReorganizationReport, SearchHit, TraversalSnapshot,
    summarize_results,
};
use crate::planner::PathwayPlanner;
use crate::validate::validate;

// One run over one source tree: owns the index and drives planning,
// execution and validation against it.
#[derive(Debug, Clone)]
pub struct Docweave {
    config: DocweaveConfig,
    engine: IndexEngine,
}

impl Docweave {
    pub fn new(root: impl Into<PathBuf>, config: DocweaveConfig) -> Result<Self> {
        config.validate()?;
        let engine = IndexEngine::build(root, config.index.clone())?;
        Ok(Self { config, engine })
    }

    pub fn reindex(&mut self) -> Result<()> {
        self.engine = IndexEngine::build(self.engine.root().to_path_buf(), self.config.index.clone())?;
        Ok(())
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.engine.root()
    }

    #[must_use]
    pub const fn config(&self) -> &DocweaveConfig {
        &self.config
    }

    #[must_use]
    pub const fn index(&self) -> &IndexEngine {
        &self.engine
    }

    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        self.engine.search(query, limit)
    }

    #[must_use]
    pub fn traversal(&self) -> TraversalSnapshot {
        self.engine.traversal()
    }

    #[must_use]
    pub fn manifest(&self) -> IndexManifest {
        self.engine.manifest()
    }

    pub fn export_manifest(&self, path: &Path) -> Result<IndexManifest> {
        let manifest = self.manifest();
        write_json_atomic(path, &manifest)?;
        info!("manifest: exported {} entries -> {}", manifest.entries.len(), path.display());
        Ok(manifest)
    }

    #[must_use]
    pub fn plan(&self) -> PathwayPlan {
        PathwayPlanner::new(&self.engine, &self.config.planner).plan()
    }

    pub fn reorganize(&self, target_root: &Path, dry_run: bool) -> Result<ReorganizationReport> {
        let run_id = Uuid::new_v4().to_string();
        info!(
            "reorganize[{}]: {} -> {} (dry_run={})",
            run_id,
            self.root().display(),
            target_root.display(),
            dry_run
        );

        let plan = self.plan();
        if !dry_run {
            fs::create_dir_all(target_root)?;
        }

        let results = Executor::new(self.root()).execute(&plan.pathways, target_root, dry_run);
        let summary = summarize_results(&results);
        let validation = validate(&self.engine, target_root, dry_run)?;

        Ok(ReorganizationReport {
            run_id,
            executed_at: Utc::now(),
            source_root: self.root().display().to_string(),
            target_root: target_root.display().to_string(),
            dry_run,
            results,
            summary,
            validation,
        })
    }
}
