use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::fs::copy_path;
use crate::models::{ExecutionResult, ExecutionStatus, Pathway};

pub struct Executor {
    source_root: PathBuf,
}

impl Executor {
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    // Runs pathways in ascending priority, generation order within a priority.
    // Per-pathway faults are recorded and never stop the run.
    #[must_use]
    pub fn execute(
        &self,
        pathways: &[Pathway],
        target_root: &Path,
        dry_run: bool,
    ) -> Vec<ExecutionResult> {
        let mut ordered = pathways.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|pathway| pathway.priority);

        info!(
            "execute: {} pathways -> {} (dry_run={})",
            ordered.len(),
            target_root.display(),
            dry_run
        );

        let results = ordered
            .into_iter()
            .map(|pathway| self.execute_one(pathway, target_root, dry_run))
            .collect::<Vec<_>>();

        let failed = results
            .iter()
            .filter(|result| result.status == ExecutionStatus::Error)
            .count();
        info!("execute: done, results={} errors={}", results.len(), failed);
        results
    }

    fn execute_one(&self, pathway: &Pathway, target_root: &Path, dry_run: bool) -> ExecutionResult {
        let mut result = ExecutionResult {
            signature: pathway.signature,
            source: pathway.source_path.clone(),
            target: pathway.target_path.clone(),
            weight: pathway.weight,
            status: ExecutionStatus::Pending,
            error: None,
        };

        if dry_run {
            result.status = ExecutionStatus::DryRunSuccess;
            return result;
        }

        let source = self.source_root.join(&pathway.source_path);
        let target = target_root.join(&pathway.target_path);
        match transfer(&source, &target) {
            Ok(true) => {
                debug!("execute: {} -> {}", pathway.source_path, pathway.target_path);
                result.status = ExecutionStatus::Success;
            }
            Ok(false) => {
                debug!("execute: source missing {}", source.display());
                result.status = ExecutionStatus::SourceNotFound;
            }
            Err(err) => {
                warn!(
                    "execute: {} -> {} failed: {}",
                    pathway.source_path, pathway.target_path, err
                );
                result.status = ExecutionStatus::Error;
                result.error = Some(err.to_string());
            }
        }
        result
    }
}

fn transfer(source: &Path, target: &Path) -> Result<bool> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    if !source.exists() {
        return Ok(false);
    }
    copy_path(source, target)?;
    Ok(true)
}
