use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use docweave_core::DocweaveConfig;
use tracing::debug;

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub(super) fn load_config(path: Option<&Path>) -> Result<DocweaveConfig> {
    match path {
        Some(path) => {
            debug!("config: loading {}", path.display());
            DocweaveConfig::load_with_env(path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        None => DocweaveConfig::from_env().context("invalid config from environment"),
    }
}
