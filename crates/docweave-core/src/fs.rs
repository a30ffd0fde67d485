use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{DocweaveError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    File,
    Directory,
}

// File -> file copy, or directory -> recursive merge. Conflicting files in
// the target are overwritten; unrelated target entries are left alone. A file
// copied onto an existing directory lands inside it under its own name.
pub fn copy_path(source: &Path, target: &Path) -> Result<CopyKind> {
    let meta = fs::metadata(source)?;
    if meta.is_dir() {
        merge_directory(source, target)?;
        return Ok(CopyKind::Directory);
    }
    if target.is_dir() {
        let name = source.file_name().ok_or_else(|| {
            DocweaveError::Validation(format!("invalid source filename: {}", source.display()))
        })?;
        fs::copy(source, target.join(name))?;
        return Ok(CopyKind::File);
    }
    fs::copy(source, target)?;
    Ok(CopyKind::File)
}

fn merge_directory(source: &Path, target: &Path) -> Result<()> {
    if target.exists() && !fs::symlink_metadata(target)?.is_dir() {
        remove_path_if_exists(target)?;
    }
    fs::create_dir_all(target)?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let source_path = entry.path();
        let target_path = target.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            merge_directory(&source_path, &target_path)?;
            continue;
        }

        if target_path.is_dir() {
            return Err(DocweaveError::from(std::io::Error::new(
                std::io::ErrorKind::IsADirectory,
                format!(
                    "cannot replace directory {} with file {}",
                    target_path.display(),
                    source_path.display()
                ),
            )));
        }
        fs::copy(&source_path, &target_path)?;
    }

    Ok(())
}

fn remove_path_if_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .and_then(|x| x.to_str())
        .ok_or_else(|| {
            DocweaveError::Validation(format!("invalid target filename: {}", path.display()))
        })?;
    let tmp_path = parent.join(format!(
        ".{file_name}.docweave.tmp.{}",
        uuid::Uuid::new_v4().simple()
    ));

    {
        let mut tmp = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&tmp_path)?;
        tmp.write_all(content.as_bytes())?;
        tmp.sync_all()?;
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(DocweaveError::from(err));
    }

    if let Ok(dir) = fs::File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut raw = serde_json::to_string_pretty(value)?;
    raw.push('\n');
    write_atomic(path, &raw)
}
