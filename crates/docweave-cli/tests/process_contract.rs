use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use std::{env, path::PathBuf};

use serde_json::Value;
use tempfile::tempdir;

fn cli_bin_path() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_docweave") {
        return PathBuf::from(path);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(PathBuf::from)
        .expect("workspace root");
    let bin_name = if cfg!(windows) {
        "docweave.exe"
    } else {
        "docweave"
    };
    let fallback = workspace_root.join("target").join("debug").join(bin_name);
    assert!(
        fallback.exists(),
        "docweave binary not found at {}",
        fallback.display()
    );
    fallback
}

fn write(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, "notes").expect("write fixture");
}

fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(cli_bin_path())
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("DOCWEAVE_CONFIDENCE_THRESHOLD")
        .env_remove("DOCWEAVE_HIGH_CONFIDENCE_THRESHOLD")
        .env_remove("DOCWEAVE_MIN_CLUSTER_SIZE")
        .env_remove("DOCWEAVE_NEIGHBOR_LIMIT")
        .output()
        .expect("run docweave")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

#[test]
fn index_process_contract_reports_patent_entries() {
    let root = tempdir().expect("tempdir");
    for name in ["bayesian_a.md", "bayesian_b.md", "bayesian_c.md"] {
        write(root.path(), &format!("patent/{name}"));
    }
    let export = root.path().join("out/manifest.json");

    let output = run(
        root.path(),
        &["index", "--export", export.to_str().expect("export path")],
    );
    let value = stdout_json(&output);
    assert_eq!(value["entry_count"], 3);
    assert_eq!(value["metrics"]["total_entries"], 3);
    assert!(export.is_file());
}

#[test]
fn search_process_contract_returns_ranked_hits() {
    let root = tempdir().expect("tempdir");
    for name in ["bayesian_a.md", "bayesian_b.md"] {
        write(root.path(), &format!("patent/{name}"));
    }

    let output = run(root.path(), &["search", "bayesian", "--limit", "1"]);
    let value = stdout_json(&output);
    assert_eq!(value["query"], "bayesian");
    assert_eq!(value["hits"].as_array().map(Vec::len), Some(1));
}

#[test]
fn reorganize_dry_run_process_contract_leaves_target_absent() {
    let root = tempdir().expect("tempdir");
    let target = tempdir().expect("target");
    write(root.path(), "patent/bayesian_a.md");
    let out = target.path().join("organized");

    let output = run(
        root.path(),
        &[
            "reorganize",
            "--target",
            out.to_str().expect("target path"),
            "--dry-run",
        ],
    );
    let value = stdout_json(&output);
    assert_eq!(value["dry_run"], true);
    assert_eq!(value["validation"]["status"], "dry_run_skipped");
    assert!(!out.exists());
}

#[test]
fn missing_root_fails_with_error_payload() {
    let root = tempdir().expect("tempdir");
    let output = run(&root.path().join("absent"), &["plan"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ROOT_UNREADABLE"), "stderr: {stderr}");
}
