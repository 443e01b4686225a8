//! Verification of an existing scaffold

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ScaffoldConfig;
use crate::git;
use crate::paths;
use crate::templates::{self, FileKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Missing,
    Empty,
    Invalid { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckEntry {
    pub path: String,
    #[serde(flatten)]
    pub status: CheckStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub target_root: PathBuf,
    pub entries: Vec<CheckEntry>,
    pub is_repository: bool,
    pub branch: Option<String>,
    pub commits: usize,
    pub last_commit: Option<String>,
}

impl CheckReport {
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.status == CheckStatus::Ok)
    }

    pub fn problems(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries.iter().filter(|e| e.status != CheckStatus::Ok)
    }
}

/// Verify every layout entry under the target root
///
/// Only I/O errors unrelated to the entries themselves are returned as
/// errors; missing or malformed entries are reported per entry.
pub fn check(config: &ScaffoldConfig) -> Result<CheckReport> {
    let root = config.target_root.as_path();
    let mut entries = Vec::new();

    for dir in paths::DIRECTORIES {
        let status = if paths::resolve(root, dir).is_dir() {
            CheckStatus::Ok
        } else {
            CheckStatus::Missing
        };
        entries.push(CheckEntry {
            path: dir.to_string(),
            status,
        });
    }

    for file in templates::render_all(&config.project_name)? {
        entries.push(CheckEntry {
            path: file.path.to_string(),
            status: check_file(&paths::resolve(root, file.path), file.kind),
        });
    }

    let is_repository = git::is_repo_root(root);
    let (branch, commits, last_commit) = if is_repository && git::ensure_available().is_ok() {
        (
            // Detached HEAD has no branch name
            git::current_branch(root).ok(),
            git::commit_count(root)?,
            git::last_commit_message(root)?,
        )
    } else {
        (None, 0, None)
    };

    Ok(CheckReport {
        target_root: root.to_path_buf(),
        entries,
        is_repository,
        branch,
        commits,
        last_commit,
    })
}

fn check_file(path: &Path, kind: FileKind) -> CheckStatus {
    if !path.is_file() {
        return CheckStatus::Missing;
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return CheckStatus::Invalid {
                reason: e.to_string(),
            }
        }
    };

    if content.trim().is_empty() {
        return CheckStatus::Empty;
    }

    match kind {
        FileKind::Text => CheckStatus::Ok,
        FileKind::Yaml => match serde_yaml::from_str::<serde_yaml::Value>(&content) {
            Ok(_) => CheckStatus::Ok,
            Err(e) => CheckStatus::Invalid {
                reason: e.to_string(),
            },
        },
        FileKind::Notebook => validate_notebook(&content),
    }
}

fn validate_notebook(content: &str) -> CheckStatus {
    let notebook: serde_json::Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(e) => {
            return CheckStatus::Invalid {
                reason: e.to_string(),
            }
        }
    };

    if notebook.get("nbformat").and_then(|v| v.as_u64()) != Some(4) {
        return CheckStatus::Invalid {
            reason: "nbformat is not 4".to_string(),
        };
    }
    if !notebook.get("cells").is_some_and(|v| v.is_array()) {
        return CheckStatus::Invalid {
            reason: "cells is not an array".to_string(),
        };
    }

    CheckStatus::Ok
}
