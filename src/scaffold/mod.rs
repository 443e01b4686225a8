//! Repository scaffolder
//!
//! Public interface only; the step sequence lives in `internal`.
//!
//! A run is strictly ordered:
//! 1. Create the directory tree
//! 2. Write every placeholder file (overwriting)
//! 3. `git init` on `main` if the root is not yet a repository
//! 4. Stage everything and commit according to the [`CommitPolicy`]
//! 5. Register the remote and push, when a remote URL is configured
//!
//! Steps 1-4 abort the run on the first error with no cleanup. Remote
//! registration of an existing name and the push are the only failures
//! that are tolerated; they are reported in [`ScaffoldReport`] instead.
//!
//! # Example
//!
//! ```no_run
//! use waveguide::config::ScaffoldConfig;
//! use waveguide::scaffold;
//!
//! let config = ScaffoldConfig::new("/tmp/waveguide");
//! let report = scaffold::run(&config).expect("scaffold failed");
//! println!("{} files written", report.files.len());
//! ```
//!
//! [`CommitPolicy`]: crate::config::CommitPolicy

mod check;
mod internal;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::ScaffoldConfig;
use crate::paths;
use crate::templates::{self, FileKind};

pub use check::{check, CheckEntry, CheckReport, CheckStatus};

/// What happened at the commit step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommitOutcome {
    Committed { sha: String, empty: bool },
    /// Nothing staged and the policy is `skip-unchanged`
    Skipped,
}

/// What happened when registering the remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoteOutcome {
    NotConfigured,
    Added,
    AlreadyExists { url_matches: bool },
}

/// What happened at the push step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PushOutcome {
    NotAttempted,
    Pushed,
    Failed { reason: String },
}

/// Result of a successful scaffold run
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    pub target_root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub directories: Vec<String>,
    pub files: Vec<String>,
    pub repo_initialized: bool,
    pub commit: CommitOutcome,
    pub remote: RemoteOutcome,
    pub push: PushOutcome,
}

/// One path the scaffold owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Directory,
    File(FileKind),
}

/// Materialize the scaffold under `config.target_root` and commit it
///
/// # Errors
///
/// Returns an error if git is missing, any directory or file cannot be
/// written, or `init`/`add`/`commit` fails. Push failures are not errors.
pub fn run(config: &ScaffoldConfig) -> Result<ScaffoldReport> {
    internal::execute(config)
}

/// List every directory and file `run` would touch, in order, without I/O
pub fn plan(config: &ScaffoldConfig) -> Result<Vec<PlannedEntry>> {
    let mut entries: Vec<PlannedEntry> = paths::DIRECTORIES
        .iter()
        .map(|dir| PlannedEntry {
            path: dir.to_string(),
            entry_type: EntryType::Directory,
        })
        .collect();

    entries.extend(
        templates::render_all(&config.project_name)?
            .into_iter()
            .map(|file| PlannedEntry {
                path: file.path.to_string(),
                entry_type: EntryType::File(file.kind),
            }),
    );

    Ok(entries)
}
