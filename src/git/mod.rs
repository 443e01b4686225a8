//! Git repository management for the scaffolder
//!
//! Handles:
//! - Repository detection and initialization on a fixed branch
//! - Staging and committing the scaffold
//! - Remote registration and best-effort push
//! - Branch, commit count and last message for `check`

mod operations;

pub use operations::{
    add_all, add_remote, commit, commit_count, current_branch, has_staged_changes, head_sha,
    init, is_repo_root, last_commit_message, push, remote_url, version,
};

use serde::{Deserialize, Serialize};

/// Author/committer identity passed to `git commit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Check that the git executable is reachable on PATH
pub fn ensure_available() -> anyhow::Result<()> {
    which::which("git").map_err(|_| anyhow::anyhow!("git not found on PATH"))?;
    Ok(())
}

/// Whether git-lfs is installed; only affects logging, never the run
pub fn lfs_available() -> bool {
    which::which("git-lfs").is_ok()
}
