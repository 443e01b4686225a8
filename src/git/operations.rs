//! Low-level git operations
//!
//! Every operation runs `git` with an explicit working directory so the
//! scaffolder never depends on the process cwd.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output};

use super::Identity;

fn git(repo: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(repo);
    cmd
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// Check if `repo` itself is the root of a git repository.
///
/// A directory nested inside some other repository does not count; the
/// scaffold always gets its own repository.
pub fn is_repo_root(repo: &Path) -> bool {
    crate::paths::git_dir(repo).exists()
}

/// Initialize a repository whose unborn branch is `branch`
pub fn init(repo: &Path, branch: &str) -> Result<()> {
    let output = git(repo)
        .args(["init", "--initial-branch", branch])
        .output()
        .context("Failed to run git init")?;

    if output.status.success() {
        return Ok(());
    }

    // git < 2.28 has no --initial-branch; init plainly and repoint HEAD
    tracing::debug!(stderr = %stderr_of(&output), "git init --initial-branch unsupported, falling back");

    let output = git(repo)
        .arg("init")
        .output()
        .context("Failed to run git init")?;

    if !output.status.success() {
        anyhow::bail!("Failed to initialize git repository: {}", stderr_of(&output));
    }

    let output = git(repo)
        .args(["symbolic-ref", "HEAD", &format!("refs/heads/{}", branch)])
        .output()
        .context("Failed to set initial branch")?;

    if !output.status.success() {
        anyhow::bail!(
            "Failed to set initial branch to {}: {}",
            branch,
            stderr_of(&output)
        );
    }

    Ok(())
}

/// Stage all changes, including deletions
pub fn add_all(repo: &Path) -> Result<()> {
    let output = git(repo)
        .args(["add", "-A"])
        .output()
        .context("Failed to stage changes")?;

    if !output.status.success() {
        anyhow::bail!("Failed to stage changes: {}", stderr_of(&output));
    }

    Ok(())
}

/// Check whether the index differs from HEAD (or from the empty tree on an unborn branch)
pub fn has_staged_changes(repo: &Path) -> Result<bool> {
    let output = git(repo)
        .args(["diff", "--cached", "--quiet"])
        .output()
        .context("Failed to inspect staged changes")?;

    match output.status.code() {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => anyhow::bail!("Failed to inspect staged changes: {}", stderr_of(&output)),
    }
}

/// Create a commit
///
/// `identity` is passed as `-c user.name/-c user.email` so a scaffold can be
/// committed on machines without a configured git identity.
pub fn commit(
    repo: &Path,
    message: &str,
    allow_empty: bool,
    identity: Option<&Identity>,
) -> Result<()> {
    let mut cmd = git(repo);

    if let Some(identity) = identity {
        cmd.args(["-c", &format!("user.name={}", identity.name)])
            .args(["-c", &format!("user.email={}", identity.email)]);
    }

    cmd.args(["commit", "-m", message]);
    if allow_empty {
        cmd.arg("--allow-empty");
    }

    let output = cmd.output().context("Failed to create commit")?;

    if !output.status.success() {
        anyhow::bail!("Failed to create commit: {}", stderr_of(&output));
    }

    Ok(())
}

/// Get the full SHA of HEAD
pub fn head_sha(repo: &Path) -> Result<String> {
    let output = git(repo)
        .args(["rev-parse", "HEAD"])
        .output()
        .context("Failed to get HEAD sha")?;

    if !output.status.success() {
        anyhow::bail!("Failed to get HEAD sha: {}", stderr_of(&output));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Get the subject line of the last commit, if any commit exists
pub fn last_commit_message(repo: &Path) -> Result<Option<String>> {
    let output = git(repo)
        .args(["log", "-1", "--format=%s"])
        .output()
        .context("Failed to read last commit message")?;

    if !output.status.success() {
        // Unborn branch
        return Ok(None);
    }

    let message = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!message.is_empty()).then_some(message))
}

/// Count commits reachable from HEAD (0 on an unborn branch)
pub fn commit_count(repo: &Path) -> Result<usize> {
    let output = git(repo)
        .args(["rev-list", "--count", "HEAD"])
        .output()
        .context("Failed to count commits")?;

    if !output.status.success() {
        return Ok(0);
    }

    let count_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
    count_str.parse().context("Failed to parse commit count")
}

/// Get the name of the current branch
pub fn current_branch(repo: &Path) -> Result<String> {
    let output = git(repo)
        .args(["symbolic-ref", "--short", "HEAD"])
        .output()
        .context("Failed to get current branch")?;

    if !output.status.success() {
        anyhow::bail!("Failed to get current branch: {}", stderr_of(&output));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Get remote URL, or None if the remote is not configured
pub fn remote_url(repo: &Path, remote: &str) -> Result<Option<String>> {
    let output = git(repo)
        .args(["remote", "get-url", remote])
        .output()
        .context("Failed to get remote URL")?;

    if !output.status.success() {
        return Ok(None);
    }

    Ok(Some(
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
    ))
}

/// Add a git remote
pub fn add_remote(repo: &Path, name: &str, url: &str) -> Result<()> {
    let output = git(repo)
        .args(["remote", "add", name, url])
        .output()
        .context("Failed to add remote")?;

    if !output.status.success() {
        anyhow::bail!("Failed to add remote: {}", stderr_of(&output));
    }

    Ok(())
}

/// Push `branch` to `remote` and set upstream tracking
///
/// Credential prompts are disabled so an unattended run fails instead of
/// blocking on stdin.
pub fn push(repo: &Path, remote: &str, branch: &str) -> Result<()> {
    let output = git(repo)
        .args(["push", "--set-upstream", remote, branch])
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .context("Failed to run git push")?;

    if !output.status.success() {
        anyhow::bail!("Failed to push {} to {}: {}", branch, remote, stderr_of(&output));
    }

    Ok(())
}

/// Get the installed git version string (e.g. "git version 2.43.0")
pub fn version() -> Result<String> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .context("Failed to run git --version")?;

    if !output.status.success() {
        anyhow::bail!("git --version failed: {}", stderr_of(&output));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
