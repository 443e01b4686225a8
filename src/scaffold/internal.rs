//! Internal implementation for the scaffolder

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{CommitOutcome, PushOutcome, RemoteOutcome, ScaffoldReport};
use crate::config::{CommitPolicy, ScaffoldConfig};
use crate::git;
use crate::paths;
use crate::templates::{self, ScaffoldFile};

/// Main execution logic for a scaffold run
pub fn execute(config: &ScaffoldConfig) -> Result<ScaffoldReport> {
    let started_at = chrono::Utc::now();
    let root = config.target_root.as_path();

    // === STEP 0: TOOLING ===
    git::ensure_available()?;

    info!(root = %root.display(), "scaffolding repository");

    // === STEP 1: DIRECTORIES ===
    let directories = ensure_directories(root)?;

    // === STEP 2: FILES ===
    let files = templates::render_all(&config.project_name)?;
    let written = write_files(root, &files)?;

    if git::lfs_available() {
        debug!(extensions = ?paths::LFS_EXTENSIONS, "git-lfs available for tracked extensions");
    } else {
        info!("git-lfs not found; .gitattributes written but LFS filters are inactive until it is installed");
    }

    // === STEP 3: REPOSITORY ===
    let repo_initialized = ensure_repository(root, &config.branch)?;

    // === STEP 4: COMMIT ===
    git::add_all(root).context("Failed to stage scaffold")?;
    let commit = commit_scaffold(root, config)?;

    // === STEP 5: REMOTE (non-fatal past registration) ===
    let (remote, push) = match config.remote_url.as_deref() {
        Some(url) => {
            let remote = ensure_remote(root, &config.remote_name, url)?;
            let push = push_best_effort(root, &config.remote_name, &config.branch);
            (remote, push)
        }
        None => {
            debug!("no remote configured; skipping remote and push");
            (RemoteOutcome::NotConfigured, PushOutcome::NotAttempted)
        }
    };

    Ok(ScaffoldReport {
        target_root: root.to_path_buf(),
        started_at,
        directories,
        files: written,
        repo_initialized,
        commit,
        remote,
        push,
    })
}

fn ensure_directories(root: &Path) -> Result<Vec<String>> {
    let mut created = Vec::with_capacity(paths::DIRECTORIES.len());

    for dir in paths::DIRECTORIES {
        let path = paths::resolve(root, dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        debug!(path = %dir, "ensured directory");
        created.push(dir.to_string());
    }

    Ok(created)
}

fn write_files(root: &Path, files: &[ScaffoldFile]) -> Result<Vec<String>> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let path = paths::resolve(root, file.path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directory for: {}", path.display())
            })?;
        }

        fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        debug!(path = %file.path, bytes = file.content.len(), "wrote file");
        written.push(file.path.to_string());
    }

    Ok(written)
}

/// Returns true when a new repository was created
fn ensure_repository(root: &Path, branch: &str) -> Result<bool> {
    if git::is_repo_root(root) {
        debug!("git repository already present");
        return Ok(false);
    }

    git::init(root, branch)
        .with_context(|| format!("Failed to initialize repository in {}", root.display()))?;
    info!(branch, "initialized git repository");
    Ok(true)
}

fn commit_scaffold(root: &Path, config: &ScaffoldConfig) -> Result<CommitOutcome> {
    let has_changes = git::has_staged_changes(root)?;

    if !has_changes && config.commit_policy == CommitPolicy::SkipUnchanged {
        info!("scaffold unchanged since last commit; skipping commit");
        return Ok(CommitOutcome::Skipped);
    }

    let allow_empty = config.commit_policy == CommitPolicy::Always;
    git::commit(
        root,
        &config.commit_message,
        allow_empty,
        config.author.as_ref(),
    )
    .context("Failed to commit scaffold")?;

    let sha = git::head_sha(root)?;
    info!(sha = %sha, empty = !has_changes, "committed scaffold");

    Ok(CommitOutcome::Committed {
        sha,
        empty: !has_changes,
    })
}

fn ensure_remote(root: &Path, name: &str, url: &str) -> Result<RemoteOutcome> {
    if let Some(existing) = git::remote_url(root, name)? {
        let url_matches = existing == url;
        if url_matches {
            info!(remote = name, "remote already registered");
        } else {
            warn!(
                remote = name,
                existing = %existing,
                requested = url,
                "remote already exists with a different URL; keeping existing"
            );
        }
        return Ok(RemoteOutcome::AlreadyExists { url_matches });
    }

    git::add_remote(root, name, url)
        .with_context(|| format!("Failed to register remote '{}'", name))?;
    info!(remote = name, url, "registered remote");
    Ok(RemoteOutcome::Added)
}

fn push_best_effort(root: &Path, remote: &str, branch: &str) -> PushOutcome {
    match git::push(root, remote, branch) {
        Ok(()) => {
            info!(remote, branch, "pushed scaffold");
            PushOutcome::Pushed
        }
        Err(e) => {
            warn!(remote, branch, error = %e, "push failed; local scaffold is intact");
            PushOutcome::Failed {
                reason: format!("{:#}", e),
            }
        }
    }
}
