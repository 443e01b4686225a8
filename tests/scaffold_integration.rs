//! End-to-end scaffold runs against temporary directories (requires git)

use anyhow::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use waveguide::config::{CommitPolicy, ScaffoldConfig};
use waveguide::git::{self, Identity};
use waveguide::paths;
use waveguide::scaffold::{self, CommitOutcome, EntryType, PushOutcome, RemoteOutcome};

fn git_available() -> bool {
    which::which("git").is_ok()
}

fn config_for(root: &Path) -> ScaffoldConfig {
    let mut config = ScaffoldConfig::new(root);
    config.author = Some(Identity {
        name: "Scaffold Test".to_string(),
        email: "scaffold@example.invalid".to_string(),
    });
    config
}

/// Every path under `root` except `.git`, as (directories, files) with `/` separators
fn walk_tree(root: &Path) -> Result<(BTreeSet<String>, BTreeSet<String>)> {
    let mut dirs = BTreeSet::new();
    let mut files = BTreeSet::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(root)?
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");

            if relative == ".git" {
                continue;
            }
            if path.is_dir() {
                dirs.insert(relative);
                pending.push(path);
            } else {
                files.insert(relative);
            }
        }
    }

    Ok((dirs, files))
}

#[test]
fn test_clean_run_creates_layout_and_one_commit() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let report = scaffold::run(&config_for(temp.path()))?;

    for dir in paths::DIRECTORIES {
        assert!(paths::resolve(temp.path(), dir).is_dir(), "missing dir {dir}");
    }
    for file in &report.files {
        let content = fs::read_to_string(paths::resolve(temp.path(), file))?;
        assert!(!content.is_empty(), "{file} is empty");
    }
    assert_eq!(report.files.len(), 13);

    // Exactly the planned set: no extra files, and no directories beyond
    // the planned ones and their ancestors
    let planned = scaffold::plan(&config_for(temp.path()))?;
    let planned_files: BTreeSet<String> = planned
        .iter()
        .filter(|e| matches!(e.entry_type, EntryType::File(_)))
        .map(|e| e.path.clone())
        .collect();
    let (found_dirs, found_files) = walk_tree(temp.path())?;
    assert_eq!(found_files, planned_files);
    for dir in &found_dirs {
        let prefix = format!("{dir}/");
        let expected = planned
            .iter()
            .any(|e| e.path == *dir || e.path.starts_with(&prefix));
        assert!(expected, "unexpected directory {dir}");
    }

    assert!(report.repo_initialized);
    assert!(matches!(report.commit, CommitOutcome::Committed { empty: false, .. }));
    assert_eq!(git::commit_count(temp.path())?, 1);
    assert_eq!(
        git::last_commit_message(temp.path())?.as_deref(),
        Some("feat: repo scaffold")
    );
    assert_eq!(git::current_branch(temp.path())?, "main");

    let workflow = fs::read_to_string(temp.path().join(".github/workflows/ci.yml"))?;
    let parsed: serde_yaml::Value = serde_yaml::from_str(&workflow)?;
    assert!(parsed.get("jobs").is_some());

    Ok(())
}

#[test]
fn test_no_remote_configured_means_no_remote_and_no_push() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let report = scaffold::run(&config_for(temp.path()))?;

    assert_eq!(report.remote, RemoteOutcome::NotConfigured);
    assert_eq!(report.push, PushOutcome::NotAttempted);
    assert_eq!(git::remote_url(temp.path(), "origin")?, None);
    Ok(())
}

#[test]
fn test_rerun_succeeds_and_skips_unchanged_commit() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let config = config_for(temp.path());

    scaffold::run(&config)?;
    let second = scaffold::run(&config)?;

    assert!(!second.repo_initialized);
    assert_eq!(second.commit, CommitOutcome::Skipped);
    assert_eq!(git::commit_count(temp.path())?, 1);
    Ok(())
}

#[test]
fn test_rerun_with_always_policy_adds_empty_commit() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let mut config = config_for(temp.path());
    config.commit_policy = CommitPolicy::Always;

    scaffold::run(&config)?;
    let second = scaffold::run(&config)?;

    assert!(matches!(second.commit, CommitOutcome::Committed { empty: true, .. }));
    assert_eq!(git::commit_count(temp.path())?, 2);
    Ok(())
}

#[test]
fn test_rerun_overwrites_edited_placeholder() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let config = config_for(temp.path());
    scaffold::run(&config)?;

    let license = temp.path().join(paths::LICENSE);
    let original = fs::read_to_string(&license)?;
    fs::write(&license, "edited by hand\n")?;

    // Overwrite restores committed content, so nothing new is staged
    let second = scaffold::run(&config)?;
    assert_eq!(fs::read_to_string(&license)?, original);
    assert_eq!(second.commit, CommitOutcome::Skipped);
    Ok(())
}

#[test]
fn test_unreachable_remote_is_not_fatal() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let missing = temp.path().join("does-not-exist").join("remote.git");

    let mut config = config_for(&temp.path().join("work"));
    config.remote_url = Some(missing.display().to_string());

    let report = scaffold::run(&config)?;

    assert_eq!(report.remote, RemoteOutcome::Added);
    assert!(matches!(report.push, PushOutcome::Failed { .. }));
    assert_eq!(git::commit_count(&config.target_root)?, 1);
    Ok(())
}

#[test]
fn test_existing_remote_is_tolerated() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let first_url = temp.path().join("first.git").display().to_string();
    let mut config = config_for(&temp.path().join("work"));
    config.remote_url = Some(first_url.clone());
    scaffold::run(&config)?;

    let same = scaffold::run(&config)?;
    assert_eq!(same.remote, RemoteOutcome::AlreadyExists { url_matches: true });

    config.remote_url = Some(temp.path().join("second.git").display().to_string());
    let different = scaffold::run(&config)?;
    assert_eq!(
        different.remote,
        RemoteOutcome::AlreadyExists { url_matches: false }
    );
    assert_eq!(
        git::remote_url(&config.target_root, "origin")?,
        Some(first_url)
    );
    Ok(())
}

#[test]
fn test_push_to_local_bare_remote() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let bare = temp.path().join("remote.git");
    let status = Command::new("git")
        .args(["init", "--bare"])
        .arg(&bare)
        .output()?
        .status;
    assert!(status.success());

    let mut config = config_for(&temp.path().join("work"));
    config.remote_url = Some(bare.display().to_string());
    let report = scaffold::run(&config)?;

    assert_eq!(report.push, PushOutcome::Pushed);

    let output = Command::new("git")
        .arg("--git-dir")
        .arg(&bare)
        .args(["rev-parse", "refs/heads/main"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        git::head_sha(&config.target_root)?
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_read_only_target_aborts_before_commit() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let root = temp.path().join("locked");
    fs::create_dir(&root)?;
    fs::set_permissions(&root, fs::Permissions::from_mode(0o555))?;

    // Privileged users ignore permission bits; nothing to assert there
    let writable = fs::write(root.join("write-test"), "x").is_ok();
    if writable {
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let result = scaffold::run(&config_for(&root));
    fs::set_permissions(&root, fs::Permissions::from_mode(0o755))?;

    assert!(result.is_err());
    assert!(!root.join(".git").exists());
    Ok(())
}

#[test]
fn test_blocked_directory_aborts_before_commit() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    // A regular file occupying a layout directory fails regardless of privileges
    fs::write(temp.path().join("hardware"), "not a directory\n")?;

    let err = scaffold::run(&config_for(temp.path())).unwrap_err();

    assert!(format!("{err:#}").contains("hardware"));
    assert!(!temp.path().join(".git").exists());
    // Files are written only after every directory exists
    assert!(!temp.path().join(paths::LICENSE).exists());
    Ok(())
}

#[test]
fn test_check_passes_after_run_and_fails_after_deletion() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let temp = TempDir::new()?;
    let config = config_for(temp.path());
    scaffold::run(&config)?;

    let report = scaffold::check(&config)?;
    assert!(report.is_complete());
    assert!(report.is_repository);
    assert_eq!(report.last_commit.as_deref(), Some("feat: repo scaffold"));
    assert_eq!(report.branch.as_deref(), Some("main"));
    assert_eq!(report.commits, 1);

    fs::remove_file(temp.path().join(paths::hardware::COMSOL_MODEL))?;
    let report = scaffold::check(&config)?;
    assert!(!report.is_complete());
    let problems: Vec<_> = report.problems().map(|e| e.path.as_str()).collect();
    assert_eq!(problems, vec![paths::hardware::COMSOL_MODEL]);
    Ok(())
}
