//! Scaffold configuration
//!
//! Layered, lowest precedence first:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, or `waveguide-scaffold.toml` in the target root)
//! 3. Environment (`WAVEGUIDE_REMOTE_URL`, `WAVEGUIDE_COMMIT_POLICY`)
//! 4. Command-line overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::git::Identity;
use crate::paths;

pub const REMOTE_URL_ENV: &str = "WAVEGUIDE_REMOTE_URL";
pub const COMMIT_POLICY_ENV: &str = "WAVEGUIDE_COMMIT_POLICY";

pub const DEFAULT_PROJECT_NAME: &str = "Waveguide 3.0";
pub const DEFAULT_REMOTE_NAME: &str = "origin";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_COMMIT_MESSAGE: &str = "feat: repo scaffold";

/// What to do when a rerun stages nothing new
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitPolicy {
    /// Skip the commit when the index matches HEAD
    #[default]
    SkipUnchanged,
    /// Commit on every run, empty or not
    Always,
}

impl fmt::Display for CommitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitPolicy::SkipUnchanged => write!(f, "skip-unchanged"),
            CommitPolicy::Always => write!(f, "always"),
        }
    }
}

impl FromStr for CommitPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip-unchanged" | "skip" => Ok(CommitPolicy::SkipUnchanged),
            "always" => Ok(CommitPolicy::Always),
            other => anyhow::bail!(
                "Unknown commit policy '{}' (expected 'skip-unchanged' or 'always')",
                other
            ),
        }
    }
}

/// Everything the scaffolder needs; no ambient state is read after this is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldConfig {
    pub target_root: PathBuf,
    pub project_name: String,
    pub remote_url: Option<String>,
    pub remote_name: String,
    pub branch: String,
    pub commit_message: String,
    pub commit_policy: CommitPolicy,
    pub author: Option<Identity>,
}

/// On-disk form; every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub project_name: Option<String>,
    pub remote_url: Option<String>,
    pub remote_name: Option<String>,
    pub branch: Option<String>,
    pub commit_message: Option<String>,
    pub commit_policy: Option<CommitPolicy>,
    pub author: Option<Identity>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

/// Values supplied on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub remote_url: Option<String>,
    pub commit_policy: Option<CommitPolicy>,
}

impl ScaffoldConfig {
    /// Defaults for a target root: no remote, branch `main`, skip unchanged commits
    pub fn new(target_root: impl Into<PathBuf>) -> Self {
        Self {
            target_root: target_root.into(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            remote_url: None,
            remote_name: DEFAULT_REMOTE_NAME.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            commit_policy: CommitPolicy::default(),
            author: None,
        }
    }

    /// Build the full layered configuration from the process environment
    pub fn load(
        target_root: impl Into<PathBuf>,
        config_path: Option<&Path>,
        overrides: Overrides,
    ) -> Result<Self> {
        Self::load_with_env(target_root, config_path, overrides, |key| {
            std::env::var(key).ok()
        })
    }

    /// Same as [`ScaffoldConfig::load`] with an injectable environment lookup
    pub fn load_with_env<F>(
        target_root: impl Into<PathBuf>,
        config_path: Option<&Path>,
        overrides: Overrides,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(target_root);

        let default_file = config.target_root.join(paths::CONFIG_FILE);
        let file = match config_path {
            Some(path) => Some(FileConfig::load(path)?),
            None if default_file.is_file() => Some(FileConfig::load(&default_file)?),
            None => None,
        };
        if let Some(file) = file {
            config.apply_file(file);
        }

        config.apply_env(env)?;
        config.apply_overrides(overrides);

        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(name) = file.project_name {
            self.project_name = name;
        }
        if let Some(url) = non_empty(file.remote_url) {
            self.remote_url = Some(url);
        }
        if let Some(remote) = file.remote_name {
            self.remote_name = remote;
        }
        if let Some(branch) = file.branch {
            self.branch = branch;
        }
        if let Some(message) = file.commit_message {
            self.commit_message = message;
        }
        if let Some(policy) = file.commit_policy {
            self.commit_policy = policy;
        }
        if file.author.is_some() {
            self.author = file.author;
        }
    }

    fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = non_empty(env(REMOTE_URL_ENV)) {
            self.remote_url = Some(url);
        }
        if let Some(policy) = non_empty(env(COMMIT_POLICY_ENV)) {
            self.commit_policy = policy
                .parse()
                .with_context(|| format!("Invalid {}", COMMIT_POLICY_ENV))?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(url) = non_empty(overrides.remote_url) {
            self.remote_url = Some(url);
        }
        if let Some(policy) = overrides.commit_policy {
            self.commit_policy = policy;
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
