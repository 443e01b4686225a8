//! Verify an existing scaffold

use anyhow::Result;
use colored::Colorize;

use waveguide::scaffold::{self, CheckStatus};
use waveguide::ScaffoldConfig;

/// Returns the process exit code: 0 when every entry is present and valid
pub fn execute(config: &ScaffoldConfig, json: bool) -> Result<i32> {
    let report = scaffold::check(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in report.problems() {
            let detail = match &entry.status {
                CheckStatus::Ok => continue,
                CheckStatus::Missing => "missing".to_string(),
                CheckStatus::Empty => "empty".to_string(),
                CheckStatus::Invalid { reason } => format!("invalid: {reason}"),
            };
            println!("  {} {} ({})", "✗".red(), entry.path, detail);
        }

        if !report.is_repository {
            println!("  {} not a git repository", "⚠️".yellow());
        } else if let Some(message) = &report.last_commit {
            println!(
                "  Last commit: {message} ({} commit(s) on {})",
                report.commits,
                report.branch.as_deref().unwrap_or("detached HEAD")
            );
        }

        if report.is_complete() {
            println!("{} Scaffold complete", "✓".green());
        } else {
            println!(
                "{} Scaffold incomplete: {} problem(s)",
                "✗".red(),
                report.problems().count()
            );
        }
    }

    Ok(if report.is_complete() { 0 } else { 1 })
}
