//! Create the scaffold and commit it

use anyhow::Result;
use colored::Colorize;

use waveguide::scaffold::{self, CommitOutcome, PushOutcome, ScaffoldReport};
use waveguide::ScaffoldConfig;

/// Run the scaffolder and print the outcome
///
/// Human output is a single success line; details are in the logs or the
/// JSON report.
pub fn execute(config: &ScaffoldConfig, json: bool) -> Result<()> {
    let report = scaffold::run(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", summary_line(&report));
    }

    Ok(())
}

fn summary_line(report: &ScaffoldReport) -> String {
    let commit = match &report.commit {
        CommitOutcome::Committed { sha, .. } => format!("committed {}", short(sha)),
        CommitOutcome::Skipped => "nothing new to commit".to_string(),
    };

    let push = match &report.push {
        PushOutcome::NotAttempted => String::new(),
        PushOutcome::Pushed => ", pushed".to_string(),
        PushOutcome::Failed { .. } => ", push failed (local scaffold kept)".to_string(),
    };

    format!(
        "{} Scaffold ready at {} ({}{})",
        "✓".green(),
        report.target_root.display(),
        commit,
        push
    )
}

fn short(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
