use anyhow::Result;
use serde_json::json;

const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn execute(json: bool) -> Result<()> {
    // git is optional for printing a version
    let git_version = waveguide::git::version().ok();

    if json {
        let version_info = json!({
            "waveguide-scaffold": CORE_VERSION,
            "git": git_version,
            "git_lfs": waveguide::git::lfs_available(),
        });
        println!("{}", serde_json::to_string_pretty(&version_info)?);
    } else {
        println!("waveguide-scaffold {CORE_VERSION}");
        if let Some(git) = git_version {
            println!("  {git}");
        }
    }

    Ok(())
}
