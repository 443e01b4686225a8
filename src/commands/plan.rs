//! List the scaffold layout without touching the disk

use anyhow::Result;

use waveguide::scaffold::{self, EntryType};
use waveguide::ScaffoldConfig;

pub fn execute(config: &ScaffoldConfig, json: bool) -> Result<()> {
    let entries = scaffold::plan(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Scaffold layout for {}:", config.target_root.display());
    for entry in &entries {
        match entry.entry_type {
            EntryType::Directory => println!("  {}/", entry.path),
            EntryType::File(_) => println!("  {}", entry.path),
        }
    }

    Ok(())
}
