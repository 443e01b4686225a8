use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use waveguide::config::{CommitPolicy, Overrides, ScaffoldConfig};

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Scaffold the Waveguide 3.0 research repository", long_about = None)]
struct Cli {
    /// Target root directory (defaults to the current directory)
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to waveguide-scaffold.toml in the target root, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    init: InitArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Arguments for the scaffold run
#[derive(Args, Clone, Default)]
struct InitArgs {
    /// Remote URL to register as origin and push to (overrides WAVEGUIDE_REMOTE_URL)
    #[arg(long)]
    remote: Option<String>,

    /// Commit policy for reruns: skip-unchanged or always
    #[arg(long)]
    commit_policy: Option<CommitPolicy>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the scaffold and commit it (default when no command is given)
    Init {
        #[command(flatten)]
        args: InitArgs,
    },

    /// List the directories and files the scaffold owns
    Plan,

    /// Verify an existing scaffold
    Check,

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    waveguide::logging::init(cli.verbose);

    let root = absolute_root(&cli.root)?;

    match cli.command {
        None => {
            let config = load_config(root, cli.config, cli.init)?;
            commands::init::execute(&config, cli.json)?;
        }
        Some(Commands::Init { args }) => {
            let merged = InitArgs {
                remote: args.remote.or(cli.init.remote),
                commit_policy: args.commit_policy.or(cli.init.commit_policy),
            };
            let config = load_config(root, cli.config, merged)?;
            commands::init::execute(&config, cli.json)?;
        }
        Some(Commands::Plan) => {
            let config = load_config(root, cli.config, cli.init)?;
            commands::plan::execute(&config, cli.json)?;
        }
        Some(Commands::Check) => {
            let config = load_config(root, cli.config, cli.init)?;
            let exit_code = commands::check::execute(&config, cli.json)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Some(Commands::Version) => {
            commands::version::execute(cli.json)?;
        }
    }

    Ok(())
}

fn absolute_root(root: &std::path::Path) -> Result<PathBuf> {
    if root.is_absolute() {
        Ok(root.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(root))
    }
}

fn load_config(root: PathBuf, config: Option<PathBuf>, args: InitArgs) -> Result<ScaffoldConfig> {
    ScaffoldConfig::load(
        root,
        config.as_deref(),
        Overrides {
            remote_url: args.remote,
            commit_policy: args.commit_policy,
        },
    )
}
