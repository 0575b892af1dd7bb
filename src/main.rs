//! Glitch Hover CLI
//!
//! Syncs unresolved GlitchTip issues and shows which local lines they point at.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use glitch_hover::commands::{
    execute_check, execute_lookup, execute_sync, execute_watch, LookupArgs, SyncArgs, WatchArgs,
    WorkspaceArgs,
};
use glitch_hover::utils::config::DEFAULT_SYNC_INTERVAL;
use glitch_hover::utils::settings::Settings;

/// Glitch Hover - GlitchTip issues on your source lines
#[derive(Parser, Debug)]
#[command(name = "glitch-hover")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    connection: ConnectionOpts,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// GlitchTip connection settings; flags and env vars override the settings file
#[derive(Args, Debug)]
struct ConnectionOpts {
    /// Editor settings.json with glitchtip.* keys
    #[arg(long, global = true, env = "GLITCHTIP_SETTINGS")]
    settings: Option<PathBuf>,

    /// GlitchTip base URL
    #[arg(long, global = true, env = "GLITCHTIP_URL")]
    url: Option<String>,

    /// API auth token
    #[arg(long, global = true, env = "GLITCHTIP_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Organization slug
    #[arg(long, global = true, env = "GLITCHTIP_ORGANIZATION_SLUG")]
    org: Option<String>,

    /// Project slug
    #[arg(long, global = true, env = "GLITCHTIP_PROJECT_SLUG")]
    project: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Test the connection to GlitchTip
    Check,

    /// Run one sync cycle
    Sync {
        /// Workspace root
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,

        /// Output path for the JSON index (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Run one sync cycle and show the issues at a location
    Lookup {
        /// Workspace root
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,

        /// Source file to query
        #[arg(short, long)]
        file: PathBuf,

        /// 1-based line number
        #[arg(short, long)]
        line: u32,
    },

    /// Keep the index fresh and answer lookups from stdin
    Watch {
        /// Workspace root
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,

        /// Seconds between syncs
        #[arg(long, default_value_t = DEFAULT_SYNC_INTERVAL.as_secs())]
        interval: u64,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let settings = load_settings(&cli.connection)?;

    // Execute command
    match cli.command {
        Commands::Check => {
            if !execute_check(&settings)? {
                std::process::exit(1);
            }
        }

        Commands::Sync {
            workspace,
            output,
            summary,
        } => {
            execute_sync(SyncArgs {
                common: WorkspaceArgs {
                    settings,
                    workspace,
                },
                output,
                print_summary: summary,
            })?;
        }

        Commands::Lookup {
            workspace,
            file,
            line,
        } => {
            execute_lookup(LookupArgs {
                common: WorkspaceArgs {
                    settings,
                    workspace,
                },
                file,
                line,
            })?;
        }

        Commands::Watch {
            workspace,
            interval,
        } => {
            if interval == 0 {
                anyhow::bail!("interval must be greater than 0");
            }

            execute_watch(WatchArgs {
                common: WorkspaceArgs {
                    settings,
                    workspace,
                },
                interval: Duration::from_secs(interval),
            })?;
        }
    }

    Ok(())
}

/// Merge the settings file (if any) with flags and environment variables
///
/// **Private** - flags and env vars win
fn load_settings(opts: &ConnectionOpts) -> Result<Settings> {
    let from_file = match &opts.settings {
        Some(path) => Settings::from_settings_file(path)?,
        None => Settings::default(),
    };

    let from_flags = Settings {
        url: opts.url.clone(),
        auth_token: opts.token.clone(),
        organization_slug: opts.org.clone(),
        project_slug: opts.project.clone(),
    };

    Ok(from_file.merge(from_flags))
}
