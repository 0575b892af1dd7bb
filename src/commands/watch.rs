//! Long-running mode: periodic sync plus interactive queries on stdin.
//!
//! Commands read from stdin:
//! - `refresh` - sync now
//! - `lookup <file> <line>` - print the hover for a location
//! - `quit` - stop and exit

use super::models::WatchArgs;
use super::service::build_service;
use super::sync::absolute_file;
use crate::output::render_hover;
use crate::sync::Scheduler;
use anyhow::{Context, Result};
use log::info;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

/// A parsed stdin command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Refresh,
    Lookup { file: PathBuf, line: u32 },
    Quit,
}

/// Parse one line of stdin
///
/// **Public** - `None` for blank or unrecognized input
pub fn parse_watch_command(input: &str) -> Option<WatchCommand> {
    let mut parts = input.split_whitespace();

    match parts.next()? {
        "refresh" | "r" => Some(WatchCommand::Refresh),
        "quit" | "q" | "exit" => Some(WatchCommand::Quit),
        "lookup" | "l" => {
            let file = PathBuf::from(parts.next()?);
            let line = parts.next()?.parse().ok()?;
            Some(WatchCommand::Lookup { file, line })
        }
        _ => None,
    }
}

/// Execute the watch command
///
/// **Public** - main entry point called from main.rs; returns on `quit` or EOF
pub fn execute_watch(args: WatchArgs) -> Result<()> {
    let service = Arc::new(build_service(&args.common)?);
    let index = Arc::clone(service.index());

    let scheduler = Scheduler::start(service, args.interval);

    println!("Watching. Commands: refresh | lookup <file> <line> | quit");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;

        match parse_watch_command(&line) {
            Some(WatchCommand::Refresh) => {
                scheduler.refresh();
                println!("Syncing with GlitchTip...");
            }
            Some(WatchCommand::Lookup { file, line }) => {
                let file = absolute_file(&file);
                let issues = index.lookup(&file, line);
                if issues.is_empty() {
                    println!("No issues at {}:{}", file.display(), line);
                } else {
                    print!("{}", render_hover(&issues));
                }
            }
            Some(WatchCommand::Quit) => break,
            None if line.trim().is_empty() => {}
            None => println!("Unknown command: {}", line.trim()),
        }
    }

    info!("Stopping scheduler...");
    scheduler.stop();

    Ok(())
}
