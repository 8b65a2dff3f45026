//! # CLI Layer
//!
//! One possible UI client for the treasure library. This is the only place
//! that reads stdin, writes stdout/stderr, or decides exit codes.
//!
//! - `run()`: parses arguments, builds the context, dispatches
//! - `handle_*()`: per-command handlers that call the API and print results
//! - `print`: output formatting
//! - `prompt`: interactive collection of treasure fields

mod print;
mod prompt;

use crate::args::{Cli, Commands, FieldArgs};
use clap::Parser;
use print::{print_details, print_listing, print_log, print_messages};
use prompt::Prompter;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use treasure_manager::api::{CmdResult, HuntApi, Outcome};
use treasure_manager::error::Result;
use treasure_manager::init::initialize;
use treasure_manager::store::fs_backend::FsBackend;

pub fn run() -> Result<Outcome> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base = cli.root.clone().unwrap_or_else(PathBuf::new);
    let ctx = initialize(&base)?;
    let api = &ctx.api;

    let result = match cli.command {
        Commands::Add { hunt_id, fields } => handle_add(api, &hunt_id, fields)?,
        Commands::List { hunt_id } => handle_list(api, &hunt_id)?,
        Commands::View {
            hunt_id,
            treasure_id,
        } => handle_view(api, &hunt_id, treasure_id)?,
        Commands::Log { hunt_id } => handle_log(api, &hunt_id)?,
        Commands::MergeLogs => handle_merge(api)?,
    };
    Ok(result.outcome)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "treasure_manager=debug"
    } else {
        "treasure_manager=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_env("TREASURE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn handle_add(api: &HuntApi<FsBackend>, hunt_id: &str, given: FieldArgs) -> Result<CmdResult> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let fields = Prompter::new(stdin.lock(), io::stdout(), interactive).collect(given)?;

    let result = api.add_treasure(hunt_id, fields)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_list(api: &HuntApi<FsBackend>, hunt_id: &str) -> Result<CmdResult> {
    let result = api.list_treasures(hunt_id)?;
    if !result.listed_treasures.is_empty() {
        print_listing(
            hunt_id,
            result.storage_info.as_ref(),
            &result.listed_treasures,
        );
    }
    print_messages(&result.messages);
    Ok(result)
}

fn handle_view(api: &HuntApi<FsBackend>, hunt_id: &str, treasure_id: u32) -> Result<CmdResult> {
    let result = api.view_treasure(hunt_id, treasure_id)?;
    for treasure in &result.listed_treasures {
        print_details(treasure);
    }
    print_messages(&result.messages);
    Ok(result)
}

fn handle_log(api: &HuntApi<FsBackend>, hunt_id: &str) -> Result<CmdResult> {
    let result = api.hunt_log(hunt_id)?;
    print_log(&result.log_entries);
    print_messages(&result.messages);
    Ok(result)
}

fn handle_merge(api: &HuntApi<FsBackend>) -> Result<CmdResult> {
    let result = api.merge_logs()?;
    for hunt in &result.merged_hunts {
        println!("Merged log from: {}", hunt);
    }
    print_messages(&result.messages);
    Ok(result)
}
