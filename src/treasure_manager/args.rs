use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "treasure_manager", version)]
#[command(about = "Keep records of treasure hunts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the hunt data (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Field values for `add`; anything left out is prompted for.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Username of the treasure's owner (single word)
    #[arg(long)]
    pub username: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Clue text (one line)
    #[arg(long)]
    pub clue: Option<String>,

    /// Point value
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new treasure
    Add {
        hunt_id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// List all treasures
    #[command(alias = "ls")]
    List { hunt_id: String },

    /// View specific treasure
    #[command(alias = "v")]
    View { hunt_id: String, treasure_id: u32 },

    /// Show a hunt's activity log
    Log { hunt_id: String },

    /// Regenerate the combined log from every hunt's log
    MergeLogs,
}
