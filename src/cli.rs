use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "equipment-inventory")]
#[command(about = "Collects a workstation's hardware and software inventory and saves it as CSV")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a collection and export it to a ';'-delimited CSV file
    Collect {
        /// Destination file; prompts after collection when omitted
        #[arg(short, long, env = "INVENTORY_OUTPUT")]
        output: Option<PathBuf>,

        /// Hide the progress bar and phase log
        #[arg(long)]
        no_progress: bool,
    },
    /// Run a collection and print it instead of saving it
    Show {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// List the collection phases in the order they run
    Phases,
}
