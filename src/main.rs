mod cli;
mod commands;
mod export;
mod host;
mod inventory;
mod output;

use clap::Parser;
use cli::Cli;
use commands::handle_inventory_command;
use output::print_error;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = handle_inventory_command(&cli.command) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
