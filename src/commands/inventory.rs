use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::cli::Commands;
use crate::export::export_csv;
use crate::host::HostPlatform;
use crate::inventory::{collect_inventory, InventoryRecord, ProgressEvent, PHASES};
use crate::output::{format_record, output_data, print_error, print_info, print_success, print_warning, prompt_line};

pub fn handle_inventory_command(cmd: &Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Collect { output, no_progress } => {
            let record = collect_with_progress(!*no_progress);
            match output {
                Some(path) => {
                    let path = resolve_destination(&path.to_string_lossy());
                    export_csv(&path, &record)?;
                    print_success(&format!("Inventory saved to {}", path.display()));
                }
                None => save_interactively(&record)?,
            }
        }
        Commands::Show { format } => {
            let record = collect_inventory(&HostPlatform::detect(), None);
            match format.as_str() {
                "json" | "yaml" => output_data(&record, format)?,
                _ => println!("{}", format_record(&record)),
            }
        }
        Commands::Phases => {
            for (index, (_, name)) in PHASES.iter().enumerate() {
                println!("{:>2}. {}", index + 1, name);
            }
        }
    }
    Ok(())
}

fn collect_with_progress(show_progress: bool) -> InventoryRecord {
    let bar = ProgressBar::new(PHASES.len() as u64);
    if !show_progress {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {percent:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let sink = log_sink(show_progress, bar.is_hidden());
    let log = |line: String| match sink {
        Some(LogSink::Bar) => bar.println(line),
        Some(LogSink::Stdout) => print_info(&line),
        None => {}
    };

    log("Starting inventory collection...".to_string());
    let platform = HostPlatform::detect();

    let mut on_progress = |event: ProgressEvent| {
        bar.set_position(event.completed as u64);
        bar.set_message(event.phase.display_name());
        log(phase_log_line(&event));
    };
    let record = collect_inventory(&platform, Some(&mut on_progress));

    bar.finish_with_message("collection finished");
    if show_progress {
        print_info(&format!("Collected {} items", record.len()));
    }
    record
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogSink {
    Bar,
    Stdout,
}

/// The bar drops `println` when stderr is not a terminal; the phase log
/// then goes to stdout instead.
fn log_sink(show_progress: bool, bar_hidden: bool) -> Option<LogSink> {
    match (show_progress, bar_hidden) {
        (false, _) => None,
        (true, false) => Some(LogSink::Bar),
        (true, true) => Some(LogSink::Stdout),
    }
}

fn phase_log_line(event: &ProgressEvent) -> String {
    format!(
        "[{}/{}] {:>3}% Completed phase: {}",
        event.completed,
        event.total,
        event.percent(),
        event.phase.display_name()
    )
}

/// Prompt for a destination until the export succeeds or the user cancels.
/// The record is kept across failed attempts.
fn save_interactively(record: &InventoryRecord) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let Some(input) = prompt_line("Save inventory as (.csv, leave empty to cancel): ")? else {
            print_warning("Save cancelled by user, inventory discarded.");
            return Ok(());
        };

        let path = resolve_destination(&input);
        match export_csv(&path, record) {
            Ok(()) => {
                print_success(&format!("Inventory saved to {}", path.display()));
                return Ok(());
            }
            Err(e) => print_error(&format!("Could not save the file: {}", e)),
        }
    }
}

const DEFAULT_FILE_NAME: &str = "inventory.csv";

/// Expand a leading `~/` and make sure the file ends in `.csv`.
/// A directory (or input ending in a separator) gets `inventory.csv` inside it.
fn resolve_destination(input: &str) -> PathBuf {
    let mut path = match (input.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(input),
    };

    if input.ends_with('/') || input.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return path.join(DEFAULT_FILE_NAME);
    }

    if !has_csv_extension(&path) {
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".csv");
        path.set_file_name(name);
    }
    path
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
