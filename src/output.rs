use serde::Serialize;
use std::io::{self, BufRead, Write};

use crate::inventory::InventoryRecord;

pub fn output_data<T: Serialize>(data: &T, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        "yaml" => {
            println!("{}", serde_yaml::to_string(data)?);
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}

/// Two-column view of a record, labels padded to the widest one.
pub fn format_record(record: &InventoryRecord) -> String {
    if record.is_empty() {
        return "(no items collected)".to_string();
    }
    let width = record.iter().map(|e| e.label.chars().count()).max().unwrap_or(0);
    record
        .iter()
        .map(|e| format!("{:<width$}  {}", e.label, e.value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

pub fn print_error(message: &str) {
    eprintln!("\x1b[31m❌ Error: {}\x1b[0m", message);
}

pub fn print_warning(message: &str) {
    println!("\x1b[33m⚠️  Warning: {}\x1b[0m", message);
}

pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

/// Ask for one line of input. Empty input (or EOF) yields `None`.
pub fn prompt_line(message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let input = input.trim();
    Ok((!input.is_empty()).then(|| input.to_string()))
}
