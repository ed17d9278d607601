//! Output formatting for CLI commands.

use std::fmt::Display;

use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// One value per line.
    #[default]
    Plain,
    /// JSON.
    Json,
}

/// Print a single item in the specified format.
pub fn print_single<T: Serialize + Display>(data: &T, format: OutputFormat) {
    match format {
        OutputFormat::Plain => println!("{data}"),
        OutputFormat::Json => println!("{}", format_json(data)),
    }
}

/// Print a list in the specified format.
pub fn print_list<T: Serialize + Display>(data: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Plain => {
            for item in data {
                println!("{item}");
            }
        }
        OutputFormat::Json => println!("{}", format_json(&data)),
    }
}

fn format_json<T: Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}
