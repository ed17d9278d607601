//! Error handling and display for the CLI.

use canonid_id::IdError;
use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Id(#[from] IdError),

    #[error("code length must be between 1 and {max}, got {got}")]
    InvalidLength { got: usize, max: usize },
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(CliError::Id(id_err)) = err.downcast_ref::<CliError>() {
        match id_err {
            IdError::InvalidFormat { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: identifiers look like `prefix-code`, with a code of [a-z0-9].".yellow()
                );
            }
            IdError::InvalidPrefixForType { expected, .. } => {
                eprintln!(
                    "\n{}",
                    format!("Hint: expected an identifier starting with `{expected}-`.").yellow()
                );
            }
            _ => {}
        }
    }
}
