//! CLI commands.

mod generate;
mod inspect;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// cid - generate and inspect `{prefix}-{code}` identifiers.
#[derive(Debug, Parser)]
#[command(name = "cid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate fresh codes or identifiers.
    Generate(generate::GenerateCommand),

    /// Split an identifier into prefix and code.
    Parse(inspect::ParseCommand),

    /// Strip an expected prefix from an identifier.
    Trim(inspect::TrimCommand),

    /// Check an externally supplied bare code.
    Validate(inspect::ValidateCommand),
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self, config: Config) -> Result<()> {
        let ctx = CommandContext {
            config,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Plain
            },
        };

        match self.command {
            Commands::Generate(cmd) => cmd.run(&ctx),
            Commands::Parse(cmd) => cmd.run(&ctx),
            Commands::Trim(cmd) => cmd.run(&ctx),
            Commands::Validate(cmd) => cmd.run(&ctx),
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use canonid_id::IdError;
    use canonid_registry::RegistryConfig;
    use clap::CommandFactory;

    use super::*;
    use crate::error::CliError;

    fn config() -> Config {
        Config {
            log_level: "warn".to_string(),
            log_json: false,
            registry: RegistryConfig::default(),
        }
    }

    fn run(args: &[&str]) -> Result<()> {
        let argv = std::iter::once("cid").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().run(config())
    }

    fn cli_error(err: &anyhow::Error) -> &CliError {
        err.downcast_ref::<CliError>()
            .unwrap_or_else(|| panic!("not a CliError: {err:?}"))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["cid", "--json", "trim", "--prefix", "a", "a-x1"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Trim(_)));
    }

    #[test]
    fn test_generate_length_bounds() {
        for length in ["0", "256"] {
            let err = run(&["generate", "--length", length]).unwrap_err();
            assert!(matches!(
                cli_error(&err),
                CliError::InvalidLength { max: 255, .. }
            ));
        }
        run(&["generate", "--length", "255", "--prefix", "a", "--count", "2"]).unwrap();
    }

    #[test]
    fn test_generate_bad_prefix() {
        let err = run(&["generate", "--prefix", "a-b"]).unwrap_err();
        assert!(matches!(
            cli_error(&err),
            CliError::Id(IdError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_trim_prefix_mismatch() {
        let err = run(&["trim", "--prefix", "a", "u-abcd1234"]).unwrap_err();
        assert!(matches!(
            cli_error(&err),
            CliError::Id(IdError::InvalidPrefixForType { .. })
        ));
        run(&["--json", "trim", "--prefix", "a", "a-abcd1234"]).unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_code() {
        for code in ["ab cd", "ab!"] {
            let err = run(&["validate", code]).unwrap_err();
            assert!(matches!(
                cli_error(&err),
                CliError::Id(IdError::InvalidCode { .. })
            ));
        }
        run(&["validate", "Legacy_01"]).unwrap();
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let err = run(&["parse", "not-an-id-!!"]).unwrap_err();
        assert!(matches!(
            cli_error(&err),
            CliError::Id(IdError::InvalidFormat { .. })
        ));
        run(&["parse", "a-abcd1234"]).unwrap();
    }
}
