use anyhow::Result;
use canonid_id::{canonical, generate, Prefix, MAX_TRIMMED_CODE_LENGTH};
use clap::Args;
use tracing::debug;

use super::CommandContext;
use crate::error::CliError;
use crate::output::print_list;

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Prefix to prepend; bare codes are printed without one.
    #[arg(long, short)]
    prefix: Option<String>,

    /// Code length (defaults to CANONID_CODE_LENGTH or 8).
    #[arg(long, short)]
    length: Option<usize>,

    /// Number of values to generate.
    #[arg(long, short, default_value_t = 1)]
    count: usize,
}

impl GenerateCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let length = self.length.unwrap_or(ctx.config.registry.code_length);
        if length == 0 || length > MAX_TRIMMED_CODE_LENGTH {
            return Err(CliError::InvalidLength {
                got: length,
                max: MAX_TRIMMED_CODE_LENGTH,
            }
            .into());
        }

        let prefix = self
            .prefix
            .map(Prefix::new)
            .transpose()
            .map_err(CliError::from)?;

        debug!(length, count = self.count, prefix = ?prefix, "Generating codes");
        let values: Vec<String> = (0..self.count)
            .map(|_| {
                let code = generate(length);
                match &prefix {
                    Some(p) => canonical(p, &code),
                    None => code,
                }
            })
            .collect();

        print_list(&values, ctx.format);
        Ok(())
    }
}
