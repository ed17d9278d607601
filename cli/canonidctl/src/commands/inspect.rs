use std::fmt;

use anyhow::Result;
use canonid_id::{is_valid_trimmed_code, parse, trim, IdError};
use clap::Args;
use serde::Serialize;

use super::CommandContext;
use crate::error::CliError;
use crate::output::print_single;

#[derive(Debug, Serialize)]
struct Parts<'a> {
    prefix: &'a str,
    code: &'a str,
}

impl fmt::Display for Parts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prefix: {}\ncode:   {}", self.prefix, self.code)
    }
}

#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Canonical identifier, e.g. `a-abcd1234`.
    identifier: String,
}

impl ParseCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let (prefix, code) = parse(&self.identifier).map_err(CliError::from)?;
        print_single(&Parts { prefix, code }, ctx.format);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct TrimCommand {
    /// Prefix the identifier must carry.
    #[arg(long, short)]
    prefix: String,

    identifier: String,
}

impl TrimCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let code = trim(&self.prefix, &self.identifier).map_err(CliError::from)?;
        print_single(&code, ctx.format);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Bare code without prefix.
    code: String,
}

impl ValidateCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        if !is_valid_trimmed_code(&self.code) {
            return Err(CliError::from(IdError::InvalidCode { code: self.code }).into());
        }
        print_single(&self.code, ctx.format);
        Ok(())
    }
}
