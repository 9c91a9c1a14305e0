//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - The `Execute` implementation driving the filesystem operations
//! - The `Outputable` implementation for its result

mod cat;
mod info;
mod ls;
mod stat;

pub use cat::CatCmd;
pub use info::InfoCmd;
pub use ls::LsCmd;
pub use stat::StatCmd;

use clap::Subcommand;
use std::error::Error;

use crate::cli::Settings;
use crate::fs::DbFs;
use crate::output::Outputable;

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, fs: &mut DbFs, settings: &Settings) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List a directory of the database tree
    Ls(LsCmd),

    /// Show the attributes of a path (kind, size, mode, owner)
    Stat(StatCmd),

    /// Print the content of a row or field file
    Cat(CatCmd),

    /// Show the backend, codec settings, and mount plan
    Info(InfoCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, fs: &mut DbFs, settings: &Settings) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Ls(cmd) => {
                let result = cmd.execute(fs, settings)?;
                Ok(result.format(settings.format))
            }
            Command::Stat(cmd) => {
                let result = cmd.execute(fs, settings)?;
                Ok(result.format(settings.format))
            }
            Command::Cat(cmd) => {
                let result = cmd.execute(fs, settings)?;
                Ok(result.format(settings.format))
            }
            Command::Info(cmd) => {
                let result = cmd.execute(fs, settings)?;
                Ok(result.format(settings.format))
            }
        }
    }
}
