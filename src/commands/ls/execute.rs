use std::error::Error;

use serde::Serialize;

use super::LsCmd;
use crate::cli::Settings;
use crate::commands::Execute;
use crate::fs::{DbFs, PathFilesystem};

/// Result of the ls command execution
#[derive(Debug, Default, Serialize)]
pub struct LsResult {
    pub path: String,
    pub entries: Vec<String>,
}

impl Execute for LsCmd {
    type Output = LsResult;

    fn execute(self, fs: &mut DbFs, _settings: &Settings) -> Result<Self::Output, Box<dyn Error>> {
        let entries = fs.getdir(&self.path)?;
        Ok(LsResult {
            path: self.path,
            entries,
        })
    }
}
