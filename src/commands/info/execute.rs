use std::error::Error;

use serde::Serialize;

use super::InfoCmd;
use crate::cli::Settings;
use crate::commands::Execute;
use crate::fs::DbFs;
use crate::queries::Dialect;

/// Result of the info command execution
#[derive(Debug, Default, Serialize)]
pub struct InfoResult {
    pub backend: String,
    pub dialect: String,
    /// Database path or URL, credentials redacted
    pub target: String,
    pub marker: char,
    pub max_value_bytes: usize,
    pub mount_directory: String,
    pub mount_options: Vec<String>,
    pub prepared: bool,
}

impl Execute for InfoCmd {
    type Output = InfoResult;

    fn execute(self, fs: &mut DbFs, settings: &Settings) -> Result<Self::Output, Box<dyn Error>> {
        if self.prepare_mount {
            settings.mount.ensure_directory()?;
        }

        Ok(InfoResult {
            backend: settings.database.backend().as_str().to_string(),
            dialect: fs.dialect().name().to_string(),
            target: settings.database.display_target(),
            marker: settings.codec.marker,
            max_value_bytes: settings.codec.max_retained,
            mount_directory: settings.mount.directory.display().to_string(),
            mount_options: settings.mount.options.clone(),
            prepared: self.prepare_mount,
        })
    }
}
