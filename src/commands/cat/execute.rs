use std::error::Error;

use serde::Serialize;

use super::CatCmd;
use crate::cli::Settings;
use crate::commands::Execute;
use crate::fs::DbFs;

/// Result of the cat command execution
#[derive(Debug, Default, Serialize)]
pub struct CatResult {
    pub path: String,
    pub offset: u64,
    /// Number of bytes read
    pub bytes: usize,
    /// Content decoded as UTF-8, invalid sequences replaced
    pub content: String,
}

impl Execute for CatCmd {
    type Output = CatResult;

    fn execute(self, fs: &mut DbFs, _settings: &Settings) -> Result<Self::Output, Box<dyn Error>> {
        if self.list_first {
            fs.directory(parent_path(&self.path))?;
        }

        let data = fs.read_content(&self.path, self.length.unwrap_or(usize::MAX), self.offset)?;

        Ok(CatResult {
            path: self.path,
            offset: self.offset,
            bytes: data.len(),
            content: String::from_utf8_lossy(&data).into_owned(),
        })
    }
}

/// Directory containing `path`, ignoring any `#field` suffix.
pub(crate) fn parent_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some(("", _)) | None => "/",
        Some((parent, _)) => parent,
    }
}
