use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use super::StatCmd;
use crate::cli::Settings;
use crate::commands::Execute;
use crate::fs::{DbFs, FileStat, NodeKind, PathFilesystem, RequestContext};

/// Result of the stat command execution
#[derive(Debug, Clone, Serialize)]
pub struct StatResult {
    pub path: String,
    pub kind: NodeKind,
    pub size: u64,
    /// Permission bits in octal, e.g. `0444`
    pub mode: String,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    pub blocks: u64,
    pub blksize: u32,
    /// Seconds since the Unix epoch
    pub modified: u64,
}

impl StatResult {
    pub fn from_stat(path: String, stat: &FileStat) -> Self {
        Self {
            path,
            kind: stat.kind,
            size: stat.size,
            mode: format!("{:04o}", stat.perm),
            nlink: stat.nlink,
            uid: stat.uid,
            gid: stat.gid,
            blocks: stat.blocks,
            blksize: stat.blksize,
            modified: epoch_seconds(stat.mtime),
        }
    }
}

fn epoch_seconds(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

impl Execute for StatCmd {
    type Output = StatResult;

    fn execute(self, fs: &mut DbFs, _settings: &Settings) -> Result<Self::Output, Box<dyn Error>> {
        let stat = fs.getattr(RequestContext::current(), &self.path)?;
        Ok(StatResult::from_stat(self.path, &stat))
    }
}
