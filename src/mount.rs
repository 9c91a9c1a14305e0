//! Mount planning.
//!
//! The crate does not own a kernel session. It computes what a host runtime
//! needs to mount the filesystem: the directory and the option list.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::db::DatabaseConfig;

/// Directory name used when the database argument yields none.
const FALLBACK_DIR: &str = "dbfs";

/// Where and how to mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountPlan {
    pub directory: PathBuf,
    pub options: Vec<String>,
}

impl MountPlan {
    /// Derive the plan from the database configuration.
    ///
    /// The directory is `mount_dir` when given, otherwise the SQLite file stem
    /// or the database name of a URL, relative to the working directory.
    pub fn resolve(config: &DatabaseConfig, mount_dir: Option<&Path>, allow_other: bool) -> Self {
        let directory = match mount_dir {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from(
                config
                    .database_name()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| FALLBACK_DIR.to_string()),
            ),
        };

        let mut options = vec!["ro".to_string(), "fsname=dbfs".to_string()];
        if allow_other {
            options.push("allow_other".to_string());
        }

        Self { directory, options }
    }

    /// Create the mount directory if it does not exist yet.
    pub fn ensure_directory(&self) -> io::Result<()> {
        if !self.directory.is_dir() {
            std::fs::create_dir_all(&self.directory)?;
            info!(directory = %self.directory.display(), "created mount directory");
        }
        Ok(())
    }

    /// Options in `-o` form.
    pub fn options_string(&self) -> String {
        self.options.join(",")
    }
}
