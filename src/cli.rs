//! CLI argument definitions and settings resolution.
//!
//! This module contains the top-level CLI structure and the merge of flags,
//! `.dbfs.json`, and the environment into one `Settings` value. Individual
//! command definitions are in the `commands` module.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::codec::{CodecConfig, DEFAULT_MARKER, DEFAULT_MAX_RETAINED};
use crate::commands::Command;
use crate::config::ConfigFile;
use crate::db::{Backend, DatabaseConfig};
use crate::mount::MountPlan;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "dbfs", author, version, about, long_about = None)]
#[command(after_help = "\
The database is taken from --db, then from .dbfs.json, then from DATABASE_URL.

Examples:
  dbfs --db shop.sqlite ls /                     # List tables
  dbfs --db shop.sqlite ls /users/email          # Distinct emails
  dbfs --db shop.sqlite cat /users/email/a@x.io  # Row as JSON
  dbfs --db postgres://localhost/shop info       # Backend and mount plan")]
pub struct Args {
    /// Database file path or connection URL
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Database backend (inferred from the URL prefix if not specified)
    #[arg(long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Allow other system users to access the mount
    #[arg(long, global = true)]
    pub allow_other: bool,

    /// Mount directory (derived from the database name if not specified)
    #[arg(long, global = true)]
    pub mount_dir: Option<PathBuf>,

    /// First character of content-addressed names [default: x]
    #[arg(long, global = true)]
    pub marker: Option<char>,

    /// Bytes of a content-addressed value kept for lookup [default: 16384]
    #[arg(long, global = true)]
    pub max_value_bytes: Option<usize>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Characters that already mean something inside a path segment.
const RESERVED_MARKERS: [char; 3] = ['/', '#', '.'];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("No database given: pass --db, set \"database\" in .dbfs.json, or set DATABASE_URL")]
    NoDatabase,

    #[error("Invalid marker {marker:?}: it must be a printable character other than '/', '#' or '.'")]
    InvalidMarker { marker: char },

    #[error("--max-value-bytes must be greater than zero")]
    ZeroRetention,
}

/// Everything a command needs, resolved from flags, config file, and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub codec: CodecConfig,
    pub mount: MountPlan,
    pub format: OutputFormat,
}

impl Settings {
    /// Merge flags over the config file over defaults.
    pub fn resolve(args: &Args, file: Option<ConfigFile>) -> Result<Self, SettingsError> {
        let file = file.unwrap_or_default();

        let database = match (&args.db, args.backend) {
            (Some(db), Some(backend)) => DatabaseConfig::with_backend(db, backend),
            (Some(db), None) => DatabaseConfig::from_url(db),
            (None, _) => file
                .database
                .clone()
                .or_else(DatabaseConfig::from_env)
                .ok_or(SettingsError::NoDatabase)?,
        };

        let marker = args.marker.or(file.marker).unwrap_or(DEFAULT_MARKER);
        if RESERVED_MARKERS.contains(&marker) || marker.is_control() {
            return Err(SettingsError::InvalidMarker { marker });
        }

        let max_retained = args
            .max_value_bytes
            .or(file.max_value_bytes)
            .unwrap_or(DEFAULT_MAX_RETAINED);
        if max_retained == 0 {
            return Err(SettingsError::ZeroRetention);
        }

        let allow_other = args.allow_other || file.allow_other.unwrap_or(false);
        let mount_dir = args.mount_dir.as_deref().or(file.mount_dir.as_deref());
        let mount = MountPlan::resolve(&database, mount_dir, allow_other);

        Ok(Self {
            database,
            codec: CodecConfig {
                marker,
                max_retained,
            },
            mount,
            format: args.format,
        })
    }
}

/// Log filter for a `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "dbfs=warn",
        1 => "dbfs=info",
        2 => "dbfs=debug",
        _ => "dbfs=trace",
    }
}
