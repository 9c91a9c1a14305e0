mod execute;
mod output;

use clap::Args;

/// Show the backend, codec settings, and mount plan
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  dbfs --db shop.db info                              # Plan for ./shop
  dbfs --db shop.db --mount-dir /mnt/shop info        # Explicit directory
  dbfs --db postgres://db/shop info --prepare-mount   # Create ./shop if missing")]
pub struct InfoCmd {
    /// Create the mount directory if it does not exist
    #[arg(long, default_value_t = false)]
    pub prepare_mount: bool,
}
