mod execute;
mod output;

use clap::Args;

/// Show the attributes of a path (kind, size, mode, owner)
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  dbfs --db shop.db stat /users                        # Table directory
  dbfs --db shop.db stat /users/email/a@example.com    # Row file and its size
  dbfs --db shop.db stat /users/team/core/0#name       # Single field")]
pub struct StatCmd {
    /// Path to inspect
    pub path: String,
}
