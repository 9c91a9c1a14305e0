mod execute;
mod output;

use clap::Args;

/// Print the content of a row or field file
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  dbfs --db shop.db cat /users/email/a@example.com        # Row as JSON
  dbfs --db shop.db cat /users/email/a@example.com#name   # One field
  dbfs --db shop.db cat /users/team/core/1                # Second row with team = core
  dbfs --db shop.db cat /notes/body/x3f2... --list-first  # Content-addressed value

Content-addressed names are only known after their directory has been listed
in the same process; --list-first lists the parent directory before reading.")]
pub struct CatCmd {
    /// File path (append #column to read a single field)
    pub path: String,

    /// Byte offset to start reading at
    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Maximum number of bytes to read (whole file if not specified)
    #[arg(long)]
    pub length: Option<usize>,

    /// List the parent directory first so content-addressed names resolve
    #[arg(long, default_value_t = false)]
    pub list_first: bool,
}
