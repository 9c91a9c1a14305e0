mod cli_tests;
mod execute;
mod output;

use clap::Args;

/// List a directory of the database tree
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  dbfs --db shop.db ls                     # Tables
  dbfs --db shop.db ls /users              # Columns of users
  dbfs --db shop.db ls /users/team         # Distinct teams
  dbfs --db shop.db ls /users/team/core    # Indices of rows with team = core")]
pub struct LsCmd {
    /// Directory path, starting at the database root
    #[arg(default_value = "/")]
    pub path: String,
}
