//! Output formatting for ls command results.

use crate::output::Outputable;
use super::execute::LsResult;

impl Outputable for LsResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("{}:", self.path)];
        for entry in &self.entries {
            lines.push(format!("  {}", entry));
        }
        lines.join("\n")
    }
}
