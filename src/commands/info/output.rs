//! Output formatting for info command results.

use crate::output::Outputable;
use super::execute::InfoResult;

impl Outputable for InfoResult {
    fn to_table(&self) -> String {
        let mut lines = vec![
            format!("Backend:  {} ({} dialect)", self.backend, self.dialect),
            format!("Target:   {}", self.target),
            format!("Marker:   {}", self.marker),
            format!("Retained: {} bytes", self.max_value_bytes),
            format!(
                "Mount:    {} [{}]",
                self.mount_directory,
                self.mount_options.join(",")
            ),
        ];
        if self.prepared {
            lines.push(String::new());
            lines.push("Mount directory ready.".to_string());
        }
        lines.join("\n")
    }
}
