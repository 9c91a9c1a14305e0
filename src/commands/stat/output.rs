//! Output formatting for stat command results.

use crate::fs::NodeKind;
use crate::output::Outputable;
use super::execute::StatResult;

impl Outputable for StatResult {
    fn to_table(&self) -> String {
        let kind = match self.kind {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
        };

        [
            format!("Path:     {}", self.path),
            format!("Kind:     {}", kind),
            format!("Size:     {}", self.size),
            format!("Mode:     {}", self.mode),
            format!("Links:    {}", self.nlink),
            format!("Owner:    {}:{}", self.uid, self.gid),
            format!("Blocks:   {} (block size {})", self.blocks, self.blksize),
            format!("Modified: {}", self.modified),
        ]
        .join("\n")
    }
}
