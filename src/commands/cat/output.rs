//! Output formatting for cat command results.

use crate::output::Outputable;
use super::execute::CatResult;

impl Outputable for CatResult {
    fn to_table(&self) -> String {
        self.content.clone()
    }
}
