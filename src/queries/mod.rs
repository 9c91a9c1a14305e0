//! Statement construction.
//!
//! `dialect` holds the per-backend SQL; `planner` maps path addresses onto it.

pub mod dialect;
pub mod planner;

pub use dialect::{Dialect, SqlDialect};
pub use planner::QueryPlanner;
