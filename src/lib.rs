//! dbfs library - read-only filesystem view of a relational database
//!
//! Tables, column values, and rows of a SQLite, PostgreSQL, or MySQL database
//! are exposed as a directory tree. The crate provides the path grammar, the
//! content codec for names that cannot be filenames, the per-dialect query
//! planner, the driver layer, and the path-based filesystem operations a host
//! runtime calls into, plus a small CLI for browsing the tree without a mount.

pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod db;
pub mod fs;
pub mod mount;
pub mod output;
pub mod path;
pub mod queries;

#[cfg(test)]
#[macro_use]
mod test_macros;

#[cfg(test)]
pub mod test_utils;
