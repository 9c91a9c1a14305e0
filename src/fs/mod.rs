//! Filesystem operation layer.
//!
//! `DbFs` owns everything an operation touches: the planner, the content
//! codec, the single lazily-opened connection, and the process start time.
//! Every operation takes `&mut self`, so a host that dispatches concurrently
//! has to put the whole instance behind one lock.
//!
//! # Operations
//!
//! - [`DbFs::attributes`] - kind and content size of a path
//! - [`DbFs::directory`] - `.`, `..`, then the sorted child names
//! - [`DbFs::read_content`] - a window of a file's content
//!
//! The host-facing [`PathFilesystem`] trait wraps these in the shapes a
//! path-based FUSE runtime expects.
//!
//! # Query failures
//!
//! A failing statement is logged and treated as an empty result, so callers
//! observe "not found" rather than a database error.

mod attr;
mod content;

pub use attr::{FileStat, NodeAttr, NodeKind, RequestContext, BLOCK_SIZE, DIR_PERM, FILE_PERM};
pub use content::{slice_window, RowContent};

use std::time::SystemTime;

use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::{CodecConfig, ContentCodec};
use crate::db::{CompiledQuery, LazyConnection, QueryRows};
use crate::path::{resolve, PathAddress};
use crate::queries::{Dialect, QueryPlanner, SqlDialect};

/// Errors surfaced to the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("{path}: no such file or directory")]
    NotFound { path: String },

    #[error("{path}: is a directory")]
    IsDirectory { path: String },
}

impl FsError {
    /// The errno a kernel reply carries for this error.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::NotFound { .. } => libc::ENOENT,
            FsError::IsDirectory { .. } => libc::EISDIR,
        }
    }

    fn not_found(path: &str) -> Self {
        FsError::NotFound {
            path: path.to_string(),
        }
    }

    fn is_directory(path: &str) -> Self {
        FsError::IsDirectory {
            path: path.to_string(),
        }
    }
}

/// Callbacks of a path-based filesystem host.
pub trait PathFilesystem {
    fn getattr(&mut self, ctx: RequestContext, path: &str) -> Result<FileStat, FsError>;

    /// Entry names, `.` and `..` first.
    fn getdir(&mut self, path: &str) -> Result<Vec<String>, FsError>;

    /// Returns an opaque handle; nothing is held open.
    fn open(&mut self, path: &str) -> Result<u64, FsError>;

    fn release(&mut self, path: &str, handle: u64) -> Result<(), FsError>;

    fn read(&mut self, path: &str, size: u32, offset: u64) -> Result<Vec<u8>, FsError>;

    /// Accepted and ignored; the filesystem is read-only.
    fn utime(&mut self, path: &str, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError>;
}

/// A database exposed as a read-only directory tree.
pub struct DbFs {
    planner: QueryPlanner,
    codec: ContentCodec,
    conn: LazyConnection,
    started: SystemTime,
    next_handle: u64,
}

impl DbFs {
    pub fn new(dialect: SqlDialect, codec: CodecConfig, conn: LazyConnection) -> Self {
        Self {
            planner: QueryPlanner::new(dialect),
            codec: ContentCodec::new(codec),
            conn,
            started: SystemTime::now(),
            next_handle: 1,
        }
    }

    pub fn dialect(&self) -> &SqlDialect {
        self.planner.dialect()
    }

    pub fn codec(&self) -> &ContentCodec {
        &self.codec
    }

    pub fn started(&self) -> SystemTime {
        self.started
    }

    /// Kind and content size of `path`.
    pub fn attributes(&mut self, path: &str) -> Result<NodeAttr, FsError> {
        let addr = self.address(path)?;
        match &addr {
            PathAddress::Root => Ok(NodeAttr::directory()),
            PathAddress::Table { .. } | PathAddress::Column { .. } => {
                let rows = self.run(self.planner.attribute_query(&addr, &self.codec));
                if rows.is_empty() {
                    Err(FsError::not_found(path))
                } else {
                    Ok(NodeAttr::directory())
                }
            }
            PathAddress::ValueGroup { .. } => match self.match_count(&addr) {
                0 => Err(FsError::not_found(path)),
                1 => self.file_content(path, &addr).map(file_attr),
                _ => Ok(NodeAttr::directory()),
            },
            PathAddress::Row { .. } => self.file_content(path, &addr).map(file_attr),
        }
    }

    /// `.` and `..` followed by the sorted names below `path`.
    pub fn directory(&mut self, path: &str) -> Result<Vec<String>, FsError> {
        let addr = self.address(path)?;

        let mut names: Vec<String> = match &addr {
            PathAddress::Root | PathAddress::Column { .. } => {
                let rows = self.run(self.planner.listing_query(&addr, &self.codec));
                rows.first_column()
                    .filter(|value| !value.is_null())
                    .map(|value| self.codec.encode(&value.to_bytes()))
                    .collect()
            }
            PathAddress::Table { .. } => {
                let rows = self.run(self.planner.listing_query(&addr, &self.codec));
                self.planner
                    .dialect()
                    .column_names(&rows)
                    .iter()
                    .map(|name| self.codec.encode(name.as_bytes()))
                    .collect()
            }
            PathAddress::ValueGroup { .. } => {
                (0..self.match_count(&addr)).map(|idx| idx.to_string()).collect()
            }
            PathAddress::Row { .. } => Vec::new(),
        };

        names.sort();
        names.dedup();

        let mut entries = Vec::with_capacity(names.len() + 2);
        entries.push(".".to_string());
        entries.push("..".to_string());
        entries.extend(names);
        Ok(entries)
    }

    /// Up to `length` bytes of the file at `path`, starting at `offset`.
    pub fn read_content(&mut self, path: &str, length: usize, offset: u64) -> Result<Vec<u8>, FsError> {
        let addr = self.address(path)?;
        let content = match &addr {
            PathAddress::ValueGroup { .. } => match self.match_count(&addr) {
                0 => return Err(FsError::not_found(path)),
                1 => self.file_content(path, &addr)?,
                _ => return Err(FsError::is_directory(path)),
            },
            PathAddress::Row { .. } => self.file_content(path, &addr)?,
            PathAddress::Root | PathAddress::Table { .. } | PathAddress::Column { .. } => {
                return Err(FsError::is_directory(path));
            }
        };
        Ok(slice_window(&content, offset, length).to_vec())
    }

    fn address(&self, path: &str) -> Result<PathAddress, FsError> {
        resolve(path).map_err(|e| {
            debug!(path, error = %e, "path did not resolve");
            FsError::not_found(path)
        })
    }

    /// Execute a planned statement; failures are logged and read as zero rows.
    fn run(&mut self, query: Option<CompiledQuery>) -> QueryRows {
        let Some(query) = query else {
            return QueryRows::default();
        };
        match self.conn.query(&query) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    dialect = self.planner.dialect().name(),
                    sql = %query.sql,
                    error = %e,
                    "query failed, treating as empty"
                );
                QueryRows::default()
            }
        }
    }

    /// Number of rows matching a `ValueGroup` address.
    fn match_count(&mut self, addr: &PathAddress) -> u64 {
        let rows = self.run(self.planner.attribute_query(addr, &self.codec));
        rows.scalar()
            .and_then(|value| value.as_i64())
            .and_then(|count| u64::try_from(count).ok())
            .unwrap_or(0)
    }

    /// Serialized content of the single row `addr` names.
    fn file_content(&mut self, path: &str, addr: &PathAddress) -> Result<Vec<u8>, FsError> {
        let rows = self.run(self.planner.row_query(addr, &self.codec));
        RowContent::from_rows(rows)
            .and_then(|row| row.render(addr.field()))
            .ok_or_else(|| FsError::not_found(path))
    }
}

fn file_attr(content: Vec<u8>) -> NodeAttr {
    NodeAttr::file(content.len() as u64)
}

impl PathFilesystem for DbFs {
    fn getattr(&mut self, ctx: RequestContext, path: &str) -> Result<FileStat, FsError> {
        let attr = self.attributes(path)?;
        Ok(FileStat::new(attr, ctx, self.started))
    }

    fn getdir(&mut self, path: &str) -> Result<Vec<String>, FsError> {
        self.directory(path)
    }

    fn open(&mut self, path: &str) -> Result<u64, FsError> {
        if self.attributes(path)?.is_dir() {
            return Err(FsError::is_directory(path));
        }
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);
        Ok(handle)
    }

    fn release(&mut self, _path: &str, _handle: u64) -> Result<(), FsError> {
        Ok(())
    }

    fn read(&mut self, path: &str, size: u32, offset: u64) -> Result<Vec<u8>, FsError> {
        self.read_content(path, size as usize, offset)
    }

    fn utime(&mut self, _path: &str, _atime: SystemTime, _mtime: SystemTime) -> Result<(), FsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecConfig;
    use crate::test_utils::{fs_from_sql, seeded_fs, seeded_fs_with, LONG_NOTE};
    use rstest::{fixture, rstest};

    #[fixture]
    fn fs() -> DbFs {
        seeded_fs()
    }

    fn json_of(fs: &mut DbFs, path: &str) -> serde_json::Value {
        let bytes = fs.read_content(path, usize::MAX, 0).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    #[rstest]
    #[case("/")]
    #[case("/users")]
    #[case("/users/email")]
    fn test_directories(mut fs: DbFs, #[case] path: &str) {
        assert_eq!(fs.attributes(path).unwrap(), NodeAttr::directory());
    }

    #[rstest]
    #[case("/missing")]
    #[case("/users/missing")]
    #[case("/users/email/nobody@example.com")]
    #[case("/users/email/a@example.com/1")]
    #[case("/users/email/a@example.com#missing")]
    #[case("/.hidden")]
    #[case("/users/email/a@example.com/0/extra")]
    #[case("/users/email/a@example.com/notanumber")]
    fn test_not_found(mut fs: DbFs, #[case] path: &str) {
        let err = fs.attributes(path).unwrap_err();
        assert_eq!(err, FsError::not_found(path));
        assert_eq!(err.errno(), libc::ENOENT);
    }

    #[rstest]
    fn test_empty_table_column_is_not_found(mut fs: DbFs) {
        assert!(fs.attributes("/empty").is_ok());
        assert!(fs.attributes("/empty/id").is_err());
    }

    #[rstest]
    fn test_single_match_is_file_sized_like_read(mut fs: DbFs) {
        let path = "/users/email/a@example.com";
        let attr = fs.attributes(path).unwrap();
        let content = fs.read_content(path, usize::MAX, 0).unwrap();
        assert_eq!(attr, NodeAttr::file(content.len() as u64));
    }

    #[rstest]
    fn test_shared_value_is_directory(mut fs: DbFs) {
        assert!(fs.attributes("/users/team/core").unwrap().is_dir());
    }

    #[rstest]
    #[case("/users/team/core/0")]
    #[case("/users/team/core/1#name")]
    #[case("/users/email/a@example.com#name")]
    fn test_row_size_matches_read(mut fs: DbFs, #[case] path: &str) {
        let attr = fs.attributes(path).unwrap();
        let content = fs.read_content(path, usize::MAX, 0).unwrap();
        assert_eq!(attr.kind, NodeKind::File);
        assert_eq!(attr.size, content.len() as u64);
    }

    // =========================================================================
    // Directory
    // =========================================================================

    #[rstest]
    fn test_root_lists_tables(mut fs: DbFs) {
        assert_eq!(
            fs.directory("/").unwrap(),
            vec![".", "..", "empty", "notes", "users"]
        );
    }

    #[rstest]
    fn test_table_lists_columns_sorted(mut fs: DbFs) {
        assert_eq!(
            fs.directory("/users").unwrap(),
            vec![".", "..", "email", "id", "name", "team"]
        );
    }

    #[rstest]
    fn test_column_lists_distinct_non_null_values(mut fs: DbFs) {
        assert_eq!(
            fs.directory("/users/team").unwrap(),
            vec![".", "..", "core", "web"]
        );
    }

    #[rstest]
    fn test_value_group_lists_indices(mut fs: DbFs) {
        assert_eq!(fs.directory("/users/team/core").unwrap(), vec![".", "..", "0", "1"]);
    }

    #[rstest]
    fn test_value_group_indices_sort_as_names() {
        let mut fs = fs_from_sql(
            "CREATE TABLE t (id INTEGER, tag TEXT);
             WITH RECURSIVE n(i) AS (SELECT 0 UNION ALL SELECT i + 1 FROM n WHERE i < 11)
             INSERT INTO t SELECT i, 'same' FROM n;",
        );
        let listing = fs.directory("/t/tag/same").unwrap();
        assert_eq!(
            listing,
            vec![".", "..", "0", "1", "10", "11", "2", "3", "4", "5", "6", "7", "8", "9"]
        );
        let json = json_of(&mut fs, "/t/tag/same/11");
        assert_eq!(json["tag"], "same");
    }

    #[rstest]
    fn test_row_lists_only_conventional_entries(mut fs: DbFs) {
        assert_eq!(fs.directory("/users/team/core/0").unwrap(), vec![".", ".."]);
    }

    #[rstest]
    fn test_listing_of_missing_table_is_empty(mut fs: DbFs) {
        assert_eq!(fs.directory("/missing").unwrap(), vec![".", ".."]);
    }

    // =========================================================================
    // Read
    // =========================================================================

    #[rstest]
    fn test_read_whole_row(mut fs: DbFs) {
        let json = json_of(&mut fs, "/users/email/a@example.com");
        assert_eq!(
            json,
            serde_json::json!({"email": "a@example.com", "id": 1, "name": "Ann", "team": "core"})
        );
    }

    #[rstest]
    fn test_read_is_pretty_and_key_sorted(mut fs: DbFs) {
        let bytes = fs.read_content("/users/email/a@example.com", 1000, 0).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\n  \"email\": \"a@example.com\",\n  \"id\": 1,\n  \"name\": \"Ann\",\n  \"team\": \"core\"\n}"
        );
    }

    #[rstest]
    fn test_read_field(mut fs: DbFs) {
        assert_eq!(fs.read_content("/users/team/core/1#name", 100, 0).unwrap(), b"Bob");
        assert_eq!(fs.read_content("/users/email/a@example.com#id", 100, 0).unwrap(), b"1");
    }

    #[rstest]
    fn test_read_null_field_is_empty(mut fs: DbFs) {
        assert_eq!(
            fs.read_content("/users/email/c@example.com#team", 100, 0).unwrap(),
            b""
        );
    }

    #[rstest]
    fn test_read_window(mut fs: DbFs) {
        let path = "/users/email/a@example.com#email";
        assert_eq!(fs.read_content(path, 3, 2).unwrap(), b"exa");
        assert_eq!(fs.read_content(path, 100, 10).unwrap(), b"ple.com");
        assert!(fs.read_content(path, 10, 1000).unwrap().is_empty());
    }

    #[rstest]
    #[case("/")]
    #[case("/users")]
    #[case("/users/email")]
    #[case("/users/team/core")]
    fn test_read_directory_is_error(mut fs: DbFs, #[case] path: &str) {
        let err = fs.read_content(path, 10, 0).unwrap_err();
        assert_eq!(err, FsError::is_directory(path));
        assert_eq!(err.errno(), libc::EISDIR);
    }

    #[rstest]
    fn test_hashed_value_round_trip(mut fs: DbFs) {
        let listing = fs.directory("/notes/body").unwrap();
        let hashed: Vec<_> = listing.iter().filter(|name| name.len() == 65).collect();
        assert_eq!(hashed.len(), 1);
        let name = hashed[0];
        assert!(name.starts_with('x'));

        let path = format!("/notes/body/{}", name);
        let json = json_of(&mut fs, &path);
        assert_eq!(json["body"], serde_json::Value::String(LONG_NOTE.to_string()));
        assert_eq!(json["id"], 2);
    }

    #[rstest]
    fn test_truncated_hashed_value_is_not_found() {
        let mut fs = seeded_fs_with(CodecConfig {
            max_retained: 8,
            ..CodecConfig::default()
        });
        let listing = fs.directory("/notes/body").unwrap();
        let name = listing.iter().find(|name| name.len() == 65).unwrap();
        let path = format!("/notes/body/{}", name);

        assert_eq!(fs.attributes(&path), Err(FsError::not_found(&path)));
        assert_eq!(fs.read_content(&path, 16, 0), Err(FsError::not_found(&path)));
    }

    #[rstest]
    fn test_hashed_name_unknown_without_listing(mut fs: DbFs) {
        let mut other = seeded_fs();
        let listing = other.directory("/notes/body").unwrap();
        let name = listing.iter().find(|name| name.len() == 65).unwrap();
        assert!(fs.attributes(&format!("/notes/body/{}", name)).is_err());
    }

    // =========================================================================
    // Column affinities
    // =========================================================================

    const MIXED_SQL: &str = "
        CREATE TABLE t (a, b BLOB, level REAL, label TEXT);
        INSERT INTO t VALUES (5, X'717273', 2.5, 'five');
        INSERT INTO t VALUES (X'616263', NULL, 2.0, 'blob');
    ";

    #[rstest]
    #[case("/t/a", vec!["5", "abc"])]
    #[case("/t/b", vec!["qrs"])]
    #[case("/t/level", vec!["2", "2.5"])]
    fn test_untyped_and_affinity_columns_list(#[case] path: &str, #[case] values: Vec<&str>) {
        let mut fs = fs_from_sql(MIXED_SQL);
        let mut expected = vec![".", ".."];
        expected.extend(values);
        assert_eq!(fs.directory(path).unwrap(), expected);
    }

    #[rstest]
    #[case("/t/a/5", "five")]
    #[case("/t/a/abc", "blob")]
    #[case("/t/b/qrs", "five")]
    #[case("/t/level/2", "blob")]
    #[case("/t/level/2.5", "five")]
    fn test_listed_values_resolve_to_rows(#[case] path: &str, #[case] label: &str) {
        let mut fs = fs_from_sql(MIXED_SQL);
        assert!(!fs.attributes(path).unwrap().is_dir());
        let field = fs.read_content(&format!("{}#label", path), usize::MAX, 0).unwrap();
        assert_eq!(field, label.as_bytes());
    }

    // =========================================================================
    // Host callbacks
    // =========================================================================

    #[rstest]
    fn test_getattr_fills_stat(mut fs: DbFs) {
        let ctx = RequestContext { uid: 501, gid: 20 };
        let stat = fs.getattr(ctx, "/users").unwrap();
        assert_eq!(stat.perm, DIR_PERM);
        assert_eq!((stat.uid, stat.gid), (501, 20));
        assert_eq!(stat.mtime, fs.started());
    }

    #[rstest]
    fn test_open_hands_out_distinct_handles(mut fs: DbFs) {
        let first = fs.open("/users/email/a@example.com").unwrap();
        let second = fs.open("/users/email/a@example.com").unwrap();
        assert_ne!(first, second);
        fs.release("/users/email/a@example.com", first).unwrap();
    }

    #[rstest]
    fn test_open_directory_fails(mut fs: DbFs) {
        assert_eq!(fs.open("/users"), Err(FsError::is_directory("/users")));
    }

    #[rstest]
    fn test_utime_is_ignored(mut fs: DbFs) {
        let now = SystemTime::now();
        assert!(fs.utime("/users", now, now).is_ok());
    }

    #[rstest]
    fn test_read_callback_limits_size(mut fs: DbFs) {
        let bytes = fs.read("/users/email/a@example.com#email", 1, 0).unwrap();
        assert_eq!(bytes, b"a");
    }
}
