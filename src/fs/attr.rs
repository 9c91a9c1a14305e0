//! Node attributes and the stat record handed to the host.

use std::time::SystemTime;

use serde::Serialize;

/// Permission bits for directories (r-x for everyone).
pub const DIR_PERM: u16 = 0o555;

/// Permission bits for files (r-- for everyone).
pub const FILE_PERM: u16 = 0o444;

pub const BLOCK_SIZE: u32 = 4096;

/// Unit of the `blocks` count, as in `stat(2)`.
const STAT_BLOCK_UNIT: u64 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

/// What the operation layer knows about a node: its kind and content size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeAttr {
    pub kind: NodeKind,
    pub size: u64,
}

impl NodeAttr {
    pub fn directory() -> Self {
        Self {
            kind: NodeKind::Directory,
            size: 0,
        }
    }

    pub fn file(size: u64) -> Self {
        Self {
            kind: NodeKind::File,
            size,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// Identity of the process issuing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub uid: u32,
    pub gid: u32,
}

impl RequestContext {
    /// The identity of the current process.
    pub fn current() -> Self {
        // SAFETY: getuid and getgid cannot fail and touch no memory.
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        Self { uid, gid }
    }
}

/// Full stat record for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub kind: NodeKind,
    pub perm: u16,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub blocks: u64,
    pub blksize: u32,
    pub atime: SystemTime,
    pub mtime: SystemTime,
    pub ctime: SystemTime,
}

impl FileStat {
    /// Build a stat record; every timestamp is `time`.
    pub fn new(attr: NodeAttr, ctx: RequestContext, time: SystemTime) -> Self {
        let (perm, nlink) = match attr.kind {
            NodeKind::Directory => (DIR_PERM, 2),
            NodeKind::File => (FILE_PERM, 1),
        };
        Self {
            kind: attr.kind,
            perm,
            nlink,
            uid: ctx.uid,
            gid: ctx.gid,
            size: attr.size,
            blocks: attr.size.div_ceil(STAT_BLOCK_UNIT),
            blksize: BLOCK_SIZE,
            atime: time,
            mtime: time,
            ctime: time,
        }
    }

    /// Full `st_mode`, file type bits included.
    pub fn mode(&self) -> u32 {
        let kind_bits = match self.kind {
            NodeKind::Directory => libc::S_IFDIR,
            NodeKind::File => libc::S_IFREG,
        };
        u32::from(kind_bits) | u32::from(self.perm)
    }
}
