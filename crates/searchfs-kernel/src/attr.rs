//! POSIX-style metadata for synthesized entries.
//!
//! Nothing in a search-backed tree exists on disk, so every attribute is
//! stamped here: a kind, its mode bits, "now" for all timestamps and the
//! calling process's uid/gid.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use strum::{Display, EnumString};

/// Logical size reported for every directory.
pub const DIRECTORY_SIZE: u64 = 4096;

/// Entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum FileKind {
    #[strum(serialize = "dir")]
    Directory,
    #[strum(serialize = "file")]
    File,
}

impl FileKind {
    /// Full `st_mode` value: type bits plus permissions.
    pub fn mode(&self) -> u32 {
        match self {
            FileKind::Directory => 0o040_755,
            FileKind::File => 0o100_644,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, FileKind::Directory)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, FileKind::File)
    }
}

/// File attributes handed to the protocol bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttr {
    /// Size in bytes.
    pub size: u64,
    pub kind: FileKind,
    /// `st_mode`, including the type bits.
    pub mode: u32,
    pub mtime: SystemTime,
    pub atime: SystemTime,
    pub ctime: SystemTime,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
}

impl FileAttr {
    /// Stamp attributes for `kind` with the default mode and ownership.
    pub fn new(kind: FileKind, size: u64) -> Self {
        let now = SystemTime::now();
        let (uid, gid) = process_owner();
        Self {
            size,
            kind,
            mode: kind.mode(),
            mtime: now,
            atime: now,
            ctime: now,
            nlink: if kind.is_dir() { 2 } else { 1 },
            uid,
            gid,
        }
    }

    /// Directory attributes with the fixed logical size.
    pub fn directory() -> Self {
        Self::new(FileKind::Directory, DIRECTORY_SIZE)
    }

    pub fn file(size: u64) -> Self {
        Self::new(FileKind::File, size)
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }
}

#[cfg(unix)]
fn process_owner() -> (u32, u32) {
    (
        rustix::process::getuid().as_raw(),
        rustix::process::getgid().as_raw(),
    )
}

#[cfg(not(unix))]
fn process_owner() -> (u32, u32) {
    (0, 0)
}
