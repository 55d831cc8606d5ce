use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

/// Basic attributes of a visited path, captured once per visit.
///
/// Wraps the [`Metadata`] read by the walker together with the identity key
/// used for cycle detection. Every event that reports a successful visit
/// carries one of these, so consumers never pay for a second `stat()` on
/// paths the walker has already examined.
#[derive(Debug, Clone)]
pub struct Attributes {
    metadata: Metadata,
    key: Option<FileId>,
}

impl Attributes {
    /// Read attributes of `path`, following symbolic links when asked to.
    ///
    /// When following is enabled and the follow-read fails (a dangling link
    /// target, typically), the link's own attributes are read instead — a
    /// broken symlink still yields a usable "it's a link" result rather than
    /// a hard failure.
    pub(crate) fn read(path: &Path, follow_links: bool) -> io::Result<Self> {
        let metadata = if follow_links {
            match fs::metadata(path) {
                Ok(md) => md,
                Err(_) => fs::symlink_metadata(path)?,
            }
        } else {
            fs::symlink_metadata(path)?
        };
        let key = FileId::of(&metadata);
        Ok(Self { metadata, key })
    }

    /// Whether the path is a directory.
    pub fn is_directory(&self) -> bool {
        self.metadata.is_dir()
    }

    /// Whether the path is a regular file.
    pub fn is_file(&self) -> bool {
        self.metadata.is_file()
    }

    /// Whether the path is a symbolic link.
    ///
    /// Only observable when the walker was configured *not* to follow links,
    /// or when the link was dangling — following resolves links before the
    /// attributes are captured.
    pub fn is_symlink(&self) -> bool {
        self.metadata.is_symlink()
    }

    /// Size of the file, in bytes.
    pub fn len(&self) -> u64 {
        self.metadata.len()
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.metadata.len() == 0
    }

    /// The underlying [`Metadata`], for timestamps, permissions, etc.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The identity key of the underlying file object, if the platform
    /// provides one.
    pub fn file_id(&self) -> Option<FileId> {
        self.key
    }
}

/// Opaque, comparable token identifying the underlying file object.
///
/// Two paths with equal keys denote the same file. Device and inode numbers
/// on Unix; absent on platforms without a cheap equivalent, in which case
/// cycle detection falls back to an explicit same-file test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    dev: u64,
    ino: u64,
}

impl FileId {
    #[cfg(unix)]
    fn of(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    fn of(_metadata: &Metadata) -> Option<Self> {
        None
    }
}
