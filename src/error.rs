use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    // Per-entry traversal failures
    #[error("cannot read attributes")]
    Attributes {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open directory")]
    OpenDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading directory")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file system loop detected")]
    Loop { path: PathBuf, ancestor: PathBuf },

    // Escape hatch for visitors that fail with their own I/O
    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    /// The path this error occurred at.
    /// Callers use this to present "skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> &Path {
        match self {
            Self::Attributes { path, .. }
            | Self::OpenDir { path, .. }
            | Self::ReadDir { path, .. }
            | Self::Loop { path, .. }
            | Self::Io { path, .. } => path,
        }
    }

    /// The underlying I/O error, if there is one.
    ///
    /// Loop errors have no I/O cause — the cycle is detected before any
    /// failing syscall is made.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Attributes { source, .. }
            | Self::OpenDir { source, .. }
            | Self::ReadDir { source, .. }
            | Self::Io { source, .. } => Some(source),
            Self::Loop { .. } => None,
        }
    }

    /// Whether this error describes a symbolic-link cycle.
    pub fn is_loop(&self) -> bool {
        matches!(self, Self::Loop { .. })
    }

    /// Whether traversal can continue after this error.
    ///
    /// The per-entry variants are recoverable: the walker packages them into
    /// events and keeps going, leaving the decision to the caller. The `Io`
    /// escape hatch is not — it only exists for visitor callbacks, whose
    /// errors end the walk.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Attributes { .. } | Self::OpenDir { .. } | Self::ReadDir { .. } | Self::Loop { .. }
        )
    }
}
