use std::path::{Path, PathBuf};

use crate::attrs::Attributes;
use crate::error::WalkError;

/// One step of a depth-first traversal.
///
/// A closed sum: every event is exactly one of these three, and the payload
/// is either a success or an error, never both. Per-entry failures travel
/// in-band — an unreadable file is an [`Entry`](WalkEvent::Entry) carrying
/// the error, not the end of the walk.
#[derive(Debug)]
pub enum WalkEvent {
    /// A path that will not be descended into: a file, a symlink, a
    /// directory at the depth limit, a detected cycle, or anything whose
    /// attributes could not be read.
    Entry {
        path: PathBuf,
        attrs: Result<Attributes, WalkError>,
    },

    /// A directory the walker has opened and pushed onto its stack. Always
    /// carries attributes — a directory that failed to open is reported as
    /// an [`Entry`](WalkEvent::Entry) with the error instead.
    EnterDirectory { path: PathBuf, attrs: Attributes },

    /// A directory frame has been exhausted and closed. Carries the
    /// enumeration error if the listing failed partway.
    LeaveDirectory {
        path: PathBuf,
        error: Option<WalkError>,
    },
}

impl WalkEvent {
    /// The path this event concerns.
    pub fn path(&self) -> &Path {
        match self {
            Self::Entry { path, .. }
            | Self::EnterDirectory { path, .. }
            | Self::LeaveDirectory { path, .. } => path,
        }
    }
}
