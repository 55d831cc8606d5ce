use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::WalkError;

/// One open directory listing: single-pass, closable, lazily populated.
///
/// The stream always keeps one entry read ahead, so a positive
/// [`has_next`](DirStream::has_next) answer is never contradicted by the
/// following [`next_entry`](DirStream::next_entry) failing with I/O.
///
/// Iteration is weakly consistent: entries added or removed concurrently by
/// other processes may or may not be observed. An enumeration failure is
/// yielded as an `Err` entry rather than poisoning the stream — it stays
/// safe to close, though further reads may keep failing.
pub struct DirStream {
    path: PathBuf,
    inner: Option<fs::ReadDir>,
    lookahead: Option<Result<PathBuf, WalkError>>,
    filter: Option<Box<dyn FnMut(&Path) -> bool + Send>>,
}

impl std::fmt::Debug for DirStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirStream")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl DirStream {
    /// Open a stream over the entries of `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, WalkError> {
        Self::new(path.into(), None)
    }

    /// Open a stream that yields only entries accepted by `filter`.
    ///
    /// Rejected entries are skipped silently; they never surface through
    /// `next_entry`.
    pub fn open_filtered(
        path: impl Into<PathBuf>,
        filter: impl FnMut(&Path) -> bool + Send + 'static,
    ) -> Result<Self, WalkError> {
        Self::new(path.into(), Some(Box::new(filter)))
    }

    fn new(
        path: PathBuf,
        filter: Option<Box<dyn FnMut(&Path) -> bool + Send>>,
    ) -> Result<Self, WalkError> {
        let inner = fs::read_dir(&path).map_err(|source| WalkError::OpenDir {
            path: path.clone(),
            source,
        })?;
        trace!(path = %path.display(), "opened directory stream");
        let mut stream = Self {
            path,
            inner: Some(inner),
            lookahead: None,
            filter,
        };
        stream.fill();
        Ok(stream)
    }

    /// The directory this stream lists.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether another entry is buffered and ready.
    pub fn has_next(&self) -> bool {
        self.lookahead.is_some()
    }

    /// The next child path, an enumeration error, or `None` when the listing
    /// is exhausted or the stream has been closed.
    pub fn next_entry(&mut self) -> Option<Result<PathBuf, WalkError>> {
        let item = self.lookahead.take();
        self.fill();
        item
    }

    /// Advance the underlying handle until an acceptable entry (or an error)
    /// is buffered. No-op while something is already buffered or after close.
    fn fill(&mut self) {
        if self.lookahead.is_some() {
            return;
        }
        let Some(inner) = self.inner.as_mut() else {
            return;
        };
        loop {
            match inner.next() {
                None => return,
                Some(Ok(dent)) => {
                    let child = dent.path();
                    if let Some(filter) = self.filter.as_mut() {
                        if !filter(&child) {
                            continue;
                        }
                    }
                    self.lookahead = Some(Ok(child));
                    return;
                }
                Some(Err(source)) => {
                    self.lookahead = Some(Err(WalkError::ReadDir {
                        path: self.path.clone(),
                        source,
                    }));
                    return;
                }
            }
        }
    }

    /// Release the directory handle. Idempotent — closing twice is a no-op,
    /// and a closed stream yields `None` forever.
    pub fn close(&mut self) {
        if self.inner.is_some() {
            trace!(path = %self.path.display(), "closed directory stream");
        }
        self.inner = None;
        self.lookahead = None;
    }
}

impl Iterator for DirStream {
    type Item = Result<PathBuf, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
    }
}
