use std::path::{Path, PathBuf};

use crate::attrs::Attributes;
use crate::error::WalkError;
use crate::event::WalkEvent;
use crate::walker::TreeWalker;

// ---------------------------------------------------------------------------
// WalkIter
// ---------------------------------------------------------------------------

/// Pull adapter over one [`TreeWalker`]: yields each visited entry as
/// `(path, attributes)`, turning per-entry failures into `Err` items and
/// transparently skipping clean leave-directory events.
///
/// Construction performs the root visit; if that visit fails, construction
/// fails and the walker is released immediately — nothing leaks on the error
/// path. Dropping the iterator releases every open directory handle.
pub struct WalkIter {
    walker: TreeWalker,
    /// The root event, handed back on the first `next()` call.
    lookahead: Option<WalkEvent>,
}

impl WalkIter {
    pub(crate) fn new(
        root: &Path,
        follow_links: bool,
        max_depth: usize,
    ) -> Result<Self, WalkError> {
        let mut walker = TreeWalker::new(follow_links, max_depth);
        match walker.walk(root) {
            WalkEvent::Entry {
                attrs: Err(error), ..
            } => Err(error),
            event => Ok(Self {
                walker,
                lookahead: Some(event),
            }),
        }
    }

    /// Close the underlying walker and all of its directory handles.
    ///
    /// Further `next()` calls panic — a closed traversal cannot be resumed.
    /// The buffered root event is discarded too: closing is the last word,
    /// even before the first item was pulled.
    pub fn close(&mut self) {
        self.lookahead = None;
        self.walker.close();
    }
}

impl Iterator for WalkIter {
    type Item = Result<(PathBuf, Attributes), WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let event = match self.lookahead.take() {
                Some(event) => event,
                None => self.walker.next()?,
            };
            match event {
                WalkEvent::Entry { path, attrs } => {
                    return Some(attrs.map(|attrs| (path, attrs)));
                }
                WalkEvent::EnterDirectory { path, attrs } => {
                    return Some(Ok((path, attrs)));
                }
                WalkEvent::LeaveDirectory {
                    error: Some(error), ..
                } => return Some(Err(error)),
                WalkEvent::LeaveDirectory { error: None, .. } => continue,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Lazy sequence adapters
// ---------------------------------------------------------------------------

/// Lazy, on-demand sequence of every path under a root.
///
/// Holds open directory handles while alive; exhaust it, call
/// [`close`](Paths::close), or drop it to release them.
pub struct Paths {
    iter: WalkIter,
}

impl Paths {
    pub(crate) fn new(iter: WalkIter) -> Self {
        Self { iter }
    }

    /// Release all traversal resources. Further `next()` calls panic.
    pub fn close(&mut self) {
        self.iter.close();
    }
}

impl Iterator for Paths {
    type Item = Result<PathBuf, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|item| item.map(|(path, _)| path))
    }
}

/// Lazy sequence of the paths whose attributes satisfy a predicate.
///
/// Entries failing the predicate are filtered out; traversal errors are not —
/// they surface as `Err` items so callers decide whether to keep draining.
pub struct Find<P> {
    iter: WalkIter,
    predicate: P,
}

impl<P> Find<P>
where
    P: FnMut(&Path, &Attributes) -> bool,
{
    pub(crate) fn new(iter: WalkIter, predicate: P) -> Self {
        Self { iter, predicate }
    }

    /// Release all traversal resources. Further `next()` calls panic.
    pub fn close(&mut self) {
        self.iter.close();
    }
}

impl<P> Iterator for Find<P>
where
    P: FnMut(&Path, &Attributes) -> bool,
{
    type Item = Result<PathBuf, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.iter.next()? {
                Ok((path, attrs)) => {
                    if (self.predicate)(&path, &attrs) {
                        return Some(Ok(path));
                    }
                }
                Err(error) => return Some(Err(error)),
            }
        }
    }
}
