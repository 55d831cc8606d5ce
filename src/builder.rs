use std::path::{Path, PathBuf};

use crate::attrs::Attributes;
use crate::driver;
use crate::error::WalkError;
use crate::iter::{Find, Paths, WalkIter};
use crate::visitor::FileVisitor;
use crate::walker::TreeWalker;

// ---------------------------------------------------------------------------
// WalkBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and running a traversal.
///
/// Configure with chained methods, then pick a terminal: [`visit`] for the
/// push-style visitor API, [`paths`] / [`entries`] / [`find`] for lazy pull
/// sequences, or [`walker`] for raw event-level access.
///
/// [`visit`]: WalkBuilder::visit
/// [`paths`]: WalkBuilder::paths
/// [`entries`]: WalkBuilder::entries
/// [`find`]: WalkBuilder::find
/// [`walker`]: WalkBuilder::walker
///
/// # Example
///
/// ```rust,ignore
/// let mut names = Vec::new();
/// for path in WalkBuilder::new(root).max_depth(2).paths()? {
///     names.push(path?);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WalkBuilder {
    root: PathBuf,
    follow_links: bool,
    max_depth: usize,
}

impl WalkBuilder {
    /// Start configuring a traversal rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
            max_depth: usize::MAX,
        }
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Follow symbolic links to directories. Off by default.
    ///
    /// Enabling this also enables cycle detection: a link back to an
    /// ancestor is reported as a [`WalkError::Loop`] entry instead of being
    /// descended into.
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Maximum traversal depth. `0` visits the root only — even a directory
    /// root is reported as a plain entry, never entered. Unlimited by
    /// default.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    // ── Terminals ─────────────────────────────────────────────────────────

    /// Walk the tree, invoking `visitor` for every event. Returns the root
    /// path on completion (including early termination via
    /// [`Flow::Terminate`](crate::Flow::Terminate)).
    ///
    /// # Errors
    ///
    /// Any error a visitor callback returns instead of a `Flow`; all open
    /// directory handles are released before it surfaces.
    pub fn visit<V>(self, visitor: &mut V) -> Result<PathBuf, WalkError>
    where
        V: FileVisitor + ?Sized,
    {
        let mut walker = TreeWalker::new(self.follow_links, self.max_depth);
        driver::drive(&mut walker, &self.root, visitor)?;
        Ok(self.root)
    }

    /// Lazy sequence of every path under the root, the root included.
    ///
    /// # Errors
    ///
    /// If visiting the root itself fails. Nothing is left open on that path.
    pub fn paths(self) -> Result<Paths, WalkError> {
        let iter = WalkIter::new(&self.root, self.follow_links, self.max_depth)?;
        Ok(Paths::new(iter))
    }

    /// Lazy sequence of `(path, attributes)` pairs for every visited entry,
    /// for consumers that want the captured attributes alongside each path.
    ///
    /// # Errors
    ///
    /// If visiting the root itself fails. Nothing is left open on that path.
    pub fn entries(self) -> Result<WalkIter, WalkError> {
        WalkIter::new(&self.root, self.follow_links, self.max_depth)
    }

    /// Lazy sequence of the paths whose attributes satisfy `predicate`.
    ///
    /// # Errors
    ///
    /// If visiting the root itself fails. Nothing is left open on that path.
    pub fn find<P>(self, predicate: P) -> Result<Find<P>, WalkError>
    where
        P: FnMut(&Path, &Attributes) -> bool,
    {
        let iter = WalkIter::new(&self.root, self.follow_links, self.max_depth)?;
        Ok(Find::new(iter, predicate))
    }

    /// A [`TreeWalker`] carrying this builder's options, for event-level
    /// consumers. The walker is unstarted; pass a root to
    /// [`TreeWalker::walk`] to begin.
    pub fn walker(&self) -> TreeWalker {
        TreeWalker::new(self.follow_links, self.max_depth)
    }
}
