//! # treewalk
//!
//! Depth-first file-tree traversal engine — event-driven, embeddable, zero
//! opinions.
//!
//! treewalk owns the traversal core: a stack-based walker that opens and
//! closes directory handles, detects symbolic-link cycles, honors depth
//! limits, and emits typed events ([`WalkEvent`]). On top of that core it
//! offers two surfaces over the same engine:
//!
//! - a **push-style visitor API** ([`walk_file_tree`], [`FileVisitor`]) where
//!   callback return codes ([`Flow`]) prune subtrees or siblings mid-walk;
//! - a **pull-style lazy API** ([`walk`], [`find`]) yielding paths on demand
//!   while the engine manages the open handles underneath.
//!
//! It does **not** own glob matching, copy/move semantics, permission
//! models, or output formatting — those belong to the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//! use std::path::Path;
//! use treewalk::{Attributes, FileVisitor, Flow, WalkError};
//!
//! struct Counter {
//!     files: usize,
//! }
//!
//! impl FileVisitor for Counter {
//!     fn visit_file(&mut self, _path: &Path, _attrs: &Attributes) -> Result<Flow, WalkError> {
//!         self.files += 1;
//!         Ok(Flow::Continue)
//!     }
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("a.txt"), "a").unwrap();
//! fs::create_dir(dir.path().join("sub")).unwrap();
//! fs::write(dir.path().join("sub").join("b.txt"), "b").unwrap();
//!
//! let mut counter = Counter { files: 0 };
//! treewalk::walk_file_tree(dir.path(), &mut counter).unwrap();
//! assert_eq!(counter.files, 2);
//! ```
//!
//! # Lazy sequences
//!
//! [`walk`] and [`find`] hold open directory handles until exhausted,
//! closed, or dropped — scope them accordingly:
//!
//! ```rust
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("note.md"), "hi").unwrap();
//!
//! let paths: Vec<_> = treewalk::walk(dir.path())
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(paths.len(), 2); // the root and note.md
//! ```
//!
//! # Event-level access
//!
//! Consumers that need the raw enter/entry/leave stream drive a
//! [`TreeWalker`] directly:
//!
//! ```rust
//! use treewalk::{WalkBuilder, WalkEvent};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("a.txt"), "a").unwrap();
//!
//! let mut walker = WalkBuilder::new(dir.path()).max_depth(1).walker();
//! let mut events = vec![walker.walk(dir.path())];
//! while let Some(event) = walker.next() {
//!     events.push(event);
//! }
//! assert!(matches!(events.first(), Some(WalkEvent::EnterDirectory { .. })));
//! assert!(matches!(events.last(), Some(WalkEvent::LeaveDirectory { .. })));
//! ```
//!
//! # Error model
//!
//! Per-entry failures (unreadable attributes, unopenable directories,
//! symlink cycles) never abort a walk by themselves — they travel in-band as
//! [`WalkError`] payloads and the caller decides. Misusing the walker state
//! machine (advancing before [`TreeWalker::walk`], walking twice, advancing
//! after close) is a programmer error and panics.

#![forbid(unsafe_code)]

mod attrs;
mod builder;
mod driver;
mod error;
mod event;
mod iter;
mod stream;
mod visitor;
mod walker;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use attrs::{Attributes, FileId};
pub use builder::WalkBuilder;
pub use error::WalkError;
pub use event::WalkEvent;
pub use iter::{Find, Paths, WalkIter};
pub use stream::DirStream;
pub use visitor::{FileVisitor, Flow};
pub use walker::TreeWalker;

use std::path::{Path, PathBuf};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Walk the tree rooted at `root` with default options, invoking `visitor`
/// for every event. Returns the root path on completion.
///
/// Shorthand for [`WalkBuilder::new(root).visit(visitor)`](WalkBuilder::visit).
///
/// # Errors
///
/// Any error a visitor callback returns instead of a [`Flow`]. All open
/// directory handles are released before it surfaces.
pub fn walk_file_tree<V>(root: impl Into<PathBuf>, visitor: &mut V) -> Result<PathBuf, WalkError>
where
    V: FileVisitor + ?Sized,
{
    WalkBuilder::new(root).visit(visitor)
}

/// Lazy sequence of every path under `root` (the root included), with
/// default options.
///
/// Shorthand for [`WalkBuilder::new(root).paths()`](WalkBuilder::paths).
///
/// # Errors
///
/// If visiting the root itself fails.
pub fn walk(root: impl Into<PathBuf>) -> Result<Paths, WalkError> {
    WalkBuilder::new(root).paths()
}

/// Lazy sequence of the paths under `root` whose attributes satisfy
/// `predicate`, with default options.
///
/// Shorthand for [`WalkBuilder::new(root).find(predicate)`](WalkBuilder::find).
///
/// # Errors
///
/// If visiting the root itself fails.
pub fn find<P>(root: impl Into<PathBuf>, predicate: P) -> Result<Find<P>, WalkError>
where
    P: FnMut(&Path, &Attributes) -> bool,
{
    WalkBuilder::new(root).find(predicate)
}
