use std::path::Path;

use crate::attrs::Attributes;
use crate::error::WalkError;

/// A visitor callback's verdict on how traversal should proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Proceed normally.
    Continue,

    /// Stop the entire walk immediately.
    Terminate,

    /// Skip the children of the directory just entered. Meaningful only from
    /// [`FileVisitor::pre_visit_directory`]; no `post_visit_directory` fires
    /// for the skipped directory. From any other callback it behaves as
    /// [`Continue`](Flow::Continue).
    SkipSubtree,

    /// Skip the not-yet-visited siblings of the current entry. From
    /// `pre_visit_directory` this also skips the directory itself, subtree
    /// and post-visit included. From `post_visit_directory` it behaves as
    /// [`Continue`](Flow::Continue) — there is no sibling left to skip.
    SkipSiblings,
}

/// The four-callback interface driven by
/// [`walk_file_tree`](crate::walk_file_tree).
///
/// Every method has a default so visitors implement only what they care
/// about. Returning `Err` ends the walk and propagates the error out of the
/// driver — the Rust spelling of a visitor throwing — after all open
/// directory handles have been released.
///
/// # Defaults
///
/// `pre_visit_directory` and `visit_file` continue; `visit_file_failed`
/// returns the error it was handed; `post_visit_directory` returns the
/// enumeration error if there was one, otherwise continues. A visitor that
/// overrides nothing therefore walks the whole tree and surfaces the first
/// failure.
pub trait FileVisitor {
    /// A directory is about to be entered; its children follow unless this
    /// returns [`Flow::SkipSubtree`] or [`Flow::SkipSiblings`].
    fn pre_visit_directory(
        &mut self,
        path: &Path,
        attrs: &Attributes,
    ) -> Result<Flow, WalkError> {
        let _ = (path, attrs);
        Ok(Flow::Continue)
    }

    /// A non-directory entry (or a directory at the depth limit) was visited.
    fn visit_file(&mut self, path: &Path, attrs: &Attributes) -> Result<Flow, WalkError> {
        let _ = (path, attrs);
        Ok(Flow::Continue)
    }

    /// An entry could not be visited: attributes unreadable, directory
    /// unopenable, or a symlink cycle. Return a [`Flow`] to keep walking.
    fn visit_file_failed(&mut self, path: &Path, error: WalkError) -> Result<Flow, WalkError> {
        let _ = path;
        Err(error)
    }

    /// All children of `path` have been visited, or the listing failed
    /// partway (`error` carries the failure).
    fn post_visit_directory(
        &mut self,
        path: &Path,
        error: Option<WalkError>,
    ) -> Result<Flow, WalkError> {
        let _ = path;
        match error {
            Some(error) => Err(error),
            None => Ok(Flow::Continue),
        }
    }
}
