use std::path::{Path, PathBuf};

use tracing::debug;

use crate::attrs::{Attributes, FileId};
use crate::error::WalkError;
use crate::event::WalkEvent;
use crate::stream::DirStream;

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// One open directory on the traversal stack.
///
/// Owned exclusively by the walker — the stream handle is never exposed, so
/// nothing outside the walker can advance or close it.
struct Frame {
    path: PathBuf,
    /// Identity key for cycle detection. Absent on platforms without one;
    /// the ancestor scan then falls back to an explicit same-file test.
    key: Option<FileId>,
    stream: DirStream,
    /// Set by `skip_remaining_siblings`; makes the next advance pop this
    /// frame instead of continuing enumeration.
    skip_siblings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    Walking,
    Closed,
}

// ---------------------------------------------------------------------------
// TreeWalker
// ---------------------------------------------------------------------------

/// The traversal core: an explicit stack of open directory frames, advanced
/// one event at a time.
///
/// Recursion is modelled as iteration so the walk can be suspended between
/// any two entries without holding a native call-stack frame per directory
/// level, and so depth is bounded by configuration rather than by the host
/// stack. Most callers want the higher-level surfaces built on top —
/// [`walk_file_tree`](crate::walk_file_tree) for the push-style visitor API,
/// [`walk`](crate::walk) and [`find`](crate::find) for lazy sequences — but
/// the event-level API is public for consumers that need full control.
///
/// # Protocol
///
/// `walk(root)` exactly once, then `next()` until it returns `None`. Calls
/// out of order are programmer errors and panic. A walker is a single-thread
/// resource; `&mut self` receivers make concurrent driving unrepresentable.
/// Dropping the walker closes every open frame, deepest first.
pub struct TreeWalker {
    follow_links: bool,
    max_depth: usize,
    state: State,
    stack: Vec<Frame>,
}

impl TreeWalker {
    /// Create a walker that does not follow symbolic links and has no depth
    /// limit. Configure via [`WalkBuilder`](crate::WalkBuilder) for anything
    /// else.
    pub fn new(follow_links: bool, max_depth: usize) -> Self {
        Self {
            follow_links,
            max_depth,
            state: State::Ready,
            stack: Vec::new(),
        }
    }

    /// Visit the root of the traversal and return its event.
    ///
    /// If the root is a directory that opens successfully, a frame is pushed
    /// and subsequent [`next`](TreeWalker::next) calls enumerate it.
    ///
    /// # Panics
    ///
    /// If called more than once, or after [`close`](TreeWalker::close).
    pub fn walk(&mut self, root: impl AsRef<Path>) -> WalkEvent {
        match self.state {
            State::Ready => {}
            State::Walking => panic!("walk() already invoked on this walker"),
            State::Closed => panic!("walker is closed"),
        }
        self.state = State::Walking;
        self.visit(root.as_ref().to_path_buf())
    }

    /// Advance by one event: the next unvisited child of the top frame, or —
    /// when the frame is exhausted or marked to skip its remaining siblings —
    /// a [`WalkEvent::LeaveDirectory`] for the popped frame. Returns `None`
    /// once the stack is empty.
    ///
    /// # Panics
    ///
    /// If called before [`walk`](TreeWalker::walk), or after
    /// [`close`](TreeWalker::close).
    pub fn next(&mut self) -> Option<WalkEvent> {
        match self.state {
            State::Walking => {}
            State::Ready => panic!("next() called before walk()"),
            State::Closed => panic!("walker is closed"),
        }
        let child = {
            let frame = self.stack.last_mut()?;
            if frame.skip_siblings {
                None
            } else {
                frame.stream.next_entry()
            }
        };
        match child {
            Some(Ok(path)) => Some(self.visit(path)),
            Some(Err(error)) => self.leave(Some(error)),
            None => self.leave(None),
        }
    }

    /// Mark the top frame so the next advance pops it immediately instead of
    /// enumerating further. No-op when the stack is empty.
    pub fn skip_remaining_siblings(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.skip_siblings = true;
        }
    }

    /// Close and discard the top frame without producing a
    /// [`WalkEvent::LeaveDirectory`]. Used by the driver when a visitor skips
    /// a directory's subtree before any of its children were visited. No-op
    /// when the stack is empty.
    pub fn pop(&mut self) {
        if let Some(mut frame) = self.stack.pop() {
            frame.stream.close();
        }
    }

    /// Current stack depth: the number of directories currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether the walker has not been closed yet.
    pub fn is_open(&self) -> bool {
        self.state != State::Closed
    }

    /// Close every open frame, deepest first. Idempotent; any later advance
    /// panics. Also run on drop, so abandoning a walker mid-traversal leaks
    /// nothing.
    pub fn close(&mut self) {
        if self.state == State::Closed {
            return;
        }
        while let Some(mut frame) = self.stack.pop() {
            frame.stream.close();
        }
        self.state = State::Closed;
    }

    // ── Visit ─────────────────────────────────────────────────────────────

    /// Visit one candidate path: read its attributes, decide whether to
    /// descend, and build the event. Shared by the root visit and every
    /// directory entry encountered by `next()`.
    fn visit(&mut self, path: PathBuf) -> WalkEvent {
        let attrs = match Attributes::read(&path, self.follow_links) {
            Ok(attrs) => attrs,
            Err(source) => {
                return WalkEvent::Entry {
                    attrs: Err(WalkError::Attributes {
                        path: path.clone(),
                        source,
                    }),
                    path,
                };
            }
        };

        // At the depth limit, directories are reported as plain entries.
        if self.stack.len() >= self.max_depth || !attrs.is_directory() {
            return WalkEvent::Entry {
                path,
                attrs: Ok(attrs),
            };
        }

        if self.follow_links {
            if let Some(ancestor) = self.find_cycle(&path, attrs.file_id()) {
                debug!(
                    path = %path.display(),
                    ancestor = %ancestor.display(),
                    "symlink cycle detected"
                );
                return WalkEvent::Entry {
                    attrs: Err(WalkError::Loop {
                        path: path.clone(),
                        ancestor,
                    }),
                    path,
                };
            }
        }

        let stream = match DirStream::open(path.clone()) {
            Ok(stream) => stream,
            Err(error) => {
                return WalkEvent::Entry {
                    attrs: Err(error),
                    path,
                };
            }
        };

        debug!(path = %path.display(), depth = self.stack.len(), "entering directory");
        self.stack.push(Frame {
            path: path.clone(),
            key: attrs.file_id(),
            stream,
            skip_siblings: false,
        });
        WalkEvent::EnterDirectory { path, attrs }
    }

    /// Scan ancestor frames for the candidate directory's identity.
    ///
    /// Keys are compared when both sides have one; otherwise an explicit
    /// same-file test decides, and an inconclusive test (I/O failure, races
    /// with a changing tree) counts as "not a cycle" — a best-effort check
    /// never blocks traversal. O(depth) per directory entered, bounded by
    /// the depth limit.
    fn find_cycle(&self, path: &Path, key: Option<FileId>) -> Option<PathBuf> {
        for frame in self.stack.iter().rev() {
            match (key, frame.key) {
                (Some(child), Some(ancestor)) => {
                    if child == ancestor {
                        return Some(frame.path.clone());
                    }
                }
                _ => {
                    if same_file::is_same_file(&frame.path, path).unwrap_or(false) {
                        return Some(frame.path.clone());
                    }
                }
            }
        }
        None
    }

    /// Pop the top frame and build its `LeaveDirectory` event, carrying the
    /// enumeration error when the listing failed partway.
    fn leave(&mut self, error: Option<WalkError>) -> Option<WalkEvent> {
        let mut frame = self.stack.pop()?;
        frame.stream.close();
        debug!(path = %frame.path.display(), depth = self.stack.len(), "leaving directory");
        Some(WalkEvent::LeaveDirectory {
            path: frame.path,
            error,
        })
    }
}

impl Drop for TreeWalker {
    fn drop(&mut self) {
        self.close();
    }
}
