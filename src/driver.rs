use std::path::Path;

use crate::error::WalkError;
use crate::event::WalkEvent;
use crate::visitor::{FileVisitor, Flow};
use crate::walker::TreeWalker;

/// Drive `walker` over `root` to completion, translating each event into
/// exactly one visitor callback and interpreting the returned [`Flow`].
///
/// Called by [`WalkBuilder::visit`](crate::WalkBuilder::visit) with a fresh
/// walker. Visitor errors propagate via `?`; the caller owns the walker, so
/// its frames are released on that path by drop.
pub(crate) fn drive<V>(
    walker: &mut TreeWalker,
    root: &Path,
    visitor: &mut V,
) -> Result<(), WalkError>
where
    V: FileVisitor + ?Sized,
{
    let mut event = Some(walker.walk(root));
    while let Some(ev) = event {
        let flow = match ev {
            WalkEvent::Entry { path, attrs } => match attrs {
                Ok(attrs) => visitor.visit_file(&path, &attrs)?,
                Err(error) => visitor.visit_file_failed(&path, error)?,
            },
            WalkEvent::EnterDirectory { path, attrs } => {
                let flow = visitor.pre_visit_directory(&path, &attrs)?;
                if flow != Flow::Continue {
                    // The frame was pushed before the callback ran; any
                    // non-continue verdict means its children are never
                    // visited and no post-visit fires for it. SkipSiblings
                    // falls through below and now applies to the parent.
                    walker.pop();
                }
                flow
            }
            WalkEvent::LeaveDirectory { path, error } => {
                match visitor.post_visit_directory(&path, error)? {
                    // The directory is already done; nothing left to skip.
                    Flow::SkipSiblings => Flow::Continue,
                    flow => flow,
                }
            }
        };

        match flow {
            Flow::Terminate => break,
            Flow::SkipSiblings => walker.skip_remaining_siblings(),
            Flow::Continue | Flow::SkipSubtree => {}
        }
        event = walker.next();
    }
    Ok(())
}
