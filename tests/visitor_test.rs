use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use treewalk::{Attributes, FileVisitor, Flow, WalkBuilder, WalkError};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create the end-to-end scenario tree.
///
/// Structure:
/// ```text
/// tmp/
///   a.txt
///   sub/
///     b.txt
/// ```
fn setup_scenario_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.txt"), "aaa").unwrap();
    let sub = root.join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("b.txt"), "bbb").unwrap();

    dir
}

/// Path relative to the walk root, `"."` for the root itself.
fn rel(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(p) if p.as_os_str().is_empty() => ".".to_string(),
        Ok(p) => p.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

/// Records every callback as `"kind:relative-path"` and answers with a
/// per-kind verdict chosen at construction.
struct Recorder {
    root: PathBuf,
    calls: Vec<String>,
    on_pre: fn(&str) -> Flow,
    on_file: fn(&str) -> Flow,
}

impl Recorder {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            calls: Vec::new(),
            on_pre: |_| Flow::Continue,
            on_file: |_| Flow::Continue,
        }
    }

    fn index_of(&self, call: &str) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }
}

impl FileVisitor for Recorder {
    fn pre_visit_directory(&mut self, path: &Path, _attrs: &Attributes) -> Result<Flow, WalkError> {
        let name = rel(&self.root, path);
        self.calls.push(format!("pre:{name}"));
        Ok((self.on_pre)(&name))
    }

    fn visit_file(&mut self, path: &Path, _attrs: &Attributes) -> Result<Flow, WalkError> {
        let name = rel(&self.root, path);
        self.calls.push(format!("file:{name}"));
        Ok((self.on_file)(&name))
    }

    fn visit_file_failed(&mut self, path: &Path, _error: WalkError) -> Result<Flow, WalkError> {
        let name = rel(&self.root, path);
        self.calls.push(format!("failed:{name}"));
        Ok(Flow::Continue)
    }

    fn post_visit_directory(
        &mut self,
        path: &Path,
        error: Option<WalkError>,
    ) -> Result<Flow, WalkError> {
        assert!(error.is_none(), "unexpected enumeration error at {path:?}");
        let name = rel(&self.root, path);
        self.calls.push(format!("post:{name}"));
        Ok(Flow::Continue)
    }
}

// ---------------------------------------------------------------------------
// Visitor-driven walks
// ---------------------------------------------------------------------------

#[test]
fn end_to_end_callback_order() {
    let dir = setup_scenario_dir();
    let mut rec = Recorder::new(dir.path());

    let returned = treewalk::walk_file_tree(dir.path(), &mut rec).unwrap();
    assert_eq!(returned, dir.path());

    // Root brackets everything; sub's triple is internally ordered. a.txt
    // may fall on either side of the triple — sibling order is unspecified.
    assert_eq!(rec.calls.first().unwrap(), "pre:.");
    assert_eq!(rec.calls.last().unwrap(), "post:.");
    assert_eq!(rec.calls.len(), 6);

    let pre_sub = rec.index_of("pre:sub").unwrap();
    let b = rec.index_of(&format!("file:sub{}b.txt", std::path::MAIN_SEPARATOR)).unwrap();
    let post_sub = rec.index_of("post:sub").unwrap();
    assert!(pre_sub < b && b < post_sub, "sub triple out of order: {:?}", rec.calls);
    assert!(rec.index_of("file:a.txt").is_some());
}

#[test]
fn skip_subtree_suppresses_descendants_and_post_visit() {
    let dir = setup_scenario_dir();
    let mut rec = Recorder::new(dir.path());
    rec.on_pre = |name| {
        if name == "sub" {
            Flow::SkipSubtree
        } else {
            Flow::Continue
        }
    };

    treewalk::walk_file_tree(dir.path(), &mut rec).unwrap();

    assert!(rec.index_of("pre:sub").is_some());
    assert!(rec.calls.iter().all(|c| !c.contains("b.txt")), "{:?}", rec.calls);
    assert!(rec.index_of("post:sub").is_none(), "{:?}", rec.calls);
    assert!(rec.index_of("file:a.txt").is_some());
    assert_eq!(rec.calls.last().unwrap(), "post:.");
}

#[test]
fn skip_siblings_from_visit_file_still_fires_post_visit() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["f1.txt", "f2.txt", "f3.txt", "f4.txt", "f5.txt"] {
        fs::write(dir.path().join(name), "x").unwrap();
    }

    let mut rec = Recorder::new(dir.path());
    rec.on_file = |_| Flow::SkipSiblings;

    treewalk::walk_file_tree(dir.path(), &mut rec).unwrap();

    let files = rec.calls.iter().filter(|c| c.starts_with("file:")).count();
    assert_eq!(files, 1, "remaining siblings must be suppressed: {:?}", rec.calls);
    assert_eq!(rec.calls.last().unwrap(), "post:.");
}

#[test]
fn skip_siblings_from_pre_visit_skips_directory_and_parent_siblings() {
    let dir = setup_scenario_dir();
    let mut rec = Recorder::new(dir.path());
    rec.on_pre = |name| {
        if name == "sub" {
            Flow::SkipSiblings
        } else {
            Flow::Continue
        }
    };

    treewalk::walk_file_tree(dir.path(), &mut rec).unwrap();

    // sub is skipped wholesale: no children, no post-visit.
    assert!(rec.calls.iter().all(|c| !c.contains("b.txt")), "{:?}", rec.calls);
    assert!(rec.index_of("post:sub").is_none());

    // Nothing else is visited after the pre:sub verdict, except closing the root.
    let pre_sub = rec.index_of("pre:sub").unwrap();
    assert_eq!(rec.calls[pre_sub + 1..], ["post:.".to_string()], "{:?}", rec.calls);
}

#[test]
fn terminate_stops_the_walk_immediately() {
    let dir = setup_scenario_dir();
    let mut rec = Recorder::new(dir.path());
    rec.on_file = |_| Flow::Terminate;

    let returned = treewalk::walk_file_tree(dir.path(), &mut rec).unwrap();
    assert_eq!(returned, dir.path());

    // The walk ends at the first file: no post-visit for the root.
    assert!(rec.calls.last().unwrap().starts_with("file:"), "{:?}", rec.calls);
}

#[test]
fn visitor_error_propagates_out_of_the_walk() {
    struct Failing;
    impl FileVisitor for Failing {
        fn visit_file(&mut self, path: &Path, _attrs: &Attributes) -> Result<Flow, WalkError> {
            Err(WalkError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "visitor gave up"),
            })
        }
    }

    let dir = setup_scenario_dir();
    let err = treewalk::walk_file_tree(dir.path(), &mut Failing).unwrap_err();
    assert!(err.io_error().is_some());
}

#[test]
fn default_visitor_surfaces_the_first_failure() {
    struct Noop;
    impl FileVisitor for Noop {}

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    // The root visit fails; the default visit_file_failed rethrows it.
    let err = treewalk::walk_file_tree(&missing, &mut Noop).unwrap_err();
    assert_eq!(err.path(), missing);
}

// ---------------------------------------------------------------------------
// Lazy sequences
// ---------------------------------------------------------------------------

#[test]
fn walk_yields_same_paths_as_walkdir() {
    let dir = setup_scenario_dir();

    let ours: BTreeSet<PathBuf> = treewalk::walk(dir.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let reference: BTreeSet<PathBuf> = walkdir::WalkDir::new(dir.path())
        .into_iter()
        .map(|e| e.unwrap().path().to_path_buf())
        .collect();

    assert_eq!(ours, reference);
}

#[test]
fn walk_respects_max_depth() {
    let dir = setup_scenario_dir();

    let paths: BTreeSet<PathBuf> = WalkBuilder::new(dir.path())
        .max_depth(1)
        .paths()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    let expected: BTreeSet<PathBuf> = [
        dir.path().to_path_buf(),
        dir.path().join("a.txt"),
        dir.path().join("sub"),
    ]
    .into_iter()
    .collect();
    assert_eq!(paths, expected);
}

#[test]
fn find_filters_on_path_and_attributes() {
    let dir = setup_scenario_dir();

    let files: BTreeSet<PathBuf> = treewalk::find(dir.path(), |path, attrs| {
        attrs.is_file() && path.extension().map(|e| e == "txt").unwrap_or(false)
    })
    .unwrap()
    .collect::<Result<_, _>>()
    .unwrap();

    let expected: BTreeSet<PathBuf> = [
        dir.path().join("a.txt"),
        dir.path().join("sub").join("b.txt"),
    ]
    .into_iter()
    .collect();
    assert_eq!(files, expected);

    let dirs: BTreeSet<PathBuf> = treewalk::find(dir.path(), |_, attrs| attrs.is_directory())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(dirs.contains(dir.path()));
    assert!(dirs.contains(&dir.path().join("sub")));
}

#[test]
fn walk_on_missing_root_fails_at_construction() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = match treewalk::walk(&missing) {
        Err(err) => err,
        Ok(_) => panic!("constructing a walk over a missing root must fail"),
    };
    assert_eq!(err.path(), missing);
}

#[test]
#[should_panic(expected = "closed")]
fn advancing_a_closed_sequence_panics() {
    let dir = setup_scenario_dir();
    let mut paths = treewalk::walk(dir.path()).unwrap();
    paths.next();
    paths.close();
    paths.next();
}

#[test]
#[should_panic(expected = "closed")]
fn closing_before_the_first_item_discards_the_buffered_root() {
    let dir = setup_scenario_dir();
    let mut paths = treewalk::walk(dir.path()).unwrap();
    // Never pulled from: the root event is still buffered. Closing must
    // discard it — a closed sequence yields nothing, it fails fast.
    paths.close();
    paths.next();
}

#[test]
fn entries_carry_attributes_alongside_paths() {
    let dir = setup_scenario_dir();

    let entries: Vec<(PathBuf, Attributes)> = WalkBuilder::new(dir.path())
        .entries()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(entries.len(), 4);

    let (_, sub) = entries
        .iter()
        .find(|(p, _)| p.file_name().unwrap() == "sub")
        .unwrap();
    assert!(sub.is_directory());

    let (_, a) = entries
        .iter()
        .find(|(p, _)| p.file_name().unwrap() == "a.txt")
        .unwrap();
    assert!(a.is_file());
    assert_eq!(a.len(), 3);
}

#[test]
fn abandoning_a_sequence_midway_is_safe() {
    let dir = setup_scenario_dir();
    {
        let mut paths = treewalk::walk(dir.path()).unwrap();
        let _ = paths.next();
        // Dropped with frames still open; everything is released here.
    }
    // A second traversal over the same tree works fine.
    let count = treewalk::walk(dir.path()).unwrap().count();
    assert_eq!(count, 4);
}
