use super::*;

use std::{
    collections::HashMap,
    fs::{create_dir, write},
    io,
    time::{Duration, SystemTime},
};

use dirlist_engine::{DateTime, PatternSet};

use crate::{record::Attributes, source::OsDirSource};

// ---------------------------------------------------------------------------
// In-memory tree

#[derive(Clone)]
enum Node {
    File(&'static str, u64),
    Dir(&'static str),
    Hidden(&'static str),
    /// The listing breaks at this point.
    Fail,
}

#[derive(Default)]
struct MemSource {
    dirs: HashMap<PathBuf, Vec<Node>>,
}

impl MemSource {
    fn dir(mut self, path: &str, nodes: &[Node]) -> Self {
        self.dirs.insert(PathBuf::from(path), nodes.to_vec());
        self
    }
}

fn mem_entry(parent: &Path, name: &str, is_dir: bool, size: u64, attributes: Attributes) -> Entry {
    Entry {
        parent: parent.to_path_buf(),
        name: name.to_owned(),
        is_dir,
        size,
        allocated: size.div_ceil(512) * 512,
        modified: DateTime::new(2024, 6, 1, 12, 0, 0),
        attributes,
    }
}

impl DirSource for MemSource {
    type Entries = std::vec::IntoIter<io::Result<Entry>>;

    fn open(&self, dir: &Path) -> io::Result<Self::Entries> {
        let nodes = self
            .dirs
            .get(dir)
            .ok_or_else(|| io::Error::new(io::ErrorKind::PermissionDenied, "access denied"))?;

        let entries: Vec<io::Result<Entry>> = nodes
            .iter()
            .map(|n| match n {
                Node::File(name, size) => Ok(mem_entry(dir, name, false, *size, Attributes::empty())),
                Node::Dir(name) => Ok(mem_entry(dir, name, true, 0, Attributes::empty())),
                Node::Hidden(name) => Ok(mem_entry(dir, name, true, 0, Attributes::HIDDEN)),
                Node::Fail => Err(io::Error::other("device went away")),
            })
            .collect();
        Ok(entries.into_iter())
    }

    fn count_lines(&self, path: &Path) -> u64 {
        path.as_os_str().len() as u64
    }
}

#[derive(Default)]
struct Collect {
    paths: Vec<String>,
    lines: Vec<Option<u64>>,
    failed: Vec<String>,
    stop_after: Option<usize>,
}

impl MatchSink for Collect {
    fn on_match(&mut self, m: &Match<'_>) -> Result<(), ScanError> {
        if self.stop_after == Some(self.paths.len()) {
            return Err(ScanError::Interrupted);
        }
        self.paths.push(m.path.to_string_lossy().replace('\\', "/"));
        self.lines.push(m.lines);
        Ok(())
    }

    fn on_enum_error(&mut self, err: &EnumError) {
        self.failed.push(err.path.to_string_lossy().replace('\\', "/"));
    }
}

fn sample_tree() -> MemSource {
    use Node::*;
    MemSource::default()
        .dir("r", &[File("f1", 1), Dir("d1"), File("f2", 2), Dir("d2")])
        .dir("r/d1", &[File("g1", 3), Dir("d1a")])
        .dir("r/d1/d1a", &[File("h", 4)])
        .dir("r/d2", &[File("k", 5)])
}

fn run(source: MemSource, criteria: &FilterCriteria) -> (Collect, Totals) {
    let mut walker = Walker::new(source).expect("arena");
    let mut sink = Collect::default();
    walker
        .scan(Path::new("r"), criteria, &mut sink)
        .expect("scan completes");
    assert_eq!(walker.queues.depth(), 0, "every queue popped");
    (sink, walker.totals())
}

fn recursive() -> FilterCriteria {
    FilterCriteria::builder().recurse(true).build()
}

// ---------------------------------------------------------------------------

#[test]
fn files_come_before_descendants_and_subdirectories_in_discovery_order() {
    let (sink, totals) = run(sample_tree(), &recursive());

    assert_eq!(sink.paths, vec!["r/f1", "r/f2", "r/d1/g1", "r/d1/d1a/h", "r/d2/k"]);
    assert_eq!(totals.files, 5);
    assert_eq!(totals.bytes, 15);
}

#[test]
fn listed_directories_appear_in_enumeration_order() {
    let criteria = FilterCriteria::builder().recurse(true).include_dirs(true).build();
    let (sink, totals) = run(sample_tree(), &criteria);

    assert_eq!(
        sink.paths,
        vec!["r/f1", "r/d1", "r/f2", "r/d2", "r/d1/g1", "r/d1/d1a", "r/d1/d1a/h", "r/d2/k"]
    );
    assert_eq!(totals.files, 5, "directories are not counted");
}

#[test]
fn without_recursion_only_the_root_is_listed() {
    let (sink, _) = run(sample_tree(), &FilterCriteria::default());
    assert_eq!(sink.paths, vec!["r/f1", "r/f2"]);
}

#[test]
fn dot_entries_are_skipped() {
    use Node::*;
    let source = MemSource::default().dir("r", &[Dir("."), Dir(".."), File("a", 1)]);

    let criteria = FilterCriteria::builder().recurse(true).include_dirs(true).build();
    let (sink, _) = run(source, &criteria);
    assert_eq!(sink.paths, vec!["r/a"]);
}

#[test]
fn unreadable_subdirectory_does_not_stop_its_siblings() {
    use Node::*;
    let source = MemSource::default()
        .dir("r", &[Dir("locked"), Dir("open"), File("top", 1)])
        .dir("r/open", &[File("inside", 1)]);

    let (sink, _) = run(source, &recursive());
    assert_eq!(sink.paths, vec!["r/top", "r/open/inside"]);
    assert_eq!(sink.failed, vec!["r/locked"]);
}

#[test]
fn listing_error_keeps_what_was_read_before_it() {
    use Node::*;
    let source = MemSource::default()
        .dir("r", &[File("before", 1), Dir("sub"), Fail, File("after", 1)])
        .dir("r/sub", &[File("deep", 1)]);

    let (sink, _) = run(source, &recursive());
    assert_eq!(sink.paths, vec!["r/before", "r/sub/deep"]);
    assert_eq!(sink.failed, vec!["r"]);
}

#[test]
fn unreadable_root_is_reported() {
    let (sink, totals) = run(MemSource::default(), &recursive());
    assert!(sink.paths.is_empty());
    assert_eq!(sink.failed, vec!["r"]);
    assert_eq!(totals, Totals::default());
}

#[test]
fn temporary_directories_are_skipped_on_request() {
    use Node::*;
    let source = MemSource::default()
        .dir("r", &[Dir("TMP"), Dir("TEMP"), Dir("TEMPORARY"), Dir("tmp")])
        .dir("r/TMP", &[File("a", 1)])
        .dir("r/TEMP", &[File("b", 1)])
        .dir("r/TEMPORARY", &[File("c", 1)])
        .dir("r/tmp", &[File("d", 1)]);

    let criteria = FilterCriteria::builder().recurse(true).exclude_temp(true).build();
    let (sink, _) = run(source, &criteria);
    assert_eq!(sink.paths, vec!["r/tmp/d"]);
}

#[test]
fn hidden_directories_are_descended_even_when_not_listed() {
    use Node::*;
    let source = MemSource::default()
        .dir("r", &[Hidden(".git")])
        .dir("r/.git", &[File("config", 1)]);

    let criteria = FilterCriteria::builder().recurse(true).include_dirs(true).build();
    let (sink, _) = run(source, &criteria);
    assert_eq!(sink.paths, vec!["r/.git/config"]);
}

#[test]
fn line_counts_are_attached_to_files_only() {
    use Node::*;
    let source = MemSource::default().dir("r", &[File("abc", 1), Dir("d")]);

    let mut walker = Walker::new(source).expect("arena").count_lines(true);
    let mut sink = Collect::default();
    let criteria = FilterCriteria::builder().include_dirs(true).build();
    walker
        .scan(Path::new("r"), &criteria, &mut sink)
        .expect("scan completes");

    let expected = Path::new("r").join("abc").as_os_str().len() as u64;
    assert_eq!(sink.lines, vec![Some(expected), None]);
    assert_eq!(walker.totals().lines, expected);
}

#[test]
fn sink_error_stops_the_scan_and_unwinds_the_queues() {
    let mut walker = Walker::new(sample_tree()).expect("arena");
    let mut sink = Collect {
        stop_after: Some(3),
        ..Collect::default()
    };

    let err = walker
        .scan(Path::new("r"), &recursive(), &mut sink)
        .expect_err("sink stops the scan");
    assert!(matches!(err, ScanError::Interrupted));
    assert_eq!(sink.paths, vec!["r/f1", "r/f2", "r/d1/g1"]);
    assert_eq!(walker.queues.depth(), 0);
}

#[test]
fn totals_accumulate_across_roots() {
    use Node::*;
    let source = MemSource::default()
        .dir("a", &[File("x", 10)])
        .dir("b", &[File("y", 20)]);

    let mut walker = Walker::new(source).expect("arena");
    let mut sink = Collect::default();
    let criteria = FilterCriteria::default();
    for root in ["a", "b"] {
        walker
            .scan(Path::new(root), &criteria, &mut sink)
            .expect("scan completes");
    }

    assert_eq!(walker.totals().files, 2);
    assert_eq!(walker.totals().bytes, 30);
}

// ---------------------------------------------------------------------------
// Real filesystem

fn touch(path: &Path, len: usize, secs: u64) {
    write(path, vec![b'x'; len]).expect("write file");
    std::fs::File::options()
        .write(true)
        .open(path)
        .expect("open")
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .expect("set mtime");
}

#[test]
fn scans_a_real_tree() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    touch(&root.join("a.txt"), 100, 1_704_110_400); // 2024-01-01 12:00 UTC
    create_dir(root.join("sub")).expect("mkdir");
    touch(&root.join("sub").join("b.log"), 50, 1_717_243_200); // 2024-06-01 12:00 UTC

    let txt_only = FilterCriteria::builder()
        .recurse(true)
        .patterns(PatternSet::parse("*.txt").expect("valid"))
        .build();
    let mut walker = Walker::new(OsDirSource).expect("arena");
    let mut sink = Collect::default();
    walker.scan(root, &txt_only, &mut sink).expect("scan");
    assert_eq!(sink.paths.len(), 1);
    assert!(sink.paths[0].ends_with("/a.txt"));

    let everything = FilterCriteria::builder()
        .recurse(true)
        .patterns(PatternSet::parse("*").expect("valid"))
        .build();
    let mut walker = Walker::new(OsDirSource).expect("arena");
    let mut sink = Collect::default();
    walker.scan(root, &everything, &mut sink).expect("scan");

    assert_eq!(sink.paths.len(), 2);
    assert!(sink.paths[0].ends_with("/a.txt"));
    assert!(sink.paths[1].ends_with("/sub/b.log"));
    assert_eq!(walker.totals().files, 2);
    assert_eq!(walker.totals().bytes, 150);
}
