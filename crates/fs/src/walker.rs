use std::path::{Path, PathBuf};

use dirlist_engine::FilterCriteria;
use dirlist_runtime::QUEUE_INITIAL_CAPACITY;
use log::debug;

use crate::{
    EnumError, ScanError,
    queue_stack::QueueStack,
    record::Entry,
    report::{Match, MatchSink, Totals},
    source::DirSource,
};

/// Depth-first directory walker.
///
/// Every directory visited gets its own queue on the [`QueueStack`]: while
/// the directory is enumerated, the names of its subdirectories are queued
/// there, and once enumeration is done they are descended into in the order
/// they were found. Files of a directory are therefore always reported
/// before anything below it, and the queue is dropped as soon as the last
/// subdirectory has been walked.
///
/// The walk is iterative, so the tree depth is limited only by the memory
/// the queued names take.
pub struct Walker<S: DirSource> {
    source: S,
    queues: QueueStack,
    count_lines: bool,
    totals: Totals,
}

impl<S: DirSource> Walker<S> {
    pub fn new(source: S) -> Result<Self, ScanError> {
        Ok(Walker {
            source,
            queues: QueueStack::with_capacity(QUEUE_INITIAL_CAPACITY)?,
            count_lines: false,
            totals: Totals::default(),
        })
    }

    /// Attach a newline count to every reported file.
    pub fn count_lines(mut self, yes: bool) -> Self {
        self.count_lines = yes;
        self
    }

    /// Aggregates across every scan run so far.
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Walk one root and report every accepted entry to `sink`.
    ///
    /// Directories that cannot be read are passed to
    /// [`MatchSink::on_enum_error`] and skipped. Only arena exhaustion and
    /// errors raised by the sink end the scan early.
    pub fn scan(
        &mut self,
        root: &Path,
        criteria: &FilterCriteria,
        sink: &mut dyn MatchSink,
    ) -> Result<(), ScanError> {
        debug!("[scan] root {:?} recurse={}", root, criteria.recurse());

        let base = self.queues.depth();
        let result = self.walk(root, criteria, sink);
        if result.is_err() {
            while self.queues.depth() > base {
                self.queues.pop();
            }
        }
        result
    }

    fn walk(
        &mut self,
        root: &Path,
        criteria: &FilterCriteria,
        sink: &mut dyn MatchSink,
    ) -> Result<(), ScanError> {
        // One path per queue on the stack.
        let mut open_dirs: Vec<PathBuf> = Vec::new();

        self.enter(root, criteria, sink)?;
        open_dirs.push(root.to_path_buf());

        while let Some(dir) = open_dirs.last() {
            let next = if criteria.recurse() {
                self.next_subdirectory(criteria)
            } else {
                None
            };

            if let Some(name) = next {
                let child = dir.join(name);
                self.enter(&child, criteria, sink)?;
                open_dirs.push(child);
                continue;
            }

            self.queues.pop();
            open_dirs.pop();
        }

        Ok(())
    }

    /// Open a queue for `dir` and enumerate it.
    fn enter(
        &mut self,
        dir: &Path,
        criteria: &FilterCriteria,
        sink: &mut dyn MatchSink,
    ) -> Result<(), ScanError> {
        self.queues.push()?;

        let entries = match self.source.open(dir) {
            Ok(entries) => entries,
            Err(source) => {
                sink.on_enum_error(&EnumError {
                    path: dir.to_path_buf(),
                    source,
                });
                return Ok(());
            }
        };

        for res in entries {
            let entry = match res {
                Ok(e) => e,
                Err(source) => {
                    sink.on_enum_error(&EnumError {
                        path: dir.to_path_buf(),
                        source,
                    });
                    break;
                }
            };

            if entry.name == "." || entry.name == ".." {
                continue;
            }

            if entry.is_dir {
                self.queues.enqueue(&entry.name)?;
            }

            if criteria.accepts(&entry.candidate()) {
                self.report(&entry, sink)?;
            }
        }

        Ok(())
    }

    fn report(&mut self, entry: &Entry, sink: &mut dyn MatchSink) -> Result<(), ScanError> {
        let path = entry.path();
        let lines = (self.count_lines && !entry.is_dir).then(|| self.source.count_lines(&path));

        let m = Match { entry, path, lines };
        self.totals.record(&m);
        sink.on_match(&m)
    }

    fn next_subdirectory(&mut self, criteria: &FilterCriteria) -> Option<String> {
        while let Some(name) = self.queues.dequeue() {
            if criteria.skips_subdirectory(&name) {
                debug!("[scan] skipping temporary directory {name}");
                continue;
            }
            return Some(name);
        }
        None
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
