use std::path::PathBuf;

use log::warn;

use crate::{EnumError, ScanError, record::Entry};

/// An accepted entry, handed to the sink with everything a report row needs.
#[derive(Debug)]
pub struct Match<'a> {
    pub entry: &'a Entry,
    /// Full path, parent joined with name
    pub path: PathBuf,
    /// Present when line counting is on and the entry is a file
    pub lines: Option<u64>,
}

/// Receives matches as the walker finds them.
pub trait MatchSink {
    /// Returning an error stops the whole scan.
    fn on_match(&mut self, m: &Match<'_>) -> Result<(), ScanError>;

    /// A directory could not be read; the walker has already given up on it.
    fn on_enum_error(&mut self, err: &EnumError) {
        warn!("[scan] {err}");
    }
}

/// Running aggregates over every file reported so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub files: u64,
    pub bytes: u64,
    pub allocated: u64,
    pub lines: u64,
}

impl Totals {
    /// Directory rows are not counted.
    pub fn record(&mut self, m: &Match<'_>) {
        if m.entry.is_dir {
            return;
        }
        self.files = self.files.saturating_add(1);
        self.bytes = self.bytes.saturating_add(m.entry.size);
        self.allocated = self.allocated.saturating_add(m.entry.allocated);
        self.lines = self.lines.saturating_add(m.lines.unwrap_or(0));
    }
}
