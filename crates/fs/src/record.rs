use std::path::PathBuf;

use bitflags::bitflags;
use dirlist_engine::{Candidate, DateTime};

bitflags! {
    /// File attributes the listing cares about, independent of the OS encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        const READONLY = 0b0000_0001;
        /// Name starts with a dot on Unix, hidden attribute on Windows.
        const HIDDEN   = 0b0000_0010;
        const SYSTEM   = 0b0000_0100;
    }
}

/// One directory entry as reported by a [`DirSource`](crate::DirSource).
///
/// A snapshot: it is built while the directory is enumerated and dropped
/// once the entry has been filtered and reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Directory the entry was found in
    pub parent: PathBuf,
    /// Entry name
    pub name: String,
    pub is_dir: bool,
    /// Size in bytes, 0 for directories
    pub size: u64,
    /// Bytes allocated on disk
    pub allocated: u64,
    /// Last modification, local time
    pub modified: DateTime,
    pub attributes: Attributes,
}

impl Entry {
    pub fn path(&self) -> PathBuf {
        self.parent.join(&self.name)
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.attributes
            .intersects(Attributes::HIDDEN | Attributes::SYSTEM)
    }

    pub fn candidate(&self) -> Candidate<'_> {
        Candidate {
            name: &self.name,
            is_dir: self.is_dir,
            size: self.size,
            modified: self.modified,
            hidden: self.is_hidden(),
        }
    }
}
