use std::{
    fs::{self, Metadata, ReadDir},
    io,
    path::{Path, PathBuf},
};

use dirlist_engine::DateTime;
use log::warn;

use crate::{
    lines,
    record::{Attributes, Entry},
};

/// Where the walker gets directory listings from.
///
/// `open` fails when the directory itself cannot be read. The returned
/// iterator yields entries in the order the source produces them and may
/// yield an error partway through, after which the walker stops reading
/// that directory.
pub trait DirSource {
    type Entries: Iterator<Item = io::Result<Entry>>;

    fn open(&self, dir: &Path) -> io::Result<Self::Entries>;

    /// Newline count of a listed file, 0 when it cannot be read.
    fn count_lines(&self, path: &Path) -> u64 {
        lines::count_lines(path)
    }
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsDirSource;

impl DirSource for OsDirSource {
    type Entries = OsEntries;

    fn open(&self, dir: &Path) -> io::Result<OsEntries> {
        Ok(OsEntries {
            dir: dir.to_path_buf(),
            inner: fs::read_dir(dir)?,
        })
    }
}

pub struct OsEntries {
    dir: PathBuf,
    inner: ReadDir,
}

impl Iterator for OsEntries {
    type Item = io::Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dent = match self.inner.next()? {
                Ok(d) => d,
                Err(e) => return Some(Err(e)),
            };

            let name = match dent.file_name().into_string() {
                Ok(s) => s,
                Err(raw) => {
                    warn!("[enum] skipping non UTF-8 name {:?} in {:?}", raw, self.dir);
                    continue;
                }
            };

            // DirEntry::metadata does not traverse symlinks.
            let meta = match dent.metadata() {
                Ok(m) => m,
                Err(e) => {
                    warn!("[enum] metadata({:?}) failed: {e}", dent.path());
                    continue;
                }
            };

            return Some(Ok(entry_from_metadata(&self.dir, name, &meta)));
        }
    }
}

pub(crate) fn entry_from_metadata(parent: &Path, name: String, meta: &Metadata) -> Entry {
    let is_dir = meta.is_dir();
    let size = if is_dir { 0 } else { meta.len() };
    let modified = meta
        .modified()
        .map(DateTime::from_system_time)
        .unwrap_or(DateTime::MIN);

    let mut attributes = platform_attributes(&name, meta);
    if meta.permissions().readonly() {
        attributes |= Attributes::READONLY;
    }

    Entry {
        parent: parent.to_path_buf(),
        allocated: allocated_bytes(meta, size),
        name,
        is_dir,
        size,
        modified,
        attributes,
    }
}

#[cfg(unix)]
fn platform_attributes(name: &str, _meta: &Metadata) -> Attributes {
    if name.starts_with('.') {
        Attributes::HIDDEN
    } else {
        Attributes::empty()
    }
}

#[cfg(windows)]
fn platform_attributes(_name: &str, meta: &Metadata) -> Attributes {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;

    let raw = meta.file_attributes();
    let mut attrs = Attributes::empty();
    attrs.set(Attributes::HIDDEN, raw & FILE_ATTRIBUTE_HIDDEN != 0);
    attrs.set(Attributes::SYSTEM, raw & FILE_ATTRIBUTE_SYSTEM != 0);
    attrs
}

#[cfg(not(any(unix, windows)))]
fn platform_attributes(name: &str, _meta: &Metadata) -> Attributes {
    if name.starts_with('.') {
        Attributes::HIDDEN
    } else {
        Attributes::empty()
    }
}

#[cfg(unix)]
fn allocated_bytes(meta: &Metadata, _size: u64) -> u64 {
    use std::os::unix::fs::MetadataExt;
    meta.blocks().saturating_mul(512)
}

#[cfg(not(unix))]
fn allocated_bytes(_meta: &Metadata, size: u64) -> u64 {
    size
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
