use dirlist_runtime::is_temporary_dir;

use crate::{DateTime, PatternSet};

/// The per-entry facts the filter looks at.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub is_dir: bool,
    pub size: u64,
    pub modified: DateTime,
    /// Hidden or system entry.
    pub hidden: bool,
}

/// Everything that decides which entries are listed and how far the scan reaches.
///
/// Built once from the command line through [`CriteriaBuilder`] and never
/// changed while a scan runs. All range bounds are inclusive.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    date_lower: DateTime,
    date_upper: DateTime,
    size_lower: u64,
    size_upper: u64,
    patterns: PatternSet,
    include_hidden: bool,
    include_dirs: bool,
    dirs_only: bool,
    exclude_temp: bool,
    recurse: bool,
    search_path: bool,
    every_drive: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            date_lower: DateTime::MIN,
            date_upper: DateTime::MAX,
            size_lower: 0,
            size_upper: u64::MAX,
            patterns: PatternSet::match_all(),
            include_hidden: false,
            include_dirs: false,
            dirs_only: false,
            exclude_temp: false,
            recurse: false,
            search_path: false,
            every_drive: false,
        }
    }
}

impl FilterCriteria {
    pub fn builder() -> CriteriaBuilder {
        CriteriaBuilder::default()
    }

    /// Whether an entry is listed.
    ///
    /// Files are checked against visibility, both date bounds, both size
    /// bounds and the wildcards, and are never listed in directories-only
    /// mode. Directories are listed only when asked for, and then checked
    /// against visibility, dates and wildcards; they carry no size.
    #[must_use]
    pub fn accepts(&self, c: &Candidate<'_>) -> bool {
        if !self.is_visible(c.hidden) {
            return false;
        }

        if c.is_dir {
            self.lists_directories() && self.in_date_range(c.modified) && self.patterns.matches(c.name)
        } else {
            !self.dirs_only
                && self.in_date_range(c.modified)
                && self.in_size_range(c.size)
                && self.patterns.matches(c.name)
        }
    }

    #[inline]
    pub fn in_date_range(&self, modified: DateTime) -> bool {
        self.date_lower <= modified && modified <= self.date_upper
    }

    #[inline]
    pub fn in_size_range(&self, size: u64) -> bool {
        self.size_lower <= size && size <= self.size_upper
    }

    #[inline]
    pub fn is_visible(&self, hidden: bool) -> bool {
        self.include_hidden || !hidden
    }

    #[inline]
    pub fn lists_directories(&self) -> bool {
        self.include_dirs || self.dirs_only
    }

    /// Whether a discovered subdirectory is left out of the descent.
    #[inline]
    pub fn skips_subdirectory(&self, name: &str) -> bool {
        self.exclude_temp && is_temporary_dir(name)
    }

    pub fn date_bounds(&self) -> (DateTime, DateTime) {
        (self.date_lower, self.date_upper)
    }

    pub fn size_bounds(&self) -> (u64, u64) {
        (self.size_lower, self.size_upper)
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    pub fn include_dirs(&self) -> bool {
        self.include_dirs
    }

    pub fn dirs_only(&self) -> bool {
        self.dirs_only
    }

    pub fn exclude_temp(&self) -> bool {
        self.exclude_temp
    }

    pub fn recurse(&self) -> bool {
        self.recurse
    }

    pub fn search_path(&self) -> bool {
        self.search_path
    }

    pub fn every_drive(&self) -> bool {
        self.every_drive
    }
}

#[derive(Debug, Default)]
pub struct CriteriaBuilder {
    inner: FilterCriteria,
}

impl CriteriaBuilder {
    pub fn modified_after(mut self, lower: DateTime) -> Self {
        self.inner.date_lower = lower;
        self
    }

    pub fn modified_before(mut self, upper: DateTime) -> Self {
        self.inner.date_upper = upper;
        self
    }

    pub fn min_size(mut self, lower: u64) -> Self {
        self.inner.size_lower = lower;
        self
    }

    pub fn max_size(mut self, upper: u64) -> Self {
        self.inner.size_upper = upper;
        self
    }

    pub fn patterns(mut self, patterns: PatternSet) -> Self {
        self.inner.patterns = patterns;
        self
    }

    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.inner.include_hidden = yes;
        self
    }

    pub fn include_dirs(mut self, yes: bool) -> Self {
        self.inner.include_dirs = yes;
        self
    }

    pub fn dirs_only(mut self, yes: bool) -> Self {
        self.inner.dirs_only = yes;
        self
    }

    pub fn exclude_temp(mut self, yes: bool) -> Self {
        self.inner.exclude_temp = yes;
        self
    }

    pub fn recurse(mut self, yes: bool) -> Self {
        self.inner.recurse = yes;
        self
    }

    pub fn search_path(mut self, yes: bool) -> Self {
        self.inner.search_path = yes;
        self
    }

    pub fn every_drive(mut self, yes: bool) -> Self {
        self.inner.every_drive = yes;
        self
    }

    /// Freeze the criteria. Searching along the path always turns off
    /// recursion and every-drive mode, whatever order the flags came in.
    pub fn build(mut self) -> FilterCriteria {
        if self.inner.search_path {
            self.inner.recurse = false;
            self.inner.every_drive = false;
        }
        self.inner
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
