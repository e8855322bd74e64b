use std::{
    env,
    ffi::OsStr,
    path::{Path, PathBuf},
};

pub const PROGRAM_NAME: &str = "dirlist";
pub const PROGRAM_LOG_LEVEL: &str = "DIRLIST_LOG_LEVEL";

/// Environment variable holding the directories searched by `--path-search`.
pub const SEARCH_PATH_ENV: &str = "PATH";

/// Environment variable overriding the pager height.
pub const PAGE_ROWS_ENV: &str = "LINES";
pub const DEFAULT_PAGE_ROWS: usize = 24;

/// Initial byte capacity of the pending-subdirectory arena.
pub const QUEUE_INITIAL_CAPACITY: usize = 16 * 1024;

/// Directory names skipped by `--exclude-temp`. Matched with exact case.
pub const TEMPORARY_DIR_NAMES: &[&str] = &["TMP", "TEMP", "TEMPORARY"];

#[inline]
pub fn is_temporary_dir(name: &str) -> bool {
    TEMPORARY_DIR_NAMES.contains(&name)
}

/// Root scanned when no paths are given on the command line.
pub fn default_scan_root() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Each entry of the search path becomes its own root. Empty entries are dropped.
pub fn search_path_roots() -> Vec<PathBuf> {
    env::var_os(SEARCH_PATH_ENV)
        .map(|raw| split_search_path(&raw))
        .unwrap_or_default()
}

pub(crate) fn split_search_path(raw: &OsStr) -> Vec<PathBuf> {
    env::split_paths(raw)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// Fixed-disk roots for `--every-drive`.
pub fn fixed_drive_roots() -> Vec<PathBuf> {
    #[cfg(windows)]
    {
        // Contiguous drive letters from C: upward; the first gap ends the run.
        let mut roots = Vec::new();
        for letter in b'C'..=b'Z' {
            let root = PathBuf::from(format!("{}:\\", letter as char));
            if !root.exists() {
                break;
            }
            roots.push(root);
        }
        roots
    }
    #[cfg(not(windows))]
    {
        vec![PathBuf::from("/")]
    }
}

/// Page height for the pager, from `LINES` when it holds a usable number.
pub fn page_rows() -> usize {
    env::var(PAGE_ROWS_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|rows| *rows > 1)
        .unwrap_or(DEFAULT_PAGE_ROWS)
}

/// Make a command-line root absolute without resolving links.
///
/// A bare drive designator such as `D:` means the current directory of that
/// drive, so it gets a trailing `.` before being made absolute.
pub fn resolve_root(raw: &Path) -> PathBuf {
    let mut root = raw.to_path_buf();
    if raw.to_str().is_some_and(|s| s.len() == 2 && s.ends_with(':')) {
        root.push(".");
    }
    std::path::absolute(&root).unwrap_or(root)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
