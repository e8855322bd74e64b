mod config;
pub mod logging;

pub use config::{
    DEFAULT_PAGE_ROWS, PAGE_ROWS_ENV, PROGRAM_LOG_LEVEL, PROGRAM_NAME, QUEUE_INITIAL_CAPACITY,
    SEARCH_PATH_ENV, TEMPORARY_DIR_NAMES, default_scan_root, fixed_drive_roots, is_temporary_dir,
    page_rows, resolve_root, search_path_roots,
};

pub use logging::init;
