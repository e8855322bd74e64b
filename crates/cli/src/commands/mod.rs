pub mod list;

use std::io;

use dirlist_engine::CriteriaError;
use dirlist_fs::ScanError;
pub use list::ListArgs;

use crate::pager::is_quit;

pub const EXIT_OUT_OF_MEMORY: u8 = 1;
pub const EXIT_INVALID_DATE: u8 = 2;
/// The user quit from the pager or the deletion prompt.
pub const EXIT_QUIT: u8 = 3;
pub const EXIT_INVALID_PATTERN: u8 = 4;
pub const EXIT_USAGE: u8 = 5;
pub const EXIT_OUTPUT: u8 = 6;

/// Process exit status for a failed run.
///
/// Anything not raised by the criteria or the scan itself comes from
/// writing the report.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<CriteriaError>() {
        return match e {
            CriteriaError::InvalidDate { .. } => EXIT_INVALID_DATE,
            CriteriaError::InvalidPattern { .. } => EXIT_INVALID_PATTERN,
        };
    }

    if let Some(e) = err.downcast_ref::<ScanError>() {
        return match e {
            ScanError::OutOfMemory(_) => EXIT_OUT_OF_MEMORY,
            ScanError::Interrupted => EXIT_QUIT,
            ScanError::Output(io) => output_code(io),
        };
    }

    match err.downcast_ref::<io::Error>() {
        Some(io) => output_code(io),
        None => EXIT_OUTPUT,
    }
}

fn output_code(err: &io::Error) -> u8 {
    if is_quit(err) { EXIT_QUIT } else { EXIT_OUTPUT }
}

/// Quitting is not an error worth a message.
pub fn is_user_quit(err: &anyhow::Error) -> bool {
    exit_code_for(err) == EXIT_QUIT
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
