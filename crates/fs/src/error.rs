use std::{collections::TryReserveError, io, path::PathBuf};

use thiserror::Error;

/// Errors that end a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("not enough memory to queue subdirectories")]
    OutOfMemory(#[from] TryReserveError),

    /// The user chose to quit from a prompt.
    #[error("stopped at user request")]
    Interrupted,

    #[error("cannot write report: {0}")]
    Output(#[from] io::Error),
}

/// A directory that could not be read. Only that subtree is lost.
#[derive(Debug, Error)]
#[error("cannot read directory {}: {}", .path.display(), .source)]
pub struct EnumError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}
