use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use thiserror::Error;

use crate::{ScanError, record::Attributes, report::Match};

const PROMPT: &str = "Delete? [ynAq?] ";
const LEGEND: &str = "y = delete this entry, n = keep it, A = delete all remaining without asking, q = quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    AskEachTime,
    AlwaysYes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    All,
    Quit,
    Help,
}

/// Read one prompt reply. Only the first non-blank character counts.
/// `A` must be upper case; the other keys take either case.
pub fn parse_answer(line: &str) -> Option<Answer> {
    match line.trim().chars().next()? {
        'y' | 'Y' => Some(Answer::Yes),
        'n' | 'N' => Some(Answer::No),
        'A' => Some(Answer::All),
        'q' | 'Q' => Some(Answer::Quit),
        '?' => Some(Answer::Help),
        _ => None,
    }
}

#[derive(Debug, Error)]
#[error("cannot delete {}: {}", .path.display(), .source)]
pub struct DeleteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug)]
pub enum Outcome {
    Deleted,
    Skipped,
    Failed(DeleteError),
}

/// Confirms and removes matches one at a time.
///
/// Starts out asking before each removal. Answering `A` switches to
/// removing everything that follows without asking; `q`, or running out of
/// input, stops the scan with [`ScanError::Interrupted`].
pub struct DeletionWorkflow<R> {
    input: R,
    mode: DeleteMode,
    quiet: bool,
}

impl<R: BufRead> DeletionWorkflow<R> {
    pub fn new(input: R) -> Self {
        DeletionWorkflow {
            input,
            mode: DeleteMode::AskEachTime,
            quiet: false,
        }
    }

    /// Name the entry in the prompt, for listings that print paths only.
    pub fn quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }

    pub fn mode(&self) -> DeleteMode {
        self.mode
    }

    /// Ask about `m` on `out` (unless every match is already confirmed) and
    /// remove it if the answer says so.
    pub fn maybe_delete<W: Write + ?Sized>(
        &mut self,
        m: &Match<'_>,
        out: &mut W,
    ) -> Result<Outcome, ScanError> {
        if self.mode == DeleteMode::AskEachTime && !self.confirm(&m.path, out)? {
            return Ok(Outcome::Skipped);
        }

        match remove_entry(&m.path, m.entry.is_dir, m.entry.attributes) {
            Ok(()) => {
                debug!("[delete] removed {:?}", m.path);
                Ok(Outcome::Deleted)
            }
            Err(source) => {
                let err = DeleteError {
                    path: m.path.clone(),
                    source,
                };
                warn!("[delete] {err}");
                Ok(Outcome::Failed(err))
            }
        }
    }

    fn confirm<W: Write + ?Sized>(&mut self, path: &Path, out: &mut W) -> Result<bool, ScanError> {
        let mut line = String::new();
        loop {
            if self.quiet {
                write!(out, "Delete {}? ", path.display())?;
            } else {
                write!(out, "{PROMPT}")?;
            }
            out.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Err(ScanError::Interrupted);
            }

            match parse_answer(&line) {
                Some(Answer::Yes) => return Ok(true),
                Some(Answer::No) => return Ok(false),
                Some(Answer::All) => {
                    self.mode = DeleteMode::AlwaysYes;
                    return Ok(true);
                }
                Some(Answer::Quit) => return Err(ScanError::Interrupted),
                Some(Answer::Help) => writeln!(out, "{LEGEND}")?,
                None => {}
            }
        }
    }
}

/// Clear the read-only bit if set, then remove the file or (empty) directory.
/// Failing to clear the bit does not prevent the removal attempt.
pub fn remove_entry(path: &Path, is_dir: bool, attributes: Attributes) -> io::Result<()> {
    if attributes.contains(Attributes::READONLY) {
        make_writable(path);
    }

    if is_dir {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

fn make_writable(path: &Path) {
    let mut perms = match fs::symlink_metadata(path) {
        Ok(meta) => meta.permissions(),
        Err(e) => {
            warn!("[delete] metadata({:?}) failed: {e}", path);
            return;
        }
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(perms.mode() | 0o200);
    }
    #[cfg(not(unix))]
    perms.set_readonly(false);

    if let Err(e) = fs::set_permissions(path, perms) {
        warn!("[delete] clearing read-only on {:?} failed: {e}", path);
    }
}

#[cfg(test)]
#[path = "delete_tests.rs"]
mod tests;
