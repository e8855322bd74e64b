mod delete;
mod error;
mod lines;
mod queue_stack;
mod record;
mod report;
mod source;
mod walker;

pub use delete::{Answer, DeleteError, DeleteMode, DeletionWorkflow, Outcome, parse_answer, remove_entry};
pub use error::{EnumError, ScanError};
pub use lines::{count_lines, count_newlines};
pub use queue_stack::QueueStack;
pub use record::{Attributes, Entry};
pub use report::{Match, MatchSink, Totals};
pub use source::{DirSource, OsDirSource, OsEntries};
pub use walker::Walker;
