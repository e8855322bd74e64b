use thiserror::Error;

/// Failures while turning command-line arguments into filter criteria.
///
/// Both are fatal: they are detected before the first directory is opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("invalid date {input:?}: {reason}")]
    InvalidDate { input: String, reason: &'static str },

    #[error("invalid wildcard {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl CriteriaError {
    pub(crate) fn date(input: &str, reason: &'static str) -> Self {
        CriteriaError::InvalidDate {
            input: input.to_owned(),
            reason,
        }
    }
}
