mod error;
mod filter;
mod pattern;
mod time;

pub use error::CriteriaError;
pub use filter::{Candidate, CriteriaBuilder, FilterCriteria};
pub use pattern::{PATTERN_SEPARATOR, PatternSet};
pub use time::{DateTime, parse_date_time, parse_date_time_today};
