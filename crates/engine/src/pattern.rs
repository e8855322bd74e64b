use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;

use crate::CriteriaError;

/// Separator between wildcards in a `--wildcards` list.
pub const PATTERN_SEPARATOR: char = ';';

/// A compiled list of name wildcards.
///
/// `?` matches one character and `*` any run of characters, including dots.
/// Everything else matches itself, ignoring case, and a pattern must cover
/// the whole name. A name matches the set when it matches any member.
/// An empty set matches every name.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    set: Option<GlobSet>,
    sources: Vec<String>,
}

impl PatternSet {
    /// The set that accepts every name.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Compile a semicolon-separated list. Empty members are ignored.
    pub fn parse(list: &str) -> Result<Self, CriteriaError> {
        let sources: Vec<String> = list
            .split(PATTERN_SEPARATOR)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect();

        if sources.is_empty() {
            return Ok(Self::match_all());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &sources {
            let glob = GlobBuilder::new(&escape_literals(pattern)?)
                .case_insensitive(true)
                .literal_separator(false)
                .backslash_escape(false)
                .build()
                .map_err(|e| invalid(pattern, e.kind().to_string()))?;
            builder.add(glob);
        }

        let set = builder.build().map_err(|e| invalid(list, e.to_string()))?;
        debug!("[pattern] compiled {} wildcard(s) from {list:?}", sources.len());

        Ok(PatternSet {
            set: Some(set),
            sources,
        })
    }

    #[inline]
    pub fn is_match_all(&self) -> bool {
        self.set.is_none()
    }

    /// The wildcards as written, in list order.
    pub fn patterns(&self) -> &[String] {
        &self.sources
    }

    #[inline]
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match &self.set {
            None => true,
            Some(set) => set.is_match(name),
        }
    }
}

fn invalid(pattern: &str, reason: impl Into<String>) -> CriteriaError {
    CriteriaError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: reason.into(),
    }
}

/// Rewrite a wildcard into glob syntax where only `*` and `?` are special.
///
/// Wildcards are matched against bare entry names, so a path separator can
/// never match and is rejected. Runs of `*` collapse to one so that glob
/// `**` semantics never apply.
fn escape_literals(pattern: &str) -> Result<String, CriteriaError> {
    let mut out = String::with_capacity(pattern.len() + 4);
    for c in pattern.chars() {
        match c {
            '*' if out.ends_with('*') => {}
            '/' | '\\' => {
                return Err(invalid(pattern, "wildcards match names, not paths"));
            }
            '[' | ']' | '{' | '}' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
