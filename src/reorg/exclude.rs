//! Exclusion matching.
//! Patterns are compiled once and matched against a child's file name only.
//! The destination name is always part of the set as an escaped literal.

use glob::{MatchOptions, Pattern};
use std::ffi::OsStr;

use crate::errors::ReorgError;

/// Case sensitivity follows the host: Windows and macOS filesystems fold case.
const CASE_SENSITIVE: bool = !cfg!(any(windows, target_os = "macos"));

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: CASE_SENSITIVE,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled exclusion patterns plus the implicit destination-name rule.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    sources: Vec<String>,
    patterns: Vec<Pattern>,
}

impl ExclusionSet {
    /// Compile `patterns`, then add `child_name` as a literal so the destination
    /// subdirectory is never treated as a child to move.
    pub fn new<S: AsRef<str>>(patterns: &[S], child_name: &str) -> Result<Self, ReorgError> {
        let mut sources = Vec::with_capacity(patterns.len() + 1);
        let mut compiled = Vec::with_capacity(patterns.len() + 1);
        for raw in patterns {
            let raw = raw.as_ref().trim();
            let pattern = Pattern::new(raw).map_err(|e| ReorgError::InvalidPattern {
                pattern: raw.to_string(),
                reason: e.msg.to_string(),
            })?;
            sources.push(raw.to_string());
            compiled.push(pattern);
        }

        if !compiled.iter().any(|p| p.matches_with(child_name, MATCH_OPTIONS)) {
            let literal = Pattern::escape(child_name);
            let pattern = Pattern::new(&literal).map_err(|e| ReorgError::InvalidPattern {
                pattern: literal.clone(),
                reason: e.msg.to_string(),
            })?;
            sources.push(literal);
            compiled.push(pattern);
        }

        Ok(Self {
            sources,
            patterns: compiled,
        })
    }

    /// True if `name` matches any pattern in the set.
    pub fn is_excluded_name(&self, name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(name, MATCH_OPTIONS))
    }

    /// Non-UTF-8 names are matched on their lossy form.
    pub fn is_excluded(&self, name: &OsStr) -> bool {
        self.is_excluded_name(&name.to_string_lossy())
    }

    /// Effective pattern list, for the run-start log line.
    pub fn patterns(&self) -> &[String] {
        &self.sources
    }
}
