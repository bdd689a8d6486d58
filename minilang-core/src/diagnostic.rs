//! Structural diagnostics produced by the syntax validator.
//!
//! A diagnostic never aborts validation; the validator collects every
//! finding and hands the whole batch back to the caller.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// What the validator found wrong with a line (or with the file).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    #[error("invalid character '{0}'")]
    InvalidLeadingCharacter(char),
    #[error("invalid character '{0}' found")]
    RestrictedSymbol(char),
    #[error("invalid construct '{0}' before 'Int'")]
    ConstructBeforeInt(String),
    #[error("missing ';' at end of line")]
    MissingSemicolon,
    #[error("invalid construct '{0}' after 'End'")]
    ConstructAfterEnd(String),
    #[error("invalid use of assignment operator, use ':=' instead of '='")]
    BareEquals,
    #[error("invalid duplicated operator '{0}'")]
    DuplicatedOperator(String),
    #[error("missing 'Begin'")]
    MissingBegin,
    #[error("missing 'End'")]
    MissingEnd,
}

/// A single validator finding.
///
/// `line` is 1-based; `0` marks a file-scope finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    #[serde(rename = "message", serialize_with = "serialize_display")]
    pub issue: Issue,
}

impl Diagnostic {
    pub fn at_line(line: usize, issue: Issue) -> Self {
        Diagnostic { line, issue }
    }

    pub fn file_scope(issue: Issue) -> Self {
        Diagnostic { line: 0, issue }
    }

    pub fn is_file_scope(&self) -> bool {
        self.line == 0
    }

    pub fn message(&self) -> String {
        self.issue.to_string()
    }

    /// Human-readable form used by command-line front ends.
    pub fn render(&self) -> String {
        if self.is_file_scope() {
            self.message()
        } else {
            format!("line {}: {}", self.line, self.issue)
        }
    }
}

fn serialize_display<S: Serializer>(issue: &Issue, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(issue)
}
