use std::fmt;

use thiserror::Error;

use crate::types::TextPosition;

/// One alternative that was tried at the failure position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Expectation {
    /// Grammar rules entered to reach the attempt, outermost first (e.g. `file > translation > msgstr`).
    pub rule_path: String,
    /// What the rule wanted to see there.
    pub expected: String,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}", self.rule_path, self.expected)
    }
}

/// The catalog text could not be derived from the grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to parse catalog at {position} (found {found}):\n{}", format_trace(.trace))]
pub struct ParseError {
    /// Deepest position any rule reached.
    pub position: TextPosition,
    /// Short excerpt of the input at `position`.
    pub found: String,
    /// Every alternative attempted at `position`, deduplicated.
    pub trace: Vec<Expectation>,
}

impl ParseError {
    /// Flat list of expected tokens, deduplicated and sorted.
    #[must_use]
    pub fn expected(&self) -> Vec<&str> {
        let mut expected: Vec<&str> = self.trace.iter().map(|e| e.expected.as_str()).collect();
        expected.sort_unstable();
        expected.dedup();
        expected
    }
}

/// 試行したルールを一行ずつ並べる
fn format_trace(trace: &[Expectation]) -> String {
    trace.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n")
}
