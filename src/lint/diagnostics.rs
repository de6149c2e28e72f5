//! Findings produced by the checker.

use std::fmt;

use crate::types::{
    LineNumber,
    Severity,
};

/// What is wrong with a source/translation pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The entry has the wrong number of `msgstr` variants.
    PluralCountMismatch { found: usize, expected: usize },
    /// The source has text but the translation is blank.
    EmptyTranslation,
    /// A placeholder in the translation that the source does not have.
    AbsentFromReference(String),
    /// A placeholder in the source that the translation dropped.
    AbsentFromTranslation(String),
    Fuzzy,
}

impl DiagnosticKind {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::PluralCountMismatch { .. } | Self::EmptyTranslation | Self::AbsentFromReference(_) => {
                Severity::Error
            }
            Self::AbsentFromTranslation(_) | Self::Fuzzy => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PluralCountMismatch { found, expected } => {
                write!(f, "{found} plurals found but {expected} expected")
            }
            Self::EmptyTranslation => f.write_str("translated string empty"),
            Self::AbsentFromReference(token) => write!(f, "{token} absent from reference string"),
            Self::AbsentFromTranslation(token) => {
                write!(f, "{token} absent from translated string")
            }
            Self::Fuzzy => f.write_str("translation is fuzzy"),
        }
    }
}

/// Entry details shown in verbose output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticContext {
    /// `#:` references of the entry.
    pub references: Vec<String>,
    /// `msgctxt` of the entry.
    pub context: Option<String>,
    /// The translated text that was checked, absent for count mismatches.
    pub translated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Line of the entry's `msgid`, when the key carried an annotation.
    pub location: Option<LineNumber>,
    /// Source string the finding is about, annotation removed.
    pub source_key: String,
    pub kind: DiagnosticKind,
    /// Filled only when the checker runs verbose.
    pub context: Option<DiagnosticContext>,
}

impl Diagnostic {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
