//! Consistency checks between source strings and their translations.

mod checker;
mod diagnostics;
mod placeholder;
mod plural;
mod types;

pub use checker::{
    CheckOptions,
    CheckReport,
    check_catalog,
    check_file,
    check_text,
    plural_count,
};
pub use diagnostics::{
    Diagnostic,
    DiagnosticContext,
    DiagnosticKind,
};
pub use placeholder::placeholders;
pub use plural::{
    PluralSources,
    plural_only_placeholder,
};
pub use types::LintError;
