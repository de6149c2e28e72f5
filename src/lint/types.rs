use thiserror::Error;

use crate::input::InputError;
use crate::syntax::ParseError;

/// Conditions that abort the check of one catalog.
#[derive(Error, Debug)]
pub enum LintError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No Plural-Forms header found")]
    MissingPluralForms,

    /// `Plural-Forms` exists but declares no usable plural count.
    #[error("Malformed Plural-Forms header: {0}")]
    MalformedPluralForms(String),

    #[error(transparent)]
    Input(#[from] InputError),
}
