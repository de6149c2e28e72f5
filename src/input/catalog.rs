//! Loads one catalog file into text the parser accepts.

use std::path::Path;

use super::annotate::annotate_line_numbers;
use super::preprocess::Preprocessor;
use super::types::InputError;

/// Validates, reads, annotates and unwraps the catalog at `path`.
///
/// Annotation runs before unwrapping so that the recorded line numbers are those of
/// the file on disk.
///
/// # Errors
/// Returns an [`InputError`] when the file is unreadable or rejected by `preprocessor`.
pub fn load_catalog(path: &Path, preprocessor: &dyn Preprocessor) -> Result<String, InputError> {
    preprocessor.validate(path)?;

    let raw = std::fs::read_to_string(path)
        .map_err(|source| InputError::Io { path: path.to_path_buf(), source })?;
    let annotated = annotate_line_numbers(&raw);
    let text = preprocessor.unwrap(&annotated)?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded catalog");
    Ok(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::input::Passthrough;

    #[googletest::test]
    fn test_load_annotates_through_passthrough() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fr.po");
        std::fs::write(&path, "msgid \"\"\nmsgstr \"\"\n\"Language: fr\\n\"\n\nmsgid \"Hi\"\nmsgstr \"Salut\"\n")
            .unwrap();

        let text = load_catalog(&path, &Passthrough).unwrap();

        expect_that!(text, contains_substring("msgid \"5:Hi\""));
        expect_that!(text, starts_with("msgid \"\"\n"));
    }

    #[googletest::test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = load_catalog(&dir.path().join("absent.po"), &Passthrough);

        expect_that!(matches!(result, Err(InputError::Io { .. })), eq(true));
    }
}
