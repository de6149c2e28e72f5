//! External catalog tool used for syntax pre-validation and line unwrapping.

use std::io::Write;
use std::path::Path;
use std::process::{
    Command,
    Stdio,
};

use super::types::InputError;

/// Prepares catalog text for the parser.
///
/// The parser expects well-formed catalogs whose strings each sit on one quoted line.
/// Implementations guarantee both.
pub trait Preprocessor: Send + Sync {
    /// Checks that the file is a syntactically valid catalog.
    ///
    /// # Errors
    /// Returns [`InputError::BrokenCatalog`] when the file is rejected.
    fn validate(&self, path: &Path) -> Result<(), InputError>;

    /// Rewrites catalog text so that no string is soft-wrapped.
    ///
    /// # Errors
    /// Returns [`InputError::Preprocess`] when the text cannot be rewritten.
    fn unwrap(&self, text: &str) -> Result<String, InputError>;
}

/// GNU gettext `msgcat`, or any program taking the same arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Msgcat {
    /// Executable name or path.
    program: String,
}

impl Msgcat {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// 外部プログラムの失敗を [`InputError::Preprocess`] に変換する
    fn failure(&self, message: impl ToString) -> InputError {
        InputError::Preprocess { program: self.program.clone(), message: message.to_string() }
    }
}

impl Default for Msgcat {
    fn default() -> Self {
        Self::new("msgcat")
    }
}

impl Preprocessor for Msgcat {
    fn validate(&self, path: &Path) -> Result<(), InputError> {
        tracing::debug!(program = %self.program, path = %path.display(), "Validating catalog");
        let output = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| self.failure(e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(InputError::BrokenCatalog {
                path: path.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            })
        }
    }

    fn unwrap(&self, text: &str) -> Result<String, InputError> {
        let mut child = Command::new(&self.program)
            .args(["--no-wrap", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(e))?;
        let mut stdin = child.stdin.take().ok_or_else(|| self.failure("stdin is not piped"))?;

        // stdin を別スレッドで書き込まないと大きなファイルでパイプが詰まる
        let (written, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(text.as_bytes()));
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        written.map_err(|_| self.failure("stdin writer panicked"))?.map_err(|e| self.failure(e))?;
        let output = output.map_err(|e| self.failure(e))?;

        if !output.status.success() {
            return Err(self.failure(String::from_utf8_lossy(&output.stderr).trim_end()));
        }
        String::from_utf8(output.stdout).map_err(|e| self.failure(e))
    }
}

/// Leaves the text as it is. For catalogs already in unwrapped form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Passthrough;

impl Preprocessor for Passthrough {
    fn validate(&self, _path: &Path) -> Result<(), InputError> {
        Ok(())
    }

    fn unwrap(&self, text: &str) -> Result<String, InputError> {
        Ok(text.to_string())
    }
}
