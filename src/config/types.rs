use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// バリデーションエラーを一行ずつ整形する
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.po-lint.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LintSettings {
    /// Print entry details under every diagnostic.
    pub verbose: bool,

    /// Colorize diagnostics.
    pub color: bool,

    pub msgcat: MsgcatConfig,

    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,

    pub jobs: JobsConfig,
}

/// External catalog tool used before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MsgcatConfig {
    /// When false, files are parsed as they are on disk.
    pub enabled: bool,
    pub program: String,
}

impl Default for MsgcatConfig {
    fn default() -> Self {
        Self { enabled: true, program: "msgcat".to_string() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobsConfig {
    /// Files checked at the same time.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

impl JobsConfig {
    /// Effective number of parallel checks.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.num_threads.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1))
    }
}

impl LintSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Zero thread count
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"**/*.po\"]",
            ));
        }

        for (index, pattern) in self.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.msgcat.enabled && self.msgcat.program.trim().is_empty() {
            errors.push(ValidationError::new(
                "msgcat.program",
                "The program cannot be empty. Please specify a program (e.g., \"msgcat\"), or set 'enabled' to false",
            ));
        }

        if self.jobs.num_threads == Some(0) {
            errors.push(ValidationError::new(
                "jobs.numThreads",
                "The thread count must be at least 1. Remove this field to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            verbose: false,
            color: true,
            msgcat: MsgcatConfig::default(),
            include_patterns: vec!["**/*.po".to_string()],
            exclude_patterns: vec![],
            jobs: JobsConfig::default(),
        }
    }
}
