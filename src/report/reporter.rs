//! Renders diagnostics as terminal lines.

use std::io::{
    self,
    Write,
};
use std::path::Path;

use colored::Colorize;

use crate::lint::{
    CheckReport,
    Diagnostic,
};
use crate::types::Severity;

/// Width of the rule printed after each verbose diagnostic.
const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub color: bool,
    /// Print references, key and translation under each diagnostic.
    pub verbose: bool,
}

/// Writes diagnostics in `<file>:<line>: Error: <message>.` form.
#[derive(Debug)]
pub struct Reporter<W> {
    /// 出力先
    out: W,
    options: ReportOptions,
}

impl<W: Write> Reporter<W> {
    #[must_use]
    pub const fn new(out: W, options: ReportOptions) -> Self {
        Self { out, options }
    }

    /// Writes every diagnostic of one file in order.
    pub fn report(&mut self, file: &Path, report: &CheckReport) -> io::Result<()> {
        for diagnostic in &report.diagnostics {
            self.diagnostic(file, diagnostic)?;
        }
        Ok(())
    }

    pub fn diagnostic(&mut self, file: &Path, diagnostic: &Diagnostic) -> io::Result<()> {
        let prefix = match diagnostic.location {
            Some(line) => format!("{}:{line}:", file.display()),
            None => format!("{}:", file.display()),
        };
        let message = format!("{}: {}.", diagnostic.severity().label(), diagnostic.message());
        let message = self.severity_color(diagnostic.severity(), &message);
        writeln!(self.out, "{prefix} {message}")?;

        if !self.options.verbose {
            return Ok(());
        }
        let context = diagnostic.context.clone().unwrap_or_default();
        for reference in &context.references {
            self.labelled("CONTEXT:", reference)?;
        }
        if let Some(msgctxt) = &context.context {
            self.labelled("MSGCTXT:", msgctxt)?;
        }
        self.labelled("KEY:", &diagnostic.source_key)?;
        self.labelled("TRN:", context.translated.as_deref().unwrap_or_default())?;
        writeln!(self.out, "{}", "–".repeat(RULE_WIDTH))
    }

    /// Writes `<E> errors, <W> warnings.` unless both are zero.
    ///
    /// Goes to the same writer as the diagnostics.
    pub fn summary(&mut self, errors: usize, warnings: usize) -> io::Result<()> {
        if errors == 0 && warnings == 0 {
            return Ok(());
        }
        writeln!(self.out, "{errors} errors, {warnings} warnings.")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes one `LABEL: value` line of the verbose block.
    fn labelled(&mut self, label: &str, value: &str) -> io::Result<()> {
        let label = if self.options.color { label.blue().to_string() } else { label.to_string() };
        writeln!(self.out, "{label} {value}")
    }

    /// 重大度に応じて色を付ける (color 無効時はそのまま)
    fn severity_color(&self, severity: Severity, text: &str) -> String {
        if !self.options.color {
            return text.to_string();
        }
        match severity {
            Severity::Error => text.red().to_string(),
            Severity::Warning => text.yellow().to_string(),
        }
    }
}
