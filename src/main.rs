//! Entry point for the catalog checker.

use std::io::{
    self,
    Write,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::builder::FalseyValueParser;
use po_lint::config::{
    ConfigError,
    ConfigManager,
    LintSettings,
};
use po_lint::input::{
    Msgcat,
    Passthrough,
    Preprocessor,
};
use po_lint::lint::CheckOptions;
use po_lint::report::{
    ReportOptions,
    Reporter,
};
use po_lint::workspace::{
    RunSummary,
    WorkspaceError,
    check_files,
    discover_catalogs,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PO_LINT_LOG";

/// Checks gettext PO catalogs for placeholder, plural and fuzzy problems.
///
/// `VERBOSE` and `NOCOLOR` switch on for any value except an empty one, `0`, `false`,
/// `no` or `off`.
///
/// The exit status is the number of errors, warnings and unreadable files, capped at 255.
#[derive(Debug, Parser)]
#[command(name = "po-lint", version, about)]
struct Cli {
    /// Catalog files, or directories searched for them
    #[arg(value_name = "PATH", default_value = ".")]
    paths: Vec<PathBuf>,

    /// Print references, key and translation under each diagnostic
    #[arg(short, long, env = "VERBOSE", value_parser = FalseyValueParser::new())]
    verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NOCOLOR", value_parser = FalseyValueParser::new())]
    no_color: bool,

    /// Parse files as they are, without running msgcat first
    #[arg(long, conflicts_with = "msgcat")]
    no_msgcat: bool,

    /// Program used for validating and unwrapping catalogs
    #[arg(long, value_name = "PROGRAM")]
    msgcat: Option<String>,

    /// Number of files checked in parallel
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Settings file to use instead of ./.po-lint.json
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags take precedence over the settings file.
    fn apply(&self, mut settings: LintSettings) -> LintSettings {
        if self.verbose {
            settings.verbose = true;
        }
        if self.no_color {
            settings.color = false;
        }
        if self.no_msgcat {
            settings.msgcat.enabled = false;
        }
        if let Some(program) = &self.msgcat {
            settings.msgcat.enabled = true;
            settings.msgcat.program.clone_from(program);
        }
        if let Some(jobs) = self.jobs {
            settings.jobs.num_threads = Some(jobs);
        }
        settings
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(summary) => ExitCode::from(summary.exit_status()),
        Err(error) => {
            tracing::debug!(?error, "Run failed");
            // 出力先が閉じている場合は何もできない
            let _ = writeln!(io::stderr(), "po-lint: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<RunSummary, CliError> {
    let mut config_manager = ConfigManager::new();
    match &cli.config {
        Some(path) => config_manager.load_settings_from_file(path)?,
        None => config_manager.load_settings(std::env::current_dir().ok().as_deref())?,
    }
    let settings = cli.apply(config_manager.get_settings().clone());
    config_manager.update_settings(settings)?;
    let settings = config_manager.get_settings();

    let files = discover_catalogs(&cli.paths, settings)?;
    let preprocessor: Arc<dyn Preprocessor> = if settings.msgcat.enabled {
        Arc::new(Msgcat::new(settings.msgcat.program.clone()))
    } else {
        Arc::new(Passthrough)
    };
    let options = CheckOptions { verbose: settings.verbose };
    let outcomes = check_files(files, preprocessor, options, settings.jobs.thread_count()).await?;

    let mut reporter = Reporter::new(
        io::stdout().lock(),
        ReportOptions { color: settings.color, verbose: settings.verbose },
    );
    let mut stderr = io::stderr().lock();
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => reporter.report(&outcome.path, report)?,
            Err(error) => writeln!(stderr, "{}: {error}", outcome.path.display())?,
        }
    }

    let summary = RunSummary::from_outcomes(&outcomes);
    reporter.summary(summary.errors, summary.warnings)?;
    reporter.flush()?;
    tracing::debug!(?summary, "Run finished");
    Ok(summary)
}
