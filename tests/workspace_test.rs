//! ディレクトリ単位の並列チェックに関するテスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use googletest::prelude::*;
use po_lint::config::LintSettings;
use po_lint::input::Passthrough;
use po_lint::lint::{
    CheckOptions,
    LintError,
};
use po_lint::workspace::{
    RunSummary,
    check_files,
    discover_catalogs,
};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}

#[googletest::test]
fn test_discovers_fixtures_in_sorted_order() {
    let files = discover_catalogs(&[data_dir()], &LintSettings::default()).unwrap();

    expect_that!(
        file_names(&files),
        elements_are![
            eq("ar-valid.po"),
            eq("fr-mistakes.po"),
            eq("fr-valid.po"),
            eq("ja-valid.po"),
            eq("missing-plural-forms.po"),
        ]
    );
}

#[googletest::test]
fn test_exclude_patterns_filter_fixtures() {
    let settings = LintSettings {
        exclude_patterns: vec!["*-valid.po".to_string(), "missing-*".to_string()],
        ..LintSettings::default()
    };

    let files = discover_catalogs(&[data_dir()], &settings).unwrap();

    expect_that!(file_names(&files), elements_are![eq("fr-mistakes.po")]);
}

#[googletest::test]
#[tokio::test]
async fn test_directory_run_summary() {
    let files = discover_catalogs(&[data_dir()], &LintSettings::default()).unwrap();

    let outcomes =
        check_files(files, Arc::new(Passthrough), CheckOptions::default(), 3).await.unwrap();
    let summary = RunSummary::from_outcomes(&outcomes);

    assert_that!(outcomes, len(eq(5)));
    expect_that!(
        matches!(outcomes[4].result, Err(LintError::MissingPluralForms)),
        eq(true)
    );
    expect_that!(
        summary,
        eq(RunSummary { files: 5, errors: 4, warnings: 1, failures: 1 })
    );
    expect_that!(summary.exit_status(), eq(6));
}

#[googletest::test]
fn test_single_thread_matches_parallel_run() {
    let files = discover_catalogs(&[data_dir()], &LintSettings::default()).unwrap();

    let serial = tokio_test::block_on(check_files(
        files.clone(),
        Arc::new(Passthrough),
        CheckOptions::default(),
        1,
    ))
    .unwrap();
    let parallel =
        tokio_test::block_on(check_files(files, Arc::new(Passthrough), CheckOptions::default(), 8))
            .unwrap();

    let totals = |outcomes: &[po_lint::workspace::FileOutcome]| -> Vec<Option<usize>> {
        outcomes.iter().map(|outcome| outcome.result.as_ref().ok().map(|report| report.total())).collect()
    };
    expect_that!(totals(&serial), eq(&totals(&parallel)));
}
