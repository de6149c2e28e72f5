//! Cross-checks translations against their source strings.

use std::path::Path;

use super::diagnostics::{
    Diagnostic,
    DiagnosticContext,
    DiagnosticKind,
};
use super::placeholder::placeholders;
use super::plural::PluralSources;
use super::types::LintError;
use crate::input::{
    Preprocessor,
    decode_line_key,
    load_catalog,
};
use crate::ir::{
    Catalog,
    HeaderValue,
    PLURAL_FORMS_HEADER,
    TranslationRecord,
    normalize,
};
use crate::syntax::parse_catalog;
use crate::types::LineNumber;

/// Options of one check run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Attach entry details to every diagnostic.
    pub verbose: bool,
}

/// Diagnostics of one catalog and the running totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Count mismatches plus pairs with an emptiness or placeholder problem.
    pub errors: usize,
    /// Fuzzy pairs.
    pub warnings: usize,
}

impl CheckReport {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.errors.saturating_add(self.warnings)
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Plural count declared by the catalog.
///
/// # Errors
/// Fails when `Plural-Forms` is absent or does not declare a positive `nplurals`.
pub fn plural_count(catalog: &Catalog) -> Result<usize, LintError> {
    match catalog.headers.get(PLURAL_FORMS_HEADER) {
        None => Err(LintError::MissingPluralForms),
        Some(HeaderValue::PluralForms(forms)) if forms.nplurals > 0 => Ok(forms.nplurals),
        Some(HeaderValue::PluralForms(forms)) => Err(LintError::MalformedPluralForms(format!(
            "nplurals={}; plural={}",
            forms.nplurals, forms.plural_expression
        ))),
        Some(HeaderValue::Raw(raw)) => Err(LintError::MalformedPluralForms(raw.clone())),
    }
}

/// Checks every translation of a normalized catalog.
///
/// # Errors
/// Fails only when the catalog's plural count cannot be determined.
pub fn check_catalog(catalog: &Catalog, options: CheckOptions) -> Result<CheckReport, LintError> {
    let nplurals = plural_count(catalog)?;
    let mut checker = Checker { options, nplurals, report: CheckReport::default() };
    for record in &catalog.translations {
        checker.check_record(record);
    }

    tracing::debug!(
        translations = catalog.translations.len(),
        obsolete = catalog.obsolete.len(),
        errors = checker.report.errors,
        warnings = checker.report.warnings,
        "Checked catalog"
    );
    Ok(checker.report)
}

/// Parses, normalizes and checks prepared catalog text.
///
/// Empty text is a clean catalog.
///
/// # Errors
/// Fails when the text does not parse or the plural count cannot be determined.
pub fn check_text(text: &str, options: CheckOptions) -> Result<CheckReport, LintError> {
    if text.is_empty() {
        return Ok(CheckReport::default());
    }
    let tree = parse_catalog(text)?;
    check_catalog(&normalize(tree), options)
}

/// Loads the file at `path` through `preprocessor` and checks it.
///
/// # Errors
/// Fails when the file cannot be loaded, parsed, or lacks a plural count.
pub fn check_file(
    path: &Path,
    preprocessor: &dyn Preprocessor,
    options: CheckOptions,
) -> Result<CheckReport, LintError> {
    let text = load_catalog(path, preprocessor)?;
    check_text(&text, options)
}

/// Per-catalog state of one check run.
#[derive(Debug)]
struct Checker {
    /// Options the run was started with.
    options: CheckOptions,
    /// Declared by the catalog's `Plural-Forms`.
    nplurals: usize,
    /// 集計中の結果
    report: CheckReport,
}

/// A source string and one translation of the same entry.
#[derive(Debug, Clone, Copy)]
struct Pair<'a> {
    /// Entry both strings come from.
    record: &'a TranslationRecord,
    /// Decoded from the entry's `msgid`.
    location: Option<LineNumber>,
    /// Source string with the annotation removed.
    source: &'a str,
    /// Absent when the entry has no variant to compare.
    translated: Option<&'a str>,
}

impl Checker {
    /// Checks the variant count, then every source/translation pair of `record`.
    fn check_record(&mut self, record: &TranslationRecord) {
        let (location, source) = decode_line_key(&record.source_text);

        let expected = record.expected_variants(self.nplurals);
        if record.variants.len() != expected {
            self.report.errors += 1;
            let pair = Pair { record, location, source, translated: None };
            self.push(&pair, DiagnosticKind::PluralCountMismatch {
                found: record.variants.len(),
                expected,
            });
        }

        if let Some(plural) = record.source_plural_text.as_deref() {
            let sources = PluralSources::new(source, plural);
            for variant in &record.variants {
                self.check_pair(&Pair {
                    record,
                    location,
                    source: sources.source_for(&variant.text),
                    translated: Some(&variant.text),
                });
            }
        } else {
            let translated = record.variants.first().map(|variant| variant.text.as_str());
            self.check_pair(&Pair { record, location, source, translated });
        }
    }

    /// 一つのペアを検査し、カウンターと診断を更新する
    fn check_pair(&mut self, pair: &Pair<'_>) {
        let Some(translated) = pair.translated else {
            return;
        };
        let fuzzy = pair.record.is_fuzzy();
        let is_empty = !pair.source.trim().is_empty() && translated.trim().is_empty();

        let source_tokens = placeholders(pair.source);
        let translated_tokens = placeholders(translated);
        let extra: Vec<&str> = translated_tokens.difference(&source_tokens).copied().collect();
        let missing: Vec<&str> = source_tokens.difference(&translated_tokens).copied().collect();

        let broken = is_empty || !extra.is_empty() || !missing.is_empty();
        if !broken && !fuzzy {
            return;
        }
        if broken {
            self.report.errors += 1;
        }
        if fuzzy {
            self.report.warnings += 1;
        }

        // 一つのペアにつき出すのは最も重い種類だけ
        if is_empty {
            self.push(pair, DiagnosticKind::EmptyTranslation);
        } else if !extra.is_empty() {
            for token in extra {
                self.push(pair, DiagnosticKind::AbsentFromReference(token.to_string()));
            }
        } else if !missing.is_empty() {
            for token in missing {
                self.push(pair, DiagnosticKind::AbsentFromTranslation(token.to_string()));
            }
        } else {
            self.push(pair, DiagnosticKind::Fuzzy);
        }
    }

    /// Records a diagnostic for `pair`.
    fn push(&mut self, pair: &Pair<'_>, kind: DiagnosticKind) {
        let context = self.options.verbose.then(|| DiagnosticContext {
            references: pair.record.references.clone(),
            context: pair.record.context.clone(),
            translated: pair.translated.map(ToString::to_string),
        });
        self.report.diagnostics.push(Diagnostic {
            location: pair.location,
            source_key: pair.source.to_string(),
            kind,
            context,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::input::annotate_line_numbers;
    use crate::test_utils::catalog_text;
    use crate::types::Severity;

    fn check(entries: &str) -> CheckReport {
        check_text(&catalog_text(2, entries), CheckOptions::default()).unwrap()
    }

    fn kinds(report: &CheckReport) -> Vec<DiagnosticKind> {
        report.diagnostics.iter().map(|diagnostic| diagnostic.kind.clone()).collect()
    }

    #[googletest::test]
    fn test_matching_placeholders_are_clean() {
        let report = check("msgid \"12:Hello %{name}\"\nmsgstr \"Bonjour %{name}\"\n");

        expect_that!(report.diagnostics, is_empty());
        expect_that!(report.total(), eq(0));
        expect_that!(report.is_clean(), eq(true));
    }

    #[googletest::test]
    fn test_dropped_placeholder_is_warning() {
        let report = check("msgid \"12:Hello %{name}\"\nmsgstr \"Bonjour\"\n");

        expect_that!(
            kinds(&report),
            elements_are![eq(&DiagnosticKind::AbsentFromTranslation("%{name}".to_string()))]
        );
        expect_that!(report.diagnostics[0].severity(), eq(Severity::Warning));
        expect_that!(report.diagnostics[0].location, some(eq(LineNumber(12))));
        expect_that!(report.diagnostics[0].source_key, eq("Hello %{name}"));
        expect_that!(report.errors, eq(1));
        expect_that!(report.warnings, eq(0));
    }

    #[googletest::test]
    fn test_invented_placeholder_is_error() {
        let report = check("msgid \"Hello\"\nmsgstr \"Bonjour %{oops}\"\n");

        expect_that!(
            kinds(&report),
            elements_are![eq(&DiagnosticKind::AbsentFromReference("%{oops}".to_string()))]
        );
        expect_that!(report.diagnostics[0].location, none());
        expect_that!(report.errors, eq(1));
    }

    #[googletest::test]
    fn test_each_invented_placeholder_reported_once() {
        let report = check("msgid \"Hello\"\nmsgstr \"%{b} %{a} %{b} {{c}}\"\n");

        expect_that!(
            kinds(&report),
            elements_are![
                eq(&DiagnosticKind::AbsentFromReference("%{a}".to_string())),
                eq(&DiagnosticKind::AbsentFromReference("%{b}".to_string())),
                eq(&DiagnosticKind::AbsentFromReference("{{c}}".to_string())),
            ]
        );
        expect_that!(report.errors, eq(1));
    }

    #[googletest::test]
    fn test_blank_plural_variant() {
        let report = check(concat!(
            "msgid \"3:1 item\"\n",
            "msgid_plural \"%{n} items\"\n",
            "msgstr[0] \"\"\n",
            "msgstr[1] \"%{n} éléments\"\n",
        ));

        expect_that!(kinds(&report), elements_are![eq(&DiagnosticKind::EmptyTranslation)]);
        expect_that!(report.diagnostics[0].source_key, eq("1 item"));
        expect_that!(report.errors, eq(1));
        expect_that!(report.warnings, eq(0));
    }

    #[googletest::test]
    fn test_fuzzy_only() {
        let report = check("#, fuzzy\nmsgid \"Hello %{name}\"\nmsgstr \"Salut %{name}\"\n");

        expect_that!(kinds(&report), elements_are![eq(&DiagnosticKind::Fuzzy)]);
        expect_that!(report.errors, eq(0));
        expect_that!(report.warnings, eq(1));
    }

    #[googletest::test]
    fn test_empty_wins_over_placeholders_and_fuzzy() {
        let report = check("#, fuzzy\nmsgid \"Hello %{name}\"\nmsgstr \"  \"\n");

        expect_that!(kinds(&report), elements_are![eq(&DiagnosticKind::EmptyTranslation)]);
        expect_that!(report.errors, eq(1));
        expect_that!(report.warnings, eq(1));
    }

    #[googletest::test]
    fn test_blank_source_and_translation_is_clean() {
        let report = check("msgid \" \"\nmsgstr \"\"\n");

        expect_that!(report.is_clean(), eq(true));
    }

    #[rstest]
    #[case::too_few_plurals(
        "msgid \"1 item\"\nmsgid_plural \"%{n} items\"\nmsgstr[0] \"un élément\"\n",
        1,
        2
    )]
    #[case::too_many_plurals(
        "msgid \"1 item\"\nmsgid_plural \"%{n} items\"\nmsgstr[0] \"a\"\nmsgstr[1] \"%{n} b\"\nmsgstr[2] \"%{n} c\"\n",
        3,
        2
    )]
    #[case::singular_with_plurals("msgid \"Hello\"\nmsgstr[0] \"a\"\nmsgstr[1] \"b\"\n", 2, 1)]
    fn test_variant_count_mismatch(
        #[case] entry: &str,
        #[case] found: usize,
        #[case] expected: usize,
    ) {
        let report = check(entry);

        assert_that!(report.diagnostics, not(is_empty()));
        assert_that!(
            report.diagnostics[0].kind,
            eq(&DiagnosticKind::PluralCountMismatch { found, expected })
        );
        assert_that!(
            report.diagnostics[0].message(),
            eq(&format!("{found} plurals found but {expected} expected"))
        );
    }

    #[googletest::test]
    fn test_plural_variant_compared_with_plural_source() {
        let report = check(concat!(
            "msgid \"1 file\"\n",
            "msgid_plural \"%{n} files\"\n",
            "msgstr[0] \"un fichier\"\n",
            "msgstr[1] \"%{n} fichiers\"\n",
        ));

        expect_that!(report.is_clean(), eq(true));
    }

    #[googletest::test]
    fn test_verbose_attaches_context() {
        let text = catalog_text(
            2,
            "#: app/models/user.rb:4\nmsgctxt \"menu\"\nmsgid \"8:Hello\"\nmsgstr \"Bonjour %{x}\"\n",
        );

        let report = check_text(&text, CheckOptions { verbose: true }).unwrap();

        expect_that!(
            report.diagnostics[0].context,
            some(eq(&DiagnosticContext {
                references: vec!["app/models/user.rb:4".to_string()],
                context: Some("menu".to_string()),
                translated: Some("Bonjour %{x}".to_string()),
            }))
        );
    }

    #[googletest::test]
    fn test_terse_omits_context() {
        let report = check("msgid \"Hello\"\nmsgstr \"\"\n");

        expect_that!(report.diagnostics[0].context, none());
    }

    #[googletest::test]
    fn test_checking_twice_is_identical() {
        let text =
            catalog_text(2, "#, fuzzy\nmsgid \"4:A %{x}\"\nmsgstr \"B\"\n\nmsgid \"Hi\"\nmsgstr \"\"\n");

        let first = check_text(&text, CheckOptions { verbose: true }).unwrap();
        let second = check_text(&text, CheckOptions { verbose: true }).unwrap();

        expect_that!(first, eq(&second));
    }

    #[googletest::test]
    fn test_wrapped_keys_keep_their_lines() {
        let text = annotate_line_numbers(&catalog_text(
            2,
            concat!(
                "msgid \"\"\n\"First %{a}\"\nmsgstr \"Premier\"\n\n",
                "msgid \"\"\n\"Second %{b}\"\nmsgstr \"Second\"\n",
            ),
        ));

        let report = check_text(&text, CheckOptions::default()).unwrap();

        let found: Vec<(Option<LineNumber>, &str)> = report
            .diagnostics
            .iter()
            .map(|diagnostic| (diagnostic.location, diagnostic.source_key.as_str()))
            .collect();
        expect_that!(
            found,
            eq(&vec![(Some(LineNumber(7)), "First %{a}"), (Some(LineNumber(11)), "Second %{b}")])
        );
    }

    #[googletest::test]
    fn test_empty_text_is_clean() {
        expect_that!(check_text("", CheckOptions::default()).unwrap(), eq(&CheckReport::default()));
    }

    #[googletest::test]
    fn test_missing_plural_forms_is_fatal() {
        let text = "msgid \"\"\nmsgstr \"\"\n\"Language: fr\\n\"\n\nmsgid \"Hi\"\nmsgstr \"Salut\"\n";

        let result = check_text(text, CheckOptions::default());

        expect_that!(matches!(result, Err(LintError::MissingPluralForms)), eq(true));
    }

    #[rstest]
    #[case::no_count("\"Plural-Forms: nplurals=; plural=0;\\n\"")]
    #[case::zero("\"Plural-Forms: nplurals=0; plural=0;\\n\"")]
    fn test_malformed_plural_forms_is_fatal(#[case] line: &str) {
        let text = format!("msgid \"\"\nmsgstr \"\"\n{line}\n");

        let result = check_text(&text, CheckOptions::default());

        assert_that!(matches!(result, Err(LintError::MalformedPluralForms(_))), eq(true));
    }

    #[googletest::test]
    fn test_parse_failure_is_fatal() {
        let result = check_text("msgid \"Hi\"\n", CheckOptions::default());

        expect_that!(matches!(result, Err(LintError::Parse(_))), eq(true));
    }
}
