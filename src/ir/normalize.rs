//! Folds the concrete parse tree into the semantic [`Catalog`] model.
//!
//! No validation happens here; malformed entries are reported by the checker.

use super::catalog::{
    Catalog,
    HeaderMap,
    HeaderValue,
    PLURAL_FORMS_HEADER,
    PluralForms,
};
use super::translation::{
    TranslationRecord,
    Variant,
};
use crate::syntax::{
    Fragment,
    ParseNode,
};

/// Result of folding one node.
#[derive(Debug)]
enum Folded {
    /// One quoted-string fragment.
    Text(String),
    Header(String, HeaderValue),
    Flag(String),
    /// Flags of one `#,` line.
    Flags(Vec<String>),
    Reference(String),
    Comment(String),
    /// Joined `msgctxt`.
    Context(String),
    /// Joined `msgid`.
    Msgid(String),
    /// Joined `msgid_plural`.
    MsgidPlural(String),
    Msgstr(Variant),
    Headers(HeaderMap),
    Translation(TranslationRecord),
    /// Opaque `#~` text.
    Obsolete(String),
    Catalog(Catalog),
}

/// Builds the semantic model from a parse tree.
///
/// A [`ParseNode::File`] yields the full catalog. Other roots contribute the part of a
/// catalog they describe (a header block, one translation, one obsolete block), which
/// keeps partial trees usable in tests and tooling.
#[must_use]
pub fn normalize(root: ParseNode) -> Catalog {
    match fold(root) {
        Folded::Catalog(catalog) => catalog,
        Folded::Headers(headers) => Catalog { headers, ..Catalog::default() },
        Folded::Translation(record) => {
            Catalog { translations: vec![record], ..Catalog::default() }
        }
        Folded::Obsolete(text) => Catalog { obsolete: vec![text], ..Catalog::default() },
        other => {
            tracing::debug!(?other, "Root node carries no catalog data");
            Catalog::default()
        }
    }
}

/// ノードを種類ごとに畳み込む
fn fold(node: ParseNode) -> Folded {
    match node {
        ParseNode::QuotedString(fragment) => Folded::Text(match fragment {
            Fragment::Empty => String::new(),
            Fragment::Text(text) => text,
        }),
        ParseNode::HeaderField { name, value } => Folded::Header(name, HeaderValue::Raw(value)),
        ParseNode::PluralFormsHeader { nplurals, plural } => {
            let value = match nplurals.parse::<usize>() {
                Ok(count) => HeaderValue::PluralForms(PluralForms {
                    nplurals: count,
                    plural_expression: plural,
                }),
                Err(_) => HeaderValue::Raw(format!("nplurals={nplurals}; plural={plural}")),
            };
            Folded::Header(PLURAL_FORMS_HEADER.to_string(), value)
        }
        ParseNode::Flag(flag) => Folded::Flag(flag),
        ParseNode::FlagComment(items) => Folded::Flags(
            items
                .into_iter()
                .filter_map(|item| match fold(item) {
                    Folded::Flag(flag) => Some(flag),
                    _ => None,
                })
                .collect(),
        ),
        ParseNode::Reference(reference) => Folded::Reference(reference),
        ParseNode::Comment(comment) => Folded::Comment(comment),
        ParseNode::Msgctxt(items) => Folded::Context(join(items)),
        ParseNode::Msgid(items) => Folded::Msgid(join(items)),
        ParseNode::MsgidPlural(items) => Folded::MsgidPlural(join(items)),
        ParseNode::Msgstr { index, fragments } => Folded::Msgstr(Variant {
            plural_index: index.and_then(|digits| digits.parse().ok()),
            text: join(fragments),
        }),
        ParseNode::Headers(items) => Folded::Headers(fold_headers(items)),
        ParseNode::Translation(items) => Folded::Translation(fold_translation(items)),
        ParseNode::Obsolete { text, .. } => Folded::Obsolete(text),
        ParseNode::File { headers, translations, obsolete } => {
            let headers = match fold(*headers) {
                Folded::Headers(headers) => headers,
                _ => HeaderMap::new(),
            };
            let translations = translations
                .into_iter()
                .filter_map(|node| match fold(node) {
                    Folded::Translation(record) => Some(record),
                    _ => None,
                })
                .collect();
            let obsolete = obsolete
                .into_iter()
                .filter_map(|node| match fold(node) {
                    Folded::Obsolete(text) => Some(text),
                    _ => None,
                })
                .collect();
            Folded::Catalog(Catalog { headers, translations, obsolete })
        }
    }
}

/// Concatenates quoted-string fragments in order.
fn join(items: Vec<ParseNode>) -> String {
    items
        .into_iter()
        .filter_map(|item| match fold(item) {
            Folded::Text(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// ヘッダーブロックを [`HeaderMap`] にまとめる
fn fold_headers(items: Vec<ParseNode>) -> HeaderMap {
    let mut items = items.into_iter().peekable();
    // `msgstr ""` leaves an empty fragment ahead of the first header line.
    if matches!(items.peek(), Some(ParseNode::QuotedString(Fragment::Empty))) {
        items.next();
    }

    let mut headers = HeaderMap::new();
    for item in items {
        match fold(item) {
            Folded::Header(name, value) => headers.insert(name, value),
            other => tracing::debug!(?other, "Ignoring non-header item in header block"),
        }
    }
    headers
}

/// Collects the comments, keys and variants of one entry.
fn fold_translation(items: Vec<ParseNode>) -> TranslationRecord {
    let mut record = TranslationRecord::default();
    for item in items {
        match fold(item) {
            Folded::Flags(flags) => record.flags.extend(flags),
            Folded::Reference(reference) => record.references.push(reference),
            Folded::Comment(comment) => record.comments.push(comment),
            Folded::Context(context) => record.context = Some(context),
            Folded::Msgid(text) => record.source_text = text,
            Folded::MsgidPlural(text) => record.source_plural_text = Some(text),
            Folded::Msgstr(variant) => record.variants.push(variant),
            other => tracing::debug!(?other, "Ignoring unexpected item in translation"),
        }
    }
    record
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::syntax::parse_catalog;

    fn text(s: &str) -> ParseNode {
        ParseNode::QuotedString(Fragment::Text(s.to_string()))
    }

    const fn empty() -> ParseNode {
        ParseNode::QuotedString(Fragment::Empty)
    }

    #[googletest::test]
    fn test_headers_tree() {
        let plural = " n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5;\\n";
        let tree = ParseNode::Headers(vec![
            empty(),
            ParseNode::HeaderField { name: "Language".to_string(), value: "ar\\n".to_string() },
            ParseNode::HeaderField { name: "MIME-Version".to_string(), value: "1.0\\n".to_string() },
            ParseNode::PluralFormsHeader { nplurals: "6".to_string(), plural: plural.to_string() },
        ]);

        let catalog = normalize(tree);

        expect_that!(catalog.headers.len(), eq(3));
        expect_that!(
            catalog.headers.get("Language"),
            some(eq(&HeaderValue::Raw("ar\\n".to_string())))
        );
        expect_that!(
            catalog.headers.plural_forms(),
            some(eq(&PluralForms { nplurals: 6, plural_expression: plural.to_string() }))
        );
    }

    #[googletest::test]
    fn test_unparseable_nplurals_stays_raw() {
        let tree = ParseNode::Headers(vec![ParseNode::PluralFormsHeader {
            nplurals: "99999999999999999999999".to_string(),
            plural: "0;".to_string(),
        }]);

        let catalog = normalize(tree);

        expect_that!(catalog.headers.contains(PLURAL_FORMS_HEADER), eq(true));
        expect_that!(catalog.headers.plural_forms(), none());
    }

    #[googletest::test]
    fn test_plural_translation_tree() {
        let tree = ParseNode::Translation(vec![
            ParseNode::FlagComment(vec![ParseNode::Flag("fuzzy".to_string())]),
            ParseNode::Reference("../../some_file.rb:34".to_string()),
            ParseNode::Reference("../../some_other_file.rb:283".to_string()),
            ParseNode::FlagComment(vec![
                ParseNode::Flag("ruby-format".to_string()),
                ParseNode::Flag("fuzzy".to_string()),
            ]),
            ParseNode::Msgid(vec![empty(), text("Hello World"), text("Hello Again")]),
            ParseNode::MsgidPlural(vec![empty(), text("Hello %{n} Worlds"), text("Hello Again")]),
            ParseNode::Msgstr {
                index: Some("0".to_string()),
                fragments: vec![empty(), text("Hello World"), text("Hello Again")],
            },
            ParseNode::Msgstr {
                index: Some("1".to_string()),
                fragments: vec![empty(), text("Hello %{n} Worlds"), text("Hello Again")],
            },
        ]);

        let catalog = normalize(tree);
        let record = &catalog.translations[0];

        expect_that!(record.flags, elements_are![eq("fuzzy"), eq("ruby-format")]);
        expect_that!(
            record.references,
            elements_are![eq("../../some_file.rb:34"), eq("../../some_other_file.rb:283")]
        );
        expect_that!(record.source_text, eq("Hello WorldHello Again"));
        expect_that!(record.source_plural_text, some(eq("Hello %{n} WorldsHello Again")));
        expect_that!(
            record.variants,
            elements_are![
                eq(&Variant { plural_index: Some(0), text: "Hello WorldHello Again".to_string() }),
                eq(&Variant {
                    plural_index: Some(1),
                    text: "Hello %{n} WorldsHello Again".to_string()
                }),
            ]
        );
    }

    #[googletest::test]
    fn test_bare_msgstr_is_single_variant() {
        let tree = ParseNode::Translation(vec![
            ParseNode::Comment("translator note".to_string()),
            ParseNode::Msgctxt(vec![text("menu")]),
            ParseNode::Msgid(vec![text("Open")]),
            ParseNode::Msgstr { index: None, fragments: vec![empty()] },
        ]);

        let catalog = normalize(tree);
        let record = &catalog.translations[0];

        expect_that!(record.is_plural(), eq(false));
        expect_that!(record.context, some(eq("menu")));
        expect_that!(record.comments, elements_are![eq("translator note")]);
        expect_that!(record.variants, len(eq(1)));
        expect_that!(record.variants[0].index(), eq(0));
        expect_that!(record.variants[0].text, eq(""));
    }

    #[googletest::test]
    fn test_parsed_file_round_trip() {
        let input = concat!(
            "msgid \"\"\n",
            "msgstr \"\"\n",
            "\"Language: ar\\n\"\n",
            "\"Plural-Forms: nplurals=6; plural= n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5;\\n\"\n",
            "\n",
            "#: app.rb:3\n",
            "msgid \"%{n} file\"\n",
            "msgid_plural \"%{n} files\"\n",
            "msgstr[0] \"a\"\n",
            "msgstr[1] \"b\"\n",
            "msgstr[2] \"c\"\n",
            "msgstr[3] \"d\"\n",
            "msgstr[4] \"e\"\n",
            "msgstr[5] \"f\"\n",
            "\n",
            "#~ msgid \"Old\"\n",
            "#~ msgstr \"Qadim\"\n",
        );

        let catalog = normalize(parse_catalog(input).unwrap());

        expect_that!(catalog.headers.plural_forms().map(|forms| forms.nplurals), some(eq(6)));
        expect_that!(catalog.translations, len(eq(1)));
        expect_that!(catalog.translations[0].variants, len(eq(6)));
        expect_that!(catalog.obsolete, elements_are![eq("#~ msgid \"Old\"\n#~ msgstr \"Qadim\"")]);
    }
}
