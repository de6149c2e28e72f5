//! 翻訳エントリの中間表現

use std::collections::BTreeSet;

/// Flag marking a machine-suggested, unreviewed translation.
pub const FUZZY_FLAG: &str = "fuzzy";

/// One translated string of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Index from `msgstr[N]`; `None` for a bare `msgstr`.
    pub plural_index: Option<usize>,
    pub text: String,
}

impl Variant {
    /// Position of the variant, a bare `msgstr` counting as index 0.
    #[must_use]
    pub fn index(&self) -> usize {
        self.plural_index.unwrap_or_default()
    }
}

/// A translation entry after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationRecord {
    /// Flags from every `#,` comment, deduplicated.
    pub flags: BTreeSet<String>,

    /// `#:` comments in file order.
    pub references: Vec<String>,

    /// Translator, extracted and previous-string comments in file order.
    pub comments: Vec<String>,

    pub context: Option<String>,

    /// Joined `msgid`, possibly carrying a `<lineno>:` annotation.
    pub source_text: String,

    pub source_plural_text: Option<String>,

    /// One entry per `msgstr`, in file order.
    pub variants: Vec<Variant>,
}

impl TranslationRecord {
    #[must_use]
    pub const fn is_plural(&self) -> bool {
        self.source_plural_text.is_some()
    }

    #[must_use]
    pub fn is_fuzzy(&self) -> bool {
        self.flags.contains(FUZZY_FLAG)
    }

    /// Number of variants the entry must have for a catalog declaring `nplurals`.
    #[must_use]
    pub const fn expected_variants(&self, nplurals: usize) -> usize {
        if self.is_plural() { nplurals } else { 1 }
    }
}
