//! Semantic model of one catalog file.

use std::collections::HashMap;

use super::translation::TranslationRecord;

/// Name of the header that declares the plural rule.
pub const PLURAL_FORMS_HEADER: &str = "Plural-Forms";

/// Parsed `Plural-Forms` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralForms {
    pub nplurals: usize,
    /// Expression after `plural=`, kept verbatim and never evaluated.
    pub plural_expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Raw(String),
    PluralForms(PluralForms),
}

/// Header entry fields keyed by their case-preserved name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    /// At most one value per name.
    entries: HashMap<String, HeaderValue>,
}

impl HeaderMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a header, replacing an earlier one of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: HeaderValue) {
        self.entries.insert(name.into(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The structured `Plural-Forms` value, if the header parsed into one.
    #[must_use]
    pub fn plural_forms(&self) -> Option<&PluralForms> {
        match self.get(PLURAL_FORMS_HEADER)? {
            HeaderValue::PluralForms(forms) => Some(forms),
            HeaderValue::Raw(_) => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the checker needs from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub headers: HeaderMap,
    pub translations: Vec<TranslationRecord>,
    /// Opaque `#~` text of obsolete entries.
    pub obsolete: Vec<String>,
}
