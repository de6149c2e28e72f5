//! Picks the source string each plural variant is compared against.

use super::placeholder::placeholders;

/// Token present in the plural source but not the singular one, if exactly one qualifies.
#[must_use]
pub fn plural_only_placeholder<'a>(singular: &str, plural: &'a str) -> Option<&'a str> {
    let singular = placeholders(singular);
    let mut only_plural = placeholders(plural).into_iter().filter(|token| !singular.contains(token));
    match (only_plural.next(), only_plural.next()) {
        (Some(token), None) => Some(token),
        _ => None,
    }
}

/// Singular and plural sources of one entry.
#[derive(Debug, Clone, Copy)]
pub struct PluralSources<'a> {
    singular: &'a str,
    plural: &'a str,
    plural_only: Option<&'a str>,
}

impl<'a> PluralSources<'a> {
    #[must_use]
    pub fn new(singular: &'a str, plural: &'a str) -> Self {
        Self { singular, plural, plural_only: plural_only_placeholder(singular, plural) }
    }

    /// Plural source when `translated` uses the plural-only token, singular source otherwise.
    #[must_use]
    pub fn source_for(&self, translated: &str) -> &'a str {
        match self.plural_only {
            Some(token) if placeholders(translated).contains(token) => self.plural,
            _ => self.singular,
        }
    }
}
