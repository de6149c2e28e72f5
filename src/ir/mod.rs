//! Semantic model of a catalog and the normalizer that builds it.

mod catalog;
mod normalize;
mod translation;

pub use catalog::{
    Catalog,
    HeaderMap,
    HeaderValue,
    PLURAL_FORMS_HEADER,
    PluralForms,
};
pub use normalize::normalize;
pub use translation::{
    FUZZY_FLAG,
    TranslationRecord,
    Variant,
};
