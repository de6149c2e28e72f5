//! Terminal output of check results.

mod reporter;

pub use reporter::{
    ReportOptions,
    Reporter,
};
