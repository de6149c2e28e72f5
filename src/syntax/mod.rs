//! Grammar of textual PO catalogs.

mod error;
mod node;
mod parser;

pub use error::{
    Expectation,
    ParseError,
};
pub use node::{
    Fragment,
    NodeKind,
    ParseNode,
};
pub use parser::parse_catalog;
