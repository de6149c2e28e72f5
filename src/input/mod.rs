//! Collaborators that turn a file on disk into parser input.

mod annotate;
mod catalog;
mod preprocess;
mod types;

pub use annotate::{
    annotate_line_numbers,
    decode_line_key,
};
pub use catalog::load_catalog;
pub use preprocess::{
    Msgcat,
    Passthrough,
    Preprocessor,
};
pub use types::InputError;
