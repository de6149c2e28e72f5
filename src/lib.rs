//! po-lint
//!
//! gettext PO カタログの翻訳チェッカー。プレースホルダーの不一致、複数形の数、
//! 空の翻訳、fuzzy フラグを検出する。

pub mod config;
pub mod input;
pub mod ir;
pub mod lint;
pub mod report;
pub mod syntax;
pub mod types;
pub mod workspace;

mod test_utils;

pub use lint::{
    CheckOptions,
    CheckReport,
    LintError,
    check_text,
};
