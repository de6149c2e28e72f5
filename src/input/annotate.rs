//! Line-number annotation of `msgid` keys.
//!
//! The catalog tool used for unwrapping renumbers nothing but also keeps no
//! positions, so the original line of each entry is smuggled through it inside
//! the `msgid` text as a `<lineno>:` prefix and recovered by the checker.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::LineNumber;

/// A whole `msgid "..."` line.
#[allow(clippy::expect_used)]
static MSGID_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^msgid\s+"(.*)"$"#).expect("msgid line pattern is valid"));

/// The `<lineno>:` prefix written by the annotator.
#[allow(clippy::expect_used)]
static LINE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):").expect("line key pattern is valid"));

/// Prefixes `msgid` keys with their 1-based line number.
///
/// Every `msgid` line after the header's own `msgid ""` is annotated, including the
/// empty first line of a wrapped `msgid`.
#[must_use]
pub fn annotate_line_numbers(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + text.len() / 8);
    let mut header_seen = false;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        let (content, ending) = split_line_ending(line);
        let key = MSGID_LINE_RE.captures(content).and_then(|caps| caps.get(1)).map(|m| m.as_str());

        match key {
            Some(key) if header_seen => {
                output.push_str(&format!("msgid \"{}:{key}\"", index + 1));
                output.push_str(ending);
            }
            Some(_) => {
                header_seen = true;
                output.push_str(line);
            }
            None => output.push_str(line),
        }
    }

    output
}

/// Splits off a trailing `\n` or `\r\n`.
fn split_line_ending(line: &str) -> (&str, &str) {
    line.strip_suffix("\r\n")
        .map(|content| (content, "\r\n"))
        .or_else(|| line.strip_suffix('\n').map(|content| (content, "\n")))
        .unwrap_or((line, ""))
}

/// Splits a possibly annotated key into its line number and original text.
#[must_use]
pub fn decode_line_key(key: &str) -> (Option<LineNumber>, &str) {
    let Some(caps) = LINE_KEY_RE.captures(key) else {
        return (None, key);
    };
    let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
        return (None, key);
    };
    match digits.as_str().parse::<u32>() {
        Ok(line) => (Some(LineNumber(line)), key.get(whole.end()..).unwrap_or_default()),
        Err(_) => (None, key),
    }
}
