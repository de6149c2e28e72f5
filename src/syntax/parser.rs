//! Recursive-descent parser for unwrapped PO catalogs.
//!
//! Every rule is an ordered choice that restores the cursor when it fails, so
//! alternatives can be tried one after another. Failures are recorded at the
//! deepest offset reached; when the whole file does not match, that offset and
//! the alternatives attempted there become the [`ParseError`].

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::error::{
    Expectation,
    ParseError,
};
use super::node::{
    Fragment,
    ParseNode,
};
use crate::types::TextPosition;

/// Parses a whole catalog into a [`ParseNode::File`].
///
/// # Errors
/// Returns [`ParseError`] when the text does not match the grammar or input remains
/// after the last obsolete block.
pub fn parse_catalog(text: &str) -> Result<ParseNode, ParseError> {
    let mut parser = Parser::new(text);
    let file = parser.file();
    parser.finish(file)
}

/// Cursor over the catalog text plus the deepest-failure bookkeeping.
#[derive(Debug)]
pub(crate) struct Parser<'a> {
    /// Full input.
    input: &'a str,
    /// Current byte offset.
    pos: usize,
    /// Deepest offset at which an alternative failed.
    furthest: usize,
    /// Alternatives that failed at `furthest`.
    expectations: BTreeSet<Expectation>,
    /// Names of the rules currently being matched.
    rules: Vec<&'static str>,
}

impl<'a> Parser<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, pos: 0, furthest: 0, expectations: BTreeSet::new(), rules: Vec::new() }
    }

    /// Accepts `result` only if it consumed the entire input.
    pub(crate) fn finish<T>(&mut self, result: Option<T>) -> Result<T, ParseError> {
        match result {
            Some(value) if self.at_end() => Ok(value),
            Some(_) => {
                self.expect("end of input");
                Err(self.error())
            }
            None => Err(self.error()),
        }
    }

    fn error(&self) -> ParseError {
        let rest = self.input.get(self.furthest..).unwrap_or("");
        let found = if rest.is_empty() {
            "end of input".to_string()
        } else {
            let excerpt: String = rest.chars().take(24).collect();
            format!("{excerpt:?}")
        };
        ParseError {
            position: TextPosition::locate(self.input, self.furthest),
            found,
            trace: self.expectations.iter().cloned().collect(),
        }
    }

    // ---- primitives ------------------------------------------------------

    fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or("")
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expect(&mut self, what: &str) {
        let expectation =
            Expectation { rule_path: self.rules.join(" > "), expected: what.to_string() };
        match self.pos.cmp(&self.furthest) {
            Ordering::Less => {}
            Ordering::Greater => {
                self.furthest = self.pos;
                self.expectations.clear();
                self.expectations.insert(expectation);
            }
            Ordering::Equal => {
                self.expectations.insert(expectation);
            }
        }
    }

    fn literal(&mut self, text: &'static str) -> Option<()> {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            Some(())
        } else {
            self.expect(&format!("`{text}`"));
            None
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.char_indices().find(|&(_, c)| !pred(c)).map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        rest.get(..len).unwrap_or("")
    }

    fn take_while1(&mut self, what: &str, pred: impl Fn(char) -> bool) -> Option<&'a str> {
        let taken = self.take_while(pred);
        if taken.is_empty() {
            self.expect(what);
            None
        } else {
            Some(taken)
        }
    }

    /// Text up to (not including) the first unescaped character matching `stop`.
    ///
    /// A backslash always escapes the character after it.
    fn escaped_text(&mut self, stop: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        let mut end = rest.len();
        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                chars.next();
            } else if stop(c) {
                end = i;
                break;
            }
        }
        self.pos += end;
        rest.get(..end).unwrap_or("")
    }

    /// Horizontal whitespace.
    fn lwsp(&mut self) {
        self.take_while(|c| c == ' ' || c == '\t');
    }

    /// Optional newline.
    fn endl(&mut self) {
        if self.peek() == Some('\n') {
            self.pos += 1;
        } else {
            self.expect("newline");
        }
    }

    /// Newline or end of input.
    fn line_end(&mut self) -> Option<()> {
        if self.at_end() {
            return Some(());
        }
        if self.peek() == Some('\n') {
            self.pos += 1;
            Some(())
        } else {
            self.expect("newline");
            None
        }
    }

    fn rule<T>(&mut self, name: &'static str, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        self.rules.push(name);
        let result = f(self);
        self.rules.pop();
        if result.is_none() {
            self.pos = start;
        }
        result
    }

    fn optional<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let result = f(self);
        if result.is_none() {
            self.pos = start;
        }
        result
    }

    fn many<T>(&mut self, mut f: impl FnMut(&mut Self) -> Option<T>) -> Vec<T> {
        let mut items = Vec::new();
        loop {
            let start = self.pos;
            match f(self) {
                Some(item) if self.pos > start => items.push(item),
                _ => {
                    self.pos = start;
                    break;
                }
            }
        }
        items
    }

    fn many1<T>(&mut self, f: impl FnMut(&mut Self) -> Option<T>) -> Option<Vec<T>> {
        let items = self.many(f);
        if items.is_empty() { None } else { Some(items) }
    }

    // ---- strings ---------------------------------------------------------

    pub(crate) fn quoted_string(&mut self) -> Option<ParseNode> {
        self.rule("quoted string", |p| {
            p.literal("\"")?;
            let text = p.escaped_text(|c| c == '"');
            p.literal("\"")?;
            p.lwsp();
            let fragment =
                if text.is_empty() { Fragment::Empty } else { Fragment::Text(text.to_string()) };
            Some(ParseNode::QuotedString(fragment))
        })
    }

    fn quoted_strings(&mut self) -> Option<Vec<ParseNode>> {
        self.many1(|p| {
            let node = p.quoted_string()?;
            p.endl();
            Some(node)
        })
    }

    // ---- header block ----------------------------------------------------

    pub(crate) fn headers(&mut self) -> Option<ParseNode> {
        self.rule("header block", |p| {
            p.many(Self::comment);
            p.literal("msgid")?;
            p.lwsp();
            p.literal("\"\"")?;
            p.endl();
            p.literal("msgstr")?;
            p.lwsp();
            let mut items = Vec::new();
            if let Some(first) = p.optional(|p| {
                let node = p.quoted_string()?;
                p.endl();
                Some(node)
            }) {
                items.push(first);
            }
            let lines = p.many1(|p| {
                let header = p.header()?;
                p.endl();
                Some(header)
            })?;
            items.extend(lines);
            p.endl();
            Some(ParseNode::Headers(items))
        })
    }

    fn header(&mut self) -> Option<ParseNode> {
        self.rule("header", |p| {
            p.literal("\"")?;
            let node = match p.plural_forms_header() {
                Some(node) => node,
                None => p.raw_header()?,
            };
            p.literal("\"")?;
            p.lwsp();
            Some(node)
        })
    }

    fn header_sep(&mut self) -> Option<()> {
        self.literal(":")?;
        self.lwsp();
        Some(())
    }

    fn header_value(&mut self) -> &'a str {
        self.escaped_text(|c| c == '"' || c == '\n')
    }

    fn plural_forms_header(&mut self) -> Option<ParseNode> {
        self.rule("plural forms header", |p| {
            p.literal("Plural-Forms")?;
            p.header_sep()?;
            p.literal("nplurals=")?;
            let nplurals = p.take_while1("digit", |c| c.is_ascii_digit())?;
            p.literal(";")?;
            p.lwsp();
            p.literal("plural=")?;
            let plural = p.header_value();
            Some(ParseNode::PluralFormsHeader {
                nplurals: nplurals.to_string(),
                plural: plural.to_string(),
            })
        })
    }

    fn raw_header(&mut self) -> Option<ParseNode> {
        self.rule("header field", |p| {
            let name = p.header_name()?;
            p.header_sep()?;
            let value = p.header_value();
            Some(ParseNode::HeaderField { name: name.to_string(), value: value.to_string() })
        })
    }

    /// Dash-separated tokens, each an uppercase letter followed by letters or digits.
    fn header_name(&mut self) -> Option<&'a str> {
        let start = self.pos;
        self.name_token()?;
        self.many(|p| {
            p.literal("-")?;
            p.name_token()
        });
        self.input.get(start..self.pos)
    }

    fn name_token(&mut self) -> Option<()> {
        if self.peek().is_some_and(|c| c.is_ascii_uppercase()) {
            self.pos += 1;
            self.take_while(|c| c.is_ascii_alphanumeric());
            Some(())
        } else {
            self.expect("header name");
            None
        }
    }

    // ---- comments --------------------------------------------------------

    pub(crate) fn comment(&mut self) -> Option<ParseNode> {
        if let Some(node) = self.flag_comment() {
            return Some(node);
        }
        if let Some(node) = self.reference_comment() {
            return Some(node);
        }
        self.unparsed_comment()
    }

    pub(crate) fn flag_comment(&mut self) -> Option<ParseNode> {
        self.rule("flag comment", |p| {
            p.literal("#")?;
            let flags = p.many1(|p| {
                p.literal(",")?;
                p.lwsp();
                let flag =
                    p.take_while1("flag name", |c| c.is_ascii_lowercase() || c == '-')?;
                p.lwsp();
                Some(ParseNode::Flag(flag.to_string()))
            })?;
            p.line_end()?;
            Some(ParseNode::FlagComment(flags))
        })
    }

    pub(crate) fn reference_comment(&mut self) -> Option<ParseNode> {
        self.rule("reference comment", |p| {
            p.literal("#:")?;
            p.lwsp();
            let reference = p.take_while(|c| c != '\n');
            p.line_end()?;
            Some(ParseNode::Reference(reference.to_string()))
        })
    }

    pub(crate) fn unparsed_comment(&mut self) -> Option<ParseNode> {
        self.rule("comment", |p| {
            p.literal("#")?;
            match p.peek() {
                None | Some('\n') => {}
                Some('~') => {
                    p.expect("comment text");
                    return None;
                }
                Some(marker) => {
                    p.pos += marker.len_utf8();
                    p.lwsp();
                }
            }
            let text = p.take_while(|c| c != '\n');
            p.line_end()?;
            Some(ParseNode::Comment(text.to_string()))
        })
    }

    // ---- translations ----------------------------------------------------

    fn keyword_strings(&mut self, keyword: &'static str) -> Option<Vec<ParseNode>> {
        self.literal(keyword)?;
        self.lwsp();
        self.quoted_strings()
    }

    pub(crate) fn msgctxt(&mut self) -> Option<ParseNode> {
        self.rule("msgctxt", |p| p.keyword_strings("msgctxt").map(ParseNode::Msgctxt))
    }

    pub(crate) fn msgid(&mut self) -> Option<ParseNode> {
        self.rule("msgid", |p| p.keyword_strings("msgid").map(ParseNode::Msgid))
    }

    pub(crate) fn msgid_plural(&mut self) -> Option<ParseNode> {
        self.rule("msgid_plural", |p| p.keyword_strings("msgid_plural").map(ParseNode::MsgidPlural))
    }

    pub(crate) fn msgstr(&mut self) -> Option<ParseNode> {
        self.rule("msgstr", |p| {
            p.literal("msgstr")?;
            let index = p.optional(|p| {
                p.literal("[")?;
                let digits = p.take_while1("digit", |c| c.is_ascii_digit())?;
                p.literal("]")?;
                Some(digits.to_string())
            });
            p.lwsp();
            let fragments = p.quoted_strings()?;
            Some(ParseNode::Msgstr { index, fragments })
        })
    }

    pub(crate) fn translation(&mut self) -> Option<ParseNode> {
        self.rule("translation", |p| {
            let mut items = p.many(Self::comment);
            if let Some(context) = p.msgctxt() {
                items.push(context);
            }
            items.push(p.msgid()?);
            if let Some(plural) = p.msgid_plural() {
                items.push(plural);
            }
            items.extend(p.many1(Self::msgstr)?);
            p.endl();
            Some(ParseNode::Translation(items))
        })
    }

    // ---- obsolete blocks -------------------------------------------------

    fn obsolete_line(&mut self) -> Option<()> {
        self.literal("#~")?;
        self.take_while(|c| c != '\n');
        self.endl();
        Some(())
    }

    pub(crate) fn obsolete(&mut self) -> Option<ParseNode> {
        self.rule("obsolete block", |p| {
            let comments = p.many(Self::comment);
            let start = p.pos;
            p.many1(Self::obsolete_line)?;
            let text = p.input.get(start..p.pos).unwrap_or("");
            let text = text.strip_suffix('\n').unwrap_or(text).to_string();
            p.endl();
            Some(ParseNode::Obsolete { comments, text })
        })
    }

    // ---- file ------------------------------------------------------------

    pub(crate) fn file(&mut self) -> Option<ParseNode> {
        self.rule("file", |p| {
            let headers = p.headers()?;
            let translations = p.many(Self::translation);
            let obsolete = p.many(Self::obsolete);
            Some(ParseNode::File { headers: Box::new(headers), translations, obsolete })
        })
    }
}
