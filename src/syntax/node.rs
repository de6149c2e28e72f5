//! Concrete parse tree produced by the catalog grammar.

/// Contents of one quoted string.
///
/// `""` is kept as [`Fragment::Empty`] rather than an empty [`Fragment::Text`] so the
/// normalizer can recognise the leading artifact of the header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Empty,
    /// Raw text between the quotes, escapes left untouched.
    Text(String),
}

impl Fragment {
    /// Text contributed when fragments are joined.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Text(text) => text,
        }
    }
}

/// Discriminant of a [`ParseNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    QuotedString,
    HeaderField,
    PluralFormsHeader,
    Flag,
    FlagComment,
    Reference,
    Comment,
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr,
    Headers,
    Translation,
    Obsolete,
    File,
}

impl NodeKind {
    /// Leaf kinds carry scalar payloads, all others carry child nodes.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            Self::QuotedString
                | Self::HeaderField
                | Self::PluralFormsHeader
                | Self::Flag
                | Self::Reference
                | Self::Comment
        )
    }
}

/// A node of the concrete tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    QuotedString(Fragment),
    /// `"Name: value"` header line. The value keeps its trailing `\n` escape.
    HeaderField { name: String, value: String },
    /// `"Plural-Forms: nplurals=N; plural=EXPR;"`, with `nplurals` still as digits.
    PluralFormsHeader { nplurals: String, plural: String },
    Flag(String),
    /// `#,` line; children are [`ParseNode::Flag`].
    FlagComment(Vec<ParseNode>),
    /// `#:` line.
    Reference(String),
    /// Any other `#` line that is not obsolete.
    Comment(String),
    Msgctxt(Vec<ParseNode>),
    Msgid(Vec<ParseNode>),
    MsgidPlural(Vec<ParseNode>),
    /// `msgstr` or `msgstr[N]`; `index` holds the digits between the brackets.
    Msgstr { index: Option<String>, fragments: Vec<ParseNode> },
    Headers(Vec<ParseNode>),
    Translation(Vec<ParseNode>),
    /// Comments of an obsolete block followed by its `#~` lines as opaque text.
    Obsolete { comments: Vec<ParseNode>, text: String },
    File { headers: Box<ParseNode>, translations: Vec<ParseNode>, obsolete: Vec<ParseNode> },
}

impl ParseNode {
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::QuotedString(_) => NodeKind::QuotedString,
            Self::HeaderField { .. } => NodeKind::HeaderField,
            Self::PluralFormsHeader { .. } => NodeKind::PluralFormsHeader,
            Self::Flag(_) => NodeKind::Flag,
            Self::FlagComment(_) => NodeKind::FlagComment,
            Self::Reference(_) => NodeKind::Reference,
            Self::Comment(_) => NodeKind::Comment,
            Self::Msgctxt(_) => NodeKind::Msgctxt,
            Self::Msgid(_) => NodeKind::Msgid,
            Self::MsgidPlural(_) => NodeKind::MsgidPlural,
            Self::Msgstr { .. } => NodeKind::Msgstr,
            Self::Headers(_) => NodeKind::Headers,
            Self::Translation(_) => NodeKind::Translation,
            Self::Obsolete { .. } => NodeKind::Obsolete,
            Self::File { .. } => NodeKind::File,
        }
    }

    /// Child nodes of a composite node, empty for leaves.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::QuotedString(_)
            | Self::HeaderField { .. }
            | Self::PluralFormsHeader { .. }
            | Self::Flag(_)
            | Self::Reference(_)
            | Self::Comment(_) => Vec::new(),
            Self::FlagComment(items)
            | Self::Msgctxt(items)
            | Self::Msgid(items)
            | Self::MsgidPlural(items)
            | Self::Headers(items)
            | Self::Translation(items) => items.iter().collect(),
            Self::Msgstr { fragments, .. } => fragments.iter().collect(),
            Self::Obsolete { comments, .. } => comments.iter().collect(),
            Self::File { headers, translations, obsolete } => std::iter::once(headers.as_ref())
                .chain(translations.iter())
                .chain(obsolete.iter())
                .collect(),
        }
    }
}
