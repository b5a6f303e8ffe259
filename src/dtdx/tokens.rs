//! Token kinds of the DTDX grammar
//!
//! The engine only sees [`TokenType`] integers; [`DtdxTokenType`] gives them names on the
//! DTDX side and converts in both directions. [`token_names`] builds the display registry
//! used by diagnostics and the `simple` output format.

use crate::lexer::{TokenNames, TokenType};
use std::fmt;

/// All token kinds emitted by the DTDX scanner, besides [`TokenType::ERROR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum DtdxTokenType {
    /// Increased whitespace at the start of a line
    Indent = 1,
    /// Decreased whitespace at the start of a line
    Dedent,
    /// `=`
    Equals,
    /// `(`
    Open,
    /// `)`
    Close,
    /// `,` or `|` or `&`
    Separator,
    /// `*` or `+` or `?`
    Multiplicity,
    /// Element or attribute name
    Identifier,
    /// `'value'` or `"value"`, delimiters stripped
    Quote,
    /// `...`
    Reference,
    /// `#UPPERCASE`
    Directive,
    /// `# free text`
    Comment,
    /// End of input
    Eof,
}

impl DtdxTokenType {
    pub const ALL: [DtdxTokenType; 13] = [
        DtdxTokenType::Indent,
        DtdxTokenType::Dedent,
        DtdxTokenType::Equals,
        DtdxTokenType::Open,
        DtdxTokenType::Close,
        DtdxTokenType::Separator,
        DtdxTokenType::Multiplicity,
        DtdxTokenType::Identifier,
        DtdxTokenType::Quote,
        DtdxTokenType::Reference,
        DtdxTokenType::Directive,
        DtdxTokenType::Comment,
        DtdxTokenType::Eof,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DtdxTokenType::Indent => "indent",
            DtdxTokenType::Dedent => "dedent",
            DtdxTokenType::Equals => "equals",
            DtdxTokenType::Open => "open",
            DtdxTokenType::Close => "close",
            DtdxTokenType::Separator => "separator",
            DtdxTokenType::Multiplicity => "multiplicity",
            DtdxTokenType::Identifier => "identifier",
            DtdxTokenType::Quote => "quote",
            DtdxTokenType::Reference => "reference",
            DtdxTokenType::Directive => "directive",
            DtdxTokenType::Comment => "comment",
            DtdxTokenType::Eof => "eof",
        }
    }

    /// Check if this token changes the indentation level
    pub fn is_indentation(self) -> bool {
        matches!(self, DtdxTokenType::Indent | DtdxTokenType::Dedent)
    }

    /// Check if this token is produced from a single punctuation character
    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            DtdxTokenType::Equals
                | DtdxTokenType::Open
                | DtdxTokenType::Close
                | DtdxTokenType::Separator
                | DtdxTokenType::Multiplicity
        )
    }

    /// Kind of the single-character token starting with `c`, if any.
    pub fn from_punctuation(c: char) -> Option<Self> {
        match c {
            '=' => Some(DtdxTokenType::Equals),
            '(' => Some(DtdxTokenType::Open),
            ')' => Some(DtdxTokenType::Close),
            ',' | '|' | '&' => Some(DtdxTokenType::Separator),
            '*' | '+' | '?' => Some(DtdxTokenType::Multiplicity),
            _ => None,
        }
    }
}

impl From<DtdxTokenType> for TokenType {
    fn from(kind: DtdxTokenType) -> Self {
        TokenType(kind as i32)
    }
}

impl TryFrom<TokenType> for DtdxTokenType {
    type Error = TokenType;

    fn try_from(kind: TokenType) -> Result<Self, Self::Error> {
        DtdxTokenType::ALL
            .into_iter()
            .find(|candidate| TokenType::from(*candidate) == kind)
            .ok_or(kind)
    }
}

impl PartialEq<DtdxTokenType> for TokenType {
    fn eq(&self, other: &DtdxTokenType) -> bool {
        *self == TokenType::from(*other)
    }
}

impl fmt::Display for DtdxTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display names for every DTDX token kind, plus the error kind.
pub fn token_names() -> TokenNames {
    let mut names = TokenNames::new();
    for kind in DtdxTokenType::ALL {
        names.register(kind.into(), kind.name());
    }
    names
}
