//! Token values produced by the lexing engine
//!
//!     A [`Token`] is an immutable `(kind, value)` pair plus the byte span it was cut from.
//!     The engine knows nothing about the grammar being scanned: token kinds are small
//!     integers defined by each scanner, with a single reserved value,
//!     [`TokenType::ERROR`], used for the terminal diagnostic token.
//!
//!     Display names are diagnostics only. Each scanner builds its own [`TokenNames`]
//!     registry; nothing here is global.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// Category of a token, defined by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenType(pub i32);

impl TokenType {
    /// Reserved for lexical errors. The token value is the diagnostic message.
    pub const ERROR: TokenType = TokenType(-1);

    pub fn is_error(self) -> bool {
        self == Self::ERROR
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error() {
            write!(f, "error")
        } else {
            write!(f, "tok_{}", self.0)
        }
    }
}

/// A lexeme detected by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenType,
    /// Source text of the token, or the message for error tokens.
    pub value: String,
    /// Byte range in the source.
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenType, value: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            kind,
            value: value.into(),
            span,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {:?}}}", self.kind, self.value)
    }
}

/// Maps token kinds to display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNames {
    names: BTreeMap<TokenType, &'static str>,
}

impl TokenNames {
    /// A registry that only knows the reserved error kind.
    pub fn new() -> Self {
        let mut names = BTreeMap::new();
        names.insert(TokenType::ERROR, "error");
        TokenNames { names }
    }

    pub fn register(&mut self, kind: TokenType, name: &'static str) -> &mut Self {
        self.names.insert(kind, name);
        self
    }

    /// Display name of `kind`, falling back to `tok_<n>` when unregistered.
    pub fn name(&self, kind: TokenType) -> Cow<'static, str> {
        match self.names.get(&kind) {
            Some(name) => Cow::Borrowed(*name),
            None => Cow::Owned(kind.to_string()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenType, &'static str)> + '_ {
        self.names.iter().map(|(kind, name)| (*kind, *name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Wraps `token` so that it displays with registered names.
    pub fn display<'a>(&'a self, token: &'a Token) -> NamedToken<'a> {
        NamedToken { names: self, token }
    }
}

impl Default for TokenNames {
    fn default() -> Self {
        Self::new()
    }
}

/// Display adapter returned by [`TokenNames::display`].
pub struct NamedToken<'a> {
    names: &'a TokenNames,
    token: &'a Token,
}

impl fmt::Display for NamedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {:?}}}",
            self.names.name(self.token.kind),
            self.token.value
        )
    }
}
