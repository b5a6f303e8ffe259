//! Testing helpers for scanner assertions
//!
//! Tests compare `(kind, value)` pairs and leave spans out, except where a test is about
//! spans. Build expectations with [`tok`]:
//!
//! ```rust,ignore
//! use dtdx::dtdx::testing::{lex_pairs, tok};
//! use dtdx::dtdx::tokens::DtdxTokenType::*;
//!
//! assert_eq!(lex_pairs("a=b"), vec![
//!     tok(Identifier, "a"),
//!     tok(Equals, "="),
//!     tok(Identifier, "b"),
//!     tok(Eof, ""),
//! ]);
//! ```

use crate::dtdx::indentation::IndentStack;
use crate::dtdx::scanner::NEWLINE;
use crate::dtdx::tokens::{token_names, DtdxTokenType};
use crate::lexer::{Lex, StateFn, Token, TokenType};

/// Builds an expected `(kind, value)` pair.
pub fn tok(kind: DtdxTokenType, value: &str) -> (TokenType, String) {
    (kind.into(), value.to_string())
}

/// Drops spans from scanner output.
pub fn strip_loc(tokens: Vec<Token>) -> Vec<(TokenType, String)> {
    tokens.into_iter().map(|t| (t.kind, t.value)).collect()
}

/// Scans `source` from the initial state and strips spans.
pub fn lex_pairs(source: &str) -> Vec<(TokenType, String)> {
    lex_pairs_from(source, NEWLINE)
}

/// Scans `source` starting in `state` and strips spans.
pub fn lex_pairs_from(source: &str, state: StateFn<IndentStack>) -> Vec<(TokenType, String)> {
    strip_loc(Lex::new(source, state).run())
}

/// Renders tokens one per line with DTDX names, as the `simple` format does.
pub fn render(tokens: &[Token]) -> String {
    let names = token_names();
    tokens
        .iter()
        .map(|token| names.display(token).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
