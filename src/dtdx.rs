//! The DTDX grammar scanner
//!
//!     DTDX mocks up a document instance in plain, indented text in order to define a
//!     document model that can later be emitted as an XML DTD:
//!
//!         # The first top level definition.
//!         paragraph id=#ID justify=(left|right|center)
//!             title?
//!             line...+
//!
//!     This module turns such text into tokens. It builds on the generic engine in
//!     [`crate::lexer`]: the states live in [`scanner`], the token kinds in [`tokens`],
//!     and the indentation stack the engine carries for them in [`indentation`].
//!
//! Entry points
//!
//!     - [`start`]: stream tokens from a producer thread (the consumer pulls with
//!       `next_token`).
//!     - [`tokenize`]: scan synchronously; a lexical error is the last token.
//!     - [`try_tokenize`]: scan synchronously; a lexical error becomes a [`ScanError`].

pub mod config;
pub mod error;
pub mod indentation;
pub mod processor;
pub mod scanner;
pub mod testing;
pub mod tokens;

pub use error::{LexError, ScanError};
pub use indentation::IndentStack;
pub use scanner::DtdxLex;
pub use tokens::{token_names, DtdxTokenType};

use crate::lexer::{Lex, Token, TokenStream};
use std::sync::Arc;

/// A DTDX lexer positioned at the start of `source`, not yet running.
pub fn scanner(source: impl Into<Arc<str>>) -> DtdxLex {
    Lex::new(source, scanner::NEWLINE)
}

/// Starts scanning `source` on a producer thread.
pub fn start(source: impl Into<Arc<str>>) -> TokenStream {
    scanner(source).start()
}

/// Scans `source` on the calling thread.
///
/// The last token is either `eof` or the error token.
pub fn tokenize(source: &str) -> Vec<Token> {
    scanner(source).run()
}

/// Scans `source` on the calling thread, turning a lexical error into a [`ScanError`].
pub fn try_tokenize(source: &str) -> Result<Vec<Token>, ScanError> {
    collect_tokens(source, tokenize(source))
}

/// Checks a finished token sequence of `source` for the terminal error token.
pub fn collect_tokens(
    source: &str,
    tokens: impl IntoIterator<Item = Token>,
) -> Result<Vec<Token>, ScanError> {
    let mut collected = Vec::new();
    for token in tokens {
        if token.is_error() {
            return Err(ScanError::from_token(source, &token));
        }
        collected.push(token);
    }
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenType;

    #[test]
    fn test_tokenize_keeps_error_in_band() {
        let tokens = tokenize("a ..");
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenType::ERROR);
        assert_eq!(last.value, "Malformed reference ellipsis: ..");
    }

    #[test]
    fn test_try_tokenize_locates_error() {
        let error = try_tokenize("a\nb ....").unwrap_err();
        assert_eq!(error.message, "Malformed reference ellipsis: ....");
        assert_eq!(error.line, 2);
        assert_eq!(error.column, 3);
    }

    #[test]
    fn test_try_tokenize_success() {
        let tokens = try_tokenize("a...").unwrap();
        let kinds: Vec<TokenType> = tokens.iter().map(|t| t.kind).collect();
        let expected: Vec<TokenType> = vec![
            DtdxTokenType::Identifier.into(),
            DtdxTokenType::Reference.into(),
            DtdxTokenType::Eof.into(),
        ];
        assert_eq!(kinds, expected);
        assert_eq!(tokens[1].span, 1..4);
    }

    #[test]
    fn test_stream_matches_tokenize() {
        let source = "paragraph\n    title?\n    line...+\n";
        let streamed: Vec<Token> = start(source).collect();
        assert_eq!(streamed, tokenize(source));
    }
}
