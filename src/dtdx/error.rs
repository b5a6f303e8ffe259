//! Lexical errors of the DTDX scanner
//!
//! The scanner never returns these directly. A [`LexError`] is rendered into the message of
//! the terminal error token; consumers that want a Rust error turn that token back into a
//! [`ScanError`] (see [`crate::dtdx::try_tokenize`]).

use std::fmt;

use crate::lexer::Token;

/// The lexical failures of the DTDX grammar. All of them end the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that cannot start any token
    UnexpectedCharacter(char),
    /// A quoted value not closed before the end of the line
    RunawayQuote(String),
    /// A run of dots that is not exactly `...`
    MalformedReference(String),
    /// A dedent to a width that matches no open level
    InconsistentDedent { expected: usize, found: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter(c) => write!(
                f,
                "Unexpected unicode character (U+{:04X} {:?}) in outer context",
                *c as u32, c
            ),
            LexError::RunawayQuote(text) => write!(f, "Runaway quote: {}", text),
            LexError::MalformedReference(text) => {
                write!(f, "Malformed reference ellipsis: {}", text)
            }
            LexError::InconsistentDedent { expected, found } => write!(
                f,
                "Inconsistent dedent. Expecting {} but found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// A scan that ended with an error token, located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub message: String,
    /// Byte offset where the offending text starts.
    pub offset: usize,
    /// 1-based line of `offset`.
    pub line: usize,
    /// 1-based column of `offset`, in characters.
    pub column: usize,
}

impl ScanError {
    /// Locates the error token `token` within `source`.
    ///
    /// A span starting past the end or inside a character is moved back to the
    /// nearest character boundary.
    pub fn from_token(source: &str, token: &Token) -> Self {
        let mut offset = token.span.start.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = source[line_start..offset].chars().count() + 1;
        ScanError {
            message: token.value.clone(),
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for ScanError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenType;

    #[test]
    fn test_messages() {
        assert_eq!(
            LexError::UnexpectedCharacter('@').to_string(),
            "Unexpected unicode character (U+0040 '@') in outer context"
        );
        assert_eq!(
            LexError::UnexpectedCharacter('→').to_string(),
            "Unexpected unicode character (U+2192 '→') in outer context"
        );
        assert_eq!(
            LexError::RunawayQuote("one two".into()).to_string(),
            "Runaway quote: one two"
        );
        assert_eq!(
            LexError::MalformedReference("..".into()).to_string(),
            "Malformed reference ellipsis: .."
        );
        assert_eq!(
            LexError::InconsistentDedent {
                expected: 0,
                found: 2
            }
            .to_string(),
            "Inconsistent dedent. Expecting 0 but found 2"
        );
    }

    #[test]
    fn test_scan_error_location() {
        let source = "first\n  sécond @";
        let offset = source.find('@').unwrap();
        let token = Token::new(TokenType::ERROR, "boom", offset..offset + 1);
        let error = ScanError::from_token(source, &token);

        assert_eq!(error.line, 2);
        assert_eq!(error.column, 10);
        assert_eq!(error.offset, offset);
        assert_eq!(error.to_string(), "2:10: boom");
    }

    #[test]
    fn test_scan_error_offset_inside_character() {
        let source = "a\nb é";
        let inside = source.find('é').unwrap() + 1;
        let token = Token::new(TokenType::ERROR, "boom", inside..inside + 1);
        let error = ScanError::from_token(source, &token);

        assert_eq!(error.offset, inside - 1);
        assert_eq!(error.line, 2);
        assert_eq!(error.column, 3);
    }

    #[test]
    fn test_scan_error_offset_past_end() {
        let token = Token::new(TokenType::ERROR, "boom", 40..41);
        let error = ScanError::from_token("ab", &token);
        assert_eq!((error.offset, error.line, error.column), (2, 1, 3));
    }
}
