//! Generic state-machine lexer
//!
//! This module holds the grammar-independent part of the tokenizer: a cursor over the
//! source, the state-function driver, the token types and the streaming consumer handle.
//! Grammars plug in by defining their token kinds and a graph of [`StateFn`]s; see
//! [`crate::dtdx::scanner`] for the DTDX grammar.
//!
//! The design follows the classic "state functions emit into a channel" lexer: each
//! state scans a little input, emits tokens, and returns the next state, while the
//! consumer pulls tokens at its own pace.

pub mod cursor;
pub mod engine;
pub mod stream;
pub mod token;

pub use cursor::Cursor;
pub use engine::{Lex, StateFn, DEFAULT_LOOKAHEAD};
pub use stream::TokenStream;
pub use token::{NamedToken, Token, TokenNames, TokenType};
