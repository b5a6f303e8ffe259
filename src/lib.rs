//! # dtdx
//!
//! A scanner for DTDX, an indentation-based notation for document models.
//!
//! The crate has two layers:
//!
//! - [`lexer`]: a generic state-function lexing engine. A scan is a chain of states,
//!   each consuming some input and naming its successor. Tokens are either collected
//!   synchronously or streamed from a producer thread through a bounded channel.
//! - [`dtdx`]: the DTDX states, token kinds and indentation tracking built on it, plus
//!   the configuration and file processing used by the `dtdx` binary.
//!
//! ## Testing
//!
//! Scanner tests compare `(kind, value)` pairs built with the helpers in
//! [`dtdx::testing`]. Whole documents are checked with insta snapshots under `tests/`.

pub mod dtdx;
pub mod lexer;

pub use crate::dtdx::{start, tokenize, try_tokenize, DtdxTokenType, ScanError};
pub use crate::lexer::{Token, TokenStream, TokenType};
