//! File processing API for dtdx sources
//!
//! This module scans dtdx files through the streaming lexer and renders the resulting
//! tokens in one of the [`OutputFormat`]s. It is what the `dtdx` binary calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use dtdx::dtdx::processor::{process_source, OutputFormat};
//!
//! let output = process_source("paragraph\n    title?\n", OutputFormat::Simple, 2)?;
//! assert!(output.starts_with("{identifier, \"paragraph\"}"));
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::dtdx::error::ScanError;
use crate::dtdx::{collect_tokens, scanner, token_names};
use crate::lexer::{Token, TokenNames};

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `{kind, "value"}` line per token
    Simple,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Simple, OutputFormat::Json, OutputFormat::Yaml];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| ProcessingError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    IoError(String),
    InvalidFormat(String),
    Scan(ScanError),
    Serialization(String),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::Scan(err) => write!(f, "{}", err),
            ProcessingError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl From<ScanError> for ProcessingError {
    fn from(err: ScanError) -> Self {
        ProcessingError::Scan(err)
    }
}

/// Serialized form of a token, with its kind spelled out.
#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    kind: Cow<'static, str>,
    value: &'a str,
    start: usize,
    end: usize,
}

/// Process a dtdx file into the given format
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    format: OutputFormat,
    lookahead: usize,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content =
        fs::read_to_string(file_path).map_err(|e| ProcessingError::IoError(e.to_string()))?;
    info!(path = %file_path.display(), bytes = content.len(), "processing file");
    process_source(&content, format, lookahead)
}

/// Scan `source` through the token stream and format the tokens.
pub fn process_source(
    source: &str,
    format: OutputFormat,
    lookahead: usize,
) -> Result<String, ProcessingError> {
    let stream = scanner(source).start_with_lookahead(lookahead);
    let tokens = collect_tokens(source, stream)?;
    debug!(tokens = tokens.len(), %format, "scan finished");
    format_tokens(&tokens, &token_names(), format)
}

/// Format tokens according to the specified format
pub fn format_tokens(
    tokens: &[Token],
    names: &TokenNames,
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&names.display(token).to_string());
                result.push('\n');
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&records(tokens, names))
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml => serde_yaml::to_string(&records(tokens, names))
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
    }
}

fn records<'a>(tokens: &'a [Token], names: &TokenNames) -> Vec<TokenRecord<'a>> {
    tokens
        .iter()
        .map(|token| TokenRecord {
            kind: names.name(token.kind),
            value: &token.value,
            start: token.span.start,
            end: token.span.end,
        })
        .collect()
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    OutputFormat::ALL
        .iter()
        .map(|format| format.name().to_string())
        .collect()
}
