//! Configuration loading for the dtdx toolchain.
//!
//! `defaults/dtdx.default.toml` is embedded into the binary so that docs and runtime
//! behavior stay in sync. Callers layer user files and single-key overrides on top of
//! those defaults via [`Loader`] before deserializing into [`DtdxConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::dtdx::processor::OutputFormat;

const DEFAULT_TOML: &str = include_str!("../../defaults/dtdx.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DtdxConfig {
    pub lexer: LexerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexerConfig {
    /// Capacity of the token channel between scanner and consumer.
    pub lookahead: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored if absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate the configuration.
    pub fn build(self) -> Result<DtdxConfig, ConfigError> {
        let config: DtdxConfig = self.builder.build()?.try_deserialize()?;
        if config.lexer.lookahead == 0 {
            return Err(ConfigError::Message(
                "lexer.lookahead must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DtdxConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.lexer.lookahead, crate::lexer::DEFAULT_LOOKAHEAD);
        assert_eq!(config.output.format, OutputFormat::Simple);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .set_override("lexer.lookahead", 8_i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.lexer.lookahead, 8);
    }

    #[test]
    fn rejects_zero_lookahead() {
        let result = Loader::new()
            .set_override("lexer.lookahead", 0_i64)
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn layers_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dtdx.toml");
        fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert_eq!(config.lexer.lookahead, 2);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/dtdx.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Simple);
    }
}
