//! Configuration for writing and validating operator models

use serde::{Deserialize, Serialize};

/// Errors raised while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(String),
    #[error("Invalid config: {0}")]
    Parse(String),
}

/// Top level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelConfig {
    pub writer: WriterConfig,
    pub validation: ValidationConfig,
}

/// How documents are written back to XML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriterConfig {
    /// Spaces per nesting level (0 = no indentation)
    pub indent: usize,

    /// Write `<?xml version="1.0" encoding="UTF-8"?>` first
    pub xml_declaration: bool,

    /// Prefix for the common namespace when the document binds none
    pub common_prefix: String,

    /// Write `xsi:schemaLocation` back when the document carried one
    pub emit_schema_location: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            xml_declaration: true,
            common_prefix: "cmn".to_string(),
            emit_schema_location: true,
        }
    }
}

/// Which validation findings count and which checks run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
    /// A model with warnings is reported invalid
    pub treat_warnings_as_errors: bool,

    /// Check that port indexes name an existing input port
    pub check_port_references: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            treat_warnings_as_errors: false,
            check_port_references: true,
        }
    }
}

impl ModelConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }

    /// Parse a TOML configuration. Missing keys take their defaults.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a TOML configuration file
    #[cfg(feature = "config-file")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded model config");
        Ok(config)
    }
}

/// Builder for ModelConfig
#[derive(Debug, Default)]
pub struct ModelConfigBuilder {
    config: ModelConfig,
}

impl ModelConfigBuilder {
    /// Set the indentation width
    pub fn indent(mut self, indent: usize) -> Self {
        self.config.writer.indent = indent;
        self
    }

    /// Enable or disable the XML declaration
    pub fn xml_declaration(mut self, enabled: bool) -> Self {
        self.config.writer.xml_declaration = enabled;
        self
    }

    /// Set the fallback prefix of the common namespace
    pub fn common_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.writer.common_prefix = prefix.into();
        self
    }

    /// Enable or disable writing `xsi:schemaLocation`
    pub fn emit_schema_location(mut self, enabled: bool) -> Self {
        self.config.writer.emit_schema_location = enabled;
        self
    }

    pub fn treat_warnings_as_errors(mut self, enabled: bool) -> Self {
        self.config.validation.treat_warnings_as_errors = enabled;
        self
    }

    pub fn check_port_references(mut self, enabled: bool) -> Self {
        self.config.validation.check_port_references = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ModelConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.writer.indent, 2);
        assert!(config.writer.xml_declaration);
        assert_eq!(config.writer.common_prefix, "cmn");
        assert!(!config.validation.treat_warnings_as_errors);
        assert!(config.validation.check_port_references);
    }

    #[test]
    fn test_builder() {
        let config = ModelConfig::builder()
            .indent(4)
            .xml_declaration(false)
            .common_prefix("c")
            .treat_warnings_as_errors(true)
            .build();

        assert_eq!(config.writer.indent, 4);
        assert!(!config.writer.xml_declaration);
        assert_eq!(config.writer.common_prefix, "c");
        assert!(config.writer.emit_schema_location);
        assert!(config.validation.treat_warnings_as_errors);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_value(ModelConfig::default()).unwrap();
        assert_eq!(json["writer"]["xmlDeclaration"], true);
        assert_eq!(json["validation"]["checkPortReferences"], true);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ModelConfig::from_toml_str(
            r#"
            [writer]
            indent = 0

            [validation]
            treatWarningsAsErrors = true
            "#,
        )
        .unwrap();
        assert_eq!(config.writer.indent, 0);
        assert_eq!(config.writer.common_prefix, "cmn");
        assert!(config.validation.treat_warnings_as_errors);
        assert!(config.validation.check_port_references);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn test_invalid_toml_is_rejected() {
        let err = ModelConfig::from_toml_str("[writer]\nindent = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
