//! Output formatting for CLI

use std::fmt::Display;

use serde::Serialize;

use super::error::CliError;
use crate::validation::{Severity, ValidationResult};

/// Rendering of command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Render a value as text (via `Display`), JSON, or YAML
pub fn render<T: Serialize + Display>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|s| s + "\n")
            .map_err(|e| CliError::SerializationError(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| CliError::SerializationError(e.to_string()))
        }
    }
}

/// One line per issue, followed by a count line
pub fn format_validation_result(source: &str, result: &ValidationResult) -> String {
    let mut output = String::new();
    for issue in &result.issues {
        let marker = match issue.severity {
            Severity::Error => "✗",
            Severity::Warning => "!",
        };
        output.push_str(&format!("  {marker} {issue}\n"));
    }

    let errors = result.errors().count();
    let warnings = result.warnings().count();
    if result.is_valid() {
        output.push_str(&format!("✓ {source} is valid"));
        if warnings > 0 {
            output.push_str(&format!(" ({warnings} warning(s))"));
        }
    } else {
        output.push_str(&format!(
            "✗ {source}: {errors} error(s), {warnings} warning(s)"
        ));
    }
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationIssue;

    fn issue(severity: Severity, message: &str) -> ValidationIssue {
        ValidationIssue {
            severity,
            path: "context".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_format_valid_result() {
        let result = ValidationResult::new(vec![issue(Severity::Warning, "odd")], false);
        let text = format_validation_result("Beacon.xml", &result);
        assert!(text.contains("! warning: context: odd"));
        assert!(text.ends_with("✓ Beacon.xml is valid (1 warning(s))\n"));
    }

    #[test]
    fn test_format_invalid_result() {
        let result = ValidationResult::new(vec![issue(Severity::Error, "bad")], false);
        let text = format_validation_result("Beacon.xml", &result);
        assert!(text.contains("✗ error: context: bad"));
        assert!(text.ends_with("✗ Beacon.xml: 1 error(s), 0 warning(s)\n"));
    }

    #[test]
    fn test_render_json() {
        #[derive(Serialize)]
        struct Item {
            name: &'static str,
        }
        impl Display for Item {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name)
            }
        }

        let item = Item { name: "Split" };
        assert_eq!(render(&item, OutputFormat::Text).unwrap(), "Split");
        let json: serde_json::Value =
            serde_json::from_str(&render(&item, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["name"], "Split");
        assert_eq!(render(&item, OutputFormat::Yaml).unwrap(), "name: Split\n");
    }
}
