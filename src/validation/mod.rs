//! Validation functionality
//!
//! Semantic checks on operator models beyond what the schema enforces:
//! - required attributes left unset
//! - duplicate and malformed names
//! - port index references and port set ordering
//! - references to custom literals and custom output functions

pub mod operator_model;

pub use operator_model::OperatorModelValidator;

use serde::Serialize;
use std::fmt;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Element path from the model root, e.g. `parameters/parameter[2]/name`
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

/// Result of validating one model
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
    #[serde(skip)]
    treat_warnings_as_errors: bool,
}

impl ValidationResult {
    pub(crate) fn new(issues: Vec<ValidationIssue>, treat_warnings_as_errors: bool) -> Self {
        Self {
            issues,
            treat_warnings_as_errors,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// No errors, and no warnings either when warnings count as errors
    pub fn is_valid(&self) -> bool {
        if self.treat_warnings_as_errors {
            self.issues.is_empty()
        } else {
            !self.has_errors()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity) -> ValidationIssue {
        ValidationIssue {
            severity,
            path: "context".to_string(),
            message: "something".to_string(),
        }
    }

    #[test]
    fn test_warnings_only_fail_when_configured() {
        let lenient = ValidationResult::new(vec![issue(Severity::Warning)], false);
        assert!(lenient.is_valid());
        assert_eq!(lenient.warnings().count(), 1);

        let strict = ValidationResult::new(vec![issue(Severity::Warning)], true);
        assert!(!strict.is_valid());
        assert!(!strict.has_errors());
    }

    #[test]
    fn test_issue_display() {
        assert_eq!(issue(Severity::Error).to_string(), "error: context: something");
    }
}
