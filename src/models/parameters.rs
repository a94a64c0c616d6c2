//! Operator parameters and port scopes

use serde::{Deserialize, Serialize};

use super::common::Description;
use super::enums::{ExpressionMode, JavaOpExpressionMode};

/// Parameters of a C++ operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Parameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    /// Whether parameters not declared here are accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_any: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameter: Vec<Parameter>,
}

unsettable!(Parameters {
    allow_any: bool = false => is_set_allow_any, set_allow_any, unset_allow_any;
});

contains_opt!(Parameters {
    description: Description => set_description, take_description;
});

impl Parameters {
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameter.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_mode: Option<ExpressionMode>,
    /// SPL type of the parameter value
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Number of values; -1 means any number. Limited to the `i64` range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_scope: Option<PortScope>,
    /// Name of the custom output function set this parameter draws on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_output_function: Option<String>,
}

unsettable!(Parameter {
    optional: bool = false => is_set_optional, set_optional, unset_optional;
    rewrite_allowed: bool = false => is_set_rewrite_allowed, set_rewrite_allowed, unset_rewrite_allowed;
    expression_mode: ExpressionMode = ExpressionMode::Attribute
        => is_set_expression_mode, set_expression_mode, unset_expression_mode;
});

contains_opt!(Parameter {
    description: Description => set_description, take_description;
    port_scope: PortScope => set_port_scope, take_port_scope;
});

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Parameters of a Java operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameter: Vec<JavaOpParameter>,
}

contains_opt!(JavaOpParameters {
    description: Description => set_description, take_description;
});

impl JavaOpParameters {
    pub fn get(&self, name: &str) -> Option<&JavaOpParameter> {
        self.parameter.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpParameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_mode: Option<JavaOpExpressionMode>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<i64>,
}

unsettable!(JavaOpParameter {
    optional: bool = false => is_set_optional, set_optional, unset_optional;
    expression_mode: JavaOpExpressionMode = JavaOpExpressionMode::Attribute
        => is_set_expression_mode, set_expression_mode, unset_expression_mode;
});

contains_opt!(JavaOpParameter {
    description: Description => set_description, take_description;
});

impl JavaOpParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Input port indexes an expression may reference; at least one port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortScope {
    pub port: Vec<u64>,
}

/// Input port indexes, possibly none
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionalPortScope {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub port: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_defaults() {
        let param = Parameter::new("filter");
        assert!(!param.optional());
        assert!(!param.rewrite_allowed());
        assert_eq!(param.expression_mode(), ExpressionMode::Attribute);
        assert!(!param.is_set_expression_mode());
    }

    #[test]
    fn test_port_scope_moves_between_parameters() {
        let mut first = Parameter::new("a");
        let mut second = Parameter::new("b");
        first.set_port_scope(PortScope { port: vec![0, 1] });

        // Moving the child out of one parent and into another leaves the
        // first parent without it.
        if let Some(scope) = first.take_port_scope() {
            second.set_port_scope(scope);
        }
        assert!(first.port_scope.is_none());
        assert_eq!(second.port_scope.as_ref().map(|s| s.port.len()), Some(2));
    }

    #[test]
    fn test_lookup_by_name() {
        let params = Parameters {
            parameter: vec![Parameter::new("file"), Parameter::new("format")],
            ..Default::default()
        };
        assert!(params.get("format").is_some());
        assert!(params.get("missing").is_none());
    }
}
