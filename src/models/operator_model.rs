//! Root of an operator model document

use serde::{Deserialize, Serialize};

use super::context::{Context, JavaOpContext};
use super::parameters::{JavaOpParameters, Parameters};
use super::ports::{InputPorts, JavaOpInputPorts, JavaOpOutputPorts, OutputPorts};

/// Namespace of the operator model elements
pub const OPERATOR_NAMESPACE: &str = "http://www.ibm.com/xmlns/prod/streams/spl/operator";
/// Namespace of descriptions and library declarations
pub const COMMON_NAMESPACE: &str = "http://www.ibm.com/xmlns/prod/streams/spl/common";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Implementation language of a primitive operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorLanguage {
    Cpp,
    Java,
}

/// The single child of `<operatorModel>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperatorModel {
    #[serde(rename = "cppOperatorModel")]
    Cpp(OpModel),
    #[serde(rename = "javaOperatorModel")]
    Java(JavaOpModel),
}

impl OperatorModel {
    pub fn language(&self) -> OperatorLanguage {
        match self {
            OperatorModel::Cpp(_) => OperatorLanguage::Cpp,
            OperatorModel::Java(_) => OperatorLanguage::Java,
        }
    }

    /// XML element name of the model
    pub fn element_name(&self) -> &'static str {
        match self {
            OperatorModel::Cpp(_) => "cppOperatorModel",
            OperatorModel::Java(_) => "javaOperatorModel",
        }
    }

    pub fn as_cpp(&self) -> Option<&OpModel> {
        match self {
            OperatorModel::Cpp(model) => Some(model),
            OperatorModel::Java(_) => None,
        }
    }

    pub fn as_java(&self) -> Option<&JavaOpModel> {
        match self {
            OperatorModel::Java(model) => Some(model),
            OperatorModel::Cpp(_) => None,
        }
    }
}

impl From<OpModel> for OperatorModel {
    fn from(model: OpModel) -> Self {
        OperatorModel::Cpp(model)
    }
}

impl From<JavaOpModel> for OperatorModel {
    fn from(model: JavaOpModel) -> Self {
        OperatorModel::Java(model)
    }
}

/// A C++ primitive operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpModel {
    pub context: Context,
    pub parameters: Parameters,
    pub input_ports: InputPorts,
    pub output_ports: OutputPorts,
}

contains_one!(OpModel {
    context: Context => set_context;
    parameters: Parameters => set_parameters;
    input_ports: InputPorts => set_input_ports;
    output_ports: OutputPorts => set_output_ports;
});

impl OpModel {
    pub fn new(
        context: Context,
        parameters: Parameters,
        input_ports: InputPorts,
        output_ports: OutputPorts,
    ) -> Self {
        Self {
            context,
            parameters,
            input_ports,
            output_ports,
        }
    }
}

/// A Java primitive operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpModel {
    pub context: JavaOpContext,
    pub parameters: JavaOpParameters,
    pub input_ports: JavaOpInputPorts,
    pub output_ports: JavaOpOutputPorts,
}

contains_one!(JavaOpModel {
    context: JavaOpContext => set_context;
    parameters: JavaOpParameters => set_parameters;
    input_ports: JavaOpInputPorts => set_input_ports;
    output_ports: JavaOpOutputPorts => set_output_ports;
});

impl JavaOpModel {
    pub fn new(
        context: JavaOpContext,
        parameters: JavaOpParameters,
        input_ports: JavaOpInputPorts,
        output_ports: JavaOpOutputPorts,
    ) -> Self {
        Self {
            context,
            parameters,
            input_ports,
            output_ports,
        }
    }
}

/// A parsed `<operatorModel>` document.
///
/// Besides the model this keeps what the root element carried for the
/// writer: the namespace declarations, in document order, and
/// `xsi:schemaLocation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorModelDocument {
    pub model: OperatorModel,
    /// `(prefix, uri)` pairs; an empty prefix is the default namespace
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_location: Option<String>,
}

impl OperatorModelDocument {
    /// Wraps a model with the usual namespace bindings
    pub fn new(model: OperatorModel) -> Self {
        Self {
            model,
            namespaces: default_namespaces("cmn"),
            schema_location: None,
        }
    }

    /// Prefix bound to `uri`, if any. `Some("")` means the default namespace.
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|(_, u)| u == uri)
            .map(|(p, _)| p.as_str())
    }

    /// Replaces the model and returns the previous one
    pub fn set_model(&mut self, model: OperatorModel) -> OperatorModel {
        super::notify_containment("OperatorModelDocument", "model", true, true);
        std::mem::replace(&mut self.model, model)
    }
}

impl From<OperatorModel> for OperatorModelDocument {
    fn from(model: OperatorModel) -> Self {
        OperatorModelDocument::new(model)
    }
}

/// Default operator namespace plus `common_prefix` for the common namespace
pub fn default_namespaces(common_prefix: &str) -> Vec<(String, String)> {
    vec![
        (String::new(), OPERATOR_NAMESPACE.to_string()),
        (common_prefix.to_string(), COMMON_NAMESPACE.to_string()),
        ("xsi".to_string(), XSI_NAMESPACE.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::context::JavaOpExecutionSettings;

    #[test]
    fn test_set_context_hands_back_previous() {
        let mut model = OpModel::default();
        let mut ctx = Context::default();
        ctx.set_allow_custom_logic(true);

        let previous = model.set_context(ctx);
        assert_eq!(previous, Context::default());
        assert!(model.context.allow_custom_logic());
    }

    #[test]
    fn test_language_and_element_name() {
        let mut java = JavaOpModel::default();
        java.context.set_execution_settings(JavaOpExecutionSettings {
            class_name: "com.acme.Op".to_string(),
            vm_args: None,
        });
        let model = OperatorModel::from(java);
        assert_eq!(model.language(), OperatorLanguage::Java);
        assert_eq!(model.element_name(), "javaOperatorModel");
        assert!(model.as_cpp().is_none());
    }

    #[test]
    fn test_document_prefix_lookup() {
        let doc = OperatorModelDocument::new(OpModel::default().into());
        assert_eq!(doc.prefix_for(OPERATOR_NAMESPACE), Some(""));
        assert_eq!(doc.prefix_for(COMMON_NAMESPACE), Some("cmn"));
        assert_eq!(doc.prefix_for("urn:other"), None);
    }
}
