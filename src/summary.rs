//! Operator summaries
//!
//! The derived properties a documentation generator draws for an operator:
//! threading, parameters split by optionality, and one entry per port set.

use serde::Serialize;
use std::fmt;

use crate::models::*;

/// Threading guarantee of an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Threading {
    /// May be called from several threads at once
    Never,
    /// Always single threaded
    Always,
    /// Single threaded depending on the windows in use
    WindowDependent,
}

impl Threading {
    pub fn from_context(context: SingleThreadedContext) -> Self {
        match context {
            SingleThreadedContext::Never => Threading::Never,
            SingleThreadedContext::Always => Threading::Always,
            SingleThreadedContext::WindowBound
            | SingleThreadedContext::WindowTriggerBound
            | SingleThreadedContext::WindowEvictionBound
            | SingleThreadedContext::WindowPartitionEvictionBound => Threading::WindowDependent,
        }
    }

    /// Short badge drawn on the operator box
    pub fn label(&self) -> &'static str {
        match self {
            Threading::Never => "mt",
            Threading::Always => "st",
            Threading::WindowDependent => "wd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPortSummary {
    /// `None` for the open port set
    pub cardinality: Option<u64>,
    pub optional: bool,
    pub mutable: bool,
    pub punctuation_mode: WindowPunctuationInputMode,
    pub windowing_mode: WindowingMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPortSummary {
    /// `None` for the open port set
    pub cardinality: Option<u64>,
    pub optional: bool,
    pub mutable: bool,
    pub punctuation_mode: WindowPunctuationOutputMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorSummary {
    pub kind: String,
    pub language: OperatorLanguage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub threading: Threading,
    pub mandatory_parameters: Vec<String>,
    pub optional_parameters: Vec<String>,
    pub input_ports: Vec<InputPortSummary>,
    pub output_ports: Vec<OutputPortSummary>,
}

impl OperatorSummary {
    pub fn from_model(kind: impl Into<String>, model: &OperatorModel) -> Self {
        match model {
            OperatorModel::Cpp(op) => cpp_summary(kind.into(), op),
            OperatorModel::Java(op) => java_summary(kind.into(), op),
        }
    }
}

fn split_parameters<'a>(params: impl Iterator<Item = (&'a str, bool)>) -> (Vec<String>, Vec<String>) {
    let (optional, mandatory): (Vec<_>, Vec<_>) = params.partition(|(_, optional)| *optional);
    let names = |v: Vec<(&str, bool)>| -> Vec<String> {
        v.into_iter().map(|(name, _)| name.to_string()).collect()
    };
    (names(mandatory), names(optional))
}

fn cpp_summary(kind: String, op: &OpModel) -> OperatorSummary {
    let ctx = &op.context;
    let (mandatory_parameters, optional_parameters) =
        split_parameters(op.parameters.parameter.iter().map(|p| (p.name.as_str(), p.optional())));

    let input = |cardinality: Option<u64>, optional: bool, set: &InputPortOpenSet| InputPortSummary {
        cardinality,
        optional,
        mutable: set.tuple_mutation_allowed(),
        punctuation_mode: set.window_punctuation_input_mode(),
        windowing_mode: set.windowing_mode(),
    };
    let output = |cardinality: Option<u64>, optional: bool, set: &OutputPortOpenSet| OutputPortSummary {
        cardinality,
        optional,
        mutable: set.tuple_mutation_allowed(),
        punctuation_mode: set.window_punctuation_output_mode(),
    };

    let ports = &op.input_ports;
    let input_ports = ports
        .input_port_set
        .iter()
        .map(|s| input(Some(s.cardinality), s.optional(), &s.open))
        .chain(ports.input_port_open_set.iter().map(|s| input(None, false, s)))
        .collect();
    let ports = &op.output_ports;
    let output_ports = ports
        .output_port_set
        .iter()
        .map(|s| output(Some(s.cardinality), s.optional(), &s.open))
        .chain(ports.output_port_open_set.iter().map(|s| output(None, false, s)))
        .collect();

    OperatorSummary {
        kind,
        language: OperatorLanguage::Cpp,
        icon: ctx.icon_uri.first().map(|i| i.value.clone()),
        description: ctx.description.as_ref().map(|d| d.text.trim().to_string()),
        threading: Threading::from_context(ctx.provides_single_threaded_context()),
        mandatory_parameters,
        optional_parameters,
        input_ports,
        output_ports,
    }
}

fn java_summary(kind: String, op: &JavaOpModel) -> OperatorSummary {
    let ctx = &op.context;
    let (mandatory_parameters, optional_parameters) =
        split_parameters(op.parameters.parameter.iter().map(|p| (p.name.as_str(), p.optional())));

    let input = |cardinality: Option<u64>, optional: bool, set: &JavaOpInputPortOpenSet| InputPortSummary {
        cardinality,
        optional,
        mutable: false,
        punctuation_mode: set.window_punctuation_input_mode(),
        windowing_mode: set.windowing_mode(),
    };
    let output =
        |cardinality: Option<u64>, optional: bool, set: &JavaOpOutputPortOpenSet| OutputPortSummary {
            cardinality,
            optional,
            mutable: false,
            punctuation_mode: set.window_punctuation_output_mode(),
        };

    let ports = &op.input_ports;
    let input_ports = ports
        .input_port_set
        .iter()
        .map(|s| input(Some(s.cardinality), s.optional(), &s.open))
        .chain(ports.input_port_open_set.iter().map(|s| input(None, false, s)))
        .collect();
    let ports = &op.output_ports;
    let output_ports = ports
        .output_port_set
        .iter()
        .map(|s| output(Some(s.cardinality), s.optional(), &s.open))
        .chain(ports.output_port_open_set.iter().map(|s| output(None, false, s)))
        .collect();

    OperatorSummary {
        kind,
        language: OperatorLanguage::Java,
        icon: ctx.icon_uri.first().map(|i| i.value.clone()),
        description: ctx.description.as_ref().map(|d| d.text.trim().to_string()),
        threading: Threading::Never,
        mandatory_parameters,
        optional_parameters,
        input_ports,
        output_ports,
    }
}

fn cardinality_label(cardinality: Option<u64>) -> String {
    cardinality.map_or_else(|| "*".to_string(), |c| c.to_string())
}

impl fmt::Display for OperatorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let language = match self.language {
            OperatorLanguage::Cpp => "C++",
            OperatorLanguage::Java => "Java",
        };
        writeln!(f, "{} ({language}, {})", self.kind, self.threading.label())?;
        if let Some(description) = &self.description {
            writeln!(f, "  {description}")?;
        }
        if !self.mandatory_parameters.is_empty() {
            writeln!(f, "  parameters: {}", self.mandatory_parameters.join(", "))?;
        }
        if !self.optional_parameters.is_empty() {
            writeln!(f, "  optional parameters: {}", self.optional_parameters.join(", "))?;
        }
        for (i, port) in self.input_ports.iter().enumerate() {
            writeln!(
                f,
                "  input {i}: cardinality {}{}{}, {}, {}",
                cardinality_label(port.cardinality),
                if port.optional { ", optional" } else { "" },
                if port.mutable { ", mutable" } else { "" },
                port.windowing_mode,
                port.punctuation_mode,
            )?;
        }
        for (i, port) in self.output_ports.iter().enumerate() {
            writeln!(
                f,
                "  output {i}: cardinality {}{}{}, {}",
                cardinality_label(port.cardinality),
                if port.optional { ", optional" } else { "" },
                if port.mutable { ", mutable" } else { "" },
                port.punctuation_mode,
            )?;
        }
        Ok(())
    }
}
