//! Input and output port sets
//!
//! A fixed port set (`InputPortSet`, `OutputPortSet`, ...) is an open port set
//! plus a cardinality and an optional flag. It derefs to its open-set base, so
//! every accessor of the open set is available on the fixed set as well.

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

use super::common::Description;
use super::enums::{
    ExpressionMode, WindowExpressionMode, WindowPunctuationInputMode,
    WindowPunctuationOutputMode, WindowingMode,
};
use super::parameters::{OptionalPortScope, PortScope};

macro_rules! fixed_port_set {
    ($name:ident extends $base:ident) => {
        impl Deref for $name {
            type Target = $base;

            fn deref(&self) -> &$base {
                &self.open
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $base {
                &mut self.open
            }
        }

        impl AsRef<$base> for $name {
            fn as_ref(&self) -> &$base {
                &self.open
            }
        }

        impl AsMut<$base> for $name {
            fn as_mut(&mut self) -> &mut $base {
                &mut self.open
            }
        }

        unsettable!($name {
            optional: bool = false => is_set_optional, set_optional, unset_optional;
        });

        impl $name {
            pub fn new(open: $base, cardinality: u64, optional: bool) -> Self {
                Self {
                    open,
                    cardinality,
                    optional: Some(optional),
                }
            }
        }
    };
}

/// The input ports of a C++ operator: fixed sets first, then at most one open set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputPorts {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub input_port_set: Vec<InputPortSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_port_open_set: Option<InputPortOpenSet>,
}

contains_opt!(InputPorts {
    input_port_open_set: InputPortOpenSet => set_input_port_open_set, take_input_port_open_set;
});

impl InputPorts {
    /// Number of ports covered by the fixed port sets, saturating at `u64::MAX`
    pub fn fixed_port_count(&self) -> u64 {
        self.input_port_set
            .iter()
            .fold(0u64, |n, s| n.saturating_add(s.cardinality))
    }

    pub fn has_open_set(&self) -> bool {
        self.input_port_open_set.is_some()
    }

    /// Whether `index` can name an input port of an operator instance
    pub fn accepts_index(&self, index: u64) -> bool {
        self.has_open_set() || index < self.fixed_port_count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputPortOpenSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windowing_description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuple_mutation_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windowing_mode: Option<WindowingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_punctuation_input_mode: Option<WindowPunctuationInputMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_port: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_expression_mode: Option<WindowExpressionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite_allowed_for_window_expression: Option<bool>,
}

unsettable!(InputPortOpenSet {
    tuple_mutation_allowed: bool = false
        => is_set_tuple_mutation_allowed, set_tuple_mutation_allowed, unset_tuple_mutation_allowed;
    windowing_mode: WindowingMode = WindowingMode::NonWindowed
        => is_set_windowing_mode, set_windowing_mode, unset_windowing_mode;
    window_punctuation_input_mode: WindowPunctuationInputMode = WindowPunctuationInputMode::Expecting
        => is_set_window_punctuation_input_mode, set_window_punctuation_input_mode, unset_window_punctuation_input_mode;
    control_port: bool = false => is_set_control_port, set_control_port, unset_control_port;
    window_expression_mode: WindowExpressionMode = WindowExpressionMode::Constant
        => is_set_window_expression_mode, set_window_expression_mode, unset_window_expression_mode;
    rewrite_allowed_for_window_expression: bool = false
        => is_set_rewrite_allowed_for_window_expression, set_rewrite_allowed_for_window_expression, unset_rewrite_allowed_for_window_expression;
});

contains_opt!(InputPortOpenSet {
    description: Description => set_description, take_description;
    windowing_description: Description => set_windowing_description, take_windowing_description;
});

/// An input port set with a fixed number of ports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputPortSet {
    #[serde(flatten)]
    pub open: InputPortOpenSet,
    /// Number of ports in the set; schema values above `u64::MAX` do not import
    pub cardinality: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

fixed_port_set!(InputPortSet extends InputPortOpenSet);

/// The output ports of a C++ operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputPorts {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_port_set: Vec<OutputPortSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_port_open_set: Option<OutputPortOpenSet>,
}

contains_opt!(OutputPorts {
    output_port_open_set: OutputPortOpenSet => set_output_port_open_set, take_output_port_open_set;
});

impl OutputPorts {
    pub fn fixed_port_count(&self) -> u64 {
        self.output_port_set
            .iter()
            .fold(0u64, |n, s| n.saturating_add(s.cardinality))
    }

    pub fn has_open_set(&self) -> bool {
        self.output_port_open_set.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputPortOpenSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_mode: Option<ExpressionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_assignment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_assignment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_functions: Option<OutputFunctions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_punctuation_output_mode: Option<WindowPunctuationOutputMode>,
    /// Input port whose punctuation is preserved, limited to the `i64` range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_punctuation_input_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_punctuation_port_scope: Option<OptionalPortScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuple_mutation_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_assignment_port_scope: Option<PortScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_nested_custom_output_functions: Option<bool>,
}

unsettable!(OutputPortOpenSet {
    expression_mode: ExpressionMode = ExpressionMode::Attribute
        => is_set_expression_mode, set_expression_mode, unset_expression_mode;
    auto_assignment: bool = false => is_set_auto_assignment, set_auto_assignment, unset_auto_assignment;
    complete_assignment: bool = false
        => is_set_complete_assignment, set_complete_assignment, unset_complete_assignment;
    rewrite_allowed: bool = false => is_set_rewrite_allowed, set_rewrite_allowed, unset_rewrite_allowed;
    window_punctuation_output_mode: WindowPunctuationOutputMode = WindowPunctuationOutputMode::Generating
        => is_set_window_punctuation_output_mode, set_window_punctuation_output_mode, unset_window_punctuation_output_mode;
    tuple_mutation_allowed: bool = false
        => is_set_tuple_mutation_allowed, set_tuple_mutation_allowed, unset_tuple_mutation_allowed;
    allow_nested_custom_output_functions: bool = false
        => is_set_allow_nested_custom_output_functions, set_allow_nested_custom_output_functions, unset_allow_nested_custom_output_functions;
});

contains_opt!(OutputPortOpenSet {
    description: Description => set_description, take_description;
    output_functions: OutputFunctions => set_output_functions, take_output_functions;
    final_punctuation_port_scope: OptionalPortScope
        => set_final_punctuation_port_scope, take_final_punctuation_port_scope;
    output_assignment_port_scope: PortScope
        => set_output_assignment_port_scope, take_output_assignment_port_scope;
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputPortSet {
    #[serde(flatten)]
    pub open: OutputPortOpenSet,
    pub cardinality: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

fixed_port_set!(OutputPortSet extends OutputPortOpenSet);

/// Default output function and the custom output function set type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputFunctions {
    pub default: String,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpInputPorts {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub input_port_set: Vec<JavaOpInputPortSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_port_open_set: Option<JavaOpInputPortOpenSet>,
}

contains_opt!(JavaOpInputPorts {
    input_port_open_set: JavaOpInputPortOpenSet => set_input_port_open_set, take_input_port_open_set;
});

impl JavaOpInputPorts {
    pub fn fixed_port_count(&self) -> u64 {
        self.input_port_set
            .iter()
            .fold(0u64, |n, s| n.saturating_add(s.cardinality))
    }

    pub fn has_open_set(&self) -> bool {
        self.input_port_open_set.is_some()
    }

    pub fn accepts_index(&self, index: u64) -> bool {
        self.has_open_set() || index < self.fixed_port_count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpInputPortOpenSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windowing_description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windowing_mode: Option<WindowingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_punctuation_input_mode: Option<WindowPunctuationInputMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_port: Option<bool>,
}

unsettable!(JavaOpInputPortOpenSet {
    windowing_mode: WindowingMode = WindowingMode::NonWindowed
        => is_set_windowing_mode, set_windowing_mode, unset_windowing_mode;
    window_punctuation_input_mode: WindowPunctuationInputMode = WindowPunctuationInputMode::Expecting
        => is_set_window_punctuation_input_mode, set_window_punctuation_input_mode, unset_window_punctuation_input_mode;
    control_port: bool = false => is_set_control_port, set_control_port, unset_control_port;
});

contains_opt!(JavaOpInputPortOpenSet {
    description: Description => set_description, take_description;
    windowing_description: Description => set_windowing_description, take_windowing_description;
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpInputPortSet {
    #[serde(flatten)]
    pub open: JavaOpInputPortOpenSet,
    pub cardinality: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

fixed_port_set!(JavaOpInputPortSet extends JavaOpInputPortOpenSet);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpOutputPorts {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_port_set: Vec<JavaOpOutputPortSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_port_open_set: Option<JavaOpOutputPortOpenSet>,
}

contains_opt!(JavaOpOutputPorts {
    output_port_open_set: JavaOpOutputPortOpenSet => set_output_port_open_set, take_output_port_open_set;
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpOutputPortOpenSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_punctuation_output_mode: Option<WindowPunctuationOutputMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_punctuation_input_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_punctuation_port_scope: Option<OptionalPortScope>,
}

unsettable!(JavaOpOutputPortOpenSet {
    window_punctuation_output_mode: WindowPunctuationOutputMode = WindowPunctuationOutputMode::Generating
        => is_set_window_punctuation_output_mode, set_window_punctuation_output_mode, unset_window_punctuation_output_mode;
});

contains_opt!(JavaOpOutputPortOpenSet {
    description: Description => set_description, take_description;
    final_punctuation_port_scope: OptionalPortScope
        => set_final_punctuation_port_scope, take_final_punctuation_port_scope;
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpOutputPortSet {
    #[serde(flatten)]
    pub open: JavaOpOutputPortOpenSet,
    pub cardinality: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

fixed_port_set!(JavaOpOutputPortSet extends JavaOpOutputPortOpenSet);
