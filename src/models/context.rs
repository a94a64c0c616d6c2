//! Operator-level context: description, icons, metrics, custom literals,
//! custom output functions, library dependencies and code templates.

use serde::{Deserialize, Serialize};

use super::common::{Description, JavaOpLibrary, Library};
use super::enums::{IncrementalCompilationStrategy, MetricKind, SingleThreadedContext};

/// Context of a C++ primitive operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icon_uri: Vec<IconUri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_literals: Option<Enumerations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_output_functions: Option<CustomOutputFunctions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_dependencies: Option<LibraryDependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provides_single_threaded_context: Option<SingleThreadedContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incremental_compilation_strategy: Option<IncrementalCompilationStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_custom_logic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_templates: Option<CodeTemplates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spl_expression_tree: Option<SplExpressionTree>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capability: Vec<String>,
    /// Written as an attribute of `<context>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_module: Option<String>,
}

unsettable!(Context {
    provides_single_threaded_context: SingleThreadedContext = SingleThreadedContext::Never
        => is_set_provides_single_threaded_context, set_provides_single_threaded_context, unset_provides_single_threaded_context;
    incremental_compilation_strategy: IncrementalCompilationStrategy = IncrementalCompilationStrategy::SourceDependent
        => is_set_incremental_compilation_strategy, set_incremental_compilation_strategy, unset_incremental_compilation_strategy;
    allow_custom_logic: bool = false
        => is_set_allow_custom_logic, set_allow_custom_logic, unset_allow_custom_logic;
});

contains_opt!(Context {
    description: Description => set_description, take_description;
    metrics: Metrics => set_metrics, take_metrics;
    custom_literals: Enumerations => set_custom_literals, take_custom_literals;
    custom_output_functions: CustomOutputFunctions => set_custom_output_functions, take_custom_output_functions;
    library_dependencies: LibraryDependencies => set_library_dependencies, take_library_dependencies;
    code_templates: CodeTemplates => set_code_templates, take_code_templates;
    spl_expression_tree: SplExpressionTree => set_spl_expression_tree, take_spl_expression_tree;
});

impl Context {
    /// Looks up a custom literal enumeration by name
    pub fn enumeration(&self, name: &str) -> Option<&Enumeration> {
        self.custom_literals
            .as_ref()?
            .enumeration
            .iter()
            .find(|e| e.name == name)
    }

    /// Looks up a custom output function set by name
    pub fn custom_output_function_set(&self, name: &str) -> Option<&CustomOutputFunctionSet> {
        self.custom_output_functions
            .as_ref()?
            .custom_output_function
            .iter()
            .find(|s| s.name == name)
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capability.iter().any(|c| c == capability)
    }
}

/// Context of a Java primitive operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icon_uri: Vec<IconUri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_literals: Option<Enumerations>,
    pub execution_settings: JavaOpExecutionSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_dependencies: Option<JavaOpLibraryDependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_templates: Option<CodeTemplates>,
}

contains_one!(JavaOpContext {
    execution_settings: JavaOpExecutionSettings => set_execution_settings;
});

contains_opt!(JavaOpContext {
    description: Description => set_description, take_description;
    metrics: Metrics => set_metrics, take_metrics;
    custom_literals: Enumerations => set_custom_literals, take_custom_literals;
    library_dependencies: JavaOpLibraryDependencies => set_library_dependencies, take_library_dependencies;
    code_templates: CodeTemplates => set_code_templates, take_code_templates;
});

impl JavaOpContext {
    pub fn enumeration(&self, name: &str) -> Option<&Enumeration> {
        self.custom_literals
            .as_ref()?
            .enumeration
            .iter()
            .find(|e| e.name == name)
    }
}

/// Icon shown for the operator in graphical tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IconUri {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}

unsettable!(IconUri {
    size: i32 = 0 => is_set_size, set_size, unset_size;
});

impl IconUri {
    pub fn new(value: impl Into<String>, size: i32) -> Self {
        Self {
            value: value.into(),
            size: Some(size),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metric: Vec<Metric>,
}

/// A custom metric exposed by the operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metric {
    pub name: String,
    pub description: Description,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MetricKind>,
    /// Dynamic metrics are created at runtime rather than declared up front
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,
}

unsettable!(Metric {
    kind: MetricKind = MetricKind::Gauge => is_set_kind, set_kind, unset_kind;
    dynamic: bool = false => is_set_dynamic, set_dynamic, unset_dynamic;
});

contains_one!(Metric {
    description: Description => set_description;
});

impl Metric {
    pub fn new(name: impl Into<String>, description: impl Into<Description>, kind: MetricKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: Some(kind),
            dynamic: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Enumerations {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<Enumeration>,
}

/// A custom literal enumeration usable as a parameter type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Enumeration {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomOutputFunctions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_output_function: Vec<CustomOutputFunctionSet>,
}

/// A named set of output functions (e.g. the aggregate functions)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomOutputFunctionSet {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub function: Vec<CustomOutputFunction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomOutputFunction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    /// SPL prototype, e.g. `<any T> T Max(T)`
    pub prototype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudo_function: Option<bool>,
}

unsettable!(CustomOutputFunction {
    pseudo_function: bool = false => is_set_pseudo_function, set_pseudo_function, unset_pseudo_function;
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LibraryDependencies {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub library: Vec<Library>,
}

/// Java library dependencies; the schema requires at least one library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpLibraryDependencies {
    pub library: Vec<JavaOpLibrary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeTemplates {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub code_template: Vec<CodeTemplate>,
}

/// An invocation template offered by IDE content assist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    pub template: String,
    /// Written as an attribute
    pub name: String,
}

/// Which expression trees the compiler embeds in the operator instance model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplExpressionTree {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpp_code: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<bool>,
}

unsettable!(SplExpressionTree {
    cpp_code: bool = false => is_set_cpp_code, set_cpp_code, unset_cpp_code;
    output: bool = false => is_set_output, set_output, unset_output;
    param: bool = false => is_set_param, set_param, unset_param;
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpExecutionSettings {
    /// Fully qualified name of the operator implementation class
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_args: Option<JavaOpVmArgs>,
}

contains_opt!(JavaOpExecutionSettings {
    vm_args: JavaOpVmArgs => set_vm_args, take_vm_args;
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaOpVmArgs {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vm_arg: Vec<String>,
}
