//! Operator model validation
//!
//! Collects every finding instead of stopping at the first one, so a tool
//! can report all problems of a model at once.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{Severity, ValidationIssue, ValidationResult};
use crate::config::ValidationConfig;
use crate::models::*;

static SPL_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Validator for operator models
#[derive(Debug, Clone, Default)]
pub struct OperatorModelValidator {
    config: ValidationConfig,
}

impl OperatorModelValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a model. Never fails; problems are returned as issues.
    pub fn validate(&self, model: &OperatorModel) -> ValidationResult {
        let mut checker = Checker {
            config: &self.config,
            issues: Vec::new(),
        };
        match model {
            OperatorModel::Cpp(op) => checker.cpp_model(op),
            OperatorModel::Java(op) => checker.java_model(op),
        }

        let result = ValidationResult::new(checker.issues, self.config.treat_warnings_as_errors);
        debug!(
            model = model.element_name(),
            errors = result.errors().count(),
            warnings = result.warnings().count(),
            "validated operator model"
        );
        result
    }
}

/// Port counts of an operator's input side
#[derive(Debug, Clone, Copy)]
struct InputShape {
    /// Ports of the non-optional fixed sets
    min: u64,
    /// Ports of all fixed sets
    max: u64,
    open: bool,
}

impl InputShape {
    fn new(sets: impl Iterator<Item = (u64, bool)>, open: bool) -> Self {
        let (min, max) = sets.fold((0u64, 0u64), |(min, max), (cardinality, optional)| {
            let min = if optional { min } else { min.saturating_add(cardinality) };
            (min, max.saturating_add(cardinality))
        });
        Self { min, max, open }
    }

    fn single_port(&self) -> bool {
        !self.open && self.min == 1 && self.max == 1
    }
}

/// Names declared in the context that parameters and ports may refer to
struct Declarations<'a> {
    enumerations: HashSet<&'a str>,
    output_functions: HashSet<&'a str>,
}

impl<'a> Declarations<'a> {
    fn new(literals: Option<&'a Enumerations>, functions: Option<&'a CustomOutputFunctions>) -> Self {
        Self {
            enumerations: literals
                .map(|l| l.enumeration.iter().map(|e| e.name.as_str()).collect())
                .unwrap_or_default(),
            output_functions: functions
                .map(|f| f.custom_output_function.iter().map(|s| s.name.as_str()).collect())
                .unwrap_or_default(),
        }
    }
}

struct Checker<'c> {
    config: &'c ValidationConfig,
    issues: Vec<ValidationIssue>,
}

impl Checker<'_> {
    fn push(&mut self, severity: Severity, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            severity,
            path: path.into(),
            message: message.into(),
        });
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, path, message);
    }

    fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, path, message);
    }

    fn require<T>(&mut self, path: &str, feature: &str, value: &Option<T>) {
        if value.is_none() {
            self.error(format!("{path}/{feature}"), format!("Required '{feature}' is not set"));
        }
    }

    fn identifier(&mut self, path: String, what: &str, name: &str) {
        if !SPL_IDENTIFIER.is_match(name) {
            self.error(path, format!("{what} name '{name}' is not a valid SPL identifier"));
        }
    }

    fn unique<'n>(&mut self, path: &str, field: &str, what: &str, names: impl IntoIterator<Item = &'n str>) {
        let mut seen = HashSet::new();
        for (i, name) in names.into_iter().enumerate() {
            if !seen.insert(name) {
                self.error(format!("{path}[{i}]/{field}"), format!("Duplicate {what} '{name}'"));
            }
        }
    }

    fn port_references(&mut self, path: &str, ports: &[u64], inputs: &InputShape) {
        if !self.config.check_port_references || inputs.open {
            return;
        }
        for (i, port) in ports.iter().enumerate() {
            if *port >= inputs.max {
                self.error(
                    format!("{path}/port[{i}]"),
                    format!("Port {port} does not name an input port (operator has {})", inputs.max),
                );
            }
        }
    }

    fn cpp_model(&mut self, model: &OpModel) {
        let ctx = &model.context;
        let declared = Declarations::new(ctx.custom_literals.as_ref(), ctx.custom_output_functions.as_ref());
        let inputs = InputShape::new(
            model.input_ports.input_port_set.iter().map(|s| (s.cardinality, s.optional())),
            model.input_ports.has_open_set(),
        );

        self.require("context", "providesSingleThreadedContext", &ctx.provides_single_threaded_context);
        self.icons(&ctx.icon_uri);
        self.metrics(ctx.metrics.as_ref());
        self.custom_literals(ctx.custom_literals.as_ref());
        if let Some(functions) = &ctx.custom_output_functions {
            self.unique(
                "context/customOutputFunctions/customOutputFunction",
                "name",
                "custom output function set",
                functions.custom_output_function.iter().map(|s| s.name.as_str()),
            );
        }
        self.code_templates(ctx.code_templates.as_ref());

        self.parameters(&model.parameters, &declared, &inputs);
        self.input_ports(&model.input_ports);
        self.output_ports(&model.output_ports, &declared, &inputs);
    }

    fn java_model(&mut self, model: &JavaOpModel) {
        let ctx = &model.context;
        let declared = Declarations::new(ctx.custom_literals.as_ref(), None);
        let inputs = InputShape::new(
            model.input_ports.input_port_set.iter().map(|s| (s.cardinality, s.optional())),
            model.input_ports.has_open_set(),
        );

        self.icons(&ctx.icon_uri);
        self.metrics(ctx.metrics.as_ref());
        self.custom_literals(ctx.custom_literals.as_ref());
        if ctx.library_dependencies.as_ref().is_some_and(|d| d.library.is_empty()) {
            self.error("context/libraryDependencies", "Library dependencies declare no library");
        }
        self.code_templates(ctx.code_templates.as_ref());

        self.java_parameters(&model.parameters, &declared);
        self.java_input_ports(&model.input_ports);
        self.java_output_ports(&model.output_ports, &inputs);
    }

    fn icons(&mut self, icons: &[IconUri]) {
        for (i, icon) in icons.iter().enumerate() {
            if icon.size.is_none() {
                self.error(format!("context/iconUri[{i}]/@size"), "Required 'size' is not set");
            }
        }
    }

    fn metrics(&mut self, metrics: Option<&Metrics>) {
        let Some(metrics) = metrics else { return };
        for (i, metric) in metrics.metric.iter().enumerate() {
            let path = format!("context/metrics/metric[{i}]");
            self.identifier(format!("{path}/name"), "Metric", &metric.name);
            self.require(&path, "kind", &metric.kind);
        }
        self.unique(
            "context/metrics/metric",
            "name",
            "metric",
            metrics.metric.iter().map(|m| m.name.as_str()),
        );
    }

    fn custom_literals(&mut self, literals: Option<&Enumerations>) {
        let Some(literals) = literals else { return };
        for (i, e) in literals.enumeration.iter().enumerate() {
            self.identifier(
                format!("context/customLiterals/enumeration[{i}]/name"),
                "Enumeration",
                &e.name,
            );
        }
        self.unique(
            "context/customLiterals/enumeration",
            "name",
            "custom literal enumeration",
            literals.enumeration.iter().map(|e| e.name.as_str()),
        );
    }

    fn code_templates(&mut self, templates: Option<&CodeTemplates>) {
        let Some(templates) = templates else { return };
        self.unique(
            "context/codeTemplates/codeTemplate",
            "@name",
            "code template",
            templates.code_template.iter().map(|t| t.name.as_str()),
        );
    }

    fn cardinality(&mut self, path: &str, cardinality: Option<i64>) {
        if let Some(c) = cardinality.filter(|c| *c < -1) {
            self.error(format!("{path}/cardinality"), format!("Cardinality {c} is below -1"));
        }
    }

    fn custom_literal_type(&mut self, path: &str, type_: Option<&String>, declared: &Declarations<'_>) {
        if let Some(type_) = type_.filter(|t| !declared.enumerations.contains(t.as_str())) {
            self.warning(
                format!("{path}/type"),
                format!("Custom literal type '{type_}' is not declared in customLiterals"),
            );
        }
    }

    fn parameters(&mut self, params: &Parameters, declared: &Declarations<'_>, inputs: &InputShape) {
        self.require("parameters", "allowAny", &params.allow_any);
        for (i, p) in params.parameter.iter().enumerate() {
            let path = format!("parameters/parameter[{i}]");
            self.identifier(format!("{path}/name"), "Parameter", &p.name);
            self.require(&path, "optional", &p.optional);
            self.require(&path, "rewriteAllowed", &p.rewrite_allowed);
            self.require(&path, "expressionMode", &p.expression_mode);
            if p.expression_mode == Some(ExpressionMode::Nonexistent) {
                self.error(
                    format!("{path}/expressionMode"),
                    format!("Parameter '{}' cannot use expression mode Nonexistent", p.name),
                );
            }
            if p.expression_mode == Some(ExpressionMode::CustomLiteral) {
                self.custom_literal_type(&path, p.type_.as_ref(), declared);
            }
            self.cardinality(&path, p.cardinality);
            if let Some(scope) = &p.port_scope {
                let scope_path = format!("{path}/portScope");
                if scope.port.is_empty() {
                    self.error(scope_path.clone(), "Port scope lists no port");
                }
                self.port_references(&scope_path, &scope.port, inputs);
            }
            let unknown_function = p
                .custom_output_function
                .as_ref()
                .filter(|f| !declared.output_functions.contains(f.as_str()));
            if let Some(function) = unknown_function {
                self.error(
                    format!("{path}/customOutputFunction"),
                    format!("Custom output function set '{function}' is not declared"),
                );
            }
        }
        self.unique(
            "parameters/parameter",
            "name",
            "parameter",
            params.parameter.iter().map(|p| p.name.as_str()),
        );
    }

    fn java_parameters(&mut self, params: &JavaOpParameters, declared: &Declarations<'_>) {
        for (i, p) in params.parameter.iter().enumerate() {
            let path = format!("parameters/parameter[{i}]");
            self.identifier(format!("{path}/name"), "Parameter", &p.name);
            self.require(&path, "optional", &p.optional);
            if p.expression_mode == Some(JavaOpExpressionMode::CustomLiteral) {
                self.custom_literal_type(&path, p.type_.as_ref(), declared);
            }
            self.cardinality(&path, p.cardinality);
        }
        self.unique(
            "parameters/parameter",
            "name",
            "parameter",
            params.parameter.iter().map(|p| p.name.as_str()),
        );
    }

    /// Optional port sets may only be followed by optional ones
    fn optional_order(&mut self, path: &str, optionals: impl Iterator<Item = Option<bool>>) {
        let mut seen_optional = false;
        for (i, optional) in optionals.enumerate() {
            let optional = optional.unwrap_or(false);
            if seen_optional && !optional {
                self.error(
                    format!("{path}[{i}]/optional"),
                    "A non-optional port set follows an optional one",
                );
            }
            seen_optional |= optional;
        }
    }

    fn input_ports(&mut self, ports: &InputPorts) {
        for (i, set) in ports.input_port_set.iter().enumerate() {
            let path = format!("inputPorts/inputPortSet[{i}]");
            self.input_open_set(&path, set);
            self.require(&path, "optional", &set.optional);
        }
        if let Some(open) = &ports.input_port_open_set {
            self.input_open_set("inputPorts/inputPortOpenSet", open);
        }
        self.optional_order(
            "inputPorts/inputPortSet",
            ports.input_port_set.iter().map(|s| s.optional),
        );
    }

    fn input_open_set(&mut self, path: &str, set: &InputPortOpenSet) {
        self.require(path, "tupleMutationAllowed", &set.tuple_mutation_allowed);
        self.require(path, "windowingMode", &set.windowing_mode);
        self.require(path, "windowPunctuationInputMode", &set.window_punctuation_input_mode);
    }

    fn output_ports(&mut self, ports: &OutputPorts, declared: &Declarations<'_>, inputs: &InputShape) {
        for (i, set) in ports.output_port_set.iter().enumerate() {
            let path = format!("outputPorts/outputPortSet[{i}]");
            self.output_open_set(&path, set, declared, inputs);
            self.require(&path, "optional", &set.optional);
        }
        if let Some(open) = &ports.output_port_open_set {
            self.output_open_set("outputPorts/outputPortOpenSet", open, declared, inputs);
        }
        self.optional_order(
            "outputPorts/outputPortSet",
            ports.output_port_set.iter().map(|s| s.optional),
        );
    }

    fn output_open_set(
        &mut self,
        path: &str,
        set: &OutputPortOpenSet,
        declared: &Declarations<'_>,
        inputs: &InputShape,
    ) {
        self.require(path, "expressionMode", &set.expression_mode);
        self.require(path, "autoAssignment", &set.auto_assignment);
        self.require(path, "completeAssignment", &set.complete_assignment);
        self.require(path, "rewriteAllowed", &set.rewrite_allowed);
        self.require(path, "windowPunctuationOutputMode", &set.window_punctuation_output_mode);
        self.require(path, "tupleMutationAllowed", &set.tuple_mutation_allowed);

        self.punctuation(
            path,
            set.window_punctuation_output_mode(),
            set.window_punctuation_input_port,
            inputs,
        );
        if let Some(scope) = &set.final_punctuation_port_scope {
            self.port_references(&format!("{path}/finalPunctuationPortScope"), &scope.port, inputs);
        }
        if let Some(scope) = &set.output_assignment_port_scope {
            let scope_path = format!("{path}/outputAssignmentPortScope");
            if scope.port.is_empty() {
                self.error(scope_path.clone(), "Port scope lists no port");
            }
            self.port_references(&scope_path, &scope.port, inputs);
        }
        let unknown_functions = set
            .output_functions
            .as_ref()
            .filter(|f| !declared.output_functions.contains(f.type_.as_str()));
        if let Some(functions) = unknown_functions {
            self.error(
                format!("{path}/outputFunctions/type"),
                format!("Custom output function set '{}' is not declared", functions.type_),
            );
        }
    }

    fn punctuation(
        &mut self,
        path: &str,
        mode: WindowPunctuationOutputMode,
        input_port: Option<i64>,
        inputs: &InputShape,
    ) {
        // Negative indexes mean "no port".
        let input_port = input_port.filter(|p| *p >= 0);
        let port_path = format!("{path}/windowPunctuationInputPort");
        match (mode, input_port) {
            (WindowPunctuationOutputMode::Preserving, Some(port)) => {
                if self.config.check_port_references && !inputs.open && port as u64 >= inputs.max {
                    self.error(
                        port_path,
                        format!("Port {port} does not name an input port (operator has {})", inputs.max),
                    );
                }
            }
            (WindowPunctuationOutputMode::Preserving, None) => {
                if !inputs.single_port() {
                    self.error(
                        port_path,
                        "A punctuation preserving output of an operator with several input ports must name the input port it preserves",
                    );
                }
            }
            (_, Some(_)) => {
                self.warning(
                    port_path,
                    format!("windowPunctuationInputPort has no effect with punctuation mode {mode}"),
                );
            }
            (_, None) => {}
        }
    }

    fn java_input_ports(&mut self, ports: &JavaOpInputPorts) {
        for (i, set) in ports.input_port_set.iter().enumerate() {
            let path = format!("inputPorts/inputPortSet[{i}]");
            self.java_input_open_set(&path, set);
            self.require(&path, "optional", &set.optional);
        }
        if let Some(open) = &ports.input_port_open_set {
            self.java_input_open_set("inputPorts/inputPortOpenSet", open);
        }
        self.optional_order(
            "inputPorts/inputPortSet",
            ports.input_port_set.iter().map(|s| s.optional),
        );
    }

    fn java_input_open_set(&mut self, path: &str, set: &JavaOpInputPortOpenSet) {
        self.require(path, "windowingMode", &set.windowing_mode);
        self.require(path, "windowPunctuationInputMode", &set.window_punctuation_input_mode);
    }

    fn java_output_ports(&mut self, ports: &JavaOpOutputPorts, inputs: &InputShape) {
        for (i, set) in ports.output_port_set.iter().enumerate() {
            let path = format!("outputPorts/outputPortSet[{i}]");
            self.java_output_open_set(&path, set, inputs);
            self.require(&path, "optional", &set.optional);
        }
        if let Some(open) = &ports.output_port_open_set {
            self.java_output_open_set("outputPorts/outputPortOpenSet", open, inputs);
        }
        self.optional_order(
            "outputPorts/outputPortSet",
            ports.output_port_set.iter().map(|s| s.optional),
        );
    }

    fn java_output_open_set(&mut self, path: &str, set: &JavaOpOutputPortOpenSet, inputs: &InputShape) {
        self.require(path, "windowPunctuationOutputMode", &set.window_punctuation_output_mode);
        self.punctuation(
            path,
            set.window_punctuation_output_mode(),
            set.window_punctuation_input_port,
            inputs,
        );
        if let Some(scope) = &set.final_punctuation_port_scope {
            self.port_references(&format!("{path}/finalPunctuationPortScope"), &scope.port, inputs);
        }
    }
}
