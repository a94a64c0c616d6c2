//! Operator model XML exporter
//!
//! Writes elements in schema sequence order and leaves out everything that
//! is unset, so a document read and written again keeps its is-set state.
//!
//! A `portScope`, `outputAssignmentPortScope` or Java `libraryDependencies`
//! with no children is not written at all, since the schema requires at least
//! one child. The validator reports such containers before they get here.

use std::fmt::Display;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use super::{ExportError, ExportResult};
use crate::config::WriterConfig;
use crate::models::*;

/// Exporter for operator model documents
#[derive(Debug, Clone, Default)]
pub struct OperatorModelExporter {
    config: WriterConfig,
}

impl OperatorModelExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Export a document, keeping its namespace bindings and schema location
    pub fn export(&self, doc: &OperatorModelDocument) -> Result<ExportResult, ExportError> {
        self.write(&doc.model, &doc.namespaces, doc.schema_location.as_deref())
    }

    /// Export a bare model with the default namespace bindings
    pub fn export_model(&self, model: &OperatorModel) -> Result<ExportResult, ExportError> {
        let namespaces = default_namespaces(&self.config.common_prefix);
        self.write(model, &namespaces, None)
    }

    fn write(
        &self,
        model: &OperatorModel,
        namespaces: &[(String, String)],
        schema_location: Option<&str>,
    ) -> Result<ExportResult, ExportError> {
        let schema_location = schema_location.filter(|_| self.config.emit_schema_location);
        let mut bindings = namespaces.to_vec();
        let operator_prefix = bind(&mut bindings, OPERATOR_NAMESPACE, "");
        let common_prefix = bind(&mut bindings, COMMON_NAMESPACE, &self.config.common_prefix);
        let xsi_prefix = schema_location.map(|_| bind(&mut bindings, XSI_NAMESPACE, "xsi"));

        let writer = if self.config.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', self.config.indent)
        } else {
            Writer::new(Vec::new())
        };
        let mut out = DocumentWriter {
            writer,
            operator_prefix,
            common_prefix,
        };

        if self.config.xml_declaration {
            out.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }

        let mut root_attrs: Vec<(String, String)> = bindings
            .iter()
            .map(|(prefix, uri)| {
                let name = if prefix.is_empty() {
                    "xmlns".to_string()
                } else {
                    format!("xmlns:{prefix}")
                };
                (name, uri.clone())
            })
            .collect();
        if let (Some(location), Some(xsi)) = (schema_location, xsi_prefix) {
            root_attrs.push((format!("{xsi}:schemaLocation"), location.to_string()));
        }
        let root_attrs: Vec<(&str, String)> = root_attrs
            .iter()
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect();

        out.start(Ns::Operator, "operatorModel", &root_attrs)?;
        match model {
            OperatorModel::Cpp(op) => out.op_model(op)?,
            OperatorModel::Java(op) => out.java_op_model(op)?,
        }
        out.end(Ns::Operator, "operatorModel")?;

        let mut content = String::from_utf8(out.writer.into_inner())
            .map_err(|e| ExportError::SerializationError(format!("UTF-8 error: {e}")))?;
        content.push('\n');

        debug!(
            model = model.element_name(),
            bytes = content.len(),
            "exported operator model"
        );

        Ok(ExportResult {
            content,
            format: "xml".to_string(),
        })
    }
}

/// Prefix bound to `uri`, adding a binding when there is none
fn bind(bindings: &mut Vec<(String, String)>, uri: &str, preferred: &str) -> String {
    if let Some((prefix, _)) = bindings.iter().find(|(_, u)| u == uri) {
        return prefix.clone();
    }
    let taken = |p: &str| bindings.iter().any(|(prefix, _)| prefix == p);
    let mut prefix = preferred.to_string();
    if taken(&prefix) {
        let base = if preferred.is_empty() { "ns" } else { preferred };
        prefix = (1..)
            .map(|n| format!("{base}{n}"))
            .find(|p| !taken(p))
            .unwrap_or_default();
    }
    bindings.push((prefix.clone(), uri.to_string()));
    prefix
}

/// Nothing in the value differs from a freshly created instance
fn is_blank<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

fn push_attr<T: Display>(attrs: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<&T>) {
    if let Some(value) = value {
        attrs.push((name, value.to_string()));
    }
}

#[derive(Debug, Clone, Copy)]
enum Ns {
    Operator,
    Common,
}

type WriteResult = Result<(), ExportError>;

struct DocumentWriter {
    writer: Writer<Vec<u8>>,
    operator_prefix: String,
    common_prefix: String,
}

impl DocumentWriter {
    fn qname(&self, ns: Ns, local: &str) -> String {
        let prefix = match ns {
            Ns::Operator => &self.operator_prefix,
            Ns::Common => &self.common_prefix,
        };
        if prefix.is_empty() {
            local.to_string()
        } else {
            format!("{prefix}:{local}")
        }
    }

    fn event(&mut self, event: Event<'_>) -> WriteResult {
        self.writer
            .write_event(event)
            .map_err(|e| ExportError::SerializationError(format!("Write error: {e}")))
    }

    fn tag(&self, ns: Ns, local: &str, attrs: &[(&str, String)]) -> BytesStart<'static> {
        let mut start = BytesStart::new(self.qname(ns, local));
        for (name, value) in attrs {
            start.push_attribute((*name, value.as_str()));
        }
        start
    }

    fn start(&mut self, ns: Ns, local: &str, attrs: &[(&str, String)]) -> WriteResult {
        let start = self.tag(ns, local, attrs);
        self.event(Event::Start(start))
    }

    fn end(&mut self, ns: Ns, local: &str) -> WriteResult {
        let name = self.qname(ns, local);
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, ns: Ns, local: &str, attrs: &[(&str, String)]) -> WriteResult {
        let start = self.tag(ns, local, attrs);
        self.event(Event::Empty(start))
    }

    fn text_element(&mut self, ns: Ns, local: &str, attrs: &[(&str, String)], text: &str) -> WriteResult {
        self.start(ns, local, attrs)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(ns, local)
    }

    /// Element with child content; written as an empty tag when `blank`
    fn container(
        &mut self,
        ns: Ns,
        local: &str,
        attrs: &[(&str, String)],
        blank: bool,
        body: impl FnOnce(&mut Self) -> WriteResult,
    ) -> WriteResult {
        if blank {
            return self.empty(ns, local, attrs);
        }
        self.start(ns, local, attrs)?;
        body(self)?;
        self.end(ns, local)
    }

    fn value<T: Display>(&mut self, ns: Ns, local: &str, value: &T) -> WriteResult {
        self.text_element(ns, local, &[], &value.to_string())
    }

    fn opt_value<T: Display>(&mut self, local: &str, value: Option<&T>) -> WriteResult {
        match value {
            Some(value) => self.value(Ns::Operator, local, value),
            None => Ok(()),
        }
    }

    fn values<T: Display>(&mut self, ns: Ns, local: &str, values: &[T]) -> WriteResult {
        values.iter().try_for_each(|v| self.value(ns, local, v))
    }

    fn description(&mut self, ns: Ns, local: &str, description: &Description) -> WriteResult {
        let mut attrs = Vec::new();
        push_attr(&mut attrs, "docHref", description.doc_href.as_ref());
        push_attr(&mut attrs, "sampleUri", description.sample_uri.as_ref());
        self.text_element(ns, local, &attrs, &description.text)
    }

    fn opt_description(&mut self, local: &str, description: Option<&Description>) -> WriteResult {
        match description {
            Some(d) => self.description(Ns::Operator, local, d),
            None => Ok(()),
        }
    }

    fn op_model(&mut self, model: &OpModel) -> WriteResult {
        self.start(Ns::Operator, "cppOperatorModel", &[])?;
        self.context(&model.context)?;
        self.parameters(&model.parameters)?;
        self.input_ports(&model.input_ports)?;
        self.output_ports(&model.output_ports)?;
        self.end(Ns::Operator, "cppOperatorModel")
    }

    fn java_op_model(&mut self, model: &JavaOpModel) -> WriteResult {
        self.start(Ns::Operator, "javaOperatorModel", &[])?;
        self.java_context(&model.context)?;
        self.java_parameters(&model.parameters)?;
        self.java_input_ports(&model.input_ports)?;
        self.java_output_ports(&model.output_ports)?;
        self.end(Ns::Operator, "javaOperatorModel")
    }

    fn context(&mut self, c: &Context) -> WriteResult {
        let mut attrs = Vec::new();
        push_attr(&mut attrs, "verificationModule", c.verification_module.as_ref());
        self.container(Ns::Operator, "context", &attrs, is_blank(c), |w| {
            w.opt_description("description", c.description.as_ref())?;
            c.icon_uri.iter().try_for_each(|icon| w.icon_uri(icon))?;
            if let Some(metrics) = &c.metrics {
                w.metrics(metrics)?;
            }
            if let Some(literals) = &c.custom_literals {
                w.enumerations(literals)?;
            }
            if let Some(functions) = &c.custom_output_functions {
                w.custom_output_functions(functions)?;
            }
            if let Some(deps) = &c.library_dependencies {
                w.library_dependencies(deps)?;
            }
            w.opt_value("providesSingleThreadedContext", c.provides_single_threaded_context.as_ref())?;
            w.opt_value("incrementalCompilationStrategy", c.incremental_compilation_strategy.as_ref())?;
            w.opt_value("allowCustomLogic", c.allow_custom_logic.as_ref())?;
            if let Some(templates) = &c.code_templates {
                w.code_templates(templates)?;
            }
            if let Some(tree) = &c.spl_expression_tree {
                w.spl_expression_tree(tree)?;
            }
            w.values(Ns::Operator, "capability", &c.capability)
        })
    }

    fn java_context(&mut self, c: &JavaOpContext) -> WriteResult {
        self.start(Ns::Operator, "context", &[])?;
        self.opt_description("description", c.description.as_ref())?;
        c.icon_uri.iter().try_for_each(|icon| self.icon_uri(icon))?;
        if let Some(metrics) = &c.metrics {
            self.metrics(metrics)?;
        }
        if let Some(literals) = &c.custom_literals {
            self.enumerations(literals)?;
        }
        self.execution_settings(&c.execution_settings)?;
        if let Some(deps) = c.library_dependencies.as_ref().filter(|d| !d.library.is_empty()) {
            self.java_library_dependencies(deps)?;
        }
        if let Some(templates) = &c.code_templates {
            self.code_templates(templates)?;
        }
        self.end(Ns::Operator, "context")
    }

    fn icon_uri(&mut self, icon: &IconUri) -> WriteResult {
        let mut attrs = Vec::new();
        push_attr(&mut attrs, "size", icon.size.as_ref());
        self.text_element(Ns::Operator, "iconUri", &attrs, &icon.value)
    }

    fn metrics(&mut self, metrics: &Metrics) -> WriteResult {
        self.container(Ns::Operator, "metrics", &[], is_blank(metrics), |w| {
            w.opt_description("description", metrics.description.as_ref())?;
            metrics.metric.iter().try_for_each(|metric| {
                w.start(Ns::Operator, "metric", &[])?;
                w.value(Ns::Operator, "name", &metric.name)?;
                w.description(Ns::Operator, "description", &metric.description)?;
                w.opt_value("kind", metric.kind.as_ref())?;
                w.opt_value("dynamic", metric.dynamic.as_ref())?;
                w.end(Ns::Operator, "metric")
            })
        })
    }

    fn enumerations(&mut self, literals: &Enumerations) -> WriteResult {
        self.container(Ns::Operator, "customLiterals", &[], is_blank(literals), |w| {
            literals.enumeration.iter().try_for_each(|e| {
                w.start(Ns::Operator, "enumeration", &[])?;
                w.value(Ns::Operator, "name", &e.name)?;
                w.values(Ns::Operator, "value", &e.value)?;
                w.end(Ns::Operator, "enumeration")
            })
        })
    }

    fn custom_output_functions(&mut self, functions: &CustomOutputFunctions) -> WriteResult {
        self.container(Ns::Operator, "customOutputFunctions", &[], is_blank(functions), |w| {
            functions.custom_output_function.iter().try_for_each(|set| {
                w.start(Ns::Operator, "customOutputFunction", &[])?;
                w.value(Ns::Operator, "name", &set.name)?;
                set.function.iter().try_for_each(|f| {
                    let mut attrs = Vec::new();
                    push_attr(&mut attrs, "pseudoFunction", f.pseudo_function.as_ref());
                    w.start(Ns::Operator, "function", &attrs)?;
                    w.opt_description("description", f.description.as_ref())?;
                    w.value(Ns::Operator, "prototype", &f.prototype)?;
                    w.end(Ns::Operator, "function")
                })?;
                w.end(Ns::Operator, "customOutputFunction")
            })
        })
    }

    fn library_dependencies(&mut self, deps: &LibraryDependencies) -> WriteResult {
        self.container(Ns::Operator, "libraryDependencies", &[], is_blank(deps), |w| {
            deps.library.iter().try_for_each(|library| {
                w.start(Ns::Operator, "library", &[])?;
                w.description(Ns::Common, "description", &library.description)?;
                let managed = &library.managed_library;
                w.container(Ns::Common, "managedLibrary", &[], is_blank(managed), |w| {
                    w.values(Ns::Common, "lib", &managed.lib)?;
                    w.values(Ns::Common, "libPath", &managed.lib_path)?;
                    w.values(Ns::Common, "includePath", &managed.include_path)?;
                    if let Some(command) = &managed.command {
                        w.value(Ns::Common, "command", command)?;
                    }
                    Ok(())
                })?;
                w.end(Ns::Operator, "library")
            })
        })
    }

    fn java_library_dependencies(&mut self, deps: &JavaOpLibraryDependencies) -> WriteResult {
        self.container(Ns::Operator, "libraryDependencies", &[], is_blank(deps), |w| {
            deps.library.iter().try_for_each(|library| {
                w.start(Ns::Operator, "library", &[])?;
                w.description(Ns::Common, "description", &library.description)?;
                let managed = &library.managed_library;
                w.container(Ns::Common, "managedLibrary", &[], is_blank(managed), |w| {
                    w.values(Ns::Common, "libPath", &managed.lib_path)?;
                    if let Some(command) = &managed.command {
                        w.value(Ns::Common, "command", command)?;
                    }
                    Ok(())
                })?;
                w.end(Ns::Operator, "library")
            })
        })
    }

    fn code_templates(&mut self, templates: &CodeTemplates) -> WriteResult {
        self.container(Ns::Operator, "codeTemplates", &[], is_blank(templates), |w| {
            templates.code_template.iter().try_for_each(|t| {
                w.start(Ns::Operator, "codeTemplate", &[("name", t.name.clone())])?;
                w.opt_description("description", t.description.as_ref())?;
                w.value(Ns::Operator, "template", &t.template)?;
                w.end(Ns::Operator, "codeTemplate")
            })
        })
    }

    fn spl_expression_tree(&mut self, tree: &SplExpressionTree) -> WriteResult {
        let mut attrs = Vec::new();
        push_attr(&mut attrs, "cppCode", tree.cpp_code.as_ref());
        push_attr(&mut attrs, "output", tree.output.as_ref());
        push_attr(&mut attrs, "param", tree.param.as_ref());
        self.empty(Ns::Operator, "splExpressionTree", &attrs)
    }

    fn execution_settings(&mut self, settings: &JavaOpExecutionSettings) -> WriteResult {
        self.start(Ns::Operator, "executionSettings", &[])?;
        self.value(Ns::Operator, "className", &settings.class_name)?;
        if let Some(args) = &settings.vm_args {
            self.container(Ns::Operator, "vmArgs", &[], is_blank(args), |w| {
                w.values(Ns::Operator, "vmArg", &args.vm_arg)
            })?;
        }
        self.end(Ns::Operator, "executionSettings")
    }

    fn parameters(&mut self, params: &Parameters) -> WriteResult {
        self.container(Ns::Operator, "parameters", &[], is_blank(params), |w| {
            w.opt_description("description", params.description.as_ref())?;
            w.opt_value("allowAny", params.allow_any.as_ref())?;
            params.parameter.iter().try_for_each(|p| {
                w.start(Ns::Operator, "parameter", &[])?;
                w.value(Ns::Operator, "name", &p.name)?;
                w.opt_description("description", p.description.as_ref())?;
                w.opt_value("optional", p.optional.as_ref())?;
                w.opt_value("rewriteAllowed", p.rewrite_allowed.as_ref())?;
                w.opt_value("expressionMode", p.expression_mode.as_ref())?;
                w.opt_value("type", p.type_.as_ref())?;
                w.opt_value("cardinality", p.cardinality.as_ref())?;
                if let Some(scope) = p.port_scope.as_ref().filter(|s| !s.port.is_empty()) {
                    w.port_scope("portScope", &scope.port)?;
                }
                w.opt_value("customOutputFunction", p.custom_output_function.as_ref())?;
                w.end(Ns::Operator, "parameter")
            })
        })
    }

    fn java_parameters(&mut self, params: &JavaOpParameters) -> WriteResult {
        self.container(Ns::Operator, "parameters", &[], is_blank(params), |w| {
            w.opt_description("description", params.description.as_ref())?;
            params.parameter.iter().try_for_each(|p| {
                w.start(Ns::Operator, "parameter", &[])?;
                w.value(Ns::Operator, "name", &p.name)?;
                w.opt_description("description", p.description.as_ref())?;
                w.opt_value("optional", p.optional.as_ref())?;
                w.opt_value("expressionMode", p.expression_mode.as_ref())?;
                w.opt_value("type", p.type_.as_ref())?;
                w.opt_value("cardinality", p.cardinality.as_ref())?;
                w.end(Ns::Operator, "parameter")
            })
        })
    }

    fn port_scope(&mut self, local: &str, ports: &[u64]) -> WriteResult {
        self.container(Ns::Operator, local, &[], ports.is_empty(), |w| {
            w.values(Ns::Operator, "port", ports)
        })
    }

    fn input_ports(&mut self, ports: &InputPorts) -> WriteResult {
        self.container(Ns::Operator, "inputPorts", &[], is_blank(ports), |w| {
            ports.input_port_set.iter().try_for_each(|set| {
                w.start(Ns::Operator, "inputPortSet", &[])?;
                w.input_open_fields(&set.open)?;
                w.fixed_set_fields(set.cardinality, set.optional)?;
                w.end(Ns::Operator, "inputPortSet")
            })?;
            if let Some(open) = &ports.input_port_open_set {
                w.container(Ns::Operator, "inputPortOpenSet", &[], is_blank(open), |w| {
                    w.input_open_fields(open)
                })?;
            }
            Ok(())
        })
    }

    fn input_open_fields(&mut self, set: &InputPortOpenSet) -> WriteResult {
        self.opt_description("description", set.description.as_ref())?;
        self.opt_description("windowingDescription", set.windowing_description.as_ref())?;
        self.opt_value("tupleMutationAllowed", set.tuple_mutation_allowed.as_ref())?;
        self.opt_value("windowingMode", set.windowing_mode.as_ref())?;
        self.opt_value("windowPunctuationInputMode", set.window_punctuation_input_mode.as_ref())?;
        self.opt_value("controlPort", set.control_port.as_ref())?;
        self.opt_value("windowExpressionMode", set.window_expression_mode.as_ref())?;
        self.opt_value(
            "rewriteAllowedForWindowExpression",
            set.rewrite_allowed_for_window_expression.as_ref(),
        )
    }

    fn fixed_set_fields(&mut self, cardinality: u64, optional: Option<bool>) -> WriteResult {
        self.value(Ns::Operator, "cardinality", &cardinality)?;
        self.opt_value("optional", optional.as_ref())
    }

    fn output_ports(&mut self, ports: &OutputPorts) -> WriteResult {
        self.container(Ns::Operator, "outputPorts", &[], is_blank(ports), |w| {
            ports.output_port_set.iter().try_for_each(|set| {
                w.start(Ns::Operator, "outputPortSet", &[])?;
                w.output_open_fields(&set.open)?;
                w.fixed_set_fields(set.cardinality, set.optional)?;
                w.end(Ns::Operator, "outputPortSet")
            })?;
            if let Some(open) = &ports.output_port_open_set {
                w.container(Ns::Operator, "outputPortOpenSet", &[], is_blank(open), |w| {
                    w.output_open_fields(open)
                })?;
            }
            Ok(())
        })
    }

    fn output_open_fields(&mut self, set: &OutputPortOpenSet) -> WriteResult {
        self.opt_description("description", set.description.as_ref())?;
        self.opt_value("expressionMode", set.expression_mode.as_ref())?;
        self.opt_value("autoAssignment", set.auto_assignment.as_ref())?;
        self.opt_value("completeAssignment", set.complete_assignment.as_ref())?;
        self.opt_value("rewriteAllowed", set.rewrite_allowed.as_ref())?;
        if let Some(functions) = &set.output_functions {
            self.start(Ns::Operator, "outputFunctions", &[])?;
            self.value(Ns::Operator, "default", &functions.default)?;
            self.value(Ns::Operator, "type", &functions.type_)?;
            self.end(Ns::Operator, "outputFunctions")?;
        }
        self.opt_value("windowPunctuationOutputMode", set.window_punctuation_output_mode.as_ref())?;
        self.opt_value("windowPunctuationInputPort", set.window_punctuation_input_port.as_ref())?;
        if let Some(scope) = &set.final_punctuation_port_scope {
            self.port_scope("finalPunctuationPortScope", &scope.port)?;
        }
        self.opt_value("tupleMutationAllowed", set.tuple_mutation_allowed.as_ref())?;
        let assignment_scope = set.output_assignment_port_scope.as_ref();
        if let Some(scope) = assignment_scope.filter(|s| !s.port.is_empty()) {
            self.port_scope("outputAssignmentPortScope", &scope.port)?;
        }
        self.opt_value(
            "allowNestedCustomOutputFunctions",
            set.allow_nested_custom_output_functions.as_ref(),
        )
    }

    fn java_input_ports(&mut self, ports: &JavaOpInputPorts) -> WriteResult {
        self.container(Ns::Operator, "inputPorts", &[], is_blank(ports), |w| {
            ports.input_port_set.iter().try_for_each(|set| {
                w.start(Ns::Operator, "inputPortSet", &[])?;
                w.java_input_open_fields(&set.open)?;
                w.fixed_set_fields(set.cardinality, set.optional)?;
                w.end(Ns::Operator, "inputPortSet")
            })?;
            if let Some(open) = &ports.input_port_open_set {
                w.container(Ns::Operator, "inputPortOpenSet", &[], is_blank(open), |w| {
                    w.java_input_open_fields(open)
                })?;
            }
            Ok(())
        })
    }

    fn java_input_open_fields(&mut self, set: &JavaOpInputPortOpenSet) -> WriteResult {
        self.opt_description("description", set.description.as_ref())?;
        self.opt_description("windowingDescription", set.windowing_description.as_ref())?;
        self.opt_value("windowingMode", set.windowing_mode.as_ref())?;
        self.opt_value("windowPunctuationInputMode", set.window_punctuation_input_mode.as_ref())?;
        self.opt_value("controlPort", set.control_port.as_ref())
    }

    fn java_output_ports(&mut self, ports: &JavaOpOutputPorts) -> WriteResult {
        self.container(Ns::Operator, "outputPorts", &[], is_blank(ports), |w| {
            ports.output_port_set.iter().try_for_each(|set| {
                w.start(Ns::Operator, "outputPortSet", &[])?;
                w.java_output_open_fields(&set.open)?;
                w.fixed_set_fields(set.cardinality, set.optional)?;
                w.end(Ns::Operator, "outputPortSet")
            })?;
            if let Some(open) = &ports.output_port_open_set {
                w.container(Ns::Operator, "outputPortOpenSet", &[], is_blank(open), |w| {
                    w.java_output_open_fields(open)
                })?;
            }
            Ok(())
        })
    }

    fn java_output_open_fields(&mut self, set: &JavaOpOutputPortOpenSet) -> WriteResult {
        self.opt_description("description", set.description.as_ref())?;
        self.opt_value("windowPunctuationOutputMode", set.window_punctuation_output_mode.as_ref())?;
        self.opt_value("windowPunctuationInputPort", set.window_punctuation_input_port.as_ref())?;
        if let Some(scope) = &set.final_punctuation_port_scope {
            self.port_scope("finalPunctuationPortScope", &scope.port)?;
        }
        Ok(())
    }
}
