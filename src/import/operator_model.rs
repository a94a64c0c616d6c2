//! Operator model importer
//!
//! Reads `<operatorModel>` XML documents. The document is first read into a
//! small namespace-resolved element tree; each element is then checked
//! against the schema registry (unknown content, required features) before
//! its typed value is built.

use anyhow::{Context as _, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use super::ImportError;
use crate::models::*;
use crate::schema::{ClassId, XmlKind, schema};

/// Operator model importer
///
/// Imports operator model XML content into an [`OperatorModelDocument`].
#[derive(Debug, Default, Clone)]
pub struct OperatorModelImporter;

impl OperatorModelImporter {
    /// Create a new OperatorModelImporter
    pub fn new() -> Self {
        Self
    }

    /// Quick structural check of an operator model document
    ///
    /// Checks that the XML is well formed and that the root element is
    /// `operatorModel` in the operator namespace. A root without a C++ or
    /// Java model is only reported as a warning.
    pub fn validate(&self, xml_content: &str) -> Result<()> {
        let mut reader = NsReader::from_str(xml_content);
        reader.config_mut().trim_text(true);

        let mut depth = 0usize;
        let mut root: Option<(String, Option<String>)> = None;
        let mut has_model = false;

        loop {
            let result = reader
                .read_resolved_event()
                .map(|(resolved, event)| (owned_namespace(&resolved), event));
            let (ns, event) = match result {
                Ok(pair) => pair,
                Err(e) => {
                    return Err(anyhow::anyhow!(
                        "Operator model XML parsing error at position {}: {}",
                        reader.error_position(),
                        e
                    ))
                    .context("Operator model XML validation failed");
                }
            };
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    if depth == 0 {
                        if root.is_none() {
                            root = Some((local, ns));
                        }
                    } else if depth == 1
                        && (local == "cppOperatorModel" || local == "javaOperatorModel")
                    {
                        has_model = true;
                    }
                    if matches!(event, Event::Start(_)) {
                        depth += 1;
                    }
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }
        }

        let (root_name, root_ns) = root
            .ok_or_else(|| anyhow::anyhow!("Invalid operator model: document has no root element"))
            .context("Operator model XML validation failed")?;

        if root_name != "operatorModel" {
            return Err(anyhow::anyhow!(
                "Invalid operator model: root element is '{}', expected 'operatorModel'",
                root_name
            ))
            .context("Operator model XML validation failed");
        }

        if root_ns.as_deref() != Some(OPERATOR_NAMESPACE) {
            return Err(anyhow::anyhow!(
                "Invalid operator model: root element is not in namespace {}",
                OPERATOR_NAMESPACE
            ))
            .context("Operator model XML validation failed");
        }

        if !has_model {
            warn!("Operator model document contains neither cppOperatorModel nor javaOperatorModel");
        }

        Ok(())
    }

    /// Import an operator model document from XML content
    pub fn import(&self, xml_content: &str) -> Result<OperatorModelDocument, ImportError> {
        let root = parse_tree(xml_content)?;

        if root.local != "operatorModel" || root.namespace.as_deref() != Some(OPERATOR_NAMESPACE) {
            return Err(ImportError::UnexpectedElement {
                class: ClassId::DocumentRoot.name(),
                element: root.local.clone(),
                position: root.position,
            });
        }

        let model = read_operator_model(&root)?;
        let schema_location = root
            .attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(XSI_NAMESPACE) && a.local == "schemaLocation")
            .map(|a| a.value.clone());

        debug!(
            language = ?model.language(),
            namespaces = root.namespaces.len(),
            "Imported operator model"
        );

        Ok(OperatorModelDocument {
            model,
            namespaces: root.namespaces,
            schema_location,
        })
    }

    /// Import an operator model document from a file
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<OperatorModelDocument, ImportError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ImportError::IoError(format!("{}: {}", path.display(), e)))?;
        self.import(&content)
    }
}

/// A namespace-resolved XML element
#[derive(Debug)]
struct Node {
    namespace: Option<String>,
    local: String,
    attributes: Vec<Attr>,
    /// `xmlns` declarations made on this element, in document order
    namespaces: Vec<(String, String)>,
    children: Vec<Node>,
    text: String,
    position: u64,
}

#[derive(Debug)]
struct Attr {
    namespace: Option<String>,
    local: String,
    value: String,
}

fn owned_namespace(resolved: &ResolveResult) -> Option<String> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
        _ => None,
    }
}

fn parse_error(position: u64, message: impl Into<String>) -> ImportError {
    ImportError::ParseError {
        position,
        message: message.into(),
    }
}

fn parse_tree(xml: &str) -> Result<Node, ImportError> {
    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let result = reader.read_resolved_event().map(|(resolved, event)| {
            let unknown = match &resolved {
                ResolveResult::Unknown(prefix) => Some(String::from_utf8_lossy(prefix).into_owned()),
                _ => None,
            };
            (owned_namespace(&resolved), unknown, event)
        });
        let (ns, event) = match result {
            Ok((_, Some(prefix), _)) => {
                return Err(parse_error(position, format!("unknown namespace prefix '{prefix}'")));
            }
            Ok((ns, None, event)) => (ns, event),
            Err(e) => return Err(parse_error(reader.error_position() as u64, e.to_string())),
        };

        match event {
            Event::Start(e) => {
                let node = open_node(&reader, ns, &e, position)?;
                stack.push(node);
            }
            Event::Empty(e) => {
                let node = open_node(&reader, ns, &e, position)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node)?;
                }
            }
            Event::Text(e) => {
                if let Some(top) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| parse_error(position, err.to_string()))?;
                    top.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(parse_error(
            reader.buffer_position() as u64,
            format!("element '{}' is not closed", open.local),
        ));
    }
    root.ok_or_else(|| parse_error(0, "document has no root element"))
}

fn open_node(
    reader: &NsReader<&[u8]>,
    namespace: Option<String>,
    start: &BytesStart<'_>,
    position: u64,
) -> Result<Node, ImportError> {
    let mut attributes = Vec::new();
    let mut namespaces = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| parse_error(position, e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| parse_error(position, e.to_string()))?
            .into_owned();
        let key = attr.key.as_ref();
        if key == b"xmlns" {
            namespaces.push((String::new(), value));
        } else if let Some(prefix) = key.strip_prefix(b"xmlns:") {
            namespaces.push((String::from_utf8_lossy(prefix).into_owned(), value));
        } else {
            let (resolved, local) = reader.resolve_attribute(attr.key);
            attributes.push(Attr {
                namespace: owned_namespace(&resolved),
                local: String::from_utf8_lossy(local.as_ref()).into_owned(),
                value,
            });
        }
    }

    Ok(Node {
        namespace,
        local: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes,
        namespaces,
        children: Vec::new(),
        text: String::new(),
        position,
    })
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<(), ImportError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(parse_error(
                node.position,
                format!("unexpected second root element '{}'", node.local),
            ));
        }
    }
    Ok(())
}

/// Schema-checked view of one element
struct ElementReader<'a> {
    node: &'a Node,
    class: ClassId,
}

impl<'a> ElementReader<'a> {
    /// Checks the element's children and attributes against the class
    fn new(node: &'a Node, class: ClassId) -> Result<Self, ImportError> {
        let schema = schema();
        let class_name = class.name();
        let mut seen: Vec<&str> = Vec::new();

        for child in &node.children {
            let feature = child
                .namespace
                .as_deref()
                .and_then(|ns| schema.element_feature(class, ns, &child.local))
                .ok_or_else(|| ImportError::UnexpectedElement {
                    class: class_name,
                    element: child.local.clone(),
                    position: child.position,
                })?;
            if !feature.is_many() && seen.contains(&feature.xml_name) {
                return Err(ImportError::UnexpectedElement {
                    class: class_name,
                    element: child.local.clone(),
                    position: child.position,
                });
            }
            seen.push(feature.xml_name);
        }

        for attr in &node.attributes {
            let known = match attr.namespace.as_deref() {
                None => schema.attribute_feature(class, &attr.local).is_some(),
                Some(OPERATOR_NAMESPACE) | Some(COMMON_NAMESPACE) => false,
                // xsi:*, xml:* and foreign attributes are not part of the model
                Some(_) => true,
            };
            if !known {
                return Err(ImportError::UnexpectedAttribute {
                    class: class_name,
                    attribute: attr.local.clone(),
                    position: node.position,
                });
            }
        }

        for feature in schema.required_features(class) {
            let present = match feature.kind {
                XmlKind::Element => seen.contains(&feature.xml_name),
                XmlKind::Attribute => node
                    .attributes
                    .iter()
                    .any(|a| a.namespace.is_none() && a.local == feature.xml_name),
                XmlKind::SimpleContent => true,
            };
            if !present {
                return Err(ImportError::MissingElement {
                    class: class_name,
                    element: feature.xml_name,
                    position: node.position,
                });
            }
        }

        Ok(Self { node, class })
    }

    fn child(&self, name: &str) -> Option<&'a Node> {
        self.node.children.iter().find(|c| c.local == name)
    }

    fn children(&self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.node.children.iter().filter(move |c| c.local == name)
    }

    fn required_child(&self, name: &'static str) -> Result<&'a Node, ImportError> {
        self.child(name).ok_or(ImportError::MissingElement {
            class: self.class.name(),
            element: name,
            position: self.node.position,
        })
    }

    fn string(&self, name: &str) -> Option<String> {
        self.child(name).map(|c| c.text.clone())
    }

    fn strings(&self, name: &'a str) -> Vec<String> {
        self.children(name).map(|c| c.text.clone()).collect()
    }

    fn required_string(&self, name: &'static str) -> Result<String, ImportError> {
        Ok(self.required_child(name)?.text.clone())
    }

    /// Token-typed content, whitespace collapsed at the ends
    fn token(&self, name: &str) -> Option<String> {
        self.child(name).map(|c| c.text.trim().to_string())
    }

    fn value<T>(&self, name: &'static str, kind: ValueKind<T>) -> Result<Option<T>, ImportError> {
        self.child(name)
            .map(|c| parse_value(name, &c.text, kind))
            .transpose()
    }

    fn values<T>(&self, name: &'static str, kind: ValueKind<T>) -> Result<Vec<T>, ImportError> {
        self.children(name)
            .map(|c| parse_value(name, &c.text, kind))
            .collect()
    }

    fn literal<T: FromStr<Err = LiteralError>>(&self, name: &str) -> Result<Option<T>, ImportError> {
        match self.child(name) {
            Some(c) => Ok(Some(c.text.parse::<T>()?)),
            None => Ok(None),
        }
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node
            .attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.local == name)
            .map(|a| a.value.as_str())
    }

    fn attribute_value<T>(&self, name: &'static str, kind: ValueKind<T>) -> Result<Option<T>, ImportError> {
        self.attribute(name)
            .map(|v| parse_value(name, v, kind))
            .transpose()
    }

    fn text(&self) -> String {
        self.node.text.clone()
    }
}

/// Lexical parser for an XSD simple type plus its name for error messages
type ValueKind<T> = (fn(&str) -> Option<T>, &'static str);

const BOOLEAN: ValueKind<bool> = (parse_bool, "boolean");
// Unbounded XSD integers are narrowed to 64 bits; the name carries the range.
const INT: ValueKind<i32> = (parse_number::<i32>, "int");
const INTEGER: ValueKind<i64> = (parse_number::<i64>, "integer within the 64-bit signed range");
const NON_NEGATIVE_INTEGER: ValueKind<u64> =
    (parse_number::<u64>, "nonNegativeInteger within the 64-bit unsigned range");

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_number<T: FromStr>(s: &str) -> Option<T> {
    s.trim().parse().ok()
}

fn parse_value<T>(feature: &'static str, raw: &str, (parse, expected): ValueKind<T>) -> Result<T, ImportError> {
    parse(raw).ok_or_else(|| ImportError::InvalidValue {
        feature,
        value: raw.to_string(),
        expected,
    })
}

fn read_operator_model(node: &Node) -> Result<OperatorModel, ImportError> {
    let r = ElementReader::new(node, ClassId::OperatorModel)?;
    match (r.child("cppOperatorModel"), r.child("javaOperatorModel")) {
        (Some(cpp), None) => Ok(OperatorModel::Cpp(read_op_model(cpp)?)),
        (None, Some(java)) => Ok(OperatorModel::Java(read_java_op_model(java)?)),
        (Some(_), Some(java)) => Err(ImportError::UnexpectedElement {
            class: ClassId::OperatorModel.name(),
            element: java.local.clone(),
            position: java.position,
        }),
        (None, None) => Err(ImportError::MissingElement {
            class: ClassId::OperatorModel.name(),
            element: "cppOperatorModel",
            position: node.position,
        }),
    }
}

fn read_op_model(node: &Node) -> Result<OpModel, ImportError> {
    let r = ElementReader::new(node, ClassId::OpModel)?;
    Ok(OpModel {
        context: read_context(r.required_child("context")?)?,
        parameters: read_parameters(r.required_child("parameters")?)?,
        input_ports: read_input_ports(r.required_child("inputPorts")?)?,
        output_ports: read_output_ports(r.required_child("outputPorts")?)?,
    })
}

fn read_java_op_model(node: &Node) -> Result<JavaOpModel, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpModel)?;
    Ok(JavaOpModel {
        context: read_java_context(r.required_child("context")?)?,
        parameters: read_java_parameters(r.required_child("parameters")?)?,
        input_ports: read_java_input_ports(r.required_child("inputPorts")?)?,
        output_ports: read_java_output_ports(r.required_child("outputPorts")?)?,
    })
}

fn read_optional<T>(
    node: Option<&Node>,
    read: fn(&Node) -> Result<T, ImportError>,
) -> Result<Option<T>, ImportError> {
    node.map(read).transpose()
}

fn read_all<'a, T>(
    nodes: impl Iterator<Item = &'a Node>,
    read: fn(&Node) -> Result<T, ImportError>,
) -> Result<Vec<T>, ImportError> {
    nodes.map(read).collect()
}

fn read_description(node: &Node) -> Result<Description, ImportError> {
    let r = ElementReader::new(node, ClassId::Description)?;
    Ok(Description {
        text: r.text(),
        doc_href: r.attribute("docHref").map(str::to_string),
        sample_uri: r.attribute("sampleUri").map(str::to_string),
    })
}

fn read_context(node: &Node) -> Result<Context, ImportError> {
    let r = ElementReader::new(node, ClassId::Context)?;
    Ok(Context {
        description: read_optional(r.child("description"), read_description)?,
        icon_uri: read_all(r.children("iconUri"), read_icon_uri)?,
        metrics: read_optional(r.child("metrics"), read_metrics)?,
        custom_literals: read_optional(r.child("customLiterals"), read_enumerations)?,
        custom_output_functions: read_optional(
            r.child("customOutputFunctions"),
            read_custom_output_functions,
        )?,
        library_dependencies: read_optional(
            r.child("libraryDependencies"),
            read_library_dependencies,
        )?,
        provides_single_threaded_context: r.literal("providesSingleThreadedContext")?,
        incremental_compilation_strategy: r.literal("incrementalCompilationStrategy")?,
        allow_custom_logic: r.value("allowCustomLogic", BOOLEAN)?,
        code_templates: read_optional(r.child("codeTemplates"), read_code_templates)?,
        spl_expression_tree: read_optional(r.child("splExpressionTree"), read_spl_expression_tree)?,
        capability: r.strings("capability"),
        verification_module: r.attribute("verificationModule").map(|v| v.trim().to_string()),
    })
}

fn read_java_context(node: &Node) -> Result<JavaOpContext, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpContext)?;
    Ok(JavaOpContext {
        description: read_optional(r.child("description"), read_description)?,
        icon_uri: read_all(r.children("iconUri"), read_icon_uri)?,
        metrics: read_optional(r.child("metrics"), read_metrics)?,
        custom_literals: read_optional(r.child("customLiterals"), read_enumerations)?,
        execution_settings: read_execution_settings(r.required_child("executionSettings")?)?,
        library_dependencies: read_optional(
            r.child("libraryDependencies"),
            read_java_library_dependencies,
        )?,
        code_templates: read_optional(r.child("codeTemplates"), read_code_templates)?,
    })
}

fn read_icon_uri(node: &Node) -> Result<IconUri, ImportError> {
    let r = ElementReader::new(node, ClassId::IconUri)?;
    Ok(IconUri {
        value: r.text(),
        size: r.attribute_value("size", INT)?,
    })
}

fn read_metrics(node: &Node) -> Result<Metrics, ImportError> {
    let r = ElementReader::new(node, ClassId::Metrics)?;
    Ok(Metrics {
        description: read_optional(r.child("description"), read_description)?,
        metric: read_all(r.children("metric"), read_metric)?,
    })
}

fn read_metric(node: &Node) -> Result<Metric, ImportError> {
    let r = ElementReader::new(node, ClassId::Metric)?;
    Ok(Metric {
        name: r.required_string("name")?,
        description: read_description(r.required_child("description")?)?,
        kind: r.literal("kind")?,
        dynamic: r.value("dynamic", BOOLEAN)?,
    })
}

fn read_enumerations(node: &Node) -> Result<Enumerations, ImportError> {
    let r = ElementReader::new(node, ClassId::Enumerations)?;
    Ok(Enumerations {
        enumeration: read_all(r.children("enumeration"), read_enumeration)?,
    })
}

fn read_enumeration(node: &Node) -> Result<Enumeration, ImportError> {
    let r = ElementReader::new(node, ClassId::Enumeration)?;
    Ok(Enumeration {
        name: r.required_string("name")?,
        value: r.strings("value"),
    })
}

fn read_custom_output_functions(node: &Node) -> Result<CustomOutputFunctions, ImportError> {
    let r = ElementReader::new(node, ClassId::CustomOutputFunctions)?;
    Ok(CustomOutputFunctions {
        custom_output_function: read_all(
            r.children("customOutputFunction"),
            read_custom_output_function_set,
        )?,
    })
}

fn read_custom_output_function_set(node: &Node) -> Result<CustomOutputFunctionSet, ImportError> {
    let r = ElementReader::new(node, ClassId::CustomOutputFunctionSet)?;
    Ok(CustomOutputFunctionSet {
        name: r.required_string("name")?,
        function: read_all(r.children("function"), read_custom_output_function)?,
    })
}

fn read_custom_output_function(node: &Node) -> Result<CustomOutputFunction, ImportError> {
    let r = ElementReader::new(node, ClassId::CustomOutputFunction)?;
    Ok(CustomOutputFunction {
        description: read_optional(r.child("description"), read_description)?,
        prototype: r.required_string("prototype")?,
        pseudo_function: r.attribute_value("pseudoFunction", BOOLEAN)?,
    })
}

fn read_library_dependencies(node: &Node) -> Result<LibraryDependencies, ImportError> {
    let r = ElementReader::new(node, ClassId::LibraryDependencies)?;
    Ok(LibraryDependencies {
        library: read_all(r.children("library"), read_library)?,
    })
}

fn read_library(node: &Node) -> Result<Library, ImportError> {
    let r = ElementReader::new(node, ClassId::Library)?;
    let managed = ElementReader::new(r.required_child("managedLibrary")?, ClassId::ManagedLibrary)?;
    Ok(Library {
        description: read_description(r.required_child("description")?)?,
        managed_library: ManagedLibrary {
            lib: managed.strings("lib"),
            lib_path: managed.strings("libPath"),
            include_path: managed.strings("includePath"),
            command: managed.string("command"),
        },
    })
}

fn read_java_library_dependencies(node: &Node) -> Result<JavaOpLibraryDependencies, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpLibraryDependencies)?;
    Ok(JavaOpLibraryDependencies {
        library: read_all(r.children("library"), read_java_library)?,
    })
}

fn read_java_library(node: &Node) -> Result<JavaOpLibrary, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpLibrary)?;
    let managed = ElementReader::new(
        r.required_child("managedLibrary")?,
        ClassId::JavaOpManagedLibrary,
    )?;
    Ok(JavaOpLibrary {
        description: read_description(r.required_child("description")?)?,
        managed_library: JavaOpManagedLibrary {
            lib_path: managed.strings("libPath"),
            command: managed.string("command"),
        },
    })
}

fn read_code_templates(node: &Node) -> Result<CodeTemplates, ImportError> {
    let r = ElementReader::new(node, ClassId::CodeTemplates)?;
    Ok(CodeTemplates {
        code_template: read_all(r.children("codeTemplate"), read_code_template)?,
    })
}

fn read_code_template(node: &Node) -> Result<CodeTemplate, ImportError> {
    let r = ElementReader::new(node, ClassId::CodeTemplate)?;
    Ok(CodeTemplate {
        description: read_optional(r.child("description"), read_description)?,
        template: r.required_string("template")?,
        name: r.attribute("name").unwrap_or_default().to_string(),
    })
}

fn read_spl_expression_tree(node: &Node) -> Result<SplExpressionTree, ImportError> {
    let r = ElementReader::new(node, ClassId::SplExpressionTree)?;
    Ok(SplExpressionTree {
        cpp_code: r.attribute_value("cppCode", BOOLEAN)?,
        output: r.attribute_value("output", BOOLEAN)?,
        param: r.attribute_value("param", BOOLEAN)?,
    })
}

fn read_execution_settings(node: &Node) -> Result<JavaOpExecutionSettings, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpExecutionSettings)?;
    Ok(JavaOpExecutionSettings {
        class_name: r.token("className").unwrap_or_default(),
        vm_args: read_optional(r.child("vmArgs"), read_vm_args)?,
    })
}

fn read_vm_args(node: &Node) -> Result<JavaOpVmArgs, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpVmArgs)?;
    Ok(JavaOpVmArgs {
        vm_arg: r.strings("vmArg"),
    })
}

fn read_parameters(node: &Node) -> Result<Parameters, ImportError> {
    let r = ElementReader::new(node, ClassId::Parameters)?;
    Ok(Parameters {
        description: read_optional(r.child("description"), read_description)?,
        allow_any: r.value("allowAny", BOOLEAN)?,
        parameter: read_all(r.children("parameter"), read_parameter)?,
    })
}

fn read_parameter(node: &Node) -> Result<Parameter, ImportError> {
    let r = ElementReader::new(node, ClassId::Parameter)?;
    Ok(Parameter {
        name: r.required_string("name")?,
        description: read_optional(r.child("description"), read_description)?,
        optional: r.value("optional", BOOLEAN)?,
        rewrite_allowed: r.value("rewriteAllowed", BOOLEAN)?,
        expression_mode: r.literal("expressionMode")?,
        type_: r.string("type"),
        cardinality: r.value("cardinality", INTEGER)?,
        port_scope: read_optional(r.child("portScope"), read_port_scope)?,
        custom_output_function: r.string("customOutputFunction"),
    })
}

fn read_java_parameters(node: &Node) -> Result<JavaOpParameters, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpParameters)?;
    Ok(JavaOpParameters {
        description: read_optional(r.child("description"), read_description)?,
        parameter: read_all(r.children("parameter"), read_java_parameter)?,
    })
}

fn read_java_parameter(node: &Node) -> Result<JavaOpParameter, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpParameter)?;
    Ok(JavaOpParameter {
        name: r.required_string("name")?,
        description: read_optional(r.child("description"), read_description)?,
        optional: r.value("optional", BOOLEAN)?,
        expression_mode: r.literal("expressionMode")?,
        type_: r.string("type"),
        cardinality: r.value("cardinality", INTEGER)?,
    })
}

fn read_port_scope(node: &Node) -> Result<PortScope, ImportError> {
    let r = ElementReader::new(node, ClassId::PortScope)?;
    Ok(PortScope {
        port: r.values("port", NON_NEGATIVE_INTEGER)?,
    })
}

fn read_optional_port_scope(node: &Node) -> Result<OptionalPortScope, ImportError> {
    let r = ElementReader::new(node, ClassId::OptionalPortScope)?;
    Ok(OptionalPortScope {
        port: r.values("port", NON_NEGATIVE_INTEGER)?,
    })
}

fn read_input_ports(node: &Node) -> Result<InputPorts, ImportError> {
    let r = ElementReader::new(node, ClassId::InputPorts)?;
    Ok(InputPorts {
        input_port_set: read_all(r.children("inputPortSet"), read_input_port_set)?,
        input_port_open_set: read_optional(r.child("inputPortOpenSet"), read_input_port_open_set)?,
    })
}

fn read_input_port_open_set(node: &Node) -> Result<InputPortOpenSet, ImportError> {
    input_open_fields(&ElementReader::new(node, ClassId::InputPortOpenSet)?)
}

fn read_input_port_set(node: &Node) -> Result<InputPortSet, ImportError> {
    let r = ElementReader::new(node, ClassId::InputPortSet)?;
    Ok(InputPortSet {
        open: input_open_fields(&r)?,
        cardinality: required_cardinality(&r)?,
        optional: r.value("optional", BOOLEAN)?,
    })
}

fn input_open_fields(r: &ElementReader<'_>) -> Result<InputPortOpenSet, ImportError> {
    Ok(InputPortOpenSet {
        description: read_optional(r.child("description"), read_description)?,
        windowing_description: read_optional(r.child("windowingDescription"), read_description)?,
        tuple_mutation_allowed: r.value("tupleMutationAllowed", BOOLEAN)?,
        windowing_mode: r.literal("windowingMode")?,
        window_punctuation_input_mode: r.literal("windowPunctuationInputMode")?,
        control_port: r.value("controlPort", BOOLEAN)?,
        window_expression_mode: r.literal("windowExpressionMode")?,
        rewrite_allowed_for_window_expression: r.value("rewriteAllowedForWindowExpression", BOOLEAN)?,
    })
}

fn required_cardinality(r: &ElementReader<'_>) -> Result<u64, ImportError> {
    let node = r.required_child("cardinality")?;
    parse_value("cardinality", &node.text, NON_NEGATIVE_INTEGER)
}

fn read_output_ports(node: &Node) -> Result<OutputPorts, ImportError> {
    let r = ElementReader::new(node, ClassId::OutputPorts)?;
    Ok(OutputPorts {
        output_port_set: read_all(r.children("outputPortSet"), read_output_port_set)?,
        output_port_open_set: read_optional(r.child("outputPortOpenSet"), read_output_port_open_set)?,
    })
}

fn read_output_port_open_set(node: &Node) -> Result<OutputPortOpenSet, ImportError> {
    output_open_fields(&ElementReader::new(node, ClassId::OutputPortOpenSet)?)
}

fn read_output_port_set(node: &Node) -> Result<OutputPortSet, ImportError> {
    let r = ElementReader::new(node, ClassId::OutputPortSet)?;
    Ok(OutputPortSet {
        open: output_open_fields(&r)?,
        cardinality: required_cardinality(&r)?,
        optional: r.value("optional", BOOLEAN)?,
    })
}

fn output_open_fields(r: &ElementReader<'_>) -> Result<OutputPortOpenSet, ImportError> {
    Ok(OutputPortOpenSet {
        description: read_optional(r.child("description"), read_description)?,
        expression_mode: r.literal("expressionMode")?,
        auto_assignment: r.value("autoAssignment", BOOLEAN)?,
        complete_assignment: r.value("completeAssignment", BOOLEAN)?,
        rewrite_allowed: r.value("rewriteAllowed", BOOLEAN)?,
        output_functions: read_optional(r.child("outputFunctions"), read_output_functions)?,
        window_punctuation_output_mode: r.literal("windowPunctuationOutputMode")?,
        window_punctuation_input_port: r.value("windowPunctuationInputPort", INTEGER)?,
        final_punctuation_port_scope: read_optional(
            r.child("finalPunctuationPortScope"),
            read_optional_port_scope,
        )?,
        tuple_mutation_allowed: r.value("tupleMutationAllowed", BOOLEAN)?,
        output_assignment_port_scope: read_optional(
            r.child("outputAssignmentPortScope"),
            read_port_scope,
        )?,
        allow_nested_custom_output_functions: r.value("allowNestedCustomOutputFunctions", BOOLEAN)?,
    })
}

fn read_output_functions(node: &Node) -> Result<OutputFunctions, ImportError> {
    let r = ElementReader::new(node, ClassId::OutputFunctions)?;
    Ok(OutputFunctions {
        default: r.required_string("default")?,
        type_: r.required_string("type")?,
    })
}

fn read_java_input_ports(node: &Node) -> Result<JavaOpInputPorts, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpInputPorts)?;
    Ok(JavaOpInputPorts {
        input_port_set: read_all(r.children("inputPortSet"), read_java_input_port_set)?,
        input_port_open_set: read_optional(r.child("inputPortOpenSet"), read_java_input_port_open_set)?,
    })
}

fn read_java_input_port_open_set(node: &Node) -> Result<JavaOpInputPortOpenSet, ImportError> {
    java_input_open_fields(&ElementReader::new(node, ClassId::JavaOpInputPortOpenSet)?)
}

fn read_java_input_port_set(node: &Node) -> Result<JavaOpInputPortSet, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpInputPortSet)?;
    Ok(JavaOpInputPortSet {
        open: java_input_open_fields(&r)?,
        cardinality: required_cardinality(&r)?,
        optional: r.value("optional", BOOLEAN)?,
    })
}

fn java_input_open_fields(r: &ElementReader<'_>) -> Result<JavaOpInputPortOpenSet, ImportError> {
    Ok(JavaOpInputPortOpenSet {
        description: read_optional(r.child("description"), read_description)?,
        windowing_description: read_optional(r.child("windowingDescription"), read_description)?,
        windowing_mode: r.literal("windowingMode")?,
        window_punctuation_input_mode: r.literal("windowPunctuationInputMode")?,
        control_port: r.value("controlPort", BOOLEAN)?,
    })
}

fn read_java_output_ports(node: &Node) -> Result<JavaOpOutputPorts, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpOutputPorts)?;
    Ok(JavaOpOutputPorts {
        output_port_set: read_all(r.children("outputPortSet"), read_java_output_port_set)?,
        output_port_open_set: read_optional(
            r.child("outputPortOpenSet"),
            read_java_output_port_open_set,
        )?,
    })
}

fn read_java_output_port_open_set(node: &Node) -> Result<JavaOpOutputPortOpenSet, ImportError> {
    java_output_open_fields(&ElementReader::new(node, ClassId::JavaOpOutputPortOpenSet)?)
}

fn read_java_output_port_set(node: &Node) -> Result<JavaOpOutputPortSet, ImportError> {
    let r = ElementReader::new(node, ClassId::JavaOpOutputPortSet)?;
    Ok(JavaOpOutputPortSet {
        open: java_output_open_fields(&r)?,
        cardinality: required_cardinality(&r)?,
        optional: r.value("optional", BOOLEAN)?,
    })
}

fn java_output_open_fields(r: &ElementReader<'_>) -> Result<JavaOpOutputPortOpenSet, ImportError> {
    Ok(JavaOpOutputPortOpenSet {
        description: read_optional(r.child("description"), read_description)?,
        window_punctuation_output_mode: r.literal("windowPunctuationOutputMode")?,
        window_punctuation_input_port: r.value("windowPunctuationInputPort", INTEGER)?,
        final_punctuation_port_scope: read_optional(
            r.child("finalPunctuationPortScope"),
            read_optional_port_scope,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<operatorModel xmlns="http://www.ibm.com/xmlns/prod/streams/spl/operator"
               xmlns:cmn="http://www.ibm.com/xmlns/prod/streams/spl/common"
               xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
               xsi:schemaLocation="http://www.ibm.com/xmlns/prod/streams/spl/operator operatorModel.xsd">
  <cppOperatorModel>
    <context>
      <providesSingleThreadedContext>Always</providesSingleThreadedContext>
    </context>
    <parameters>
      <allowAny>false</allowAny>
    </parameters>
    <inputPorts/>
    <outputPorts/>
  </cppOperatorModel>
</operatorModel>"#;

    fn wrap_context(context: &str) -> String {
        format!(
            r#"<operatorModel xmlns="{OPERATOR_NAMESPACE}"><cppOperatorModel>{context}<parameters/><inputPorts/><outputPorts/></cppOperatorModel></operatorModel>"#
        )
    }

    #[test]
    fn test_validate_minimal() {
        let importer = OperatorModelImporter::new();
        assert!(importer.validate(MINIMAL).is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_root() {
        let importer = OperatorModelImporter::new();
        let err = importer
            .validate(r#"<toolkitModel xmlns="http://www.ibm.com/xmlns/prod/streams/spl/toolkit"/>"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("expected 'operatorModel'"));
    }

    #[test]
    fn test_validate_rejects_wrong_namespace() {
        let importer = OperatorModelImporter::new();
        assert!(importer.validate("<operatorModel/>").is_err());
    }

    #[test]
    fn test_import_minimal() {
        let doc = OperatorModelImporter::new().import(MINIMAL).unwrap();
        let model = doc.model.as_cpp().unwrap();
        assert_eq!(
            model.context.provides_single_threaded_context(),
            SingleThreadedContext::Always
        );
        assert!(model.parameters.is_set_allow_any());
        assert_eq!(doc.prefix_for(COMMON_NAMESPACE), Some("cmn"));
        assert_eq!(
            doc.schema_location.as_deref(),
            Some("http://www.ibm.com/xmlns/prod/streams/spl/operator operatorModel.xsd")
        );
    }

    #[test]
    fn test_allow_custom_logic_set_and_unset() {
        let importer = OperatorModelImporter::new();
        let set = importer
            .import(&wrap_context("<context><allowCustomLogic>true</allowCustomLogic></context>"))
            .unwrap();
        let ctx = &set.model.as_cpp().unwrap().context;
        assert!(ctx.is_set_allow_custom_logic());
        assert!(ctx.allow_custom_logic());

        let unset = importer.import(&wrap_context("<context/>")).unwrap();
        let ctx = &unset.model.as_cpp().unwrap().context;
        assert!(!ctx.is_set_allow_custom_logic());
        assert!(!ctx.allow_custom_logic());
    }

    #[test]
    fn test_boolean_lexical_forms() {
        let importer = OperatorModelImporter::new();
        let doc = importer
            .import(&wrap_context("<context><allowCustomLogic> 1 </allowCustomLogic></context>"))
            .unwrap();
        assert!(doc.model.as_cpp().unwrap().context.allow_custom_logic());

        let err = importer
            .import(&wrap_context("<context><allowCustomLogic>yes</allowCustomLogic></context>"))
            .unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidValue { feature: "allowCustomLogic", .. }
        ));
    }

    #[test]
    fn test_integers_beyond_64_bits_are_rejected() {
        let importer = OperatorModelImporter::new();
        let parameter = format!(
            r#"<operatorModel xmlns="{OPERATOR_NAMESPACE}"><cppOperatorModel><context/><parameters><parameter><name>n</name><cardinality>9223372036854775808</cardinality></parameter></parameters><inputPorts/><outputPorts/></cppOperatorModel></operatorModel>"#
        );
        let err = importer.import(&parameter).unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidValue { feature: "cardinality", .. }
        ));
        assert!(err.to_string().contains("64-bit signed range"));

        let port = format!(
            r#"<operatorModel xmlns="{OPERATOR_NAMESPACE}"><cppOperatorModel><context/><parameters/><inputPorts><inputPortSet><cardinality>18446744073709551616</cardinality><optional>false</optional></inputPortSet></inputPorts><outputPorts/></cppOperatorModel></operatorModel>"#
        );
        let err = importer.import(&port).unwrap_err();
        assert!(err.to_string().contains("64-bit unsigned range"), "{err}");
    }

    #[test]
    fn test_unknown_literal_fails() {
        let err = OperatorModelImporter::new()
            .import(&wrap_context(
                "<context><providesSingleThreadedContext>Sometimes</providesSingleThreadedContext></context>",
            ))
            .unwrap_err();
        match err {
            ImportError::Literal(e) => {
                assert_eq!(e.enumeration, "singleThreadedContextType");
                assert_eq!(e.literal, "Sometimes");
            }
            other => panic!("expected literal error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_element_fails() {
        let err = OperatorModelImporter::new()
            .import(&wrap_context("<context><colour>red</colour></context>"))
            .unwrap_err();
        assert!(matches!(
            err,
            ImportError::UnexpectedElement { class: "ContextType", ref element, .. } if element == "colour"
        ));
    }

    #[test]
    fn test_unknown_attribute_fails_but_xsi_is_tolerated() {
        let importer = OperatorModelImporter::new();
        let err = importer
            .import(&wrap_context(r#"<context colour="red"/>"#))
            .unwrap_err();
        assert!(matches!(err, ImportError::UnexpectedAttribute { .. }));

        let ok = importer.import(&wrap_context(&format!(
            r#"<context xmlns:xsi="{XSI_NAMESPACE}" xsi:type="contextType"/>"#
        )));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_missing_required_element_fails() {
        let xml = format!(
            r#"<operatorModel xmlns="{OPERATOR_NAMESPACE}"><cppOperatorModel><context/><parameters/><inputPorts/></cppOperatorModel></operatorModel>"#
        );
        let err = OperatorModelImporter::new().import(&xml).unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingElement { class: "OpModelType", element: "outputPorts", .. }
        ));
    }

    #[test]
    fn test_any_prefix_may_be_used() {
        let xml = format!(
            r#"<op:operatorModel xmlns:op="{OPERATOR_NAMESPACE}" xmlns:c="{COMMON_NAMESPACE}">
              <op:cppOperatorModel>
                <op:context>
                  <op:libraryDependencies>
                    <op:library>
                      <c:description>Zlib</c:description>
                      <c:managedLibrary><c:lib>z</c:lib></c:managedLibrary>
                    </op:library>
                  </op:libraryDependencies>
                </op:context>
                <op:parameters/><op:inputPorts/><op:outputPorts/>
              </op:cppOperatorModel>
            </op:operatorModel>"#
        );
        let doc = OperatorModelImporter::new().import(&xml).unwrap();
        let deps = doc.model.as_cpp().unwrap().context.library_dependencies.as_ref().unwrap();
        assert_eq!(deps.library[0].managed_library.lib, vec!["z".to_string()]);
        assert_eq!(deps.library[0].description.text, "Zlib");
        assert_eq!(doc.prefix_for(COMMON_NAMESPACE), Some("c"));
    }

    #[test]
    fn test_common_elements_in_wrong_namespace_fail() {
        let xml = wrap_context(
            "<context><libraryDependencies><library><description>x</description><managedLibrary/></library></libraryDependencies></context>",
        );
        let err = OperatorModelImporter::new().import(&xml).unwrap_err();
        assert!(matches!(err, ImportError::UnexpectedElement { class: "LibraryType", .. }));
    }

    #[test]
    fn test_malformed_xml_reports_position() {
        let err = OperatorModelImporter::new()
            .import("<operatorModel><cppOperatorModel></operatorModel>")
            .unwrap_err();
        assert!(matches!(err, ImportError::ParseError { .. }));
    }

    #[test]
    fn test_import_file_missing() {
        let err = OperatorModelImporter::new()
            .import_file("/nonexistent/Op/Op.xml")
            .unwrap_err();
        assert!(matches!(err, ImportError::IoError(_)));
    }
}
