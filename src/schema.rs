//! Operator model schema registry
//!
//! An immutable description of every class, feature and enumeration of the
//! operator model schema, built once on first use and shared by `&'static`
//! reference. The XML reader consults it to reject unknown content and to
//! enforce required features; the CLI dumps it as JSON.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::factory::FactoryError;
use crate::models::enums::{
    ExpressionMode, IncrementalCompilationStrategy, JavaOpExpressionMode, MetricKind,
    SingleThreadedContext, WindowExpressionMode, WindowPunctuationInputMode,
    WindowPunctuationOutputMode, WindowingMode,
};
use crate::models::{COMMON_NAMESPACE, OPERATOR_NAMESPACE, XSI_NAMESPACE};

/// Upper bound of a many-valued feature
pub const UNBOUNDED: i32 = -1;

/// Schema package a class belongs to; determines the namespace of its elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Package {
    Operator,
    Common,
}

impl Package {
    pub fn namespace(&self) -> &'static str {
        match self {
            Package::Operator => OPERATOR_NAMESPACE,
            Package::Common => COMMON_NAMESPACE,
        }
    }
}

macro_rules! class_ids {
    ($( $variant:ident = $package:ident $id:literal $name:literal ),+ $(,)?) => {
        /// Identifies a schema class
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum ClassId {
            $($variant),+
        }

        impl ClassId {
            pub const ALL: &'static [ClassId] = &[$(ClassId::$variant),+];

            /// Schema (EMF) class name, e.g. `ContextType`
            pub fn name(&self) -> &'static str {
                match self {
                    $(ClassId::$variant => $name),+
                }
            }

            pub fn package(&self) -> Package {
                match self {
                    $(ClassId::$variant => Package::$package),+
                }
            }

            /// Classifier id within the class's package
            pub fn classifier_id(&self) -> u32 {
                match self {
                    $(ClassId::$variant => $id),+
                }
            }

            fn index(&self) -> usize {
                *self as usize
            }
        }
    };
}

class_ids! {
    CodeTemplates = Operator 0 "CodeTemplatesType",
    CodeTemplate = Operator 1 "CodeTemplateType",
    Context = Operator 2 "ContextType",
    CustomOutputFunctionSet = Operator 3 "CustomOutputFunctionSetType",
    CustomOutputFunctions = Operator 4 "CustomOutputFunctionsType",
    CustomOutputFunction = Operator 5 "CustomOutputFunctionType",
    DocumentRoot = Operator 6 "DocumentRoot",
    Enumerations = Operator 7 "EnumerationsType",
    Enumeration = Operator 8 "EnumerationType",
    IconUri = Operator 9 "IconUriType",
    InputPortOpenSet = Operator 10 "InputPortOpenSetType",
    InputPortSet = Operator 11 "InputPortSetType",
    InputPorts = Operator 12 "InputPortsType",
    JavaOpContext = Operator 13 "JavaOpContextType",
    JavaOpExecutionSettings = Operator 14 "JavaOpExecutionSettingsType",
    JavaOpInputPortOpenSet = Operator 15 "JavaOpInputPortOpenSetType",
    JavaOpInputPortSet = Operator 16 "JavaOpInputPortSetType",
    JavaOpInputPorts = Operator 17 "JavaOpInputPortsType",
    JavaOpLibraryDependencies = Operator 18 "JavaOpLibraryDependenciesType",
    JavaOpModel = Operator 19 "JavaOpModelType",
    JavaOpOutputPortOpenSet = Operator 20 "JavaOpOutputPortOpenSetType",
    JavaOpOutputPortSet = Operator 21 "JavaOpOutputPortSetType",
    JavaOpOutputPorts = Operator 22 "JavaOpOutputPortsType",
    JavaOpParameters = Operator 23 "JavaOpParametersType",
    JavaOpParameter = Operator 24 "JavaOpParameterType",
    JavaOpVmArgs = Operator 25 "JavaOpVMArgsType",
    LibraryDependencies = Operator 26 "LibraryDependenciesType",
    Metrics = Operator 27 "MetricsType",
    Metric = Operator 28 "MetricType",
    OperatorModel = Operator 29 "OperatorModelType",
    OpModel = Operator 30 "OpModelType",
    OptionalPortScope = Operator 31 "OptionalPortScopeType",
    OutputFunctions = Operator 32 "OutputFunctionsType",
    OutputPortOpenSet = Operator 33 "OutputPortOpenSetType",
    OutputPortSet = Operator 34 "OutputPortSetType",
    OutputPorts = Operator 35 "OutputPortsType",
    Parameters = Operator 36 "ParametersType",
    Parameter = Operator 37 "ParameterType",
    PortScope = Operator 38 "PortScopeType",
    SplExpressionTree = Operator 39 "SplExpressionTreeType",
    Description = Common 0 "DescriptionType",
    JavaOpLibrary = Common 2 "JavaOpLibraryType",
    JavaOpManagedLibrary = Common 3 "JavaOpManagedLibraryType",
    Library = Common 4 "LibraryType",
    ManagedLibrary = Common 5 "ManagedLibraryType",
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for ClassId {
    type Error = FactoryError;

    /// Resolves an operator package classifier id
    fn try_from(id: u32) -> Result<Self, Self::Error> {
        ClassId::ALL
            .iter()
            .copied()
            .find(|c| c.package() == Package::Operator && c.classifier_id() == id)
            .ok_or_else(|| FactoryError::UnknownClass(id.to_string()))
    }
}

impl FromStr for ClassId {
    type Err = FactoryError;

    /// Accepts the schema name (`ContextType`) or the short name (`Context`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClassId::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s || format!("{c:?}") == s)
            .ok_or_else(|| FactoryError::UnknownClass(s.to_string()))
    }
}

macro_rules! enum_ids {
    ($( $variant:ident => $ty:ident ($id:literal, $object_id:literal, $name:literal) ),+ $(,)?) => {
        /// Identifies a schema enumeration
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum EnumId {
            $($variant),+
        }

        impl EnumId {
            pub const ALL: &'static [EnumId] = &[$(EnumId::$variant),+];

            /// Schema name of the enumeration, e.g. `WindowingModeType`
            pub fn name(&self) -> &'static str {
                match self {
                    $(EnumId::$variant => $name),+
                }
            }

            pub fn classifier_id(&self) -> u32 {
                match self {
                    $(EnumId::$variant => $id),+
                }
            }

            /// Classifier id of the nullable `...Object` data type
            pub fn object_classifier_id(&self) -> u32 {
                match self {
                    $(EnumId::$variant => $object_id),+
                }
            }

            pub fn xml_name(&self) -> &'static str {
                match self {
                    $(EnumId::$variant => $ty::XML_NAME),+
                }
            }

            /// Literal tokens in schema order
            pub fn literals(&self) -> Vec<&'static str> {
                match self {
                    $(EnumId::$variant => $ty::ALL.iter().map(|v| v.literal()).collect()),+
                }
            }

            fn index(&self) -> usize {
                *self as usize
            }
        }
    };
}

enum_ids! {
    ExpressionMode => ExpressionMode(40, 49, "ExpressionModeType"),
    IncrementalCompilationStrategy => IncrementalCompilationStrategy(41, 50, "IncrementalCompilationStrategyType"),
    JavaOpExpressionMode => JavaOpExpressionMode(42, 51, "JavaOpExpressionModeType"),
    MetricKind => MetricKind(43, 52, "MetricKindType"),
    SingleThreadedContext => SingleThreadedContext(44, 53, "SingleThreadedContextType"),
    WindowExpressionMode => WindowExpressionMode(45, 54, "WindowExpressionModeType"),
    WindowingMode => WindowingMode(46, 55, "WindowingModeType"),
    WindowPunctuationInputMode => WindowPunctuationInputMode(47, 56, "WindowPunctuationInputModeType"),
    WindowPunctuationOutputMode => WindowPunctuationOutputMode(48, 57, "WindowPunctuationOutputModeType"),
}

impl fmt::Display for EnumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnumId {
    type Err = FactoryError;

    /// Accepts the enumeration name or its `...Object` data type name, in
    /// either the schema (`WindowingModeTypeObject`) or XML
    /// (`windowingModeType:Object`) spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = s
            .strip_suffix(":Object")
            .or_else(|| s.strip_suffix("Object"))
            .unwrap_or(s);
        EnumId::ALL
            .iter()
            .copied()
            .find(|e| e.name() == base || e.xml_name() == base)
            .ok_or_else(|| FactoryError::UnknownDataType(s.to_string()))
    }
}

/// XSD built-in types used by the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    String,
    Token,
    Boolean,
    /// `xsd:int`
    Int,
    /// `xsd:integer`
    Integer,
    NonNegativeInteger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeatureType {
    Data(DataType),
    Enum(EnumId),
    /// Containment of another schema class
    Class(ClassId),
}

/// How a feature is represented in XML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum XmlKind {
    Element,
    Attribute,
    SimpleContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentKind {
    ElementOnly,
    Simple,
    Empty,
    Mixed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureInfo {
    /// Feature id; a subclass numbers its own features after its supertype's
    pub id: u32,
    pub name: &'static str,
    pub xml_name: &'static str,
    pub kind: XmlKind,
    /// Namespace of the element; attributes and simple content have none
    pub namespace: Option<&'static str>,
    #[serde(rename = "type")]
    pub ty: FeatureType,
    pub lower: i32,
    pub upper: i32,
    pub unsettable: bool,
    pub ordered: bool,
    /// Value an unset feature reads as
    pub default_literal: Option<&'static str>,
}

impl FeatureInfo {
    pub fn is_many(&self) -> bool {
        self.upper == UNBOUNDED || self.upper > 1
    }

    /// Required features that have no unset state must be present in a document
    pub fn is_required(&self) -> bool {
        self.lower >= 1 && !self.unsettable
    }

    pub fn is_containment(&self) -> bool {
        matches!(self.ty, FeatureType::Class(_))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub id: ClassId,
    pub name: &'static str,
    /// XSD complex type name
    pub xml_name: String,
    pub package: Package,
    pub classifier_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supertype: Option<ClassId>,
    pub content: ContentKind,
    /// Features declared by this class, without inherited ones
    pub features: Vec<FeatureInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiteralInfo {
    pub value: u32,
    pub name: &'static str,
    pub literal: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumInfo {
    pub id: EnumId,
    pub name: &'static str,
    pub xml_name: &'static str,
    pub classifier_id: u32,
    pub literals: Vec<LiteralInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub namespace: &'static str,
    pub common_namespace: &'static str,
    /// Conventional prefixes: `cmn` for the common namespace and `xsi`
    pub prefixes: Vec<(&'static str, &'static str)>,
    pub classes: Vec<ClassInfo>,
    pub enums: Vec<EnumInfo>,
}

static SCHEMA: Lazy<Schema> = Lazy::new(build_schema);

/// The process-wide schema registry
pub fn schema() -> &'static Schema {
    &SCHEMA
}

impl Schema {
    pub fn class(&self, id: ClassId) -> &ClassInfo {
        &self.classes[id.index()]
    }

    pub fn class_by_name(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn class_by_xml_name(&self, xml_name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.xml_name == xml_name)
    }

    /// All features of a class, supertype features first
    pub fn all_features(&self, id: ClassId) -> Vec<&FeatureInfo> {
        let class = self.class(id);
        let mut features = match class.supertype {
            Some(parent) => self.all_features(parent),
            None => Vec::new(),
        };
        features.extend(class.features.iter());
        features
    }

    /// Looks up a feature of `id` (or its supertypes) by XML name
    pub fn feature(&self, id: ClassId, xml_name: &str) -> Option<&FeatureInfo> {
        self.all_features(id)
            .into_iter()
            .find(|f| f.xml_name == xml_name)
    }

    /// The element feature matching a child element `{namespace}local`
    pub fn element_feature(&self, id: ClassId, namespace: &str, local: &str) -> Option<&FeatureInfo> {
        self.all_features(id).into_iter().find(|f| {
            f.kind == XmlKind::Element && f.xml_name == local && f.namespace == Some(namespace)
        })
    }

    pub fn attribute_feature(&self, id: ClassId, local: &str) -> Option<&FeatureInfo> {
        self.all_features(id)
            .into_iter()
            .find(|f| f.kind == XmlKind::Attribute && f.xml_name == local)
    }

    /// Features a document must contain for an instance of `id`
    pub fn required_features(&self, id: ClassId) -> Vec<&FeatureInfo> {
        self.all_features(id)
            .into_iter()
            .filter(|f| f.is_required())
            .collect()
    }

    pub fn enumeration(&self, id: EnumId) -> &EnumInfo {
        &self.enums[id.index()]
    }
}

struct ClassBuilder {
    info: ClassInfo,
}

impl ClassBuilder {
    fn new(id: ClassId, content: ContentKind, supertype: Option<ClassId>) -> Self {
        let name = id.name();
        let xml_name = match name {
            "DocumentRoot" => String::new(),
            _ => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        };
        Self {
            info: ClassInfo {
                id,
                name,
                xml_name,
                package: id.package(),
                classifier_id: id.classifier_id(),
                supertype,
                content,
                features: Vec::new(),
            },
        }
    }

    fn add(mut self, kind: XmlKind, name: &'static str, ty: FeatureType, lower: i32, upper: i32, unsettable: bool) -> Self {
        let namespace = match kind {
            XmlKind::Element => Some(self.info.package.namespace()),
            _ => None,
        };
        let default_literal = if unsettable { default_literal(ty) } else { None };
        self.info.features.push(FeatureInfo {
            id: 0,
            name,
            xml_name: name,
            kind,
            namespace,
            ty,
            lower,
            upper,
            unsettable,
            ordered: true,
            default_literal,
        });
        self
    }

    fn element(self, name: &'static str, ty: FeatureType, lower: i32, upper: i32) -> Self {
        self.add(XmlKind::Element, name, ty, lower, upper, false)
    }

    fn unsettable(self, name: &'static str, ty: FeatureType, lower: i32) -> Self {
        self.add(XmlKind::Element, name, ty, lower, 1, true)
    }

    fn attribute(self, name: &'static str, ty: FeatureType, lower: i32, unsettable: bool) -> Self {
        self.add(XmlKind::Attribute, name, ty, lower, 1, unsettable)
    }

    fn simple_content(self, ty: FeatureType, lower: i32) -> Self {
        self.add(XmlKind::SimpleContent, "value", ty, lower, 1, false)
    }
}

fn default_literal(ty: FeatureType) -> Option<&'static str> {
    match ty {
        FeatureType::Enum(id) => id.literals().first().copied(),
        FeatureType::Data(DataType::Boolean) => Some("false"),
        FeatureType::Data(DataType::Int | DataType::Integer | DataType::NonNegativeInteger) => Some("0"),
        _ => None,
    }
}

fn build_schema() -> Schema {
    use ClassId as C;
    use ContentKind::{ElementOnly, Empty, Mixed, Simple};

    const STRING: FeatureType = FeatureType::Data(DataType::String);
    const TOKEN: FeatureType = FeatureType::Data(DataType::Token);
    const BOOLEAN: FeatureType = FeatureType::Data(DataType::Boolean);
    const INT: FeatureType = FeatureType::Data(DataType::Int);
    const INTEGER: FeatureType = FeatureType::Data(DataType::Integer);
    const NON_NEGATIVE: FeatureType = FeatureType::Data(DataType::NonNegativeInteger);
    let class = FeatureType::Class;
    let enumeration = FeatureType::Enum;
    let many = UNBOUNDED;

    let builders = vec![
        ClassBuilder::new(C::CodeTemplates, ElementOnly, None)
            .element("codeTemplate", class(C::CodeTemplate), 0, many),
        ClassBuilder::new(C::CodeTemplate, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .element("template", STRING, 1, 1)
            .attribute("name", STRING, 1, false),
        ClassBuilder::new(C::Context, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .element("iconUri", class(C::IconUri), 0, many)
            .element("metrics", class(C::Metrics), 0, 1)
            .element("customLiterals", class(C::Enumerations), 0, 1)
            .element("customOutputFunctions", class(C::CustomOutputFunctions), 0, 1)
            .element("libraryDependencies", class(C::LibraryDependencies), 0, 1)
            .unsettable("providesSingleThreadedContext", enumeration(EnumId::SingleThreadedContext), 1)
            .unsettable("incrementalCompilationStrategy", enumeration(EnumId::IncrementalCompilationStrategy), 0)
            .unsettable("allowCustomLogic", BOOLEAN, 0)
            .element("codeTemplates", class(C::CodeTemplates), 0, 1)
            .element("splExpressionTree", class(C::SplExpressionTree), 0, 1)
            .element("capability", STRING, 0, many)
            .attribute("verificationModule", TOKEN, 0, false),
        ClassBuilder::new(C::CustomOutputFunctionSet, ElementOnly, None)
            .element("name", STRING, 1, 1)
            .element("function", class(C::CustomOutputFunction), 0, many),
        ClassBuilder::new(C::CustomOutputFunctions, ElementOnly, None)
            .element("customOutputFunction", class(C::CustomOutputFunctionSet), 0, many),
        ClassBuilder::new(C::CustomOutputFunction, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .element("prototype", STRING, 1, 1)
            .attribute("pseudoFunction", BOOLEAN, 0, true),
        ClassBuilder::new(C::DocumentRoot, Mixed, None)
            .element("operatorModel", class(C::OperatorModel), 0, 1),
        ClassBuilder::new(C::Enumerations, ElementOnly, None)
            .element("enumeration", class(C::Enumeration), 0, many),
        ClassBuilder::new(C::Enumeration, ElementOnly, None)
            .element("name", STRING, 1, 1)
            .element("value", STRING, 0, many),
        ClassBuilder::new(C::IconUri, Simple, None)
            .simple_content(STRING, 0)
            .attribute("size", INT, 1, true),
        ClassBuilder::new(C::InputPortOpenSet, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .element("windowingDescription", class(C::Description), 0, 1)
            .unsettable("tupleMutationAllowed", BOOLEAN, 1)
            .unsettable("windowingMode", enumeration(EnumId::WindowingMode), 1)
            .unsettable("windowPunctuationInputMode", enumeration(EnumId::WindowPunctuationInputMode), 1)
            .unsettable("controlPort", BOOLEAN, 0)
            .unsettable("windowExpressionMode", enumeration(EnumId::WindowExpressionMode), 0)
            .unsettable("rewriteAllowedForWindowExpression", BOOLEAN, 0),
        ClassBuilder::new(C::InputPortSet, ElementOnly, Some(C::InputPortOpenSet))
            .element("cardinality", NON_NEGATIVE, 1, 1)
            .unsettable("optional", BOOLEAN, 1),
        ClassBuilder::new(C::InputPorts, ElementOnly, None)
            .element("inputPortSet", class(C::InputPortSet), 0, many)
            .element("inputPortOpenSet", class(C::InputPortOpenSet), 0, 1),
        ClassBuilder::new(C::JavaOpContext, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .element("iconUri", class(C::IconUri), 0, many)
            .element("metrics", class(C::Metrics), 0, 1)
            .element("customLiterals", class(C::Enumerations), 0, 1)
            .element("executionSettings", class(C::JavaOpExecutionSettings), 1, 1)
            .element("libraryDependencies", class(C::JavaOpLibraryDependencies), 0, 1)
            .element("codeTemplates", class(C::CodeTemplates), 0, 1),
        ClassBuilder::new(C::JavaOpExecutionSettings, ElementOnly, None)
            .element("className", TOKEN, 1, 1)
            .element("vmArgs", class(C::JavaOpVmArgs), 0, 1),
        ClassBuilder::new(C::JavaOpInputPortOpenSet, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .element("windowingDescription", class(C::Description), 0, 1)
            .unsettable("windowingMode", enumeration(EnumId::WindowingMode), 1)
            .unsettable("windowPunctuationInputMode", enumeration(EnumId::WindowPunctuationInputMode), 1)
            .unsettable("controlPort", BOOLEAN, 0),
        ClassBuilder::new(C::JavaOpInputPortSet, ElementOnly, Some(C::JavaOpInputPortOpenSet))
            .element("cardinality", NON_NEGATIVE, 1, 1)
            .unsettable("optional", BOOLEAN, 1),
        ClassBuilder::new(C::JavaOpInputPorts, ElementOnly, None)
            .element("inputPortSet", class(C::JavaOpInputPortSet), 0, many)
            .element("inputPortOpenSet", class(C::JavaOpInputPortOpenSet), 0, 1),
        ClassBuilder::new(C::JavaOpLibraryDependencies, ElementOnly, None)
            .element("library", class(C::JavaOpLibrary), 1, many),
        ClassBuilder::new(C::JavaOpModel, ElementOnly, None)
            .element("context", class(C::JavaOpContext), 1, 1)
            .element("parameters", class(C::JavaOpParameters), 1, 1)
            .element("inputPorts", class(C::JavaOpInputPorts), 1, 1)
            .element("outputPorts", class(C::JavaOpOutputPorts), 1, 1),
        ClassBuilder::new(C::JavaOpOutputPortOpenSet, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .unsettable("windowPunctuationOutputMode", enumeration(EnumId::WindowPunctuationOutputMode), 1)
            .element("windowPunctuationInputPort", INTEGER, 0, 1)
            .element("finalPunctuationPortScope", class(C::OptionalPortScope), 0, 1),
        ClassBuilder::new(C::JavaOpOutputPortSet, ElementOnly, Some(C::JavaOpOutputPortOpenSet))
            .element("cardinality", NON_NEGATIVE, 1, 1)
            .unsettable("optional", BOOLEAN, 1),
        ClassBuilder::new(C::JavaOpOutputPorts, ElementOnly, None)
            .element("outputPortSet", class(C::JavaOpOutputPortSet), 0, many)
            .element("outputPortOpenSet", class(C::JavaOpOutputPortOpenSet), 0, 1),
        ClassBuilder::new(C::JavaOpParameters, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .element("parameter", class(C::JavaOpParameter), 0, many),
        ClassBuilder::new(C::JavaOpParameter, ElementOnly, None)
            .element("name", STRING, 1, 1)
            .element("description", class(C::Description), 0, 1)
            .unsettable("optional", BOOLEAN, 1)
            .unsettable("expressionMode", enumeration(EnumId::JavaOpExpressionMode), 0)
            .element("type", STRING, 0, 1)
            .element("cardinality", INTEGER, 0, 1),
        ClassBuilder::new(C::JavaOpVmArgs, ElementOnly, None)
            .element("vmArg", STRING, 0, many),
        ClassBuilder::new(C::LibraryDependencies, ElementOnly, None)
            .element("library", class(C::Library), 0, many),
        ClassBuilder::new(C::Metrics, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .element("metric", class(C::Metric), 0, many),
        ClassBuilder::new(C::Metric, ElementOnly, None)
            .element("name", STRING, 1, 1)
            .element("description", class(C::Description), 1, 1)
            .unsettable("kind", enumeration(EnumId::MetricKind), 1)
            .unsettable("dynamic", BOOLEAN, 0),
        ClassBuilder::new(C::OperatorModel, ElementOnly, None)
            .element("cppOperatorModel", class(C::OpModel), 0, 1)
            .element("javaOperatorModel", class(C::JavaOpModel), 0, 1),
        ClassBuilder::new(C::OpModel, ElementOnly, None)
            .element("context", class(C::Context), 1, 1)
            .element("parameters", class(C::Parameters), 1, 1)
            .element("inputPorts", class(C::InputPorts), 1, 1)
            .element("outputPorts", class(C::OutputPorts), 1, 1),
        ClassBuilder::new(C::OptionalPortScope, ElementOnly, None)
            .element("port", NON_NEGATIVE, 0, many),
        ClassBuilder::new(C::OutputFunctions, ElementOnly, None)
            .element("default", STRING, 1, 1)
            .element("type", STRING, 1, 1),
        ClassBuilder::new(C::OutputPortOpenSet, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .unsettable("expressionMode", enumeration(EnumId::ExpressionMode), 1)
            .unsettable("autoAssignment", BOOLEAN, 1)
            .unsettable("completeAssignment", BOOLEAN, 1)
            .unsettable("rewriteAllowed", BOOLEAN, 1)
            .element("outputFunctions", class(C::OutputFunctions), 0, 1)
            .unsettable("windowPunctuationOutputMode", enumeration(EnumId::WindowPunctuationOutputMode), 1)
            .element("windowPunctuationInputPort", INTEGER, 0, 1)
            .element("finalPunctuationPortScope", class(C::OptionalPortScope), 0, 1)
            .unsettable("tupleMutationAllowed", BOOLEAN, 1)
            .element("outputAssignmentPortScope", class(C::PortScope), 0, 1)
            .unsettable("allowNestedCustomOutputFunctions", BOOLEAN, 0),
        ClassBuilder::new(C::OutputPortSet, ElementOnly, Some(C::OutputPortOpenSet))
            .element("cardinality", NON_NEGATIVE, 1, 1)
            .unsettable("optional", BOOLEAN, 1),
        ClassBuilder::new(C::OutputPorts, ElementOnly, None)
            .element("outputPortSet", class(C::OutputPortSet), 0, many)
            .element("outputPortOpenSet", class(C::OutputPortOpenSet), 0, 1),
        ClassBuilder::new(C::Parameters, ElementOnly, None)
            .element("description", class(C::Description), 0, 1)
            .unsettable("allowAny", BOOLEAN, 1)
            .element("parameter", class(C::Parameter), 0, many),
        ClassBuilder::new(C::Parameter, ElementOnly, None)
            .element("name", STRING, 1, 1)
            .element("description", class(C::Description), 0, 1)
            .unsettable("optional", BOOLEAN, 1)
            .unsettable("rewriteAllowed", BOOLEAN, 1)
            .unsettable("expressionMode", enumeration(EnumId::ExpressionMode), 1)
            .element("type", STRING, 0, 1)
            .element("cardinality", INTEGER, 0, 1)
            .element("portScope", class(C::PortScope), 0, 1)
            .element("customOutputFunction", STRING, 0, 1),
        ClassBuilder::new(C::PortScope, ElementOnly, None)
            .element("port", NON_NEGATIVE, 1, many),
        ClassBuilder::new(C::SplExpressionTree, Empty, None)
            .attribute("cppCode", BOOLEAN, 0, true)
            .attribute("output", BOOLEAN, 0, true)
            .attribute("param", BOOLEAN, 0, true),
        ClassBuilder::new(C::Description, Simple, None)
            .simple_content(STRING, 0)
            .attribute("docHref", STRING, 0, false)
            .attribute("sampleUri", STRING, 0, false),
        ClassBuilder::new(C::JavaOpLibrary, ElementOnly, None)
            .element("description", class(C::Description), 1, 1)
            .element("managedLibrary", class(C::JavaOpManagedLibrary), 1, 1),
        ClassBuilder::new(C::JavaOpManagedLibrary, ElementOnly, None)
            .element("libPath", STRING, 0, many)
            .element("command", STRING, 0, 1),
        ClassBuilder::new(C::Library, ElementOnly, None)
            .element("description", class(C::Description), 1, 1)
            .element("managedLibrary", class(C::ManagedLibrary), 1, 1),
        ClassBuilder::new(C::ManagedLibrary, ElementOnly, None)
            .element("lib", STRING, 0, many)
            .element("libPath", STRING, 0, many)
            .element("includePath", STRING, 0, many)
            .element("command", STRING, 0, 1),
    ];

    let mut classes: Vec<ClassInfo> = builders.into_iter().map(|b| b.info).collect();
    classes.sort_by_key(|c| c.id.index());

    // Feature ids continue after the inherited features.
    for index in 0..classes.len() {
        let offset = inherited_count(&classes, classes[index].supertype);
        for (i, feature) in classes[index].features.iter_mut().enumerate() {
            feature.id = (offset + i) as u32;
        }
    }

    let enums = EnumId::ALL
        .iter()
        .map(|&id| EnumInfo {
            id,
            name: id.name(),
            xml_name: id.xml_name(),
            classifier_id: id.classifier_id(),
            literals: id
                .literals()
                .into_iter()
                .enumerate()
                .map(|(value, literal)| LiteralInfo {
                    value: value as u32,
                    name: literal,
                    literal,
                })
                .collect(),
        })
        .collect();

    Schema {
        namespace: OPERATOR_NAMESPACE,
        common_namespace: COMMON_NAMESPACE,
        prefixes: vec![("cmn", COMMON_NAMESPACE), ("xsi", XSI_NAMESPACE)],
        classes,
        enums,
    }
}

fn inherited_count(classes: &[ClassInfo], supertype: Option<ClassId>) -> usize {
    match supertype {
        Some(id) => {
            let parent = &classes[id.index()];
            inherited_count(classes, parent.supertype) + parent.features.len()
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_registered_in_order() {
        let schema = schema();
        assert_eq!(schema.classes.len(), ClassId::ALL.len());
        for id in ClassId::ALL {
            assert_eq!(schema.class(*id).id, *id);
        }
    }

    #[test]
    fn test_subclass_features_follow_supertype() {
        let schema = schema();
        let features = schema.all_features(ClassId::InputPortSet);
        assert_eq!(features.len(), 10);
        assert_eq!(features[0].xml_name, "description");
        let cardinality = schema.feature(ClassId::InputPortSet, "cardinality").unwrap();
        assert_eq!(cardinality.id, 8);
        assert!(cardinality.is_required());
    }

    #[test]
    fn test_unsettable_defaults() {
        let schema = schema();
        let mode = schema.feature(ClassId::InputPortOpenSet, "windowingMode").unwrap();
        assert!(mode.unsettable);
        assert!(!mode.is_required());
        assert_eq!(mode.default_literal, Some("NonWindowed"));

        let logic = schema.feature(ClassId::Context, "allowCustomLogic").unwrap();
        assert_eq!(logic.default_literal, Some("false"));
    }

    #[test]
    fn test_element_namespaces_follow_package() {
        let schema = schema();
        assert!(schema.element_feature(ClassId::Library, COMMON_NAMESPACE, "managedLibrary").is_some());
        assert!(schema.element_feature(ClassId::Library, OPERATOR_NAMESPACE, "managedLibrary").is_none());
        assert!(schema.element_feature(ClassId::Context, OPERATOR_NAMESPACE, "description").is_some());
        assert!(schema.attribute_feature(ClassId::Description, "docHref").is_some());
        assert!(schema.attribute_feature(ClassId::Context, "verificationModule").is_some());
    }

    #[test]
    fn test_lookup_by_names() {
        let schema = schema();
        assert_eq!(schema.class_by_name("ContextType").map(|c| c.id), Some(ClassId::Context));
        assert_eq!(schema.class_by_xml_name("javaOpVMArgsType").map(|c| c.id), Some(ClassId::JavaOpVmArgs));
        assert!(schema.class_by_name("NoSuchType").is_none());
    }

    #[test]
    fn test_class_ids() {
        assert_eq!(ClassId::try_from(2).unwrap(), ClassId::Context);
        assert_eq!(ClassId::try_from(39).unwrap(), ClassId::SplExpressionTree);
        assert!(ClassId::try_from(40).is_err());
        assert_eq!("OpModelType".parse::<ClassId>().unwrap(), ClassId::OpModel);
        assert_eq!("Metric".parse::<ClassId>().unwrap(), ClassId::Metric);
    }

    #[test]
    fn test_enum_ids() {
        assert_eq!("MetricKindType".parse::<EnumId>().unwrap(), EnumId::MetricKind);
        assert_eq!("MetricKindTypeObject".parse::<EnumId>().unwrap(), EnumId::MetricKind);
        assert_eq!("metricKindType:Object".parse::<EnumId>().unwrap(), EnumId::MetricKind);
        assert!("MetricType".parse::<EnumId>().is_err());

        let info = schema().enumeration(EnumId::WindowPunctuationOutputMode);
        let literals: Vec<_> = info.literals.iter().map(|l| l.literal).collect();
        assert_eq!(literals, vec!["Generating", "Free", "Preserving"]);
    }

    #[test]
    fn test_schema_dumps_as_json() {
        let json = serde_json::to_value(schema()).unwrap();
        assert_eq!(json["namespace"], OPERATOR_NAMESPACE);
        assert!(json["classes"].as_array().unwrap().len() > 40);
    }
}
