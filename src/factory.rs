//! Object factory for the operator model schema
//!
//! Creates empty instances by schema class id and converts enumeration
//! literals to and from their typed values.

use serde::Serialize;

use crate::models::*;
use crate::schema::{ClassId, EnumId};

/// Errors raised by the factory
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("The class '{0}' is not a valid classifier")]
    UnknownClass(String),
    #[error("The class '{0}' has no standalone instance")]
    NotInstantiable(&'static str),
    #[error("The datatype '{0}' is not a valid classifier")]
    UnknownDataType(String),
    #[error(transparent)]
    Literal(#[from] LiteralError),
}

macro_rules! model_objects {
    ($( $variant:ident ( $ty:ty ) ),+ $(,)?) => {
        /// A freshly created instance of any instantiable schema class
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub enum ModelObject {
            $($variant($ty)),+
        }

        impl ModelObject {
            pub fn class_id(&self) -> ClassId {
                match self {
                    $(ModelObject::$variant(_) => ClassId::$variant),+
                }
            }

            fn empty(id: ClassId) -> Result<Self, FactoryError> {
                match id {
                    $(ClassId::$variant => Ok(ModelObject::$variant(<$ty>::default())),)+
                    // The document root and the cpp/java choice have no empty state.
                    ClassId::DocumentRoot | ClassId::OperatorModel => {
                        Err(FactoryError::NotInstantiable(id.name()))
                    }
                }
            }
        }
    };
}

model_objects! {
    CodeTemplates(CodeTemplates),
    CodeTemplate(CodeTemplate),
    Context(Context),
    CustomOutputFunctionSet(CustomOutputFunctionSet),
    CustomOutputFunctions(CustomOutputFunctions),
    CustomOutputFunction(CustomOutputFunction),
    Enumerations(Enumerations),
    Enumeration(Enumeration),
    IconUri(IconUri),
    InputPortOpenSet(InputPortOpenSet),
    InputPortSet(InputPortSet),
    InputPorts(InputPorts),
    JavaOpContext(JavaOpContext),
    JavaOpExecutionSettings(JavaOpExecutionSettings),
    JavaOpInputPortOpenSet(JavaOpInputPortOpenSet),
    JavaOpInputPortSet(JavaOpInputPortSet),
    JavaOpInputPorts(JavaOpInputPorts),
    JavaOpLibraryDependencies(JavaOpLibraryDependencies),
    JavaOpModel(JavaOpModel),
    JavaOpOutputPortOpenSet(JavaOpOutputPortOpenSet),
    JavaOpOutputPortSet(JavaOpOutputPortSet),
    JavaOpOutputPorts(JavaOpOutputPorts),
    JavaOpParameters(JavaOpParameters),
    JavaOpParameter(JavaOpParameter),
    JavaOpVmArgs(JavaOpVmArgs),
    LibraryDependencies(LibraryDependencies),
    Metrics(Metrics),
    Metric(Metric),
    OpModel(OpModel),
    OptionalPortScope(OptionalPortScope),
    OutputFunctions(OutputFunctions),
    OutputPortOpenSet(OutputPortOpenSet),
    OutputPortSet(OutputPortSet),
    OutputPorts(OutputPorts),
    Parameters(Parameters),
    Parameter(Parameter),
    PortScope(PortScope),
    SplExpressionTree(SplExpressionTree),
    Description(Description),
    JavaOpLibrary(JavaOpLibrary),
    JavaOpManagedLibrary(JavaOpManagedLibrary),
    Library(Library),
    ManagedLibrary(ManagedLibrary),
}

macro_rules! enum_values {
    ($( $variant:ident ),+ $(,)?) => {
        /// A typed enumeration literal
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum EnumValue {
            $($variant($variant)),+
        }

        impl EnumValue {
            pub fn enum_id(&self) -> EnumId {
                match self {
                    $(EnumValue::$variant(_) => EnumId::$variant),+
                }
            }

            pub fn literal(&self) -> &'static str {
                match self {
                    $(EnumValue::$variant(v) => v.literal()),+
                }
            }

            fn parse(id: EnumId, literal: &str) -> Result<Self, LiteralError> {
                match id {
                    $(EnumId::$variant => literal.parse().map(EnumValue::$variant)),+
                }
            }
        }

        $(
            impl From<$variant> for EnumValue {
                fn from(value: $variant) -> Self {
                    EnumValue::$variant(value)
                }
            }
        )+
    };
}

enum_values! {
    ExpressionMode,
    IncrementalCompilationStrategy,
    JavaOpExpressionMode,
    MetricKind,
    SingleThreadedContext,
    WindowExpressionMode,
    WindowingMode,
    WindowPunctuationInputMode,
    WindowPunctuationOutputMode,
}

/// Factory for operator model objects
#[derive(Debug, Default, Clone, Copy)]
pub struct OperatorFactory;

impl OperatorFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates an empty instance of the class
    pub fn create(&self, id: ClassId) -> Result<ModelObject, FactoryError> {
        ModelObject::empty(id)
    }

    /// Creates an instance from a schema class name (`ParameterType` or `Parameter`)
    pub fn create_by_name(&self, name: &str) -> Result<ModelObject, FactoryError> {
        self.create(name.parse()?)
    }

    /// Creates an instance from an operator package classifier id
    pub fn create_by_id(&self, id: u32) -> Result<ModelObject, FactoryError> {
        self.create(ClassId::try_from(id)?)
    }

    /// Parses a literal of the given enumeration
    pub fn create_from_string(&self, id: EnumId, literal: &str) -> Result<EnumValue, FactoryError> {
        Ok(EnumValue::parse(id, literal)?)
    }

    /// Like [`create_from_string`](Self::create_from_string), with the
    /// enumeration given by name
    pub fn create_from_string_by_name(&self, data_type: &str, literal: &str) -> Result<EnumValue, FactoryError> {
        self.create_from_string(data_type.parse()?, literal)
    }

    pub fn convert_to_string(&self, value: &EnumValue) -> &'static str {
        value.literal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_every_instantiable_class() {
        let factory = OperatorFactory::new();
        for id in ClassId::ALL {
            match factory.create(*id) {
                Ok(object) => assert_eq!(object.class_id(), *id),
                Err(FactoryError::NotInstantiable(name)) => assert_eq!(name, id.name()),
                Err(e) => panic!("unexpected error for {id}: {e}"),
            }
        }
    }

    #[test]
    fn test_created_instances_are_empty() {
        let factory = OperatorFactory::new();
        match factory.create(ClassId::Context).unwrap() {
            ModelObject::Context(ctx) => {
                assert!(!ctx.is_set_allow_custom_logic());
                assert!(ctx.description.is_none());
            }
            other => panic!("expected a context, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_class_id_fails() {
        let factory = OperatorFactory::new();
        assert_eq!(
            factory.create_by_id(99),
            Err(FactoryError::UnknownClass("99".to_string()))
        );
        assert!(matches!(
            factory.create_by_name("TableType"),
            Err(FactoryError::UnknownClass(_))
        ));
        assert!(matches!(
            factory.create(ClassId::DocumentRoot),
            Err(FactoryError::NotInstantiable("DocumentRoot"))
        ));
    }

    #[test]
    fn test_create_by_id_follows_classifier_ids() {
        let factory = OperatorFactory::new();
        assert_eq!(factory.create_by_id(28).unwrap().class_id(), ClassId::Metric);
        assert_eq!(factory.create_by_name("PortScopeType").unwrap().class_id(), ClassId::PortScope);
    }

    #[test]
    fn test_enum_string_conversion() {
        let factory = OperatorFactory::new();
        for id in EnumId::ALL {
            for literal in id.literals() {
                let value = factory.create_from_string(*id, literal).unwrap();
                assert_eq!(value.enum_id(), *id);
                assert_eq!(factory.convert_to_string(&value), literal);
            }
        }

        let err = factory
            .create_from_string(EnumId::WindowingMode, "windowed")
            .unwrap_err();
        assert!(matches!(err, FactoryError::Literal(_)));
    }

    #[test]
    fn test_object_data_type_names_accepted() {
        let factory = OperatorFactory::new();
        let value = factory
            .create_from_string_by_name("MetricKindTypeObject", "Counter")
            .unwrap();
        assert_eq!(value, EnumValue::MetricKind(MetricKind::Counter));
        assert!(matches!(
            factory.create_from_string_by_name("ColourType", "Red"),
            Err(FactoryError::UnknownDataType(_))
        ));
    }
}
