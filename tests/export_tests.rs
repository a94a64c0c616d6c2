//! Export module tests

use spl_operator_model::config::WriterConfig;
use spl_operator_model::export::OperatorModelExporter;
use spl_operator_model::factory::{ModelObject, OperatorFactory};
use spl_operator_model::import::OperatorModelImporter;
use spl_operator_model::models::*;
use spl_operator_model::schema::ClassId;

/// A C++ sink with one windowed input port and an optional error output
fn build_sink() -> OpModel {
    let mut context = Context::default();
    context.set_description(Description::new("Writes tuples to a file."));
    context.icon_uri.push(IconUri::new("sink_16.gif", 16));
    context.set_provides_single_threaded_context(SingleThreadedContext::WindowBound);
    context.set_metrics(Metrics {
        description: None,
        metric: vec![Metric::new("nFilesOpened", "Files opened so far", MetricKind::Counter)],
    });

    let mut file = Parameter::new("file");
    file.set_optional(false);
    file.set_rewrite_allowed(true);
    file.set_expression_mode(ExpressionMode::Expression);
    file.type_ = Some("rstring".to_string());
    file.cardinality = Some(1);
    let mut parameters = Parameters::default();
    parameters.set_allow_any(false);
    parameters.parameter.push(file);

    let mut input = InputPortOpenSet::default();
    input.set_tuple_mutation_allowed(false);
    input.set_windowing_mode(WindowingMode::OptionallyWindowed);
    input.set_window_punctuation_input_mode(WindowPunctuationInputMode::Oblivious);
    let mut input_ports = InputPorts::default();
    input_ports.input_port_set.push(InputPortSet::new(input, 1, false));

    let mut output = OutputPortOpenSet::default();
    output.set_expression_mode(ExpressionMode::Nonexistent);
    output.set_auto_assignment(false);
    output.set_complete_assignment(false);
    output.set_rewrite_allowed(false);
    output.set_window_punctuation_output_mode(WindowPunctuationOutputMode::Free);
    output.set_tuple_mutation_allowed(false);
    let mut output_ports = OutputPorts::default();
    output_ports.output_port_set.push(OutputPortSet::new(output, 1, true));

    OpModel::new(context, parameters, input_ports, output_ports)
}

#[test]
fn test_programmatic_model_round_trips() {
    let model: OperatorModel = build_sink().into();
    let exported = OperatorModelExporter::new().export_model(&model).unwrap();
    let imported = OperatorModelImporter::new().import(&exported.content).unwrap();
    assert_eq!(imported.model, model);
}

#[test]
fn test_exported_document_layout() {
    let exported = OperatorModelExporter::new()
        .export_model(&build_sink().into())
        .unwrap()
        .content;
    assert!(exported.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<operatorModel"));
    assert!(exported.contains("<iconUri size=\"16\">sink_16.gif</iconUri>"));
    assert!(exported.contains("<kind>Counter</kind>"));
    assert!(exported.contains("<windowingMode>OptionallyWindowed</windowingMode>"));

    // Children follow schema order: context, parameters, inputPorts, outputPorts.
    let positions: Vec<usize> = ["<context>", "<parameters>", "<inputPorts>", "<outputPorts>"]
        .iter()
        .map(|tag| exported.find(tag).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_allow_custom_logic_unset_versus_default() {
    let exporter = OperatorModelExporter::new();
    let mut model = build_sink();

    let unset = exporter.export_model(&model.clone().into()).unwrap().content;
    assert!(!unset.contains("allowCustomLogic"));

    model.context.set_allow_custom_logic(false);
    let set = exporter.export_model(&model.clone().into()).unwrap().content;
    assert!(set.contains("<allowCustomLogic>false</allowCustomLogic>"));

    let reread = OperatorModelImporter::new().import(&set).unwrap();
    let ctx = &reread.model.as_cpp().unwrap().context;
    assert!(ctx.is_set_allow_custom_logic());
    assert!(!ctx.allow_custom_logic());

    model.context.unset_allow_custom_logic();
    let cleared = exporter.export_model(&model.into()).unwrap().content;
    assert_eq!(cleared, unset);
}

#[test]
fn test_moved_child_belongs_to_last_parent() {
    let mut first = Parameter::new("first");
    let mut second = Parameter::new("second");
    first.set_port_scope(PortScope { port: vec![0] });

    let scope = first.take_port_scope().unwrap();
    second.set_port_scope(scope);

    let mut model = build_sink();
    model.parameters.parameter = vec![first, second];
    let exported = OperatorModelExporter::new()
        .export_model(&model.into())
        .unwrap()
        .content;
    assert_eq!(exported.matches("<portScope>").count(), 1);
    let imported = OperatorModelImporter::new().import(&exported).unwrap();
    let params = &imported.model.as_cpp().unwrap().parameters;
    assert!(params.get("first").unwrap().port_scope.is_none());
    assert_eq!(params.get("second").unwrap().port_scope.as_ref().unwrap().port, vec![0]);
}

#[test]
fn test_factory_objects_assemble_into_a_java_model() {
    let factory = OperatorFactory::new();
    let ModelObject::JavaOpModel(mut model) = factory.create(ClassId::JavaOpModel).unwrap() else {
        panic!("factory returned the wrong class");
    };
    let ModelObject::JavaOpParameter(mut parameter) = factory.create_by_name("JavaOpParameterType").unwrap()
    else {
        panic!("factory returned the wrong class");
    };
    parameter.name = "topic".to_string();
    parameter.set_optional(true);
    parameter.set_expression_mode(JavaOpExpressionMode::AttributeFree);
    model.parameters.parameter.push(parameter);
    model.context.execution_settings.class_name = "com.acme.mq.Publish".to_string();

    let exported = OperatorModelExporter::new()
        .export_model(&model.clone().into())
        .unwrap()
        .content;
    assert!(exported.contains("<javaOperatorModel>"));
    assert!(exported.contains("<className>com.acme.mq.Publish</className>"));
    assert!(exported.contains("<expressionMode>AttributeFree</expressionMode>"));

    let imported = OperatorModelImporter::new().import(&exported).unwrap();
    assert_eq!(imported.model, OperatorModel::Java(model));
}

#[test]
fn test_writer_config_controls_layout() {
    let config = WriterConfig {
        indent: 4,
        xml_declaration: false,
        common_prefix: "common".to_string(),
        emit_schema_location: false,
    };
    let exported = OperatorModelExporter::with_config(config)
        .export_model(&build_sink().into())
        .unwrap()
        .content;
    assert!(exported.starts_with("<operatorModel"));
    assert!(exported.contains("xmlns:common=\"http://www.ibm.com/xmlns/prod/streams/spl/common\""));
    assert!(exported.contains("\n    <cppOperatorModel>"));
    assert!(!exported.contains("schemaLocation"));
}

#[test]
fn test_document_prefixes_survive_round_trip() {
    let xml = format!(
        r#"<op:operatorModel xmlns:op="{OPERATOR_NAMESPACE}" xmlns:c="{COMMON_NAMESPACE}"><op:cppOperatorModel><op:context><op:libraryDependencies><op:library><c:description>Zlib</c:description><c:managedLibrary><c:lib>z</c:lib></c:managedLibrary></op:library></op:libraryDependencies></op:context><op:parameters/><op:inputPorts/><op:outputPorts/></op:cppOperatorModel></op:operatorModel>"#
    );
    let doc = OperatorModelImporter::new().import(&xml).unwrap();
    let exported = OperatorModelExporter::new().export(&doc).unwrap().content;
    assert!(exported.contains("<op:cppOperatorModel>"));
    assert!(exported.contains("<c:lib>z</c:lib>"));
    assert_eq!(OperatorModelImporter::new().import(&exported).unwrap(), doc);
}
