//! Validation tests against imported documents

use spl_operator_model::config::ValidationConfig;
use spl_operator_model::import::OperatorModelImporter;
use spl_operator_model::models::OperatorModel;
use spl_operator_model::validation::{OperatorModelValidator, Severity};

/// A two-input join; `{params}` and `{outputs}` are filled in per test
const JOIN_TEMPLATE: &str = r#"<operatorModel xmlns="http://www.ibm.com/xmlns/prod/streams/spl/operator">
  <cppOperatorModel>
    <context>
      <customLiterals>
        <enumeration>
          <name>JoinKind</name>
          <value>Inner</value>
          <value>LeftOuter</value>
        </enumeration>
      </customLiterals>
      <customOutputFunctions>
        <customOutputFunction>
          <name>JoinFunctions</name>
          <function>
            <prototype>T AsIs(T)</prototype>
          </function>
        </customOutputFunction>
      </customOutputFunctions>
      <providesSingleThreadedContext>WindowBound</providesSingleThreadedContext>
    </context>
    <parameters>
      <allowAny>false</allowAny>
      {params}
    </parameters>
    <inputPorts>
      <inputPortSet>
        <tupleMutationAllowed>false</tupleMutationAllowed>
        <windowingMode>Windowed</windowingMode>
        <windowPunctuationInputMode>Oblivious</windowPunctuationInputMode>
        <cardinality>1</cardinality>
        <optional>false</optional>
      </inputPortSet>
      <inputPortSet>
        <tupleMutationAllowed>false</tupleMutationAllowed>
        <windowingMode>Windowed</windowingMode>
        <windowPunctuationInputMode>Oblivious</windowPunctuationInputMode>
        <cardinality>1</cardinality>
        <optional>false</optional>
      </inputPortSet>
    </inputPorts>
    <outputPorts>
      <outputPortSet>
        <expressionMode>Expression</expressionMode>
        <autoAssignment>true</autoAssignment>
        <completeAssignment>false</completeAssignment>
        <rewriteAllowed>true</rewriteAllowed>
        {outputs}
        <tupleMutationAllowed>true</tupleMutationAllowed>
        <cardinality>1</cardinality>
        <optional>false</optional>
      </outputPortSet>
    </outputPorts>
  </cppOperatorModel>
</operatorModel>"#;

const MATCH_PARAM: &str = r#"<parameter>
        <name>match</name>
        <optional>false</optional>
        <rewriteAllowed>true</rewriteAllowed>
        <expressionMode>Expression</expressionMode>
        <type>boolean</type>
        <cardinality>1</cardinality>
      </parameter>"#;

const FREE_OUTPUT: &str = "<windowPunctuationOutputMode>Free</windowPunctuationOutputMode>";

fn join(params: &str, outputs: &str) -> OperatorModel {
    let xml = JOIN_TEMPLATE
        .replace("{params}", params)
        .replace("{outputs}", outputs);
    OperatorModelImporter::new().import(&xml).unwrap().model
}

fn error_paths(model: &OperatorModel) -> Vec<String> {
    OperatorModelValidator::new()
        .validate(model)
        .errors()
        .map(|issue| issue.path.clone())
        .collect()
}

#[test]
fn test_join_is_valid() {
    let result = OperatorModelValidator::new().validate(&join(MATCH_PARAM, FREE_OUTPUT));
    assert!(result.is_valid(), "unexpected issues: {:?}", result.issues);
    assert!(result.issues.is_empty());
}

#[test]
fn test_port_scope_beyond_inputs() {
    let params = MATCH_PARAM.replace(
        "<cardinality>1</cardinality>",
        "<cardinality>1</cardinality><portScope><port>1</port><port>2</port></portScope>",
    );
    assert_eq!(
        error_paths(&join(&params, FREE_OUTPUT)),
        vec!["parameters/parameter[0]/portScope/port[1]"]
    );

    let lenient = OperatorModelValidator::with_config(ValidationConfig {
        check_port_references: false,
        ..ValidationConfig::default()
    });
    assert!(lenient.validate(&join(&params, FREE_OUTPUT)).is_valid());
}

#[test]
fn test_preserving_output_of_a_join_needs_a_port() {
    let preserving = "<windowPunctuationOutputMode>Preserving</windowPunctuationOutputMode>";
    assert_eq!(
        error_paths(&join(MATCH_PARAM, preserving)),
        vec!["outputPorts/outputPortSet[0]/windowPunctuationInputPort"]
    );

    let with_port = format!("{preserving}<windowPunctuationInputPort>1</windowPunctuationInputPort>");
    assert!(error_paths(&join(MATCH_PARAM, &with_port)).is_empty());

    let negative = format!("{preserving}<windowPunctuationInputPort>-1</windowPunctuationInputPort>");
    assert_eq!(error_paths(&join(MATCH_PARAM, &negative)).len(), 1);
}

#[test]
fn test_custom_literal_and_output_function_references() {
    let params = r#"<parameter>
        <name>kind</name>
        <optional>true</optional>
        <rewriteAllowed>false</rewriteAllowed>
        <expressionMode>CustomLiteral</expressionMode>
        <type>JoinType</type>
      </parameter>
      <parameter>
        <name>project</name>
        <optional>true</optional>
        <rewriteAllowed>false</rewriteAllowed>
        <expressionMode>Expression</expressionMode>
        <customOutputFunction>ProjectFunctions</customOutputFunction>
      </parameter>"#;
    let outputs = format!(
        "{FREE_OUTPUT}<outputFunctions><default>AsIs</default><type>JoinFunctions</type></outputFunctions>"
    );
    let result = OperatorModelValidator::new().validate(&join(params, &outputs));

    let warnings: Vec<_> = result.warnings().map(|i| i.path.as_str()).collect();
    assert_eq!(warnings, vec!["parameters/parameter[0]/type"]);
    let errors: Vec<_> = result.errors().map(|i| i.path.as_str()).collect();
    assert_eq!(errors, vec!["parameters/parameter[1]/customOutputFunction"]);
}

#[test]
fn test_duplicate_and_malformed_parameter_names() {
    let params = format!("{MATCH_PARAM}{MATCH_PARAM}{}", MATCH_PARAM.replace("match", "2match"));
    let result = OperatorModelValidator::new().validate(&join(&params, FREE_OUTPUT));
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|i| i.severity == Severity::Error));
    assert!(errors.iter().any(|i| i.path == "parameters/parameter[1]/name"));
    assert!(errors.iter().any(|i| i.path == "parameters/parameter[2]/name"));
}

#[test]
fn test_missing_required_values_are_reported_not_rejected() {
    let outputs = "<windowPunctuationOutputMode>Free</windowPunctuationOutputMode>";
    let xml = JOIN_TEMPLATE
        .replace("{params}", MATCH_PARAM)
        .replace("{outputs}", outputs)
        .replacen("<windowingMode>Windowed</windowingMode>", "", 1);
    let model = OperatorModelImporter::new().import(&xml).unwrap().model;
    assert_eq!(
        error_paths(&model),
        vec!["inputPorts/inputPortSet[0]/windowingMode"]
    );
}

#[test]
fn test_warnings_as_errors() {
    let outputs = format!("{FREE_OUTPUT}<windowPunctuationInputPort>0</windowPunctuationInputPort>");
    let model = join(MATCH_PARAM, &outputs);

    let result = OperatorModelValidator::new().validate(&model);
    assert!(result.is_valid());
    assert_eq!(result.warnings().count(), 1);

    let strict = OperatorModelValidator::with_config(ValidationConfig {
        treat_warnings_as_errors: true,
        ..ValidationConfig::default()
    });
    assert!(!strict.validate(&model).is_valid());
}

#[test]
fn test_parameter_cannot_be_nonexistent() {
    let params = MATCH_PARAM.replace(
        "<expressionMode>Expression</expressionMode>",
        "<expressionMode>Nonexistent</expressionMode>",
    );
    let result = OperatorModelValidator::new().validate(&join(&params, FREE_OUTPUT));
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "parameters/parameter[0]/expressionMode");
    assert!(errors[0].message.contains("'match'"));
}

#[test]
fn test_maximal_input_cardinality_validates() {
    let xml = JOIN_TEMPLATE
        .replace("{params}", MATCH_PARAM)
        .replace("{outputs}", FREE_OUTPUT)
        .replacen(
            "<windowPunctuationInputMode>Oblivious</windowPunctuationInputMode>\n        <cardinality>1</cardinality>",
            "<windowPunctuationInputMode>Oblivious</windowPunctuationInputMode>\n        <cardinality>18446744073709551615</cardinality>",
            1,
        );
    let model = OperatorModelImporter::new().import(&xml).unwrap().model;
    let ports = &model.as_cpp().unwrap().input_ports;
    assert_eq!(ports.input_port_set[0].cardinality, u64::MAX);
    assert_eq!(ports.fixed_port_count(), u64::MAX);

    let result = OperatorModelValidator::new().validate(&model);
    assert!(result.is_valid(), "unexpected issues: {:?}", result.issues);
}
