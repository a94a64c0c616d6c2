//! Import module tests

use spl_operator_model::import::{ImportError, OperatorModelImporter};
use spl_operator_model::models::*;

const SPLIT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<operatorModel xmlns="http://www.ibm.com/xmlns/prod/streams/spl/operator"
               xmlns:cmn="http://www.ibm.com/xmlns/prod/streams/spl/common"
               xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
               xsi:schemaLocation="http://www.ibm.com/xmlns/prod/streams/spl/operator operatorModel.xsd">
  <cppOperatorModel>
    <context>
      <description>Splits a stream into several streams.</description>
      <iconUri size="16">split_16.gif</iconUri>
      <iconUri size="32">split_32.gif</iconUri>
      <customLiterals>
        <enumeration>
          <name>Strategy</name>
          <value>RoundRobin</value>
          <value>Hash</value>
        </enumeration>
      </customLiterals>
      <providesSingleThreadedContext>Always</providesSingleThreadedContext>
      <incrementalCompilationStrategy>ResultDependent</incrementalCompilationStrategy>
    </context>
    <parameters>
      <allowAny>false</allowAny>
      <parameter>
        <name>index</name>
        <optional>false</optional>
        <rewriteAllowed>true</rewriteAllowed>
        <expressionMode>Expression</expressionMode>
        <type>int64</type>
        <cardinality>1</cardinality>
      </parameter>
      <parameter>
        <name>strategy</name>
        <optional>true</optional>
        <rewriteAllowed>false</rewriteAllowed>
        <expressionMode>CustomLiteral</expressionMode>
        <type>Strategy</type>
        <cardinality>1</cardinality>
      </parameter>
    </parameters>
    <inputPorts>
      <inputPortSet>
        <tupleMutationAllowed>false</tupleMutationAllowed>
        <windowingMode>NonWindowed</windowingMode>
        <windowPunctuationInputMode>Oblivious</windowPunctuationInputMode>
        <cardinality>1</cardinality>
        <optional>false</optional>
      </inputPortSet>
    </inputPorts>
    <outputPorts>
      <outputPortOpenSet>
        <expressionMode>Nonexistent</expressionMode>
        <autoAssignment>false</autoAssignment>
        <completeAssignment>false</completeAssignment>
        <rewriteAllowed>false</rewriteAllowed>
        <windowPunctuationOutputMode>Preserving</windowPunctuationOutputMode>
        <tupleMutationAllowed>false</tupleMutationAllowed>
      </outputPortOpenSet>
    </outputPorts>
  </cppOperatorModel>
</operatorModel>
"#;

const JAVA_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<operatorModel xmlns="http://www.ibm.com/xmlns/prod/streams/spl/operator"
               xmlns:cmn="http://www.ibm.com/xmlns/prod/streams/spl/common">
  <javaOperatorModel>
    <context>
      <description docHref="doc/Http.html">Posts tuples over HTTP.</description>
      <metrics>
        <metric>
          <name>nPosts</name>
          <description>Requests sent</description>
          <kind>Counter</kind>
        </metric>
      </metrics>
      <executionSettings>
        <className>com.acme.http.HttpPost</className>
        <vmArgs>
          <vmArg>-Xmx256m</vmArg>
        </vmArgs>
      </executionSettings>
      <libraryDependencies>
        <library>
          <cmn:description>Operator classes</cmn:description>
          <cmn:managedLibrary>
            <cmn:libPath>impl/lib/http.jar</cmn:libPath>
          </cmn:managedLibrary>
        </library>
      </libraryDependencies>
    </context>
    <parameters>
      <parameter>
        <name>url</name>
        <optional>false</optional>
        <type>rstring</type>
        <cardinality>1</cardinality>
      </parameter>
    </parameters>
    <inputPorts>
      <inputPortSet>
        <windowingMode>NonWindowed</windowingMode>
        <windowPunctuationInputMode>Oblivious</windowPunctuationInputMode>
        <cardinality>1</cardinality>
        <optional>false</optional>
      </inputPortSet>
    </inputPorts>
    <outputPorts>
      <outputPortSet>
        <windowPunctuationOutputMode>Free</windowPunctuationOutputMode>
        <cardinality>1</cardinality>
        <optional>true</optional>
      </outputPortSet>
    </outputPorts>
  </javaOperatorModel>
</operatorModel>
"#;

mod cpp_import_tests {
    use super::*;

    #[test]
    fn test_import_split() {
        let doc = OperatorModelImporter::new().import(SPLIT_XML).unwrap();
        let model = doc.model.as_cpp().unwrap();

        let ctx = &model.context;
        assert_eq!(
            ctx.description.as_ref().map(|d| d.text.as_str()),
            Some("Splits a stream into several streams.")
        );
        assert_eq!(ctx.icon_uri.len(), 2);
        assert_eq!(ctx.icon_uri[1].value, "split_32.gif");
        assert_eq!(ctx.icon_uri[1].size(), 32);
        assert_eq!(
            ctx.incremental_compilation_strategy(),
            IncrementalCompilationStrategy::ResultDependent
        );
        let strategy = ctx.enumeration("Strategy").unwrap();
        assert_eq!(strategy.value, vec!["RoundRobin", "Hash"]);

        let params = &model.parameters.parameter;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "index");
        assert_eq!(params[0].cardinality, Some(1));
        assert_eq!(params[1].expression_mode(), ExpressionMode::CustomLiteral);
        assert!(params[1].optional());

        assert_eq!(model.input_ports.fixed_port_count(), 1);
        assert!(model.output_ports.has_open_set());
        let open = model.output_ports.output_port_open_set.as_ref().unwrap();
        assert_eq!(open.expression_mode(), ExpressionMode::Nonexistent);
        assert_eq!(
            open.window_punctuation_output_mode(),
            WindowPunctuationOutputMode::Preserving
        );
    }

    #[test]
    fn test_fixed_set_reads_like_open_set() {
        let doc = OperatorModelImporter::new().import(SPLIT_XML).unwrap();
        let set = &doc.model.as_cpp().unwrap().input_ports.input_port_set[0];

        // Fixed sets expose every open-set accessor.
        let open: &InputPortOpenSet = set;
        assert_eq!(open.windowing_mode(), WindowingMode::NonWindowed);
        assert_eq!(set.window_punctuation_input_mode(), WindowPunctuationInputMode::Oblivious);
        assert_eq!(set.cardinality, 1);
        assert!(set.is_set_optional());
        assert!(!set.optional());
    }

    #[test]
    fn test_enum_literals_are_kept_exactly() {
        for mode in WindowingMode::ALL {
            let xml = SPLIT_XML.replace(
                "<windowingMode>NonWindowed</windowingMode>",
                &format!("<windowingMode>{}</windowingMode>", mode.literal()),
            );
            let doc = OperatorModelImporter::new().import(&xml).unwrap();
            let set = &doc.model.as_cpp().unwrap().input_ports.input_port_set[0];
            assert_eq!(set.windowing_mode(), *mode);
        }
    }

    #[test]
    fn test_absent_elements_are_unset() {
        let doc = OperatorModelImporter::new().import(SPLIT_XML).unwrap();
        let ctx = &doc.model.as_cpp().unwrap().context;
        assert!(!ctx.is_set_allow_custom_logic());
        assert!(!ctx.allow_custom_logic());
        assert!(ctx.metrics.is_none());
        assert!(ctx.spl_expression_tree.is_none());
    }

    #[test]
    fn test_lowercase_literal_is_rejected() {
        let xml = SPLIT_XML.replace(
            "<windowingMode>NonWindowed</windowingMode>",
            "<windowingMode>nonwindowed</windowingMode>",
        );
        let err = OperatorModelImporter::new().import(&xml).unwrap_err();
        assert!(matches!(err, ImportError::Literal(_)));
    }

    #[test]
    fn test_validate_accepts_split() {
        assert!(OperatorModelImporter::new().validate(SPLIT_XML).is_ok());
    }
}

mod java_import_tests {
    use super::*;

    #[test]
    fn test_import_java_model() {
        let doc = OperatorModelImporter::new().import(JAVA_XML).unwrap();
        assert_eq!(doc.model.language(), OperatorLanguage::Java);
        assert!(doc.schema_location.is_none());

        let model = doc.model.as_java().unwrap();
        let settings = &model.context.execution_settings;
        assert_eq!(settings.class_name, "com.acme.http.HttpPost");
        assert_eq!(
            settings.vm_args.as_ref().map(|a| a.vm_arg.clone()),
            Some(vec!["-Xmx256m".to_string()])
        );

        let metric = &model.context.metrics.as_ref().unwrap().metric[0];
        assert_eq!(metric.kind(), MetricKind::Counter);
        assert_eq!(metric.description.text, "Requests sent");

        let library = &model.context.library_dependencies.as_ref().unwrap().library[0];
        assert_eq!(library.managed_library.lib_path, vec!["impl/lib/http.jar"]);

        let url = model.parameters.get("url").unwrap();
        assert!(!url.optional());
        assert_eq!(url.type_.as_deref(), Some("rstring"));

        let output = &model.output_ports.output_port_set[0];
        assert_eq!(output.window_punctuation_output_mode(), WindowPunctuationOutputMode::Free);
        assert!(output.optional());
    }

    #[test]
    fn test_java_model_rejects_cpp_only_elements() {
        let xml = JAVA_XML.replace(
            "<windowingMode>NonWindowed</windowingMode>",
            "<tupleMutationAllowed>false</tupleMutationAllowed><windowingMode>NonWindowed</windowingMode>",
        );
        let err = OperatorModelImporter::new().import(&xml).unwrap_err();
        assert!(matches!(err, ImportError::UnexpectedElement { .. }));
    }
}
