//! Benchmarks for import and export of operator models
//!
//! Run with: cargo bench --bench import_bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use spl_operator_model::export::OperatorModelExporter;
use spl_operator_model::import::OperatorModelImporter;
use spl_operator_model::validation::OperatorModelValidator;

/// Generate an operator model with `parameter_count` parameters
fn generate_model(parameter_count: usize) -> String {
    let mut parameters = String::new();
    for i in 0..parameter_count {
        parameters.push_str(&format!(
            r#"      <parameter>
        <name>param_{i}</name>
        <description>Parameter {i} description</description>
        <optional>true</optional>
        <rewriteAllowed>false</rewriteAllowed>
        <expressionMode>AttributeFree</expressionMode>
        <type>rstring</type>
        <cardinality>1</cardinality>
      </parameter>
"#
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<operatorModel xmlns="http://www.ibm.com/xmlns/prod/streams/spl/operator" xmlns:cmn="http://www.ibm.com/xmlns/prod/streams/spl/common">
  <cppOperatorModel>
    <context>
      <description>Wide operator for benchmarking</description>
      <libraryDependencies>
        <library>
          <cmn:description>Support library</cmn:description>
          <cmn:managedLibrary>
            <cmn:lib>support</cmn:lib>
            <cmn:libPath>../../impl/lib</cmn:libPath>
          </cmn:managedLibrary>
        </library>
      </libraryDependencies>
      <providesSingleThreadedContext>Always</providesSingleThreadedContext>
    </context>
    <parameters>
      <allowAny>false</allowAny>
{parameters}    </parameters>
    <inputPorts>
      <inputPortSet>
        <tupleMutationAllowed>false</tupleMutationAllowed>
        <windowingMode>NonWindowed</windowingMode>
        <windowPunctuationInputMode>Oblivious</windowPunctuationInputMode>
        <cardinality>1</cardinality>
        <optional>false</optional>
      </inputPortSet>
    </inputPorts>
    <outputPorts/>
  </cppOperatorModel>
</operatorModel>
"#
    )
}

/// Benchmark parsing
fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("operator_model_import");
    let importer = OperatorModelImporter::new();

    for parameter_count in [1, 10, 100, 500].iter() {
        let xml = generate_model(*parameter_count);
        group.throughput(Throughput::Bytes(xml.len() as u64));

        group.bench_with_input(BenchmarkId::new("import", parameter_count), &xml, |b, xml| {
            b.iter(|| black_box(importer.import(xml)));
        });
    }

    group.finish();
}

/// Benchmark writing and validating an imported model
fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("operator_model_export");
    let exporter = OperatorModelExporter::new();
    let validator = OperatorModelValidator::new();

    for parameter_count in [1, 10, 100, 500].iter() {
        let Ok(document) = OperatorModelImporter::new().import(&generate_model(*parameter_count)) else {
            continue;
        };
        group.throughput(Throughput::Elements(*parameter_count as u64));

        group.bench_with_input(BenchmarkId::new("export", parameter_count), &document, |b, doc| {
            b.iter(|| black_box(exporter.export(doc)));
        });
        group.bench_with_input(
            BenchmarkId::new("validate", parameter_count),
            &document,
            |b, doc| {
                b.iter(|| black_box(validator.validate(&doc.model)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_import, bench_export);
criterion_main!(benches);
