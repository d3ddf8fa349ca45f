//! End-to-end run of the engine components over the raw sample dataset.
//!
//! The raw sample has seven rows with one spelled-out id, a missing name, a
//! missing age, a negative age, a non-numeric age and a missing salary.

use etl_core::{ColumnType, DataValue, ObservedValue};
use etl_engine::{default_suite, Enricher, Masker, MetricsEngine, QualityValidator, SchemaCoercer};
use etl_parser::read_csv;
use pretty_assertions::assert_eq;

const RAW: &str = "id,nome,idade,salario
1,Mariana,26,50000
2,Gabriel,,60000
3,Carlos,35,
4,,28,70000
5,Ana,-6,80000
seis,Francisco,40,90000
7,Helena,unknown,100000
";

#[test]
fn test_raw_dataset_fails_default_suite() {
    let raw = read_csv(RAW.as_bytes()).unwrap();
    let result = QualityValidator::new().validate(&raw, &default_suite());

    assert!(!result.success);

    let failed: Vec<String> = result
        .failures()
        .map(|r| r.expectation.to_string())
        .collect();
    assert_eq!(
        failed,
        vec![
            "id of type int",
            "idade in [0, 120]",
            "nome not null",
        ]
    );
}

#[test]
fn test_coerced_dataset_is_clean() {
    let raw = read_csv(RAW.as_bytes()).unwrap();
    let clean = SchemaCoercer::new().coerce(raw).unwrap();

    assert_eq!(clean.row_count(), 6);
    assert_eq!(clean.column("id").unwrap().column_type(), ColumnType::Int64);

    let report = MetricsEngine::new().compute(&clean).unwrap();
    assert_eq!(report.row_count, 6);
    assert!(report.null_counts.values().all(|n| *n == 0));
    assert_eq!(report.quantitative["idade"].min, Some(0.0));
    assert_eq!(report.categorical["nome"].distinct, 6);

    let result = QualityValidator::new().validate(&clean, &default_suite());
    assert!(result.success);
    assert_eq!(result.statistics.unsuccessful, 0);
}

#[test]
fn test_metrics_on_raw_dataset() {
    let raw = read_csv(RAW.as_bytes()).unwrap();
    let report = MetricsEngine::new().compute(&raw).unwrap();

    assert_eq!(report.row_count, 7);
    assert_eq!(report.null_counts["salario"], 1);
    assert_eq!(report.null_counts["nome"], 1);
    assert_eq!(report.dtypes["id"], "string");
    assert_eq!(report.quantitative["salario"].count, 6);
    assert_eq!(report.quantitative["salario"].mean, Some(75000.0));
}

#[test]
fn test_enrich_then_mask() {
    let raw = read_csv(RAW.as_bytes()).unwrap();
    let clean = SchemaCoercer::new().coerce(raw).unwrap();

    let enriched = Enricher::new().enrich(clean).unwrap();
    let bands: Vec<&str> = enriched
        .column("faixa_salarial")
        .unwrap()
        .values()
        .iter()
        .filter_map(DataValue::as_string)
        .collect();
    assert_eq!(bands, vec!["Low", "Low", "Medium", "Medium", "High", "High"]);

    let governed = Masker::new().mask(enriched).unwrap();
    assert_eq!(
        governed.column_names(),
        vec!["id", "idade", "salario", "faixa_salarial", "nome_mascarado"]
    );

    let masked: Vec<&str> = governed
        .column("nome_mascarado")
        .unwrap()
        .values()
        .iter()
        .filter_map(DataValue::as_string)
        .collect();
    assert_eq!(
        masked,
        vec!["M******", "G******", "C*****", "U******", "A**", "H*****"]
    );
}

#[test]
fn test_observed_values_on_raw_dataset() {
    let raw = read_csv(RAW.as_bytes()).unwrap();
    let result = QualityValidator::new().validate(&raw, &default_suite());

    let idade_range = result
        .results
        .iter()
        .find(|r| r.expectation.column == "idade" && !r.success)
        .unwrap();
    assert_eq!(
        idade_range.observed,
        ObservedValue::Range {
            min: Some(-6.0),
            max: Some(40.0)
        }
    );
}
