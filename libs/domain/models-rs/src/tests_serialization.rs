// [libs/domain/models-rs/src/tests_serialization.rs]
/*!
 * =================================================================
 * APARATO: MODEL SERIALIZATION CERTIFIER (V3.1 - TRINITY EVIDENCE)
 * CLASIFICACIÓN: DOMAIN MODELS // PROVING GROUNDS (ESTRATO L2)
 * RESPONSABILIDAD: CERTIFICACIÓN DE PARIDAD SERDE DE LOS CONTRATOS
 * =================================================================
 */

use crate::faults::CensusFault;
use crate::result::CensusReport;
use crate::work::{CensusRequest, ExecutionMode, FirstColumnChoice, WorkerAllocation};

/**
 * Certifica la ida y vuelta JSON del reporte sellado, incluyendo los
 * conteos u128 que exceden el rango seguro de f64.
 */
#[test]
fn certify_census_report_json_roundtrip() {
    let report = CensusReport::seal(
        4,
        8,
        44_196_405_120,
        44_194_590_720,
        1_250,
        "PARALLEL_REDUCED",
    );
    let encoded = serde_json::to_string(&report).expect("CODEC_FAULT: report must encode");
    let decoded: CensusReport =
        serde_json::from_str(&encoded).expect("CODEC_FAULT: report must decode");
    assert_eq!(report, decoded);
    assert_eq!(decoded.signed_difference, 1_814_400);
    assert_eq!(decoded.total_count(), 88_390_995_840);
}

#[test]
fn certify_request_defaults_and_roundtrip() {
    let request = CensusRequest::new(5, 7)
        .with_execution_mode(ExecutionMode::Parallel)
        .with_worker_allocation(WorkerAllocation::Fixed(4));
    let encoded = serde_json::to_string(&request).unwrap();
    let decoded: CensusRequest = serde_json::from_str(&encoded).unwrap();
    assert_eq!(request, decoded);

    let pristine = CensusRequest::new(3, 6);
    assert_eq!(pristine.execution_mode, ExecutionMode::Auto);
    assert_eq!(pristine.worker_allocation, WorkerAllocation::Auto);
}

#[test]
fn certify_first_column_choice_contract() {
    let choice = FirstColumnChoice {
        ordinal: 2,
        column_values: vec![1, 2, 4, 5],
    };
    assert_eq!(choice.constrained_rows(), &[2, 4, 5]);
    let encoded = serde_json::to_string(&choice).unwrap();
    let decoded: FirstColumnChoice = serde_json::from_str(&encoded).unwrap();
    assert_eq!(choice, decoded);
}

#[test]
fn certify_fault_labels_are_stable() {
    assert_eq!(
        CensusFault::InvalidInput("r > n".into()).kind_label(),
        "INVALID_INPUT"
    );
    assert_eq!(
        CensusFault::Cancelled {
            partial_positive: 7,
            partial_negative: 3,
            units_completed: 2,
            units_total: 10,
        }
        .kind_label(),
        "CANCELLED"
    );
    let rendered = CensusFault::TooLarge {
        requested: 14,
        ceiling: 13,
    }
    .to_string();
    assert!(rendered.contains("DIMENSION_CEILING_EXCEEDED"));
}

#[test]
fn certify_counts_match_ignores_seal_metadata() {
    let first = CensusReport::seal(3, 4, 12, 12, 10, "BACKTRACKING_SINGLE");
    let second = CensusReport::seal(3, 4, 12, 12, 99, "PARALLEL_REDUCED");
    assert!(first.counts_match(&second));
    let diverging = CensusReport::seal(3, 4, 12, 13, 10, "BACKTRACKING_SINGLE");
    assert!(!first.counts_match(&diverging));
}
