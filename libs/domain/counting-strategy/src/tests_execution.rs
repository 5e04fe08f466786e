// [libs/domain/counting-strategy/src/tests_execution.rs]
/*!
 * =================================================================
 * APARATO: EXECUTOR DISPATCH CERTIFIER (V7.0 - TRINITY EVIDENCE)
 * CLASIFICACIÓN: DOMAIN STRATEGY // PROVING GROUNDS (ESTRATO L2)
 * RESPONSABILIDAD: CERTIFICACIÓN DEL DESPACHO POLIMÓRFICO COMPLETO
 * =================================================================
 */

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use signum_core_cache::prelude::CacheRegistry;
use signum_domain_models::{CensusFault, CensusRequest, ExecutionMode, WorkerAllocation};
use signum_domain_strategy::prelude::{SilentObserver, StrategyExecutor};

fn scratch_registry() -> (tempfile::TempDir, CacheRegistry) {
    let scratch = tempfile::tempdir().expect("IO_FAULT: scratch directory must materialize");
    let registry = CacheRegistry::new(scratch.path());
    (scratch, registry)
}

/**
 * Certifica que el despacho rechaza dimensiones fuera de contrato sin
 * tocar ningún motor ni el sistema de archivos.
 */
#[test]
fn certify_dispatch_rejects_contract_violations() {
    let (_scratch, registry) = scratch_registry();
    let observer = SilentObserver;
    let signal = AtomicBool::new(false);

    for (rows, symbols) in [(1, 3), (0, 0), (5, 4), (2, 1)] {
        let verdict = StrategyExecutor::execute_census(
            &CensusRequest::new(rows, symbols),
            &registry,
            &observer,
            &signal,
        );
        assert!(matches!(verdict, Err(CensusFault::InvalidInput(_))));
    }

    let oversized = StrategyExecutor::execute_census(
        &CensusRequest::new(3, 14),
        &registry,
        &observer,
        &signal,
    );
    assert!(matches!(oversized, Err(CensusFault::TooLarge { .. })));
}

#[test]
fn certify_analytic_dispatch_for_two_rows() {
    let (_scratch, registry) = scratch_registry();
    let observer = SilentObserver;
    let signal = AtomicBool::new(false);

    let report = StrategyExecutor::execute_census(
        &CensusRequest::new(2, 4),
        &registry,
        &observer,
        &signal,
    )
    .expect("two-row census must seal");
    assert_eq!(report.positive_count, 3);
    assert_eq!(report.negative_count, 6);
    assert_eq!(report.signed_difference, -3);
    assert_eq!(report.engine_signature, "ANALYTIC_CLOSED_FORM");
}

#[test]
fn certify_reduced_dispatch_matches_exhaustive_oracle() {
    let (_scratch, registry) = scratch_registry();
    let observer = SilentObserver;
    let signal = AtomicBool::new(false);

    for (rows, symbols) in [(3u32, 5u32), (4, 5), (5, 5), (3, 6)] {
        let reduced = StrategyExecutor::execute_census(
            &CensusRequest::new(rows, symbols),
            &registry,
            &observer,
            &signal,
        )
        .expect("reduced census must seal");
        let oracle =
            StrategyExecutor::execute_exhaustive_oracle(rows, symbols, &registry, &signal)
                .expect("oracle census must seal");
        assert!(reduced.counts_match(&oracle), "({rows}, {symbols}) diverged");
    }
}

#[test]
fn certify_mode_and_worker_overrides_preserve_counts() {
    let (_scratch, registry) = scratch_registry();
    let observer = SilentObserver;
    let signal = AtomicBool::new(false);

    let sequential = StrategyExecutor::execute_census(
        &CensusRequest::new(4, 6).with_execution_mode(ExecutionMode::Single),
        &registry,
        &observer,
        &signal,
    )
    .expect("sequential census must seal");

    for workers in [1usize, 2, 4] {
        let parallel = StrategyExecutor::execute_census(
            &CensusRequest::new(4, 6)
                .with_execution_mode(ExecutionMode::Parallel)
                .with_worker_allocation(WorkerAllocation::Fixed(workers)),
            &registry,
            &observer,
            &signal,
        )
        .expect("parallel census must seal");
        assert!(sequential.counts_match(&parallel));
        assert_eq!(parallel.engine_signature, "REDUCED_PARALLEL");
    }
}

#[test]
fn certify_range_sweep_order_and_coverage() {
    let (_scratch, registry) = scratch_registry();
    let observer = SilentObserver;
    let signal = AtomicBool::new(false);

    let reports =
        StrategyExecutor::execute_census_range((2, 4), (3, 5), &registry, &observer, &signal)
            .expect("range sweep must seal");
    let sealed_dimensions: Vec<(u32, u32)> = reports
        .iter()
        .map(|report| (report.rows, report.symbols))
        .collect();
    // n ascendente, luego r ascendente, restringido a r ≤ n.
    assert_eq!(
        sealed_dimensions,
        vec![(2, 3), (3, 3), (2, 4), (3, 4), (4, 4), (2, 5), (3, 5), (4, 5)]
    );
}

#[test]
fn certify_pre_signalled_cancellation_is_explicit() {
    let (_scratch, registry) = scratch_registry();
    let observer = SilentObserver;
    let signal = AtomicBool::new(true);

    let verdict = StrategyExecutor::execute_census(
        &CensusRequest::new(4, 6),
        &registry,
        &observer,
        &signal,
    );
    match verdict {
        Err(CensusFault::Cancelled {
            units_completed,
            units_total,
            ..
        }) => {
            assert_eq!(units_completed, 0);
            assert_eq!(units_total, 10); // C(5, 3)
        }
        other => panic!("expected cooperative cancellation, received {other:?}"),
    }
}

/**
 * Certifica la trayectoria memorizada: el segundo despacho se sirve del
 * almacén y preserva los conteos bit-exactos del primero.
 */
#[test]
fn certify_memoized_dispatch_roundtrip() {
    use signum_domain_models::{CensusReport, ResultStore, StoreFault};
    use std::sync::RwLock;

    #[derive(Default)]
    struct RecordingStore {
        vault: RwLock<Vec<CensusReport>>,
    }

    impl ResultStore for RecordingStore {
        fn lookup(&self, rows: u32, symbols: u32) -> Result<Option<CensusReport>, StoreFault> {
            Ok(self
                .vault
                .read()
                .map_err(|_| StoreFault::Io("vault lock poisoned".into()))?
                .iter()
                .find(|report| report.rows == rows && report.symbols == symbols)
                .cloned())
        }

        fn store(&self, report: &CensusReport) -> Result<(), StoreFault> {
            self.vault
                .write()
                .map_err(|_| StoreFault::Io("vault lock poisoned".into()))?
                .push(report.clone());
            Ok(())
        }
    }

    let (_scratch, registry) = scratch_registry();
    let observer = SilentObserver;
    let signal = AtomicBool::new(false);
    let store = Arc::new(RecordingStore::default());

    let request = CensusRequest::new(3, 5);
    let first =
        StrategyExecutor::execute_with_store(&request, &registry, &*store, &observer, &signal)
            .expect("first dispatch must seal");
    let second =
        StrategyExecutor::execute_with_store(&request, &registry, &*store, &observer, &signal)
            .expect("memoized dispatch must seal");
    assert!(first.counts_match(&second));
    assert_eq!(second.sealed_at, first.sealed_at); // servido del almacén
    assert_eq!(store.vault.read().unwrap().len(), 1);
}
