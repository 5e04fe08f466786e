// [tests/mirror/libs/domain/counting_strategy/reducer_symmetry.test.rs]
/*!
 * =================================================================
 * APARATO: FIRST-COLUMN SYMMETRY CERTIFIER (V9.1 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-STRATEGY
 * RESPONSABILIDAD: CERTIFICACIÓN DE LA REDUCCIÓN (r−1)! Y DETERMINISMO
 *
 * # Mathematical Proof (Class Volume):
 * Las filas 1..r−1 de un rectángulo normalizado portan valores de
 * primera columna distintos; ordenarlas ascendentemente elige un único
 * representante por clase y cada clase contiene exactamente (r−1)!
 * miembros del mismo signo. La suma reducida multiplicada por (r−1)!
 * debe reproducir la enumeración directa exacta.
 * =================================================================
 */

use std::sync::atomic::AtomicBool;

use signum_core_cache::prelude::CacheRegistry;
use signum_domain_models::{CensusRequest, ExecutionMode, WorkerAllocation};
use signum_domain_strategy::prelude::{
    FirstColumnSymmetryReducer, SilentObserver, StrategyExecutor,
};

#[cfg(test)]
mod tests {
    use super::*;

    /**
     * Reducción ≡ oráculo exhaustivo para todas las dimensiones del
     * presupuesto de cómputo del Proving Grounds.
     */
    #[test]
    fn certify_reduction_matches_exhaustive_enumeration() {
        let scratch = tempfile::tempdir().unwrap();
        let registry = CacheRegistry::new(scratch.path());
        let signal = AtomicBool::new(false);

        let certified_dimensions: &[(u32, u32)] = &[
            (3, 4), (4, 4),
            (3, 5), (4, 5), (5, 5),
            (3, 6), (4, 6),
            (3, 7),
        ];
        for &(rows, symbols) in certified_dimensions {
            let reduced = StrategyExecutor::execute_census(
                &CensusRequest::new(rows, symbols),
                &registry,
                &SilentObserver,
                &signal,
            )
            .unwrap();
            let oracle =
                StrategyExecutor::execute_exhaustive_oracle(rows, symbols, &registry, &signal)
                    .unwrap();
            assert!(
                reduced.counts_match(&oracle),
                "symmetry reduction diverged at ({rows}, {symbols}): reduced +{}/−{} vs oracle +{}/−{}",
                reduced.positive_count,
                reduced.negative_count,
                oracle.positive_count,
                oracle.negative_count
            );
        }
    }

    /**
     * Ambas mitades del censo reducido son múltiplos exactos de (r−1)!.
     */
    #[test]
    fn certify_sign_halves_divisibility() {
        let scratch = tempfile::tempdir().unwrap();
        let registry = CacheRegistry::new(scratch.path());
        let signal = AtomicBool::new(false);

        for &(rows, symbols) in &[(3u32, 5u32), (4, 5), (4, 6), (5, 6), (6, 6)] {
            let report = StrategyExecutor::execute_census(
                &CensusRequest::new(rows, symbols),
                &registry,
                &SilentObserver,
                &signal,
            )
            .unwrap();
            let symmetry_factor = FirstColumnSymmetryReducer::symmetry_factor(rows);
            assert_eq!(report.positive_count % symmetry_factor, 0);
            assert_eq!(report.negative_count % symmetry_factor, 0);
        }
    }

    /**
     * Determinismo del veredicto bajo workers ∈ {1, 2, 4, 8} y contra el
     * backend secuencial (contrato de independencia de scheduling).
     */
    #[test]
    fn certify_worker_count_independence() {
        let scratch = tempfile::tempdir().unwrap();
        let registry = CacheRegistry::new(scratch.path());
        let signal = AtomicBool::new(false);

        let sequential = StrategyExecutor::execute_census(
            &CensusRequest::new(4, 6).with_execution_mode(ExecutionMode::Single),
            &registry,
            &SilentObserver,
            &signal,
        )
        .unwrap();

        for workers in [1usize, 2, 4, 8] {
            let parallel = StrategyExecutor::execute_census(
                &CensusRequest::new(4, 6)
                    .with_execution_mode(ExecutionMode::Parallel)
                    .with_worker_allocation(WorkerAllocation::Fixed(workers)),
                &registry,
                &SilentObserver,
                &signal,
            )
            .unwrap();
            assert!(
                sequential.counts_match(&parallel),
                "worker count {workers} perturbed the census"
            );
        }
    }

    /**
     * El plan de unidades cubre exactamente C(n−1, r−1) clases y la suma
     * de los totales por unidad reproduce el censo reducido sin factor.
     */
    #[test]
    fn certify_unit_plan_partition() {
        use signum_domain_strategy::prelude::BacktrackingRectangleEngine;

        let scratch = tempfile::tempdir().unwrap();
        let registry = CacheRegistry::new(scratch.path());
        let signal = AtomicBool::new(false);
        let cache = registry.acquire(6).unwrap();

        let plan = FirstColumnSymmetryReducer::plan_work_units(4, 6);
        assert_eq!(plan.len() as u64, FirstColumnSymmetryReducer::unit_volume(4, 6));

        let mut engine = BacktrackingRectangleEngine::new(&cache, 4, false).unwrap();
        let mut partitioned_total = 0u128;
        for unit in &plan {
            let outcome = engine.enumerate(Some(unit.constrained_rows()), &signal);
            partitioned_total += outcome.positive + outcome.negative;
        }

        let oracle = StrategyExecutor::execute_exhaustive_oracle(4, 6, &registry, &signal).unwrap();
        let symmetry_factor = FirstColumnSymmetryReducer::symmetry_factor(4);
        assert_eq!(partitioned_total * symmetry_factor, oracle.total_count());
    }
}
