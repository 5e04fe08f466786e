// [tests/mirror/libs/domain/counting_strategy/completion_fusion.test.rs]
/*!
 * =================================================================
 * APARATO: COMPLETION FUSION CERTIFIER (V7.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-STRATEGY
 * RESPONSABILIDAD: CERTIFICACIÓN DEL BARRIDO DUAL (n−1, n) → (n, n)
 *
 * # Mathematical Proof (Forced Completion Bijection):
 * Todo rectángulo normalizado (n−1, n) se extiende a exactamente un
 * cuadrado (n, n): en cada columna falta un único valor y la fila de
 * valores faltantes es ella misma un desarreglo. Por lo tanto los
 * totales coinciden exactamente y las mitades por signo difieren solo
 * por la contribución multiplicativa del signo de la fila forzada.
 * =================================================================
 */

use std::sync::atomic::AtomicBool;

use signum_core_cache::prelude::CacheRegistry;
use signum_domain_models::{CensusFault, CensusRequest};
use signum_domain_strategy::prelude::{SilentObserver, StrategyExecutor};

#[cfg(test)]
mod tests {
    use super::*;

    /**
     * El barrido fusionado reproduce bit a bit ambos censos calculados
     * por separado, para n ∈ [3, 6].
     */
    #[test]
    fn certify_fused_sweep_equals_separate_censuses() {
        let scratch = tempfile::tempdir().unwrap();
        let registry = CacheRegistry::new(scratch.path());
        let signal = AtomicBool::new(false);

        for symbols in 3..=6u32 {
            let rows = symbols - 1;
            let (fused_primary, fused_completion) = StrategyExecutor::execute_fused_census(
                &CensusRequest::new(rows, symbols),
                &registry,
                &SilentObserver,
                &signal,
            )
            .expect("FUSION_FAULT: dual census must seal");

            let separate_primary = StrategyExecutor::execute_census(
                &CensusRequest::new(rows, symbols),
                &registry,
                &SilentObserver,
                &signal,
            )
            .unwrap();
            let separate_completion = StrategyExecutor::execute_census(
                &CensusRequest::new(symbols, symbols),
                &registry,
                &SilentObserver,
                &signal,
            )
            .unwrap();

            assert!(fused_primary.counts_match(&separate_primary));
            assert!(fused_completion.counts_match(&separate_completion));
        }
    }

    /**
     * Invariante de totales: count(n−1, n) = count(n, n) para n ∈ [3, 6],
     * emitidos atómicamente por el mismo barrido.
     */
    #[test]
    fn certify_total_preservation_under_completion() {
        let scratch = tempfile::tempdir().unwrap();
        let registry = CacheRegistry::new(scratch.path());
        let signal = AtomicBool::new(false);

        for symbols in 3..=6u32 {
            let (primary, completion) = StrategyExecutor::execute_fused_census(
                &CensusRequest::new(symbols - 1, symbols),
                &registry,
                &SilentObserver,
                &signal,
            )
            .unwrap();
            assert_eq!(primary.total_count(), completion.total_count());
            assert_eq!(completion.rows, symbols);
            assert_eq!(primary.rows, symbols - 1);
        }
    }

    /**
     * El sellado (4, 4) = (24, 0) emerge de la fusión sobre (3, 4): los
     * valores literales del censo se preservan a través del barrido dual.
     */
    #[test]
    fn certify_sealed_literals_through_fusion() {
        let scratch = tempfile::tempdir().unwrap();
        let registry = CacheRegistry::new(scratch.path());
        let signal = AtomicBool::new(false);

        let (primary, completion) = StrategyExecutor::execute_fused_census(
            &CensusRequest::new(3, 4),
            &registry,
            &SilentObserver,
            &signal,
        )
        .unwrap();
        assert_eq!(primary.positive_count, 12);
        assert_eq!(primary.negative_count, 12);
        assert_eq!(completion.positive_count, 24);
        assert_eq!(completion.negative_count, 0);

        // (5, 5) = (384, 960) desde la fusión sobre (4, 5).
        let (_, five_by_five) = StrategyExecutor::execute_fused_census(
            &CensusRequest::new(4, 5),
            &registry,
            &SilentObserver,
            &signal,
        )
        .unwrap();
        assert_eq!(five_by_five.positive_count, 384);
        assert_eq!(five_by_five.negative_count, 960);
    }

    /**
     * La fusión exige r = n − 1; cualquier otra dimensión se rechaza en
     * la frontera del despachador.
     */
    #[test]
    fn certify_fusion_dimension_contract() {
        let scratch = tempfile::tempdir().unwrap();
        let registry = CacheRegistry::new(scratch.path());
        let signal = AtomicBool::new(false);

        for (rows, symbols) in [(3u32, 5u32), (5, 5), (2, 5)] {
            let verdict = StrategyExecutor::execute_fused_census(
                &CensusRequest::new(rows, symbols),
                &registry,
                &SilentObserver,
                &signal,
            );
            assert!(matches!(verdict, Err(CensusFault::InvalidInput(_))));
        }

        // Caso frontera: r = 2, n = 3 fluye por el motor de backtracking.
        let (primary, completion) = StrategyExecutor::execute_fused_census(
            &CensusRequest::new(2, 3),
            &registry,
            &SilentObserver,
            &signal,
        )
        .unwrap();
        assert_eq!(
            (primary.positive_count, primary.negative_count),
            (2, 0)
        );
        assert_eq!(
            (completion.positive_count, completion.negative_count),
            (2, 0)
        );
    }
}
