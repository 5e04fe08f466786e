// [libs/domain/counting-strategy/src/driver.rs]
/*!
 * =================================================================
 * APARATO: PARALLEL CENSUS DRIVER (V12.0 - RESILIENT GOLD)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: FORK-JOIN DE UNIDADES CON CANCELACIÓN COOPERATIVA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. IMMUTABLE SHARING: Los workers comparten únicamente el handle
 *    inmutable del caché; cada worker construye máscaras frescas y
 *    acumula en tallies propios, combinados una sola vez en el join.
 * 2. DETERMINISTIC FOLD: Los resultados por unidad se recolectan en el
 *    orden ordinal del plan y se pliegan secuencialmente; la suma u128
 *    es exacta, de modo que el veredicto es independiente del número de
 *    workers y del entrelazado.
 * 3. COOPERATIVE CANCELLATION: Una señal atómica única se propaga a
 *    todos los workers, que sellan en la siguiente frontera de fila 1;
 *    el veredicto interrumpido transporta los parciales crudos.
 * 4. BEST-EFFORT TELEMETRY: El sellado de unidad notifica al sumidero
 *    de progreso sin bloquear el Hot-Loop; los eventos son desordenados.
 * =================================================================
 */

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, instrument};

use signum_core_cache::prelude::DerangementCacheHandle;
use signum_domain_models::{CensusFault, FirstColumnChoice, WorkUnitSeal};

use crate::engines::backtracking_engine::{BacktrackingOutcome, BacktrackingRectangleEngine};
use crate::executor::ProgressObserver;

/// Veredicto crudo del driver: tallies sin factor de simetría.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverVerdict {
    /// Acumulado crudo de la pasada (ambos censos si hubo fusión).
    pub outcome: BacktrackingOutcome,
    /// Unidades selladas por completo antes del join.
    pub units_completed: u64,
    /// Unidades planificadas.
    pub units_total: u64,
}

/// Driver fork-join del censo sobre unidades de primera columna.
pub struct ParallelCensusDriver;

impl ParallelCensusDriver {
    /**
     * Ejecuta el plan en paralelo sobre un pool dedicado de `worker_count`
     * hilos. Reparto estático por orden ordinal; sin work-stealing
     * requerido: las unidades de un mismo censo son de tamaño comparable.
     *
     * # Errors:
     * - `Internal` si el pool no puede construirse.
     * - Propaga fallos de construcción del motor (dimensiones inválidas).
     */
    #[instrument(skip_all, fields(units = work_units.len(), workers = worker_count, fused = fused_completion))]
    pub fn execute_parallel(
        cache: &Arc<DerangementCacheHandle>,
        rows: usize,
        work_units: &[FirstColumnChoice],
        worker_count: usize,
        fused_completion: bool,
        observer: &dyn ProgressObserver,
        cancellation: &AtomicBool,
    ) -> Result<DriverVerdict, CensusFault> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count.max(1))
            .build()
            .map_err(|pool_fault| {
                CensusFault::Internal(format!("worker pool ignition failed: {pool_fault}"))
            })?;

        let sealed_units_accumulator = AtomicU64::new(0);

        let unit_outcomes: Vec<BacktrackingOutcome> = pool.install(|| {
            work_units
                .par_iter()
                .map(|work_unit| {
                    if cancellation.load(Ordering::Relaxed) {
                        return Ok(BacktrackingOutcome {
                            interrupted: true,
                            ..BacktrackingOutcome::default()
                        });
                    }
                    let mut engine =
                        BacktrackingRectangleEngine::new(cache, rows, fused_completion)?;
                    let outcome =
                        engine.enumerate(Some(work_unit.constrained_rows()), cancellation);
                    if !outcome.interrupted {
                        let sealed_so_far =
                            sealed_units_accumulator.fetch_add(1, Ordering::Relaxed) + 1;
                        observer.on_unit_complete(WorkUnitSeal {
                            worker_id: rayon::current_thread_index().unwrap_or(0),
                            units_completed: sealed_so_far,
                            rectangles_scanned: outcome.rectangles_scanned,
                            partial_positive: outcome.positive,
                            partial_negative: outcome.negative,
                        });
                    }
                    Ok(outcome)
                })
                .collect::<Result<Vec<_>, CensusFault>>()
        })?;

        Ok(Self::fold_in_plan_order(
            &unit_outcomes,
            work_units.len() as u64,
            sealed_units_accumulator.into_inner(),
        ))
    }

    /**
     * Ejecuta el plan secuencialmente en el hilo llamador, reutilizando un
     * único motor con sus buffers (backend de un solo worker y oráculo de
     * los tests de determinismo).
     *
     * # Errors:
     * Propaga fallos de construcción del motor.
     */
    #[instrument(skip_all, fields(units = work_units.len(), fused = fused_completion))]
    pub fn execute_sequential(
        cache: &Arc<DerangementCacheHandle>,
        rows: usize,
        work_units: &[FirstColumnChoice],
        fused_completion: bool,
        observer: &dyn ProgressObserver,
        cancellation: &AtomicBool,
    ) -> Result<DriverVerdict, CensusFault> {
        let mut engine = BacktrackingRectangleEngine::new(cache, rows, fused_completion)?;
        let mut unit_outcomes = Vec::with_capacity(work_units.len());
        let mut sealed_units: u64 = 0;

        for work_unit in work_units {
            if cancellation.load(Ordering::Relaxed) {
                unit_outcomes.push(BacktrackingOutcome {
                    interrupted: true,
                    ..BacktrackingOutcome::default()
                });
                continue;
            }
            let outcome = engine.enumerate(Some(work_unit.constrained_rows()), cancellation);
            if !outcome.interrupted {
                sealed_units += 1;
                observer.on_unit_complete(WorkUnitSeal {
                    worker_id: 0,
                    units_completed: sealed_units,
                    rectangles_scanned: outcome.rectangles_scanned,
                    partial_positive: outcome.positive,
                    partial_negative: outcome.negative,
                });
            }
            unit_outcomes.push(outcome);
        }

        Ok(Self::fold_in_plan_order(
            &unit_outcomes,
            work_units.len() as u64,
            sealed_units,
        ))
    }

    /// Pliegue determinista en orden ordinal del plan.
    fn fold_in_plan_order(
        unit_outcomes: &[BacktrackingOutcome],
        units_total: u64,
        units_completed: u64,
    ) -> DriverVerdict {
        let mut folded = BacktrackingOutcome::default();
        for unit_outcome in unit_outcomes {
            folded.absorb(unit_outcome);
        }
        debug!(
            "🧮 [CENSUS_DRIVER]: Fold sealed. {} rectangles across {}/{} units.",
            folded.rectangles_scanned, units_completed, units_total
        );
        DriverVerdict {
            outcome: folded,
            units_completed,
            units_total,
        }
    }
}
