// [libs/domain/counting-strategy/src/executor.rs]
/*!
 * =================================================================
 * APARATO: STRATEGY EXECUTOR MASTER (V19.3 - SWISS WATCH SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: DESPACHO POLIMÓRFICO Y SELLADO DE REPORTES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FRONTIER VALIDATION: Toda petición se valida en esta frontera;
 *    ningún motor recibe dimensiones fuera de contrato.
 * 2. POLYMORPHIC DISPATCH: r = 2 → forma cerrada; r ≥ 3 → reducción de
 *    primera columna con backend secuencial o paralelo por heurística;
 *    r = n − 1 con petición dual → fusión de completación.
 * 3. BIT-EXACT CONTRACT: Todas las trayectorias (directa, reducida,
 *    fusionada, memorizada) producen conteos idénticos; la firma del
 *    motor solo certifica el camino, jamás altera el resultado.
 * 4. OPAQUE PERSISTENCE: El almacén de resultados se consume como
 *    interfaz; sus fallos degradan a advertencia, nunca a fallo de censo.
 * =================================================================
 */

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use tracing::{info, instrument, warn};

use signum_core_cache::prelude::{CacheError, CacheRegistry, MAXIMUM_SUPPORTED_DIMENSION};
use signum_core_perm::prelude::derangement_count;
use signum_domain_models::{
    CensusFault, CensusIgnition, CensusReport, CensusRequest, ExecutionMode, ResultStore,
    WorkUnitSeal, WorkerAllocation,
};

use crate::driver::{DriverVerdict, ParallelCensusDriver};
use crate::engines::analytic_engine::AnalyticTwoRowEngine;
use crate::engines::backtracking_engine::BacktrackingRectangleEngine;
use crate::reducer::FirstColumnSymmetryReducer;

/// Techo configurado de workers del backend paralelo.
pub const WORKER_CEILING: usize = 8;

/// Umbral de volumen estimado de visitas para enganchar el paralelismo
/// (proxy de los ~0.3 s de cómputo secuencial).
const PARALLEL_ENGAGEMENT_THRESHOLD: u128 = 3_000_000;

// --- FIRMAS TÉCNICAS DE MOTOR ---
const SIGNATURE_ANALYTIC: &str = "ANALYTIC_CLOSED_FORM";
const SIGNATURE_REDUCED_SINGLE: &str = "REDUCED_SINGLE";
const SIGNATURE_REDUCED_PARALLEL: &str = "REDUCED_PARALLEL";
const SIGNATURE_FUSED_SINGLE: &str = "FUSED_SINGLE";
const SIGNATURE_FUSED_PARALLEL: &str = "FUSED_PARALLEL";
const SIGNATURE_EXHAUSTIVE_ORACLE: &str = "EXHAUSTIVE_ORACLE";

/**
 * Trait SSS (Sovereign Signal System) del sumidero de progreso.
 *
 * Los métodos son best-effort y no bloqueantes: el núcleo tolera eventos
 * descartados y los consumidores no dependen de su orden.
 */
pub trait ProgressObserver: Send + Sync {
    /// Ignición de un censo con su plan de unidades.
    fn on_census_start(&self, _ignition: CensusIgnition) {}

    /// Sellado de una unidad de trabajo por un worker.
    fn on_unit_complete(&self, _seal: WorkUnitSeal) {}

    /// Sellado final del censo con su reporte.
    fn on_census_finish(&self, _report: &CensusReport) {}
}

/// Sumidero nulo: descarta todos los eventos.
pub struct SilentObserver;

impl ProgressObserver for SilentObserver {}

/// Orquestador central de despacho de censos.
pub struct StrategyExecutor;

impl StrategyExecutor {
    /**
     * Ejecuta un censo completo para la petición dada.
     *
     * # Errors:
     * - `InvalidInput` si r < 2, n < 2 o r > n.
     * - `TooLarge` si n excede el techo del formato binario.
     * - `CacheIo` / `CacheCorrupt` desde el estrato de persistencia L1.
     * - `Cancelled` con parciales crudos ante la señal cooperativa.
     */
    #[instrument(
        skip_all,
        fields(rows = request.rows, symbols = request.symbols, mode = ?request.execution_mode)
    )]
    pub fn execute_census(
        request: &CensusRequest,
        registry: &CacheRegistry,
        observer: &dyn ProgressObserver,
        cancellation: &AtomicBool,
    ) -> Result<CensusReport, CensusFault> {
        Self::validate_dimensions(request.rows, request.symbols)?;
        let census_ignition_timestamp = Instant::now();

        // MOTOR ALFA: FORMA CERRADA r = 2
        if request.rows == 2 {
            observer.on_census_start(CensusIgnition {
                rows: request.rows,
                symbols: request.symbols,
                total_work_units: 1,
            });
            let (positive, negative) = AnalyticTwoRowEngine::resolve(request.symbols)?;
            let report = CensusReport::seal(
                request.rows,
                request.symbols,
                positive,
                negative,
                census_ignition_timestamp.elapsed().as_millis() as u64,
                SIGNATURE_ANALYTIC,
            );
            observer.on_census_finish(&report);
            return Ok(report);
        }

        // MOTOR BETA: REDUCCIÓN DE PRIMERA COLUMNA r ≥ 3
        let cache = registry
            .acquire(request.symbols)
            .map_err(Self::translate_cache_fault)?;
        let work_units =
            FirstColumnSymmetryReducer::plan_work_units(request.rows, request.symbols);
        observer.on_census_start(CensusIgnition {
            rows: request.rows,
            symbols: request.symbols,
            total_work_units: work_units.len() as u64,
        });

        let engage_parallel = Self::should_engage_parallel(request, work_units.len());
        let verdict = if engage_parallel {
            let worker_count =
                Self::resolve_worker_count(request.worker_allocation, work_units.len());
            info!(
                "🚀 [EXECUTOR]: Parallel strata engaged. {} workers over {} units.",
                worker_count,
                work_units.len()
            );
            ParallelCensusDriver::execute_parallel(
                &cache,
                request.rows as usize,
                &work_units,
                worker_count,
                false,
                observer,
                cancellation,
            )?
        } else {
            ParallelCensusDriver::execute_sequential(
                &cache,
                request.rows as usize,
                &work_units,
                false,
                observer,
                cancellation,
            )?
        };

        Self::guard_interruption(&verdict)?;
        let symmetry_factor = FirstColumnSymmetryReducer::symmetry_factor(request.rows);
        let report = CensusReport::seal(
            request.rows,
            request.symbols,
            verdict.outcome.positive * symmetry_factor,
            verdict.outcome.negative * symmetry_factor,
            census_ignition_timestamp.elapsed().as_millis() as u64,
            if engage_parallel {
                SIGNATURE_REDUCED_PARALLEL
            } else {
                SIGNATURE_REDUCED_SINGLE
            },
        );
        observer.on_census_finish(&report);
        Ok(report)
    }

    /**
     * Censo dual fusionado: (r, n) y (r + 1, n) en un único barrido.
     * Exige r = n − 1; la fila de completación es única por rectángulo.
     *
     * # Errors:
     * `InvalidInput` si r ≠ n − 1; el resto como [`Self::execute_census`].
     */
    #[instrument(skip_all, fields(rows = request.rows, symbols = request.symbols))]
    pub fn execute_fused_census(
        request: &CensusRequest,
        registry: &CacheRegistry,
        observer: &dyn ProgressObserver,
        cancellation: &AtomicBool,
    ) -> Result<(CensusReport, CensusReport), CensusFault> {
        Self::validate_dimensions(request.rows, request.symbols)?;
        if request.rows != request.symbols - 1 {
            return Err(CensusFault::InvalidInput(format!(
                "completion fusion requires r = n − 1, received r = {}, n = {}",
                request.rows, request.symbols
            )));
        }

        let census_ignition_timestamp = Instant::now();
        let cache = registry
            .acquire(request.symbols)
            .map_err(Self::translate_cache_fault)?;
        let work_units =
            FirstColumnSymmetryReducer::plan_work_units(request.rows, request.symbols);
        observer.on_census_start(CensusIgnition {
            rows: request.rows,
            symbols: request.symbols,
            total_work_units: work_units.len() as u64,
        });

        let engage_parallel = Self::should_engage_parallel(request, work_units.len());
        let verdict = if engage_parallel {
            let worker_count =
                Self::resolve_worker_count(request.worker_allocation, work_units.len());
            ParallelCensusDriver::execute_parallel(
                &cache,
                request.rows as usize,
                &work_units,
                worker_count,
                true,
                observer,
                cancellation,
            )?
        } else {
            ParallelCensusDriver::execute_sequential(
                &cache,
                request.rows as usize,
                &work_units,
                true,
                observer,
                cancellation,
            )?
        };

        Self::guard_interruption(&verdict)?;
        if verdict.outcome.fusion_invariant_collapse {
            return Err(CensusFault::Internal(
                "forced completion row was not unique".to_string(),
            ));
        }

        let symmetry_factor = FirstColumnSymmetryReducer::symmetry_factor(request.rows);
        let elapsed_milliseconds = census_ignition_timestamp.elapsed().as_millis() as u64;
        let signature = if engage_parallel {
            SIGNATURE_FUSED_PARALLEL
        } else {
            SIGNATURE_FUSED_SINGLE
        };
        let primary_report = CensusReport::seal(
            request.rows,
            request.symbols,
            verdict.outcome.positive * symmetry_factor,
            verdict.outcome.negative * symmetry_factor,
            elapsed_milliseconds,
            signature,
        );
        let completion_report = CensusReport::seal(
            request.rows + 1,
            request.symbols,
            verdict.outcome.completion_positive * symmetry_factor,
            verdict.outcome.completion_negative * symmetry_factor,
            elapsed_milliseconds,
            signature,
        );
        observer.on_census_finish(&primary_report);
        observer.on_census_finish(&completion_report);
        Ok((primary_report, completion_report))
    }

    /**
     * Barrido de rango: pares (r, n) con r ≤ n, en n ascendente y luego
     * r ascendente. La cancelación también se respeta entre censos.
     *
     * # Errors:
     * Como [`Self::execute_census`]; el primer fallo aborta el barrido.
     */
    pub fn execute_census_range(
        rows_span: (u32, u32),
        symbols_span: (u32, u32),
        registry: &CacheRegistry,
        observer: &dyn ProgressObserver,
        cancellation: &AtomicBool,
    ) -> Result<Vec<CensusReport>, CensusFault> {
        let (rows_floor, rows_ceiling) = rows_span;
        let (symbols_floor, symbols_ceiling) = symbols_span;
        if rows_floor > rows_ceiling || symbols_floor > symbols_ceiling {
            return Err(CensusFault::InvalidInput(
                "range bounds are inverted".to_string(),
            ));
        }

        let mut sealed_reports = Vec::new();
        for symbols in symbols_floor..=symbols_ceiling {
            for rows in rows_floor..=rows_ceiling.min(symbols) {
                if cancellation.load(std::sync::atomic::Ordering::Relaxed) {
                    return Err(CensusFault::Cancelled {
                        partial_positive: 0,
                        partial_negative: 0,
                        units_completed: sealed_reports.len() as u64,
                        units_total: 0,
                    });
                }
                let request = CensusRequest::new(rows, symbols);
                sealed_reports.push(Self::execute_census(
                    &request,
                    registry,
                    observer,
                    cancellation,
                )?);
            }
        }
        Ok(sealed_reports)
    }

    /**
     * Variante memorizada: consulta el almacén opaco antes de computar y
     * persiste el reporte sellado después. Los fallos del almacén degradan
     * a advertencia; la exactitud del censo nunca depende de él.
     *
     * # Errors:
     * Como [`Self::execute_census`].
     */
    pub fn execute_with_store(
        request: &CensusRequest,
        registry: &CacheRegistry,
        store: &dyn ResultStore,
        observer: &dyn ProgressObserver,
        cancellation: &AtomicBool,
    ) -> Result<CensusReport, CensusFault> {
        Self::validate_dimensions(request.rows, request.symbols)?;
        match store.lookup(request.rows, request.symbols) {
            Ok(Some(memoized_report)) => {
                info!(
                    "📒 [EXECUTOR]: Census ({}, {}) served from result store.",
                    request.rows, request.symbols
                );
                return Ok(memoized_report);
            }
            Ok(None) => {}
            Err(store_fault) => {
                warn!("⚠️ [EXECUTOR]: Result store lookup degraded: {store_fault}");
            }
        }

        let report = Self::execute_census(request, registry, observer, cancellation)?;
        if let Err(store_fault) = store.store(&report) {
            warn!("⚠️ [EXECUTOR]: Result store persistence degraded: {store_fault}");
        }
        Ok(report)
    }

    /**
     * Oráculo exhaustivo: enumeración directa sin reducción de simetría.
     *
     * Es la trayectoria de contraste del Proving Grounds (consistencia de
     * la reducción) y el repliegue operativo si la simetría tuviera que
     * deshabilitarse para una dimensión.
     *
     * # Errors:
     * Como [`Self::execute_census`].
     */
    pub fn execute_exhaustive_oracle(
        rows: u32,
        symbols: u32,
        registry: &CacheRegistry,
        cancellation: &AtomicBool,
    ) -> Result<CensusReport, CensusFault> {
        Self::validate_dimensions(rows, symbols)?;
        let census_ignition_timestamp = Instant::now();
        let cache = registry
            .acquire(symbols)
            .map_err(Self::translate_cache_fault)?;
        let mut engine = BacktrackingRectangleEngine::new(&cache, rows as usize, false)?;
        let outcome = engine.enumerate(None, cancellation);
        if outcome.interrupted {
            return Err(CensusFault::Cancelled {
                partial_positive: outcome.positive,
                partial_negative: outcome.negative,
                units_completed: 0,
                units_total: 1,
            });
        }
        Ok(CensusReport::seal(
            rows,
            symbols,
            outcome.positive,
            outcome.negative,
            census_ignition_timestamp.elapsed().as_millis() as u64,
            SIGNATURE_EXHAUSTIVE_ORACLE,
        ))
    }

    // --- GOBERNANZA INTERNA DE LA FRONTERA ---

    fn validate_dimensions(rows: u32, symbols: u32) -> Result<(), CensusFault> {
        if rows < 2 || symbols < 2 || rows > symbols {
            return Err(CensusFault::InvalidInput(format!(
                "census dimensions must satisfy 2 ≤ r ≤ n, received r = {rows}, n = {symbols}"
            )));
        }
        if symbols > MAXIMUM_SUPPORTED_DIMENSION {
            return Err(CensusFault::TooLarge {
                requested: symbols,
                ceiling: MAXIMUM_SUPPORTED_DIMENSION,
            });
        }
        Ok(())
    }

    fn translate_cache_fault(cache_fault: CacheError) -> CensusFault {
        match cache_fault {
            CacheError::Corrupt(detail) => CensusFault::CacheCorrupt(detail),
            CacheError::Io(io_fault) => CensusFault::CacheIo(io_fault.to_string()),
            CacheError::TooLarge { requested, ceiling } => {
                CensusFault::TooLarge { requested, ceiling }
            }
            CacheError::DimensionFloor(dimension) => CensusFault::InvalidInput(format!(
                "dimension {dimension} below operational floor"
            )),
            CacheError::Combinatorial(math_fault) => {
                CensusFault::Internal(math_fault.to_string())
            }
        }
    }

    fn guard_interruption(verdict: &DriverVerdict) -> Result<(), CensusFault> {
        if verdict.outcome.interrupted {
            return Err(CensusFault::Cancelled {
                partial_positive: verdict.outcome.positive,
                partial_negative: verdict.outcome.negative,
                units_completed: verdict.units_completed,
                units_total: verdict.units_total,
            });
        }
        Ok(())
    }

    /// Heurística de enganche paralelo: volumen estimado de visitas
    /// D(n)^(r−1) / (r−1)! contra el umbral de ~0.3 s secuenciales.
    fn should_engage_parallel(request: &CensusRequest, unit_volume: usize) -> bool {
        match request.execution_mode {
            ExecutionMode::Single => false,
            ExecutionMode::Parallel => unit_volume > 1,
            ExecutionMode::Auto => {
                let branching = derangement_count(request.symbols as usize).unwrap_or(u128::MAX);
                let mut estimated_visit_volume: u128 = 1;
                for _level in 1..request.rows {
                    estimated_visit_volume = estimated_visit_volume.saturating_mul(branching);
                }
                estimated_visit_volume /=
                    FirstColumnSymmetryReducer::symmetry_factor(request.rows).max(1);
                unit_volume > 1 && estimated_visit_volume > PARALLEL_ENGAGEMENT_THRESHOLD
            }
        }
    }

    /// Selección de workers: min(paralelismo físico, unidades, techo).
    fn resolve_worker_count(allocation: WorkerAllocation, unit_volume: usize) -> usize {
        match allocation {
            WorkerAllocation::Fixed(requested) => requested.clamp(1, WORKER_CEILING),
            WorkerAllocation::Auto => num_cpus::get().min(unit_volume).min(WORKER_CEILING).max(1),
        }
    }
}
