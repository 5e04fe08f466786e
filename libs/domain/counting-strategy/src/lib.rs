// [libs/domain/counting-strategy/src/lib.rs]
#![forbid(unsafe_code)]

/*!
 * =================================================================
 * APARATO: COUNTING STRATEGY MASTER HUB (V9.0 - SOVEREIGN SYNC)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: ORQUESTACIÓN DE MOTORES DE CENSO CON SIGNO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STRATA REGISTRATION: Expone motores, reducción, driver y despacho
 *    bajo un único preludio para el estrato de aplicación.
 * 2. DETERMINISM SEAL: Todas las trayectorias de censo son bit-idénticas
 *    e independientes del número de workers y del entrelazado.
 * =================================================================
 */

/// Driver fork-join de unidades de primera columna.
pub mod driver;
/// Motores de censo especializados (analítico y de backtracking).
pub mod engines;
/// Despacho polimórfico, sumidero de progreso y sellado de reportes.
pub mod executor;
/// Planificación de la reducción de simetría de primera columna.
pub mod reducer;

/// Preludio estratégico para el estrato de aplicación (L3).
pub mod prelude {
    pub use crate::driver::{DriverVerdict, ParallelCensusDriver};
    pub use crate::engines::analytic_engine::AnalyticTwoRowEngine;
    pub use crate::engines::backtracking_engine::{
        BacktrackingOutcome, BacktrackingRectangleEngine,
    };
    pub use crate::executor::{
        ProgressObserver, SilentObserver, StrategyExecutor, WORKER_CEILING,
    };
    pub use crate::reducer::FirstColumnSymmetryReducer;
}
