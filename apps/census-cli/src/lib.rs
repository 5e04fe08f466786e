// [apps/census-cli/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CENSUS SHELL LIBRARY (V4.0 - SOBERANO)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN DE LOS APARATOS DEL SHELL DE MANDO
 * =================================================================
 */

/// Telemetría de silicio y afinidad del hilo de despacho.
pub mod cpu_manager;
/// Sumidero de progreso con barra de terminal (indicatif).
pub mod progress;
