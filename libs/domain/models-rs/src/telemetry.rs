// [libs/domain/models-rs/src/telemetry.rs]
/*!
 * =================================================================
 * APARATO: CENSUS TELEMETRY CONTRACTS (V4.0 - PANOPTICON SYNC)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CARGAS ÚTILES DEL SUMIDERO DE PROGRESO
 *
 * # Logic:
 * Los eventos de progreso son best-effort y desordenados entre workers;
 * los consumidores no deben depender de su secuencia. El contrato es de
 * solo lectura: ningún evento altera el resultado del censo.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Evento de ignición de un censo: dimensiones y plan de unidades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusIgnition {
    /// Filas r del censo iniciado.
    pub rows: u32,
    /// Símbolos n del censo iniciado.
    pub symbols: u32,
    /// Unidades de trabajo planificadas (elecciones de primera columna).
    pub total_work_units: u64,
}

/// Sellado de una unidad de trabajo por un worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkUnitSeal {
    /// Identidad del worker dentro del pool del censo.
    pub worker_id: usize,
    /// Unidades completadas en el censo al momento del sellado.
    pub units_completed: u64,
    /// Rectángulos visitados por este worker en la unidad sellada.
    pub rectangles_scanned: u64,
    /// Positivos de la unidad (crudos, sin factor de simetría).
    pub partial_positive: u128,
    /// Negativos de la unidad (crudos, sin factor de simetría).
    pub partial_negative: u128,
}
