// [libs/domain/models-rs/src/result.rs]
/*!
 * =================================================================
 * APARATO: SEALED CENSUS REPORT (V7.1 - PRODUCTION MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: REPORTE INMUTABLE DEL CENSO FIRMADO POR MOTOR
 *
 * # Mathematical Proof (Report Immutability):
 * El reporte actúa como bloque de sellado de un censo: los conteos u128
 * son exactos (sin punto flotante ni saturación para n ≤ 13) y la firma
 * de motor certifica la trayectoria de cómputo utilizada, permitiendo
 * auditar la reproducibilidad bit-perfecta entre backends.
 * =================================================================
 */

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Reporte inmutable de un censo (r × n) sellado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusReport {
    /// Cantidad de filas r censadas.
    pub rows: u32,
    /// Cantidad de símbolos n.
    pub symbols: u32,
    /// Rectángulos normalizados con signo +1.
    pub positive_count: u128,
    /// Rectángulos normalizados con signo −1.
    pub negative_count: u128,
    /// Diferencia con signo: positive − negative.
    pub signed_difference: i128,
    /// Duración del cómputo en milisegundos.
    pub computation_time_milliseconds: u64,
    /// Firma técnica del motor que produjo el reporte.
    pub engine_signature: String,
    /// Marca temporal RFC-3339 del sellado.
    pub sealed_at: String,
}

impl CensusReport {
    /// Sella un reporte calculando la diferencia y la marca temporal.
    #[must_use]
    pub fn seal(
        rows: u32,
        symbols: u32,
        positive_count: u128,
        negative_count: u128,
        computation_time_milliseconds: u64,
        engine_signature: &str,
    ) -> Self {
        Self {
            rows,
            symbols,
            positive_count,
            negative_count,
            signed_difference: positive_count as i128 - negative_count as i128,
            computation_time_milliseconds,
            engine_signature: engine_signature.to_string(),
            sealed_at: Utc::now().to_rfc3339(),
        }
    }

    /// Total de rectángulos censados (ambos signos).
    #[must_use]
    pub fn total_count(&self) -> u128 {
        self.positive_count + self.negative_count
    }

    /// Igualdad de conteos, ignorando metadatos de sellado.
    ///
    /// Contrato bit-exacto del sistema: el mismo censo por cualquier
    /// trayectoria (directa, reducida, fusionada, memorizada) produce
    /// conteos idénticos aunque difieran firma y marca temporal.
    #[must_use]
    pub fn counts_match(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.symbols == other.symbols
            && self.positive_count == other.positive_count
            && self.negative_count == other.negative_count
            && self.signed_difference == other.signed_difference
    }
}
