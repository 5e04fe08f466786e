// [libs/domain/models-rs/src/store.rs]
/*!
 * =================================================================
 * APARATO: RESULT STORE CONTRACT (V5.0 - OPAQUE SEAL)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: INTERFAZ OPACA DE PERSISTENCIA DE REPORTES
 *
 * # Logic:
 * El núcleo del censo consume esta interfaz sin conocer su respaldo
 * (RAM, bitácora JSON u otro). Ningún esquema de almacenamiento forma
 * parte del contrato; la clave lógica es el par (rows, symbols).
 * =================================================================
 */

use thiserror::Error;

use crate::result::CensusReport;

/// Fallos del estrato de persistencia de reportes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreFault {
    /// Fallo de Entrada/Salida sobre el respaldo físico.
    #[error("[L3_STORE_FAULT]: PERSISTENCE_UPLINK_SEVERED -> {0}")]
    Io(String),

    /// Fallo de codificación o decodificación del reporte.
    #[error("[L3_STORE_FAULT]: REPORT_CODEC_VIOLATION -> {0}")]
    Serialization(String),
}

/// Almacén opaco de reportes sellados, indexado por (rows, symbols).
pub trait ResultStore: Send + Sync {
    /// Recupera el reporte memorizado para la dimensión, si existe.
    ///
    /// # Errors:
    /// Propaga fallos del respaldo físico; la ausencia no es un fallo.
    fn lookup(&self, rows: u32, symbols: u32) -> Result<Option<CensusReport>, StoreFault>;

    /// Persiste (o reemplaza) el reporte sellado de la dimensión.
    ///
    /// # Errors:
    /// Propaga fallos del respaldo físico o del códec.
    fn store(&self, report: &CensusReport) -> Result<(), StoreFault>;
}
