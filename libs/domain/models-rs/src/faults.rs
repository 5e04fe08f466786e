// [libs/domain/models-rs/src/faults.rs]
/*!
 * =================================================================
 * APARATO: CENSUS FAULT TAXONOMY (V6.2 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DEL CENSO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. RECOVERY DISCIPLINE: 'CacheCorrupt' se resuelve internamente con
 *    reconstrucción Phoenix y jamás alcanza al llamador; el resto de la
 *    taxonomía se propaga con mensaje humano y etiqueta de clase.
 * 2. CANCELLATION PAYLOAD: La cancelación cooperativa transporta los
 *    conteos parciales crudos (sin factor de simetría) y el avance de
 *    unidades, marcados explícitamente como no combinables.
 * 3. EXIT-CODE SYNERGY: 'kind_label' alimenta el triaje de la CLI.
 * =================================================================
 */

use thiserror::Error;

/// Taxonomía de fallos del censo (contrato §L2).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CensusFault {
    /// Dimensiones fuera de contrato: r < 2, n < 2 o r > n.
    #[error("[L2_CENSUS_FAULT]: DIMENSION_CONTRACT_VIOLATION -> {0}")]
    InvalidInput(String),

    /// Artefacto de caché corrupto que no pudo reconstruirse.
    #[error("[L2_CENSUS_FAULT]: CACHE_STRATA_CORRUPTED -> {0}")]
    CacheCorrupt(String),

    /// Fallo de I/O del estrato de persistencia (directorio, permisos).
    #[error("[L2_CENSUS_FAULT]: CACHE_UPLINK_SEVERED -> {0}")]
    CacheIo(String),

    /// La dimensión excede el techo del formato binario o de u128.
    #[error("[L2_CENSUS_FAULT]: DIMENSION_CEILING_EXCEEDED -> requested {requested}, ceiling {ceiling}")]
    TooLarge {
        /// Dimensión solicitada.
        requested: u32,
        /// Techo operativo vigente.
        ceiling: u32,
    },

    /// Cancelación cooperativa: conteos parciales crudos, no combinables.
    #[error("[L2_CENSUS_FAULT]: COOPERATIVE_CANCELLATION -> {units_completed}/{units_total} units sealed")]
    Cancelled {
        /// Positivos acumulados antes de la señal (sin factor de simetría).
        partial_positive: u128,
        /// Negativos acumulados antes de la señal (sin factor de simetría).
        partial_negative: u128,
        /// Unidades de primera columna completadas.
        units_completed: u64,
        /// Unidades totales planificadas.
        units_total: u64,
    },

    /// Colapso de invariante interna (máscaras, fusión, simetría).
    #[error("[L2_CENSUS_FAULT]: INVARIANT_COLLAPSE -> {0}")]
    Internal(String),
}

impl CensusFault {
    /// Etiqueta estable de la clase de fallo (triaje de CLI y telemetría).
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self {
            CensusFault::InvalidInput(_) => "INVALID_INPUT",
            CensusFault::CacheCorrupt(_) => "CACHE_CORRUPT",
            CensusFault::CacheIo(_) => "CACHE_IO",
            CensusFault::TooLarge { .. } => "TOO_LARGE",
            CensusFault::Cancelled { .. } => "CANCELLED",
            CensusFault::Internal(_) => "INTERNAL",
        }
    }
}
