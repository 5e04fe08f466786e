// [libs/core/derangement-cache/src/errors.rs]
/*!
 * =================================================================
 * APARATO: CACHE ERROR CATALOG (V5.0 - SOBERANO)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DE PERSISTENCIA
 * =================================================================
 */

use signum_core_perm::prelude::PermutationError;
use thiserror::Error;

/// Catálogo de fallos del caché binario de desarreglos.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cabecera o carga útil corrupta: magia, versión, dimensiones o CRC32.
    ///
    /// Este fallo es recuperable: la política soberana es reconstruir el
    /// artefacto con advertencia, nunca degradar la exactitud del censo.
    #[error("[L1_CACHE_FAULT]: BINARY_STRATA_CORRUPTED -> {0}")]
    Corrupt(String),

    /// Fallo de Entrada/Salida del sistema operativo (directorio ausente,
    /// permisos, disco lleno). No recuperable dentro del estrato L1.
    #[error("[L1_CACHE_FAULT]: PERSISTENCE_UPLINK_SEVERED -> {0}")]
    Io(#[from] std::io::Error),

    /// La dimensión excede el techo del formato (count es u32 en disco).
    #[error("[L1_CACHE_FAULT]: DIMENSION_CEILING_EXCEEDED -> requested {requested}, ceiling {ceiling}")]
    TooLarge {
        /// Dimensión solicitada por el llamador.
        requested: u32,
        /// Techo operativo del formato binario versión 1.
        ceiling: u32,
    },

    /// La dimensión está por debajo del piso operativo (n ≥ 2).
    #[error("[L1_CACHE_FAULT]: DIMENSION_FLOOR_VIOLATION -> {0}")]
    DimensionFloor(u32),

    /// Fallo propagado del motor combinatorio L1 durante la forja.
    #[error("[L1_CACHE_FAULT]: COMBINATORIAL_FORGE_FAULT -> {0}")]
    Combinatorial(#[from] PermutationError),
}
