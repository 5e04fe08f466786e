// [libs/core/derangement-cache/src/lib.rs]
// Se autoriza 'unsafe' exclusivamente para el mapeo en memoria del
// artefacto sellado (memmap2); el resto del aparato es código seguro.
#![allow(unsafe_code)]

/*!
 * =================================================================
 * APARATO: DERANGEMENT CACHE MASTER HUB (V7.0 - SOVEREIGN SYNC)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: PERSISTENCIA BINARIA VERIFICADA DE DESARREGLOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STRATA REGISTRATION: Expone forja, formato, handle y registro bajo
 *    un preludio único para los estratos superiores.
 * 2. BIT-PERFECT CONTRACT: El censo es idéntico con o sin caché en RAM;
 *    el artefacto solo acelera, jamás altera resultados.
 * 3. PHOENIX DISCIPLINE: Corrupción detectada implica reconstrucción
 *    con advertencia; la exactitud nunca se degrada en silencio.
 * =================================================================
 */

/// Forja y cristalización atómica del artefacto binario.
pub mod builder;
/// Catálogo de fallos de persistencia del estrato L1.
pub mod errors;
/// Autoridad del layout binario LRCC versión 1.
pub mod format;
/// Handle inmutable con acceso O(1) a filas, signos y máscaras.
pub mod handle;
/// Tabla de handles activos y política load-or-build.
pub mod registry;

/// Preludio de persistencia para los estratos L2/L3.
pub mod prelude {
    pub use crate::builder::CacheForge;
    pub use crate::errors::CacheError;
    pub use crate::format::{
        cache_file_name, CacheFileHeader, CACHE_FORMAT_VERSION, CACHE_MAGIC,
        MAXIMUM_SUPPORTED_DIMENSION, MINIMUM_SUPPORTED_DIMENSION,
    };
    pub use crate::handle::{
        CompatiblePrefixIter, DerangementCacheHandle, MaskBitCursor,
        MEMORY_MAP_DIMENSION_THRESHOLD,
    };
    pub use crate::registry::{CacheAuditReport, CacheRegistry};
}
