// [libs/core/derangement-cache/src/registry.rs]
/*!
 * =================================================================
 * APARATO: ACTIVE CACHE REGISTRY (V6.3 - PHOENIX POLICY)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: TABLA DE HANDLES ACTIVOS Y POLÍTICA LOAD-OR-BUILD
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. EXPLICIT OWNERSHIP: El registro es una instancia inyectada por el
 *    despachador, jamás un singleton de inicialización implícita.
 * 2. PHOENIX POLICY: Un artefacto corrupto (magia, CRC, dimensiones) se
 *    reconstruye con advertencia; un fallo de I/O se propaga intacto.
 * 3. SINGLE RESIDENCY: Múltiples workers del mismo censo comparten un
 *    único handle inmutable vía Arc; la tabla se protege con RwLock.
 * =================================================================
 */

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::builder::CacheForge;
use crate::errors::CacheError;
use crate::format::cache_file_name;
use crate::handle::DerangementCacheHandle;

/// Auditoría de un artefacto en disco (consumida por la CLI).
#[derive(Debug, Clone)]
pub struct CacheAuditReport {
    /// Dimensión auditada.
    pub dimension: u32,
    /// Desarreglos declarados por la cabecera.
    pub derangement_count: u32,
    /// Tamaño del artefacto en bytes.
    pub file_size_bytes: u64,
    /// Veredicto integral: cabecera, tabla subfactorial y CRC32.
    pub integrity_verdict: bool,
    /// Detalle técnico del fallo, si lo hubo.
    pub fault_detail: Option<String>,
}

/// Tabla de cachés activos por dimensión, con política load-or-build.
pub struct CacheRegistry {
    cache_directory: PathBuf,
    active_handles: RwLock<HashMap<u32, Arc<DerangementCacheHandle>>>,
}

impl CacheRegistry {
    /// Construye el registro sobre un directorio de caché inyectado.
    #[must_use]
    pub fn new(cache_directory: impl Into<PathBuf>) -> Self {
        Self {
            cache_directory: cache_directory.into(),
            active_handles: RwLock::new(HashMap::new()),
        }
    }

    /// Directorio físico gobernado por este registro.
    #[must_use]
    pub fn cache_directory(&self) -> &PathBuf {
        &self.cache_directory
    }

    /**
     * Adquiere el handle inmutable para `dimension`, materializándolo si
     * es necesario (load-or-build).
     *
     * # Errors:
     * - `Io` si el directorio no puede reclamarse o leerse.
     * - `TooLarge` / `DimensionFloor` fuera del estrato operativo.
     *
     * # Logic:
     * 1. Retorno O(1) si el handle ya reside en la tabla activa.
     * 2. Carga validada desde disco; un veredicto `Corrupt` dispara la
     *    Política Phoenix: reconstrucción con advertencia.
     * 3. Artefacto ausente: forja directa.
     */
    pub fn acquire(&self, dimension: u32) -> Result<Arc<DerangementCacheHandle>, CacheError> {
        if let Some(handle) = self
            .active_handles
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&dimension)
        {
            return Ok(Arc::clone(handle));
        }

        let artifact_path = self.cache_directory.join(cache_file_name(dimension));
        let loaded = if artifact_path.exists() {
            match DerangementCacheHandle::load_from_path(&artifact_path, dimension) {
                Ok(handle) => handle,
                Err(CacheError::Corrupt(detail)) => {
                    warn!(
                        "🔥 [CACHE_REGISTRY]: Corrupt artifact n={dimension} ({detail}). Phoenix rebuild engaged."
                    );
                    let rebuilt_path = CacheForge::crystallize(dimension, &self.cache_directory)?;
                    DerangementCacheHandle::load_from_path(&rebuilt_path, dimension)?
                }
                Err(other_fault) => return Err(other_fault),
            }
        } else {
            info!("📂 [CACHE_REGISTRY]: Artifact n={dimension} absent. Forging.");
            let forged_path = CacheForge::crystallize(dimension, &self.cache_directory)?;
            DerangementCacheHandle::load_from_path(&forged_path, dimension)?
        };

        let shared = Arc::new(loaded);
        self.active_handles
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(dimension, Arc::clone(&shared));
        Ok(shared)
    }

    /**
     * Audita el artefacto en disco sin tocar la tabla activa.
     *
     * # Errors:
     * `Io` si el artefacto no existe o no puede leerse.
     */
    pub fn audit_artifact(&self, dimension: u32) -> Result<CacheAuditReport, CacheError> {
        let artifact_path = self.cache_directory.join(cache_file_name(dimension));
        let file_size_bytes = std::fs::metadata(&artifact_path)?.len();
        match DerangementCacheHandle::load_from_path(&artifact_path, dimension) {
            Ok(handle) => Ok(CacheAuditReport {
                dimension,
                derangement_count: handle.derangement_count(),
                file_size_bytes,
                integrity_verdict: true,
                fault_detail: None,
            }),
            Err(CacheError::Corrupt(detail)) => Ok(CacheAuditReport {
                dimension,
                derangement_count: 0,
                file_size_bytes,
                integrity_verdict: false,
                fault_detail: Some(detail),
            }),
            Err(other_fault) => Err(other_fault),
        }
    }
}
