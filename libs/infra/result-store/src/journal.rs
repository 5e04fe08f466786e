// [libs/infra/result-store/src/journal.rs]
/*!
 * =================================================================
 * APARATO: JSON JOURNAL STORE (V6.0 - ATOMIC SEAL)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: BITÁCORA PERSISTENTE DE REPORTES DEL CENSO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC REWRITE: Cada persistencia reescribe la bitácora completa en
 *    un archivo de staging y la sella con rename atómico; jamás existe
 *    una bitácora parcial visible.
 * 2. HYDRATION ON OPEN: La bitácora se hidrata una vez al abrir; las
 *    consultas posteriores son O(1) sobre la réplica en RAM.
 * 3. HUMAN AUDIT: JSON con sangría para inspección directa del operador.
 * =================================================================
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, info};

use signum_domain_models::{CensusReport, ResultStore, StoreFault};

/// Bitácora JSON de reportes sellados, clave lógica "r x n".
pub struct JsonJournalStore {
    journal_path: PathBuf,
    replica: RwLock<BTreeMap<String, CensusReport>>,
}

impl JsonJournalStore {
    /**
     * Abre (o inicializa) la bitácora en la ruta dada.
     *
     * # Errors:
     * - `Io` si la bitácora existe pero no puede leerse.
     * - `Serialization` si el contenido no decodifica como bitácora.
     */
    pub fn open(journal_path: impl Into<PathBuf>) -> Result<Self, StoreFault> {
        let journal_path = journal_path.into();
        let replica = if journal_path.exists() {
            let raw = fs::read_to_string(&journal_path)
                .map_err(|io_fault| StoreFault::Io(io_fault.to_string()))?;
            serde_json::from_str(&raw)
                .map_err(|codec_fault| StoreFault::Serialization(codec_fault.to_string()))?
        } else {
            BTreeMap::new()
        };
        debug!(
            "📒 [JOURNAL]: Hydrated {} sealed reports from {}.",
            replica.len(),
            journal_path.display()
        );
        Ok(Self {
            journal_path,
            replica: RwLock::new(replica),
        })
    }

    fn logical_key(rows: u32, symbols: u32) -> String {
        format!("{rows}x{symbols}")
    }

    fn persist_replica(&self, replica: &BTreeMap<String, CensusReport>) -> Result<(), StoreFault> {
        if let Some(parent) = self.journal_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|io_fault| StoreFault::Io(io_fault.to_string()))?;
            }
        }
        let encoded = serde_json::to_string_pretty(replica)
            .map_err(|codec_fault| StoreFault::Serialization(codec_fault.to_string()))?;
        let staging_path = self.journal_path.with_extension("staging");
        fs::write(&staging_path, encoded)
            .map_err(|io_fault| StoreFault::Io(io_fault.to_string()))?;
        fs::rename(&staging_path, &self.journal_path)
            .map_err(|io_fault| StoreFault::Io(io_fault.to_string()))?;
        Ok(())
    }
}

impl ResultStore for JsonJournalStore {
    fn lookup(&self, rows: u32, symbols: u32) -> Result<Option<CensusReport>, StoreFault> {
        Ok(self
            .replica
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&Self::logical_key(rows, symbols))
            .cloned())
    }

    fn store(&self, report: &CensusReport) -> Result<(), StoreFault> {
        let mut replica = self
            .replica
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        replica.insert(
            Self::logical_key(report.rows, report.symbols),
            report.clone(),
        );
        self.persist_replica(&replica)?;
        info!(
            "📒 [JOURNAL]: Census ({}, {}) sealed into {}.",
            report.rows,
            report.symbols,
            self.journal_path.display()
        );
        Ok(())
    }
}
