// [libs/infra/result-store/src/memory.rs]
/*!
 * =================================================================
 * APARATO: IN-MEMORY RESULT VAULT (V4.1 - SOBERANO)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: BÓVEDA VOLÁTIL DE REPORTES PARA COMPOSICIÓN Y TESTS
 * =================================================================
 */

use std::collections::HashMap;
use std::sync::RwLock;

use signum_domain_models::{CensusReport, ResultStore, StoreFault};

/// Bóveda volátil de reportes, indexada por (rows, symbols).
#[derive(Default)]
pub struct InMemoryResultStore {
    vault: RwLock<HashMap<(u32, u32), CensusReport>>,
}

impl InMemoryResultStore {
    /// Construye una bóveda vacía.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cantidad de reportes residentes.
    #[must_use]
    pub fn resident_count(&self) -> usize {
        self.vault
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

impl ResultStore for InMemoryResultStore {
    fn lookup(&self, rows: u32, symbols: u32) -> Result<Option<CensusReport>, StoreFault> {
        Ok(self
            .vault
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&(rows, symbols))
            .cloned())
    }

    fn store(&self, report: &CensusReport) -> Result<(), StoreFault> {
        self.vault
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert((report.rows, report.symbols), report.clone());
        Ok(())
    }
}
