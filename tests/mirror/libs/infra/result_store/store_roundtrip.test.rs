// [tests/mirror/libs/infra/result_store/store_roundtrip.test.rs]
/*!
 * =================================================================
 * APARATO: RESULT STORE CERTIFIER (V5.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-INFRA
 * RESPONSABILIDAD: CERTIFICACIÓN DE RESPALDOS DE LA INTERFAZ OPACA
 * =================================================================
 */

use signum_domain_models::{CensusReport, ResultStore};
use signum_infra_store::{InMemoryResultStore, JsonJournalStore};

fn sealed_sample(rows: u32, symbols: u32) -> CensusReport {
    CensusReport::seal(rows, symbols, 35_133_504, 35_165_760, 730, "REDUCED_PARALLEL")
}

#[cfg(test)]
mod tests {
    use super::*;

    /**
     * Ambos respaldos honran el mismo contrato opaco: ausencia limpia,
     * ida y vuelta exacta y reemplazo por clave lógica.
     */
    #[test]
    fn certify_opaque_contract_across_backends() {
        let scratch = tempfile::tempdir().unwrap();
        let journal = JsonJournalStore::open(scratch.path().join("journal.json")).unwrap();
        let vault = InMemoryResultStore::new();
        let backends: [&dyn ResultStore; 2] = [&journal, &vault];

        for backend in backends {
            assert!(backend.lookup(3, 8).unwrap().is_none());
            let report = sealed_sample(3, 8);
            backend.store(&report).unwrap();
            assert_eq!(backend.lookup(3, 8).unwrap().unwrap(), report);
            assert!(backend.lookup(8, 3).unwrap().is_none());
        }
    }

    /**
     * La bitácora JSON sobrevive al reinicio del proceso: lo persistido
     * se rehidrata bit-exacto desde disco.
     */
    #[test]
    fn certify_journal_survives_process_restart() {
        let scratch = tempfile::tempdir().unwrap();
        let journal_path = scratch.path().join("census_journal.json");

        let first_generation = sealed_sample(4, 7);
        let second_generation = sealed_sample(5, 7);
        {
            let journal = JsonJournalStore::open(&journal_path).unwrap();
            journal.store(&first_generation).unwrap();
            journal.store(&second_generation).unwrap();
        }

        let rehydrated = JsonJournalStore::open(&journal_path).unwrap();
        assert_eq!(rehydrated.lookup(4, 7).unwrap().unwrap(), first_generation);
        assert_eq!(rehydrated.lookup(5, 7).unwrap().unwrap(), second_generation);

        // El artefacto es JSON auditable por el operador.
        let raw = std::fs::read_to_string(&journal_path).unwrap();
        assert!(raw.contains("\"4x7\""));
        assert!(raw.contains("REDUCED_PARALLEL"));
    }

    /**
     * El reemplazo de un reporte preserva una única entrada por clave y
     * no deja archivos de staging residuales.
     */
    #[test]
    fn certify_atomic_replacement_discipline() {
        let scratch = tempfile::tempdir().unwrap();
        let journal_path = scratch.path().join("census_journal.json");
        let journal = JsonJournalStore::open(&journal_path).unwrap();

        journal.store(&sealed_sample(3, 8)).unwrap();
        journal.store(&sealed_sample(3, 8)).unwrap();

        let raw = std::fs::read_to_string(&journal_path).unwrap();
        assert_eq!(raw.matches("\"3x8\"").count(), 1);
        assert!(!scratch.path().join("census_journal.staging").exists());
    }
}
