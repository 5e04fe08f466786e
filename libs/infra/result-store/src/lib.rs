// [libs/infra/result-store/src/lib.rs]
/*!
 * =================================================================
 * APARATO: RESULT STORE INFRASTRUCTURE HUB (V4.0 - SOBERANO)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: RESPALDOS CONCRETOS DE LA INTERFAZ ResultStore
 *
 * # Logic:
 * El dominio L2 consume exclusivamente la interfaz opaca ResultStore;
 * este estrato aporta los respaldos concretos: bóveda volátil en RAM
 * para composición y tests, y bitácora JSON con escritura atómica para
 * la persistencia del operador. Ningún esquema SQL forma parte del
 * contrato del núcleo.
 * =================================================================
 */

/// Bitácora JSON con escritura atómica (temp + rename).
pub mod journal;
/// Bóveda volátil en RAM protegida por cerrojo de lectura/escritura.
pub mod memory;

pub use journal::JsonJournalStore;
pub use memory::InMemoryResultStore;
