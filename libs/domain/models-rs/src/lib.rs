// [libs/domain/models-rs/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CENSUS DOMAIN MODELS HUB (V5.0 - PRODUCTION MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN DE CONTRATOS SOBERANOS DEL CENSO
 * =================================================================
 */

pub mod faults;
pub mod result;
pub mod store;
pub mod telemetry;
pub mod work;

pub use faults::CensusFault;
pub use result::CensusReport;
pub use store::{ResultStore, StoreFault};
pub use telemetry::{CensusIgnition, WorkUnitSeal};
pub use work::{CensusRequest, ExecutionMode, FirstColumnChoice, WorkerAllocation};

#[cfg(test)]
mod tests_serialization;
