// [libs/domain/models-rs/src/work.rs]
/*!
 * =================================================================
 * APARATO: CENSUS WORK CONTRACTS (V8.0 - PRODUCTION MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: PETICIONES DE CENSO Y UNIDADES DE TRABAJO SOBERANAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DIMENSION CONTRACT: Una petición porta (rows, symbols) con la
 *    invariante 2 ≤ rows ≤ symbols, validada en la frontera del
 *    despachador antes de tocar cualquier motor.
 * 2. NOMINAL PRECISION: Nomenclatura nominal absoluta en todos los
 *    campos; cero abreviaciones.
 * 3. WORK UNIT IDENTITY: La unidad de trabajo canónica es una elección
 *    de primera columna [1, a_1 < … < a_{r−1}]; su identidad ordinal
 *    gobierna el reparto round-robin determinista.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Modo de ejecución solicitado para una petición de censo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExecutionMode {
    /// El despachador elige entre secuencial y paralelo por heurística.
    #[default]
    Auto,
    /// Fuerza la enumeración secuencial de un solo hilo.
    Single,
    /// Fuerza el reparto paralelo de unidades de primera columna.
    Parallel,
}

/// Asignación de workers para el backend paralelo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WorkerAllocation {
    /// min(paralelismo de hardware, unidades, techo configurado).
    #[default]
    Auto,
    /// Cantidad fija impuesta por el operador.
    Fixed(usize),
}

/// Petición soberana de censo para la dimensión (rows × symbols).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusRequest {
    /// Cantidad de filas r del rectángulo normalizado.
    pub rows: u32,
    /// Cantidad de símbolos n (y de columnas).
    pub symbols: u32,
    /// Modo de ejecución solicitado.
    pub execution_mode: ExecutionMode,
    /// Asignación de workers para el backend paralelo.
    pub worker_allocation: WorkerAllocation,
}

impl CensusRequest {
    /// Construye una petición con modo y workers automáticos.
    #[must_use]
    pub fn new(rows: u32, symbols: u32) -> Self {
        Self {
            rows,
            symbols,
            execution_mode: ExecutionMode::Auto,
            worker_allocation: WorkerAllocation::Auto,
        }
    }

    /// Variante con modo de ejecución explícito.
    #[must_use]
    pub fn with_execution_mode(mut self, execution_mode: ExecutionMode) -> Self {
        self.execution_mode = execution_mode;
        self
    }

    /// Variante con asignación de workers explícita.
    #[must_use]
    pub fn with_worker_allocation(mut self, worker_allocation: WorkerAllocation) -> Self {
        self.worker_allocation = worker_allocation;
        self
    }
}

/// Unidad de trabajo canónica: una elección de primera columna.
///
/// `column_values` es la columna completa `[1, a_1, …, a_{r−1}]` con
/// `2 ≤ a_1 < … < a_{r−1} ≤ n`; representa una clase de (r−1)! rectángulos
/// permutados por filas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstColumnChoice {
    /// Identidad ordinal de la unidad dentro del censo (orden lex).
    pub ordinal: u64,
    /// Valores de la primera columna, fila 0 incluida.
    pub column_values: Vec<u8>,
}

impl FirstColumnChoice {
    /// Valores fijados para las filas 1..r−1 (omite la fila identidad).
    #[must_use]
    pub fn constrained_rows(&self) -> &[u8] {
        &self.column_values[1..]
    }
}
