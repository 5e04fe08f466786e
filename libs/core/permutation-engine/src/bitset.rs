// [libs/core/permutation-engine/src/bitset.rs]
/*!
 * =================================================================
 * APARATO: COLUMN CONSTRAINT MATRIX (V11.3 - SILICON ALIGNED)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: MÁSCARAS DE VALORES PROHIBIDOS Y ENUMERACIÓN LEX
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BITMASK SOVEREIGNTY: Una máscara u32 por columna; el bit (v−1)
 *    marca el valor v como ocupado por una fila anterior.
 * 2. RESTARTABLE STREAMS: El flujo de permutaciones restringidas es un
 *    iterador con estado explícito, reanudable entre llamadas, que emite
 *    en orden lexicográfico estricto (contrato de reproducibilidad).
 * 3. ZERO HOT-PATH ALLOCATION: El flujo reserva sus buffers una sola vez
 *    en la construcción; 'advance' no asigna memoria.
 *
 * # Mathematical Proof (Lexicographic Completeness):
 * El backtracking prueba valores ascendentes por posición, saltando los
 * prohibidos u ocupados. Todo prefijo viable se extiende antes de probar
 * el siguiente valor en la posición previa, de modo que la secuencia
 * emitida es exactamente el conjunto restringido en orden lex.
 * =================================================================
 */

use crate::errors::PermutationError;

/// Ancho máximo de la máscara de valores por columna.
const VALUE_MASK_CEILING: usize = 31;

/// Matriz de restricciones por columna para un rectángulo en construcción.
///
/// `forbidden_value_masks[c]` tiene el bit (v−1) encendido si el valor v ya
/// fue consumido en la columna c por una fila anterior.
#[derive(Debug, Clone)]
pub struct ColumnConstraintMatrix {
    /// Dimensión n del rectángulo (columnas y símbolos).
    dimension: usize,
    /// Una máscara de valores prohibidos por columna.
    forbidden_value_masks: Vec<u32>,
}

impl ColumnConstraintMatrix {
    /// Construye una matriz vacía para dimensión `dimension`.
    ///
    /// # Errors:
    /// `DimensionOutOfRange` si la dimensión excede el ancho de máscara.
    pub fn new(dimension: usize) -> Result<Self, PermutationError> {
        if dimension == 0 || dimension > VALUE_MASK_CEILING {
            return Err(PermutationError::DimensionOutOfRange {
                requested: dimension,
                ceiling: VALUE_MASK_CEILING,
            });
        }
        Ok(Self {
            dimension,
            forbidden_value_masks: vec![0u32; dimension],
        })
    }

    /// Dimensión n gobernada por esta matriz.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Registra una fila completa: enciende el bit de cada valor en su columna.
    ///
    /// Contrato del llamador: `row` es una permutación de {1,…,n} compatible
    /// con las restricciones vigentes. O(n).
    pub fn add_row(&mut self, row: &[u8]) {
        debug_assert_eq!(row.len(), self.dimension);
        for (column, &value) in row.iter().enumerate() {
            debug_assert_eq!(self.forbidden_value_masks[column] & (1u32 << (value - 1)), 0);
            self.forbidden_value_masks[column] |= 1u32 << (value - 1);
        }
    }

    /// Revierte [`Self::add_row`]: apaga el bit de cada valor en su columna. O(n).
    pub fn remove_row(&mut self, row: &[u8]) {
        debug_assert_eq!(row.len(), self.dimension);
        for (column, &value) in row.iter().enumerate() {
            self.forbidden_value_masks[column] &= !(1u32 << (value - 1));
        }
    }

    /// Prohíbe un valor puntual en una columna (sin fila asociada).
    pub fn forbid_value(&mut self, column: usize, value: u8) {
        debug_assert!(column < self.dimension);
        self.forbidden_value_masks[column] |= 1u32 << (value - 1);
    }

    /// Test O(1): ¿está el valor `value` prohibido en la columna `column`?
    #[must_use]
    pub fn is_forbidden(&self, column: usize, value: u8) -> bool {
        self.forbidden_value_masks[column] & (1u32 << (value - 1)) != 0
    }

    /// Cantidad de valores aún disponibles en la columna (popcount del complemento).
    #[must_use]
    pub fn available_value_count(&self, column: usize) -> u32 {
        let live_bits = (1u32 << self.dimension) - 1;
        (!self.forbidden_value_masks[column] & live_bits).count_ones()
    }

    /// Crea un flujo lexicográfico de permutaciones compatibles con el
    /// estado actual de la matriz. El flujo captura una copia de las
    /// máscaras: mutaciones posteriores de la matriz no lo afectan.
    #[must_use]
    pub fn stream(&self) -> ConstrainedPermutationStream {
        ConstrainedPermutationStream::new(self.dimension, self.forbidden_value_masks.clone())
    }
}

/// Flujo reanudable de permutaciones restringidas en orden lexicográfico.
///
/// El estado interno es explícito: profundidad de backtracking, valores
/// elegidos, máscara de valores usados y el próximo candidato por posición.
#[derive(Debug, Clone)]
pub struct ConstrainedPermutationStream {
    dimension: usize,
    forbidden_value_masks: Vec<u32>,
    chosen_values: Vec<u8>,
    resume_candidates: Vec<u8>,
    used_value_mask: u32,
    depth: usize,
    holding_emission: bool,
    exhausted: bool,
}

impl ConstrainedPermutationStream {
    fn new(dimension: usize, forbidden_value_masks: Vec<u32>) -> Self {
        Self {
            dimension,
            forbidden_value_masks,
            chosen_values: vec![0u8; dimension],
            resume_candidates: vec![1u8; dimension],
            used_value_mask: 0,
            depth: 0,
            holding_emission: false,
            exhausted: false,
        }
    }

    /// Avanza el flujo y retorna la siguiente permutación, o `None` al agotarse.
    ///
    /// # Performance:
    /// Sin asignaciones; el slice retornado referencia el buffer interno y
    /// es válido hasta la próxima llamada.
    pub fn advance(&mut self) -> Option<&[u8]> {
        if self.exhausted {
            return None;
        }
        if self.holding_emission {
            self.holding_emission = false;
            self.retreat_one_level();
        }
        loop {
            let column = self.depth;
            let mut candidate = self.resume_candidates[column];
            let mut extended = false;
            while (candidate as usize) <= self.dimension {
                let candidate_bit = 1u32 << (candidate - 1);
                let is_blocked = self.used_value_mask & candidate_bit != 0
                    || self.forbidden_value_masks[column] & candidate_bit != 0;
                if !is_blocked {
                    self.chosen_values[column] = candidate;
                    self.used_value_mask |= candidate_bit;
                    self.resume_candidates[column] = candidate + 1;
                    self.depth += 1;
                    if self.depth < self.dimension {
                        self.resume_candidates[self.depth] = 1;
                    }
                    extended = true;
                    break;
                }
                candidate += 1;
            }

            if extended {
                if self.depth == self.dimension {
                    self.holding_emission = true;
                    return Some(&self.chosen_values);
                }
                continue;
            }

            // Callejón sin salida: retroceder un nivel o declarar agotamiento.
            if self.depth == 0 {
                self.exhausted = true;
                return None;
            }
            self.retreat_one_level();
        }
    }

    fn retreat_one_level(&mut self) {
        self.depth -= 1;
        let released_value = self.chosen_values[self.depth];
        self.used_value_mask &= !(1u32 << (released_value - 1));
    }
}
