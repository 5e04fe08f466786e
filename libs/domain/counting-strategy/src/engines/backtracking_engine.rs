// [libs/domain/counting-strategy/src/engines/backtracking_engine.rs]
/*!
 * =================================================================
 * APARATO: MASK CASCADE BACKTRACKING ENGINE (V21.4 - SILICON ALIGNED)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: ENUMERACIÓN DE RECTÁNGULOS POR CASCADA DE MÁSCARAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. MASK CASCADE: Cada nivel de fila porta una máscara de D(n) bits con
 *    los índices de desarreglo aún compatibles; descender es un AND-NOT
 *    contra las máscaras de conflicto (columna, valor) de la fila elegida.
 * 2. LEAF POPCOUNT SEAL: El último nivel se sella por popcount contra la
 *    partición de signos del caché; el resultado es bit-idéntico a la
 *    visita hoja por hoja y domina el Hot-Loop.
 * 3. COMPLETION FUSION: Para r = n − 1, cada rectángulo sellado computa
 *    además su única fila de completación (un solo bit vivo en la máscara
 *    descendiente) y acumula el censo (n, n) en el mismo barrido.
 * 4. ZERO HOT-PATH ALLOCATION: Las máscaras por nivel y el scratch de
 *    completación se reservan en la construcción del motor.
 *
 * # Mathematical Proof (Cascade Soundness):
 * La máscara del nivel k contiene exactamente los desarreglos sin colisión
 * de columna con las filas 0..k−1: la fila 0 (identidad) está excluida por
 * construcción del caché (desarreglos puros) y cada fila posterior elimina
 * sus conflictos por AND-NOT. La iteración de bits ascendente preserva el
 * orden lexicográfico de índices exigido por el contrato de determinismo.
 * =================================================================
 */

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use signum_core_cache::prelude::DerangementCacheHandle;
use signum_domain_models::CensusFault;

/// Resultado crudo de una pasada de enumeración (sin factor de simetría).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BacktrackingOutcome {
    /// Rectángulos de signo +1 visitados.
    pub positive: u128,
    /// Rectángulos de signo −1 visitados.
    pub negative: u128,
    /// Censo fusionado (r+1, n): positivos.
    pub completion_positive: u128,
    /// Censo fusionado (r+1, n): negativos.
    pub completion_negative: u128,
    /// Rectángulos sellados en esta pasada.
    pub rectangles_scanned: u64,
    /// La pasada fue interrumpida por la señal cooperativa.
    pub interrupted: bool,
    /// Colapso de la invariante de completación (bit único esperado).
    pub fusion_invariant_collapse: bool,
}

impl BacktrackingOutcome {
    /// Acumula otra pasada dentro de este resultado.
    pub fn absorb(&mut self, other: &BacktrackingOutcome) {
        self.positive += other.positive;
        self.negative += other.negative;
        self.completion_positive += other.completion_positive;
        self.completion_negative += other.completion_negative;
        self.rectangles_scanned += other.rectangles_scanned;
        self.interrupted |= other.interrupted;
        self.fusion_invariant_collapse |= other.fusion_invariant_collapse;
    }
}

/// Motor de enumeración por cascada de máscaras sobre índices del caché.
pub struct BacktrackingRectangleEngine<'cache> {
    cache: &'cache DerangementCacheHandle,
    rows: usize,
    words_per_mask: usize,
    /// Máscara de compatibilidad por nivel de fila (índices 1..rows−1).
    level_masks: Vec<Vec<u64>>,
    /// Máscara plena precomputada (D(n) bits, cola en cero).
    full_mask: Vec<u64>,
    /// Scratch de completación para la fusión (un solo bit vivo esperado).
    completion_scratch: Vec<u64>,
    fused_completion: bool,
}

impl<'cache> BacktrackingRectangleEngine<'cache> {
    /// Construye un motor con buffers frescos para (rows × n).
    ///
    /// # Errors:
    /// - `InvalidInput` si rows ∉ [2, n].
    /// - `InvalidInput` si se pide fusión con rows ≠ n − 1.
    pub fn new(
        cache: &'cache DerangementCacheHandle,
        rows: usize,
        fused_completion: bool,
    ) -> Result<Self, CensusFault> {
        let dimension = cache.dimension();
        if rows < 2 || rows > dimension {
            return Err(CensusFault::InvalidInput(format!(
                "row count {rows} outside [2, {dimension}]"
            )));
        }
        if fused_completion && rows != dimension - 1 {
            return Err(CensusFault::InvalidInput(format!(
                "completion fusion requires r = n − 1, received r = {rows}, n = {dimension}"
            )));
        }
        let words_per_mask = cache.words_per_mask();
        Ok(Self {
            cache,
            rows,
            words_per_mask,
            level_masks: vec![vec![0u64; words_per_mask]; rows],
            full_mask: cache.full_mask_words(),
            completion_scratch: vec![0u64; words_per_mask],
            fused_completion,
        })
    }

    /**
     * Enumera todos los rectángulos normalizados compatibles.
     *
     * `first_column`: valores fijados en la columna 0 para las filas
     * 1..rows−1 (la clase de simetría), o `None` para el barrido directo
     * sin reducción. La señal de cancelación se consulta entre elecciones
     * de fila 1 (frontera de fila, granularidad del contrato cooperativo).
     *
     * # Performance:
     * Sin asignaciones: los buffers de nivel se reutilizan entre llamadas;
     * el mismo motor puede barrer múltiples unidades de primera columna.
     */
    pub fn enumerate(
        &mut self,
        first_column: Option<&[u8]>,
        cancellation: &AtomicBool,
    ) -> BacktrackingOutcome {
        debug_assert!(first_column.map_or(true, |fixed| fixed.len() == self.rows - 1));
        let mut outcome = BacktrackingOutcome::default();
        self.level_masks[1].copy_from_slice(&self.full_mask);
        self.descend(1, 1, first_column, cancellation, &mut outcome);
        outcome
    }

    /// Rango lex de candidatos admisibles en el nivel dado.
    fn level_span(&self, level: usize, first_column: Option<&[u8]>) -> Range<u32> {
        match first_column {
            Some(fixed) => self.cache.single_prefix_range(fixed[level - 1]),
            None => 0..self.cache.derangement_count(),
        }
    }

    /// Máscara de borde del span para una palabra concreta.
    fn span_edge_mask(span: &Range<u32>, word_index: usize) -> u64 {
        let word_base = (word_index as u32) * 64;
        let mut edge = u64::MAX;
        if span.start > word_base {
            edge &= u64::MAX << (span.start - word_base);
        }
        if span.end < word_base + 64 {
            edge &= (1u64 << (span.end - word_base)) - 1;
        }
        edge
    }

    fn descend(
        &mut self,
        level: usize,
        running_sign: i8,
        first_column: Option<&[u8]>,
        cancellation: &AtomicBool,
        outcome: &mut BacktrackingOutcome,
    ) {
        if level == self.rows - 1 {
            self.seal_final_level(level, running_sign, first_column, outcome);
            return;
        }

        let span = self.level_span(level, first_column);
        if span.is_empty() {
            return;
        }
        let word_begin = (span.start / 64) as usize;
        let word_end = span.end.div_ceil(64) as usize;

        for word_index in word_begin..word_end {
            let mut live = self.level_masks[level][word_index] & Self::span_edge_mask(&span, word_index);
            while live != 0 {
                let bit_offset = live.trailing_zeros();
                live &= live - 1;
                let candidate = (word_index as u32) * 64 + bit_offset;

                // Frontera de fila 1: única ventana de cancelación cooperativa.
                if level == 1 && cancellation.load(Ordering::Relaxed) {
                    outcome.interrupted = true;
                    return;
                }

                self.compose_descendant_mask(level, candidate);
                let descendant_sign = running_sign * self.cache.sign(candidate);
                self.descend(level + 1, descendant_sign, first_column, cancellation, outcome);
            }
        }
    }

    /// level_masks[level+1] = level_masks[level] AND-NOT conflictos(fila elegida).
    fn compose_descendant_mask(&mut self, level: usize, chosen_index: u32) {
        let cache = self.cache;
        let chosen_row = cache.derangement_row(chosen_index);
        let (head, tail) = self.level_masks.split_at_mut(level + 1);
        let current = &head[level];
        let next = &mut tail[0];
        next.copy_from_slice(current);
        for (column, &value) in chosen_row.iter().enumerate() {
            let conflict = cache.conflict_mask(column, value);
            for (slot, &conflict_word) in next.iter_mut().zip(conflict) {
                *slot &= !conflict_word;
            }
        }
    }

    /// Sella el último nivel: popcount particionado por signo, o visita
    /// individual con completación forzada en modo fusión.
    fn seal_final_level(
        &mut self,
        level: usize,
        running_sign: i8,
        first_column: Option<&[u8]>,
        outcome: &mut BacktrackingOutcome,
    ) {
        let span = self.level_span(level, first_column);
        if span.is_empty() {
            return;
        }
        let word_begin = (span.start / 64) as usize;
        let word_end = span.end.div_ceil(64) as usize;

        if !self.fused_completion {
            let positive_partition = self.cache.positive_sign_words();
            let mut positive_leaves: u64 = 0;
            let mut total_leaves: u64 = 0;
            for word_index in word_begin..word_end {
                let live =
                    self.level_masks[level][word_index] & Self::span_edge_mask(&span, word_index);
                total_leaves += u64::from(live.count_ones());
                positive_leaves += u64::from((live & positive_partition[word_index]).count_ones());
            }
            let negative_leaves = total_leaves - positive_leaves;
            outcome.rectangles_scanned += total_leaves;
            if running_sign == 1 {
                outcome.positive += u128::from(positive_leaves);
                outcome.negative += u128::from(negative_leaves);
            } else {
                outcome.positive += u128::from(negative_leaves);
                outcome.negative += u128::from(positive_leaves);
            }
            return;
        }

        for word_index in word_begin..word_end {
            let mut live =
                self.level_masks[level][word_index] & Self::span_edge_mask(&span, word_index);
            while live != 0 {
                let bit_offset = live.trailing_zeros();
                live &= live - 1;
                let candidate = (word_index as u32) * 64 + bit_offset;

                let rectangle_sign = running_sign * self.cache.sign(candidate);
                if rectangle_sign == 1 {
                    outcome.positive += 1;
                } else {
                    outcome.negative += 1;
                }
                outcome.rectangles_scanned += 1;

                if !self.seal_forced_completion(level, candidate, rectangle_sign, outcome) {
                    return;
                }
            }
        }
    }

    /// Computa la fila de completación forzada del rectángulo (n−1, n)
    /// recién sellado y acumula su signo en el censo (n, n).
    fn seal_forced_completion(
        &mut self,
        level: usize,
        chosen_index: u32,
        rectangle_sign: i8,
        outcome: &mut BacktrackingOutcome,
    ) -> bool {
        let cache = self.cache;
        self.completion_scratch.copy_from_slice(&self.level_masks[level]);
        let chosen_row = cache.derangement_row(chosen_index);
        for (column, &value) in chosen_row.iter().enumerate() {
            let conflict = cache.conflict_mask(column, value);
            for (slot, &conflict_word) in self.completion_scratch.iter_mut().zip(conflict) {
                *slot &= !conflict_word;
            }
        }

        let mut surviving_bits: u32 = 0;
        let mut forced_index: u32 = 0;
        for (word_index, &word) in self.completion_scratch.iter().enumerate() {
            if word != 0 {
                if surviving_bits == 0 {
                    forced_index = (word_index as u32) * 64 + word.trailing_zeros();
                }
                surviving_bits += word.count_ones();
            }
        }

        // Todo rectángulo (n−1, n) posee exactamente una completación.
        if surviving_bits != 1 {
            debug_assert_eq!(surviving_bits, 1, "forced completion must be unique");
            outcome.fusion_invariant_collapse = true;
            return false;
        }

        let completion_sign = rectangle_sign * cache.sign(forced_index);
        if completion_sign == 1 {
            outcome.completion_positive += 1;
        } else {
            outcome.completion_negative += 1;
        }
        true
    }
}
