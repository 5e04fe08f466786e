// [libs/core/derangement-cache/src/handle.rs]
/*!
 * =================================================================
 * APARATO: IMMUTABLE CACHE HANDLE (V14.2 - SILICON ALIGNED)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: ACCESO O(1) A FILAS, SIGNOS Y MÁSCARAS DE CONFLICTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. RESIDENCE DUALITY: La imagen del archivo vive mapeada en memoria
 *    (memmap2, n ≥ 8) o en heap propio; filas y signos se leen sin copia.
 * 2. WORD ALIGNMENT: Las máscaras (posición, valor) se materializan una
 *    sola vez en palabras u64 alineadas para la intersección del Hot-Loop.
 * 3. PREFIX CONTIGUITY: En orden lexicográfico los conjuntos de prefijo
 *    simple y de par son rangos contiguos de índices; se recuperan con un
 *    barrido O(count) en la carga, sin persistirlos en el artefacto.
 * 4. IMMUTABILITY SEAL: Tras la validación, el handle es de solo lectura
 *    y se comparte entre workers vía Arc sin cerrojos.
 * =================================================================
 */

use std::fs::File;
use std::ops::Range;
use std::path::Path;

use tracing::debug;

use signum_core_perm::prelude::derangement_count;

use crate::errors::CacheError;
use crate::format::{payload_checksum, CacheFileHeader};

/// Umbral de dimensión a partir del cual se prefiere el mapeo en memoria.
pub const MEMORY_MAP_DIMENSION_THRESHOLD: u32 = 8;

/// Residencia física de la imagen del archivo.
enum PayloadResidence {
    /// Imagen mapeada por el kernel (solo lectura).
    Mapped(memmap2::Mmap),
    /// Imagen poseída en heap.
    Owned(Vec<u8>),
}

impl PayloadResidence {
    fn bytes(&self) -> &[u8] {
        match self {
            PayloadResidence::Mapped(map) => map,
            PayloadResidence::Owned(buffer) => buffer,
        }
    }
}

/// Handle inmutable del caché de desarreglos para una dimensión.
pub struct DerangementCacheHandle {
    residence: PayloadResidence,
    dimension: usize,
    derangement_count: u32,
    words_per_mask: usize,
    rows_offset: usize,
    signs_offset: usize,
    /// Máscaras de conflicto alineadas: slot (p, v) → words_per_mask palabras.
    conflict_words: Vec<u64>,
    /// Rango lex de índices cuyo primer valor es v (slot v−1).
    single_prefix_ranges: Vec<(u32, u32)>,
    /// Rango lex de índices cuyos dos primeros valores son (v1, v2).
    pair_prefix_ranges: Vec<(u32, u32)>,
    /// Partición de signos: bit i encendido ⇔ sign(i) = +1.
    positive_sign_words: Vec<u64>,
}

impl DerangementCacheHandle {
    /// Carga y valida el artefacto desde disco.
    ///
    /// Para dimensiones ≥ [`MEMORY_MAP_DIMENSION_THRESHOLD`] la imagen se
    /// mapea en memoria; por debajo se lee al heap.
    ///
    /// # Errors:
    /// `Io` ante fallos del sistema de archivos; `Corrupt` ante cualquier
    /// divergencia de cabecera, tamaño, tabla subfactorial o CRC32.
    pub fn load_from_path(artifact_path: &Path, dimension: u32) -> Result<Self, CacheError> {
        if dimension >= MEMORY_MAP_DIMENSION_THRESHOLD {
            let file = File::open(artifact_path)?;
            // SAFETY: el artefacto se abre en solo lectura y el contrato del
            // sistema es que, una vez sellado por rename atómico, nadie lo
            // muta; el mapa vive dentro del handle inmutable.
            let map = unsafe { memmap2::Mmap::map(&file)? };
            Self::from_residence(PayloadResidence::Mapped(map))
        } else {
            let buffer = std::fs::read(artifact_path)?;
            Self::from_residence(PayloadResidence::Owned(buffer))
        }
    }

    /// Construye el handle desde una imagen ya residente en heap.
    ///
    /// # Errors:
    /// `Corrupt` ante cualquier divergencia estructural o de checksum.
    pub fn from_owned_bytes(file_image: Vec<u8>) -> Result<Self, CacheError> {
        Self::from_residence(PayloadResidence::Owned(file_image))
    }

    fn from_residence(residence: PayloadResidence) -> Result<Self, CacheError> {
        let bytes = residence.bytes();
        let header = CacheFileHeader::decode(bytes)?;

        if bytes.len() != header.expected_file_size() {
            return Err(CacheError::Corrupt(format!(
                "file size {} diverges from layout expectation {}",
                bytes.len(),
                header.expected_file_size()
            )));
        }

        let tabulated = derangement_count(header.dimension as usize)?;
        if u128::from(header.derangement_count) != tabulated {
            return Err(CacheError::Corrupt(format!(
                "declared count {} diverges from subfactorial table {tabulated}",
                header.derangement_count
            )));
        }

        let observed_crc32 = payload_checksum(bytes);
        if observed_crc32 != header.payload_crc32 {
            return Err(CacheError::Corrupt(format!(
                "payload crc32 {observed_crc32:#010x} diverges from sealed {:#010x}",
                header.payload_crc32
            )));
        }

        let dimension = header.dimension as usize;
        let count = header.derangement_count as usize;
        let words_per_mask = count.div_ceil(64);
        let mask_stride = header.mask_stride_bytes();
        let rows_offset = header.offset_derangements as usize;
        let signs_offset = header.offset_signs as usize;
        let pv_offset = header.offset_pv_index as usize;

        // --- MATERIALIZACIÓN DE MÁSCARAS ALINEADAS A PALABRA ---
        let slot_count = dimension * dimension;
        let mut conflict_words = vec![0u64; slot_count * words_per_mask];
        for slot in 0..slot_count {
            let slot_bytes = &bytes[pv_offset + slot * mask_stride..pv_offset + (slot + 1) * mask_stride];
            let slot_words = &mut conflict_words[slot * words_per_mask..(slot + 1) * words_per_mask];
            for (byte_index, &byte) in slot_bytes.iter().enumerate() {
                slot_words[byte_index / 8] |= u64::from(byte) << ((byte_index % 8) * 8);
            }
        }

        // --- PARTICIÓN DE SIGNOS ALINEADA A PALABRA ---
        let mut positive_sign_words = vec![0u64; words_per_mask];
        for index in 0..count {
            if bytes[signs_offset + index] as i8 == 1 {
                positive_sign_words[index / 64] |= 1u64 << (index % 64);
            }
        }

        // --- RECUPERACIÓN DE RANGOS DE PREFIJO CONTIGUOS ---
        let mut single_prefix_ranges = vec![(u32::MAX, 0u32); dimension];
        let mut pair_prefix_ranges = vec![(u32::MAX, 0u32); slot_count];
        for index in 0..count {
            let row = &bytes[rows_offset + index * dimension..rows_offset + (index + 1) * dimension];
            let first_slot = row[0] as usize - 1;
            let pair_slot = first_slot * dimension + (row[1] as usize - 1);
            for entry in [
                &mut single_prefix_ranges[first_slot],
                &mut pair_prefix_ranges[pair_slot],
            ] {
                if entry.0 == u32::MAX {
                    entry.0 = index as u32;
                }
                entry.1 = index as u32 + 1;
            }
        }
        for entry in single_prefix_ranges
            .iter_mut()
            .chain(pair_prefix_ranges.iter_mut())
        {
            if entry.0 == u32::MAX {
                *entry = (0, 0);
            }
        }

        debug!(
            "🧭 [CACHE_HANDLE]: n={dimension} levelized. {count} derangements, {words_per_mask} words/mask."
        );

        Ok(Self {
            residence,
            dimension,
            derangement_count: header.derangement_count,
            words_per_mask,
            rows_offset,
            signs_offset,
            conflict_words,
            single_prefix_ranges,
            pair_prefix_ranges,
            positive_sign_words,
        })
    }

    /// Dimensión n del artefacto.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Cantidad D(n) de desarreglos contenidos.
    #[must_use]
    pub fn derangement_count(&self) -> u32 {
        self.derangement_count
    }

    /// Palabras u64 por máscara de conflicto.
    #[must_use]
    pub fn words_per_mask(&self) -> usize {
        self.words_per_mask
    }

    /// Fila del desarreglo `index` en orden lexicográfico. O(1), sin copia.
    #[must_use]
    pub fn derangement_row(&self, index: u32) -> &[u8] {
        let base = self.rows_offset + index as usize * self.dimension;
        &self.residence.bytes()[base..base + self.dimension]
    }

    /// Signo (±1) del desarreglo `index`. O(1).
    #[must_use]
    pub fn sign(&self, index: u32) -> i8 {
        self.residence.bytes()[self.signs_offset + index as usize] as i8
    }

    /// Máscara de índices en conflicto con "valor `value` en posición
    /// `position`": exactamente los desarreglos que portan ese valor ahí.
    #[must_use]
    pub fn conflict_mask(&self, position: usize, value: u8) -> &[u64] {
        let slot = position * self.dimension + (value as usize - 1);
        &self.conflict_words[slot * self.words_per_mask..(slot + 1) * self.words_per_mask]
    }

    /// Rango lex de índices cuyo primer valor es `value`.
    #[must_use]
    pub fn single_prefix_range(&self, value: u8) -> Range<u32> {
        let (start, end) = self.single_prefix_ranges[value as usize - 1];
        start..end
    }

    /// Rango lex de índices cuyos dos primeros valores son (`first`, `second`).
    #[must_use]
    pub fn pair_prefix_range(&self, first: u8, second: u8) -> Range<u32> {
        let slot = (first as usize - 1) * self.dimension + (second as usize - 1);
        let (start, end) = self.pair_prefix_ranges[slot];
        start..end
    }

    /// Partición de signos alineada a palabra: bit i ⇔ sign(i) = +1.
    ///
    /// Permite al enumerador sellar el último nivel por popcount en lugar
    /// de visitar cada hoja individualmente.
    #[must_use]
    pub fn positive_sign_words(&self) -> &[u64] {
        &self.positive_sign_words
    }

    /// Máscara plena: los `count` bits encendidos, cola de palabra en cero.
    #[must_use]
    pub fn full_mask_words(&self) -> Vec<u64> {
        let mut words = vec![u64::MAX; self.words_per_mask];
        let tail_bits = (self.derangement_count as usize) % 64;
        if tail_bits != 0 {
            words[self.words_per_mask - 1] = (1u64 << tail_bits) - 1;
        }
        words
    }

    /// Índices compatibles con un prefijo de valores fijados en las
    /// posiciones 0..k. Para k ≤ 2 resuelve por rango de prefijo O(1);
    /// para k > 2 interseca máscaras de conflicto por posición.
    #[must_use]
    pub fn compatible_with_prefix(&self, prefix: &[u8]) -> CompatiblePrefixIter {
        match prefix.len() {
            0 => CompatiblePrefixIter::Contiguous(0..self.derangement_count),
            1 => CompatiblePrefixIter::Contiguous(self.single_prefix_range(prefix[0])),
            2 => CompatiblePrefixIter::Contiguous(self.pair_prefix_range(prefix[0], prefix[1])),
            _ => {
                let mut intersection = self.conflict_mask(0, prefix[0]).to_vec();
                for (position, &value) in prefix.iter().enumerate().skip(1) {
                    let mask = self.conflict_mask(position, value);
                    for (word, &incoming) in intersection.iter_mut().zip(mask) {
                        *word &= incoming;
                    }
                }
                CompatiblePrefixIter::Sparse(MaskBitCursor::new(intersection))
            }
        }
    }
}

/// Cursor ascendente sobre los bits encendidos de una máscara de palabras.
pub struct MaskBitCursor {
    words: Vec<u64>,
    word_index: usize,
    live_word: u64,
}

impl MaskBitCursor {
    /// Construye el cursor sobre una máscara poseída.
    #[must_use]
    pub fn new(words: Vec<u64>) -> Self {
        let live_word = words.first().copied().unwrap_or(0);
        Self {
            words,
            word_index: 0,
            live_word,
        }
    }
}

impl Iterator for MaskBitCursor {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while self.live_word == 0 {
            self.word_index += 1;
            if self.word_index >= self.words.len() {
                return None;
            }
            self.live_word = self.words[self.word_index];
        }
        let bit = self.live_word.trailing_zeros();
        self.live_word &= self.live_word - 1;
        Some(self.word_index as u32 * 64 + bit)
    }
}

/// Iterador de índices compatibles con un prefijo.
pub enum CompatiblePrefixIter {
    /// Rango contiguo resuelto por índice de prefijo.
    Contiguous(Range<u32>),
    /// Bits dispersos resueltos por intersección de máscaras.
    Sparse(MaskBitCursor),
}

impl Iterator for CompatiblePrefixIter {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        match self {
            CompatiblePrefixIter::Contiguous(range) => range.next(),
            CompatiblePrefixIter::Sparse(cursor) => cursor.next(),
        }
    }
}
