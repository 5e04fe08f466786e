// [apps/census-cli/src/cpu_manager.rs]
/**
 * =================================================================
 * APARATO: HEURISTIC HARDWARE MONITOR (V9.0 - SOBERANO)
 * CLASIFICACIÓN: SHELL INFRASTRUCTURE (ESTRATO L3)
 * RESPONSABILIDAD: TELEMETRÍA DE SILICIO Y AFINIDAD DE DESPACHO
 *
 * # Logic:
 * El censo es CPU-puro: la única métrica que gobierna su rendimiento es
 * cuánto silicio queda libre para el pool de workers. Este aparato
 * interroga los pseudo-archivos del kernel y destila dos señales propias:
 * la frecuencia publicitada del procesador (descriptor de identidad de
 * /proc/cpuinfo, estable ante hipervisores que capan cpufreq) y la
 * saturación del host (carga de 1 minuto normalizada por núcleo lógico).
 * Una saturación ≥ 1.0 anuncia que el censo competirá por ciclos.
 *
 * # Performance:
 * Complejidad O(1); las lecturas de /proc son pseudo-archivos en RAM.
 * =================================================================
 */

use std::fs;

use tracing::{debug, info, warn};

/// Umbral de saturación a partir del cual el censo competirá por silicio.
const HOST_SATURATION_THRESHOLD: f32 = 1.0;

/// Instantánea de las constantes vitales del hardware anfitrión.
#[derive(Debug, Clone, Copy)]
pub struct NodeHardwareMetrics {
    /// Núcleos lógicos disponibles para el pool de censo.
    pub logical_core_count: usize,
    /// Frecuencia publicitada por la identidad del procesador, en MHz
    /// (0 si el hipervisor oculta el descriptor).
    pub advertised_frequency_megahertz: u32,
    /// Carga de 1 minuto normalizada por núcleo lógico.
    pub load_saturation_ratio: f32,
}

impl NodeHardwareMetrics {
    /// ¿El host ya consume todo su silicio antes de iniciar el censo?
    #[must_use]
    pub fn is_host_saturated(&self) -> bool {
        self.load_saturation_ratio >= HOST_SATURATION_THRESHOLD
    }
}

/// Monitor heurístico del silicio anfitrión.
pub struct HardwareMonitor;

impl HardwareMonitor {
    /// Captura instantánea de las constantes vitales del hardware.
    #[must_use]
    pub fn capture_instantaneous_metrics() -> NodeHardwareMetrics {
        let logical_core_count = num_cpus::get();
        NodeHardwareMetrics {
            logical_core_count,
            advertised_frequency_megahertz: Self::probe_advertised_frequency(),
            load_saturation_ratio: Self::probe_load_saturation(logical_core_count),
        }
    }

    /// Registra la instantánea en el rastro de ignición del shell, con
    /// veredicto de saturación para el operador.
    pub fn report_ignition_snapshot() {
        let metrics = Self::capture_instantaneous_metrics();
        if metrics.is_host_saturated() {
            warn!(
                "🐢 [SILICON]: Host saturated before ignition (load/core {:.2} over {} cores). Census throughput will degrade.",
                metrics.load_saturation_ratio, metrics.logical_core_count
            );
        } else {
            info!(
                "🧬 [SILICON]: {} logical cores at {} MHz advertised, load/core {:.2}. Strata clear for the census pool.",
                metrics.logical_core_count,
                metrics.advertised_frequency_megahertz,
                metrics.load_saturation_ratio
            );
        }
    }

    /**
     * Ancla el hilo de despacho al primer núcleo disponible.
     *
     * Fallback: si la infraestructura niega la afinidad (contenedores
     * restringidos), se registra la advertencia y se continúa sin anclar.
     */
    pub fn pin_dispatch_thread() {
        match core_affinity::get_core_ids() {
            Some(core_identifiers) if !core_identifiers.is_empty() => {
                let anchor = core_identifiers[0];
                if core_affinity::set_for_current(anchor) {
                    debug!("📌 [SILICON]: Dispatch thread pinned to core {:?}.", anchor.id);
                } else {
                    warn!("⚠️ [SILICON]: Core affinity denied by host. Continuing unpinned.");
                }
            }
            _ => warn!("⚠️ [SILICON]: Core topology unavailable. Continuing unpinned."),
        }
    }

    /// Frecuencia publicitada en la identidad del procesador: primera
    /// entrada etiquetada "cpu MHz" de /proc/cpuinfo. Se prefiere este
    /// descriptor al árbol cpufreq porque los hipervisores efímeros
    /// suelen capar el segundo pero no el primero.
    fn probe_advertised_frequency() -> u32 {
        let Ok(processor_identity) = fs::read_to_string("/proc/cpuinfo") else {
            return 0;
        };
        processor_identity
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(label, _)| label.trim() == "cpu MHz")
            .and_then(|(_, magnitude)| magnitude.trim().parse::<f64>().ok())
            .map(|megahertz| megahertz.round() as u32)
            .unwrap_or(0)
    }

    /// Saturación del host: carga de 1 minuto dividida por los núcleos
    /// lógicos. El censo interpreta ≥ 1.0 como competencia por silicio.
    fn probe_load_saturation(logical_core_count: usize) -> f32 {
        if logical_core_count == 0 {
            return 0.0;
        }
        let Ok(load_ledger) = fs::read_to_string("/proc/loadavg") else {
            return 0.0;
        };
        match load_ledger
            .split_whitespace()
            .next()
            .and_then(|one_minute_field| one_minute_field.parse::<f32>().ok())
        {
            Some(one_minute_load) => one_minute_load / logical_core_count as f32,
            None => 0.0,
        }
    }
}
