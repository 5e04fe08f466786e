// [apps/census-cli/src/progress.rs]
/*!
 * =================================================================
 * APARATO: TERMINAL PROGRESS SINK (V5.1 - PANOPTICON LITE)
 * CLASIFICACIÓN: SHELL INFRASTRUCTURE (ESTRATO L3)
 * RESPONSABILIDAD: BARRA DE PROGRESO EN VIVO DEL CENSO
 *
 * # Logic:
 * Implementación best-effort del sumidero de progreso del dominio: los
 * eventos llegan desordenados desde los workers y la barra solo avanza
 * monótonamente; un evento descartado jamás altera el censo.
 * =================================================================
 */

use indicatif::{ProgressBar, ProgressStyle};

use signum_domain_models::{CensusIgnition, CensusReport, WorkUnitSeal};
use signum_domain_strategy::prelude::ProgressObserver;

/// Sumidero de progreso respaldado por una barra de terminal.
pub struct TerminalProgressObserver {
    unit_bar: ProgressBar,
}

impl TerminalProgressObserver {
    /// Construye el sumidero con una barra aún sin plan.
    #[must_use]
    pub fn new() -> Self {
        let unit_bar = ProgressBar::hidden();
        unit_bar.set_style(
            ProgressStyle::with_template(
                "⚙️  {prefix} [{bar:32.cyan/blue}] {pos}/{len} units · {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
        );
        Self { unit_bar }
    }
}

impl Default for TerminalProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for TerminalProgressObserver {
    fn on_census_start(&self, ignition: CensusIgnition) {
        self.unit_bar.set_prefix(format!(
            "census {}x{}",
            ignition.rows, ignition.symbols
        ));
        self.unit_bar.set_length(ignition.total_work_units);
        self.unit_bar.set_position(0);
        self.unit_bar
            .set_draw_target(indicatif::ProgressDrawTarget::stderr());
    }

    fn on_unit_complete(&self, seal: WorkUnitSeal) {
        // Los sellados llegan desordenados: la posición solo avanza.
        if seal.units_completed > self.unit_bar.position() {
            self.unit_bar.set_position(seal.units_completed);
        }
        self.unit_bar.set_message(format!(
            "worker {} · {} rectangles",
            seal.worker_id, seal.rectangles_scanned
        ));
    }

    fn on_census_finish(&self, report: &CensusReport) {
        self.unit_bar.finish_with_message(format!(
            "sealed +{} / −{} in {} ms",
            report.positive_count, report.negative_count, report.computation_time_milliseconds
        ));
    }
}
