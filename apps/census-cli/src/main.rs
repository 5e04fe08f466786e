// [apps/census-cli/src/main.rs]
/*!
 * =================================================================
 * APARATO: CENSUS COMMAND SHELL (V9.0 - ZENITH SHELL)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: BOOTSTRAP DE ENTORNO Y DESPACHO DE MANDOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ARCHITECTURAL PURITY: El shell es un switchboard puro: parsea
 *    directivas, arma señales y delega la totalidad del censo al
 *    StrategyExecutor del estrato L2.
 * 2. SIGNAL PROTOCOL: Ctrl-C alimenta la señal atómica compartida; los
 *    workers sellan en la siguiente frontera de fila y el shell retorna
 *    el código 130 del contrato de cancelación.
 * 3. EXIT TRIAGE: 0 éxito · 1 entrada inválida/techo · 2 fallo interno
 *    o de persistencia · 130 cancelación cooperativa.
 * =================================================================
 */

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use uuid::Uuid;

use signum_census_lib::cpu_manager::HardwareMonitor;
use signum_census_lib::progress::TerminalProgressObserver;
use signum_core_cache::prelude::{CacheForge, CacheRegistry};
use signum_domain_models::{
    CensusFault, CensusReport, CensusRequest, ExecutionMode, ResultStore, WorkerAllocation,
};
use signum_domain_strategy::prelude::{ProgressObserver, SilentObserver, StrategyExecutor};
use signum_infra_store::JsonJournalStore;

/**
 * Directivas de mando para el nodo censor soberano.
 * Configuración inyectada vía CLI o variables de entorno.
 */
#[derive(Parser, Debug)]
#[command(
    author = "Raz Podesta <metaShark Tech>",
    version = "0.3.1",
    about = "Signum Census Node // Signed census of normalized Latin rectangles"
)]
struct SovereignCensusDirectives {
    /// Directorio físico de los artefactos binarios de desarreglos.
    #[arg(long, env = "SIGNUM_CACHE_DIRECTORY", default_value = "census_cache")]
    cache_directory: PathBuf,

    /// Bitácora JSON de reportes sellados (memoización opcional).
    #[arg(long, env = "SIGNUM_JOURNAL_PATH")]
    journal_path: Option<PathBuf>,

    /// Silencia la barra de progreso (hosts sin terminal interactiva).
    #[arg(long)]
    quiet_progress: bool,

    #[command(subcommand)]
    command: CensusCommand,
}

#[derive(Subcommand, Debug)]
enum CensusCommand {
    /// Censa una dimensión (r × n) y reporta la partición de signos.
    Count {
        /// Cantidad de filas r (2 ≤ r ≤ n).
        #[arg(short, long)]
        rows: u32,
        /// Cantidad de símbolos n (n ≤ 13).
        #[arg(short, long)]
        symbols: u32,
        /// Modo de ejecución del censo.
        #[arg(long, value_enum, default_value = "auto")]
        mode: ModeDirective,
        /// Workers del backend paralelo (por defecto: automático).
        #[arg(short, long)]
        workers: Option<usize>,
        /// Censa además (r + 1, n) por fusión de completación (exige r = n − 1).
        #[arg(long)]
        with_completion: bool,
    },
    /// Barrido de rango: pares (r, n) con r ≤ n, n y r ascendentes.
    Range {
        /// Piso de filas del barrido.
        #[arg(long)]
        rows_min: u32,
        /// Techo de filas del barrido.
        #[arg(long)]
        rows_max: u32,
        /// Piso de símbolos del barrido.
        #[arg(long)]
        symbols_min: u32,
        /// Techo de símbolos del barrido.
        #[arg(long)]
        symbols_max: u32,
        /// Exporta los reportes sellados como CSV.
        #[arg(long)]
        csv_export: Option<PathBuf>,
    },
    /// Forja o audita el artefacto binario de una dimensión.
    Cache {
        /// Dimensión n del artefacto.
        #[arg(short, long)]
        dimension: u32,
        /// Audita cabecera y CRC32 en lugar de forjar.
        #[arg(long)]
        verify: bool,
    },
}

/// Modo de ejecución expuesto al operador.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeDirective {
    Auto,
    Single,
    Parallel,
}

impl From<ModeDirective> for ExecutionMode {
    fn from(directive: ModeDirective) -> Self {
        match directive {
            ModeDirective::Auto => ExecutionMode::Auto,
            ModeDirective::Single => ExecutionMode::Single,
            ModeDirective::Parallel => ExecutionMode::Parallel,
        }
    }
}

/**
 * Punto de ignición del binario censor.
 *
 * # Errors:
 * - `IO_FAULT`: si la bitácora o el directorio de caché no pueden reclamarse.
 */
fn main() -> Result<()> {
    // 1. INICIALIZACIÓN DEL ENTORNO Y LA OBSERVABILIDAD
    dotenvy::dotenv().ok();
    signum_shared_heimdall::init_tracing("census-cli");

    // 2. PARSEO DE DIRECTIVAS ESTRATÉGICAS
    let census_directives = SovereignCensusDirectives::parse();
    let execution_run_identifier = Uuid::new_v4();
    info!(
        "💠 [SHELL]: Census shell ignition. Run {}.",
        execution_run_identifier
    );
    HardwareMonitor::report_ignition_snapshot();
    HardwareMonitor::pin_dispatch_thread();

    // 3. PROTOCOLO DE SEÑALES DE SISTEMA (Terminación Ordenada)
    let termination_signal_atomic = Arc::new(AtomicBool::new(false));
    let signal_flag_reference = Arc::clone(&termination_signal_atomic);
    ctrlc::set_handler(move || {
        warn!("⚠️ [SIGNAL]: Termination requested by host. Sealing at next row boundary...");
        signal_flag_reference.store(true, Ordering::SeqCst);
    })
    .context("SIGNAL_FAULT: Unable to arm the termination handler.")?;

    // 4. ESTRATO DE PERSISTENCIA (Registro de cachés + bitácora opcional)
    let cache_registry = CacheRegistry::new(&census_directives.cache_directory);
    let journal_store = match &census_directives.journal_path {
        Some(journal_path) => Some(
            JsonJournalStore::open(journal_path)
                .map_err(|store_fault| anyhow::anyhow!(store_fault.to_string()))
                .context("IO_FAULT: Unable to hydrate the census journal.")?,
        ),
        None => None,
    };

    // 5. DESPACHO DEL MANDO Y TRIAJE DE SALIDA
    let exit_code = dispatch_command(
        &census_directives,
        &cache_registry,
        journal_store.as_ref(),
        &termination_signal_atomic,
    );
    info!(
        "🏁 [SHELL]: Run {} concluded with exit code {}.",
        execution_run_identifier, exit_code
    );
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn dispatch_command(
    directives: &SovereignCensusDirectives,
    registry: &CacheRegistry,
    journal: Option<&JsonJournalStore>,
    cancellation: &Arc<AtomicBool>,
) -> i32 {
    let silent_observer = SilentObserver;
    let terminal_observer = TerminalProgressObserver::new();
    let observer: &dyn ProgressObserver = if directives.quiet_progress {
        &silent_observer
    } else {
        &terminal_observer
    };

    match &directives.command {
        CensusCommand::Count {
            rows,
            symbols,
            mode,
            workers,
            with_completion,
        } => {
            let request = CensusRequest::new(*rows, *symbols)
                .with_execution_mode((*mode).into())
                .with_worker_allocation(match workers {
                    Some(fixed_workers) => WorkerAllocation::Fixed(*fixed_workers),
                    None => WorkerAllocation::Auto,
                });

            if *with_completion {
                match StrategyExecutor::execute_fused_census(
                    &request,
                    registry,
                    observer,
                    cancellation,
                ) {
                    Ok((primary_report, completion_report)) => {
                        render_sealed_report(&primary_report);
                        render_sealed_report(&completion_report);
                        persist_into_journal(journal, &primary_report);
                        persist_into_journal(journal, &completion_report);
                        0
                    }
                    Err(census_fault) => triage_census_fault(&census_fault),
                }
            } else {
                let verdict = match journal {
                    Some(journal_store) => StrategyExecutor::execute_with_store(
                        &request,
                        registry,
                        journal_store,
                        observer,
                        cancellation,
                    ),
                    None => StrategyExecutor::execute_census(
                        &request,
                        registry,
                        observer,
                        cancellation,
                    ),
                };
                match verdict {
                    Ok(sealed_report) => {
                        render_sealed_report(&sealed_report);
                        0
                    }
                    Err(census_fault) => triage_census_fault(&census_fault),
                }
            }
        }

        CensusCommand::Range {
            rows_min,
            rows_max,
            symbols_min,
            symbols_max,
            csv_export,
        } => {
            match StrategyExecutor::execute_census_range(
                (*rows_min, *rows_max),
                (*symbols_min, *symbols_max),
                registry,
                observer,
                cancellation,
            ) {
                Ok(sealed_reports) => {
                    for sealed_report in &sealed_reports {
                        render_sealed_report(sealed_report);
                        persist_into_journal(journal, sealed_report);
                    }
                    if let Some(csv_path) = csv_export {
                        if let Err(export_fault) = export_reports_csv(csv_path, &sealed_reports) {
                            warn!("⚠️ [SHELL]: CSV export degraded: {export_fault}");
                            return 2;
                        }
                        info!("📄 [SHELL]: CSV artifact sealed at {}.", csv_path.display());
                    }
                    0
                }
                Err(census_fault) => triage_census_fault(&census_fault),
            }
        }

        CensusCommand::Cache { dimension, verify } => {
            if *verify {
                match registry.audit_artifact(*dimension) {
                    Ok(audit) if audit.integrity_verdict => {
                        println!(
                            "cache n={} :: {} derangements :: {} bytes :: integrity OK",
                            audit.dimension, audit.derangement_count, audit.file_size_bytes
                        );
                        0
                    }
                    Ok(audit) => {
                        warn!(
                            "🔥 [SHELL]: Artifact n={} corrupted: {}",
                            audit.dimension,
                            audit.fault_detail.unwrap_or_default()
                        );
                        2
                    }
                    Err(cache_fault) => {
                        warn!("⚠️ [SHELL]: Artifact audit failed: {cache_fault}");
                        2
                    }
                }
            } else {
                match CacheForge::crystallize(*dimension, registry.cache_directory()) {
                    Ok(sealed_path) => {
                        println!("cache n={} sealed at {}", dimension, sealed_path.display());
                        0
                    }
                    Err(cache_fault) => {
                        warn!("⚠️ [SHELL]: Cache forge failed: {cache_fault}");
                        2
                    }
                }
            }
        }
    }
}

/// Vuelca el reporte sellado en formato humano y en JSON de una línea.
fn render_sealed_report(report: &CensusReport) {
    println!(
        "census {}x{} :: positive {} :: negative {} :: difference {} :: {} ms :: {}",
        report.rows,
        report.symbols,
        report.positive_count,
        report.negative_count,
        report.signed_difference,
        report.computation_time_milliseconds,
        report.engine_signature
    );
    if let Ok(encoded) = serde_json::to_string(report) {
        info!("🧾 [REPORT]: {encoded}");
    }
}

fn persist_into_journal(journal: Option<&JsonJournalStore>, report: &CensusReport) {
    if let Some(journal_store) = journal {
        if let Err(store_fault) = journal_store.store(report) {
            warn!("⚠️ [SHELL]: Journal persistence degraded: {store_fault}");
        }
    }
}

/// Triaje de fallos hacia los códigos de salida del contrato.
fn triage_census_fault(census_fault: &CensusFault) -> i32 {
    warn!(
        "❌ [SHELL]: Census fault [{}]: {}",
        census_fault.kind_label(),
        census_fault
    );
    match census_fault {
        CensusFault::InvalidInput(_) | CensusFault::TooLarge { .. } => 1,
        CensusFault::Cancelled { .. } => 130,
        CensusFault::CacheCorrupt(_) | CensusFault::CacheIo(_) | CensusFault::Internal(_) => 2,
    }
}

/// Exporta los reportes sellados como artefacto CSV del operador.
fn export_reports_csv(
    csv_path: &PathBuf,
    sealed_reports: &[CensusReport],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut csv_writer = csv::Writer::from_path(csv_path)?;
    csv_writer.write_record([
        "rows",
        "symbols",
        "positive",
        "negative",
        "difference",
        "computation_time_ms",
        "engine_signature",
    ])?;
    for report in sealed_reports {
        csv_writer.write_record([
            report.rows.to_string(),
            report.symbols.to_string(),
            report.positive_count.to_string(),
            report.negative_count.to_string(),
            report.signed_difference.to_string(),
            report.computation_time_milliseconds.to_string(),
            report.engine_signature.clone(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
