use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use clap::Parser;
use fastout_runner::{BatchRunner, RunStatus, RunnerConfig, DEFAULT_BINARY};
use log::{error, info, warn, LevelFilter};

#[derive(Parser, Debug)]
#[command(
    name = "fastout-runner",
    version = env!("CARGO_PKG_VERSION"),
    about = "Run FAST/OpenFAST on a batch of input files",
    long_about = None,
)]
struct Cli {
    /// Входные файлы (.fst)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Исполняемый файл FAST
    #[arg(short, long, default_value = DEFAULT_BINARY)]
    binary: String,
    /// Количество параллельных запусков
    #[arg(short = 'j', long, default_value = "2")]
    workers: usize,
    /// Не пересылать stdout успешных запусков
    #[arg(long)]
    no_stdout: bool,
    /// Тихий режим (только ошибки)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    for input in cli.inputs.iter().filter(|p| !p.is_file()) {
        warn!("Input file {input:?} does not exist");
    }

    let config = RunnerConfig {
        binary: cli.binary.clone(),
        input_files: cli.inputs.clone(),
        workers: cli.workers,
        forward_stdout: !cli.no_stdout,
    };

    if let Err(e) = config.validate() {
        error!("{e}");
        std::process::exit(1);
    }

    let (runner, metrics) = BatchRunner::new(config);
    let stop_flag: Arc<AtomicBool> = runner.stop_flag();

    let stop_ctrlc = stop_flag.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        if stop_ctrlc.swap(true, Ordering::SeqCst) {
            // Второй Ctrl+C: принудительный выход
            warn!("Force exit");
            std::process::exit(130);
        }
        warn!("Ctrl+C received, waiting for running jobs to finish...");
    }) {
        warn!("Failed to set Ctrl+C handler: {e}");
    }

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Binary        : {}", cli.binary);
    info!("  Input files   : {}", cli.inputs.len());
    info!("  Workers       : {}", cli.workers);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let session_start = Instant::now();

    let outcomes = match runner.run() {
        Ok(o) => o,
        Err(e) => {
            error!("Batch run failed: {e}");
            std::process::exit(1);
        }
    };

    // --- Итоговая статистика ---
    let summary = metrics.summary(&session_start);
    info!("\n{summary}");

    let failed: Vec<_> = outcomes.iter().filter(|o| o.is_failure()).collect();
    if !failed.is_empty() {
        for o in &failed {
            error!("✗ {:?}: {}", o.input, o.status);
        }
        std::process::exit(1);
    }

    if outcomes.iter().any(|o| o.status == RunStatus::Skipped) {
        warn!("⚠ {} input files were skipped", summary.skipped);
        std::process::exit(130);
    }

    info!("✓ All {} runs complete", outcomes.len());
}
