use std::{
    fmt,
    io::{self, Write},
    path::PathBuf,
    process::{Command, Stdio},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, Sender};
use log::{error, info, warn};
use parking_lot::Mutex;

use crate::{metrics::RunnerMetrics, RunnerConfig, RunnerError, RunnerResult};

/// Поток, в который пересылается stdout успешных запусков.
pub type OutputSink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Итог одного запуска.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    /// Ненулевой код выхода (`None`, если процесс убит сигналом)
    Failed(Option<i32>),
    /// Процесс не удалось запустить
    SpawnError(String),
    /// Запуск отменён через stop flag
    Skipped,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub input: PathBuf,
    pub status: RunStatus,
    pub elapsed: Duration,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Succeeded
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, RunStatus::Failed(_) | RunStatus::SpawnError(_))
    }

    fn skipped(input: PathBuf) -> Self {
        Self {
            input,
            status: RunStatus::Skipped,
            elapsed: Duration::ZERO,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            RunStatus::Succeeded => write!(f, "ok"),
            RunStatus::Failed(Some(code)) => write!(f, "exit code {code}"),
            RunStatus::Failed(None) => write!(f, "terminated by signal"),
            RunStatus::SpawnError(e) => write!(f, "spawn error: {e}"),
            RunStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Раздаёт входные файлы пулу рабочих потоков.
///
/// Каждый поток выполняет `binary <input_file>` и ждёт завершения.
/// Результаты возвращаются в порядке входных файлов.
pub struct BatchRunner {
    config: RunnerConfig,
    metrics: Arc<RunnerMetrics>,
    stop_flag: Arc<AtomicBool>,
    output: OutputSink,
}

impl BatchRunner {
    /// Создаёт раннер. Возвращает также shared-ссылку на метрики.
    ///
    /// По умолчанию stdout успешных запусков идёт в stdout процесса.
    pub fn new(config: RunnerConfig) -> (Self, Arc<RunnerMetrics>) {
        let metrics = RunnerMetrics::new();
        let runner = Self {
            config,
            metrics: metrics.clone(),
            stop_flag: Arc::new(AtomicBool::new(false)),
            output: Arc::new(Mutex::new(Box::new(io::stdout()))),
        };

        (runner, metrics)
    }

    /// Заменяет поток для stdout успешных запусков.
    pub fn with_output<W: Write + Send + 'static>(
        mut self,
        sink: W,
    ) -> Self {
        self.output = Arc::new(Mutex::new(Box::new(sink)));
        self
    }

    /// Флаг остановки. Уже запущенные процессы дорабатывают, остальные
    /// файлы помечаются как [`RunStatus::Skipped`].
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Запускает обработку. Блокируется до завершения всех запусков.
    pub fn run(self) -> RunnerResult<Vec<RunOutcome>> {
        self.config.validate()?;

        let total = self.config.input_files.len();
        let workers = self.config.workers.min(total.max(1));
        let start = Instant::now();

        info!(
            "Start processing {total} files with {workers} workers ({})",
            self.config.binary
        );

        let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, PathBuf)>(workers);
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, RunOutcome)>();

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let worker = Worker {
                    binary: self.config.binary.clone(),
                    forward_stdout: self.config.forward_stdout,
                    metrics: self.metrics.clone(),
                    stop_flag: self.stop_flag.clone(),
                    output: self.output.clone(),
                };
                let jobs = job_rx.clone();
                let results = result_tx.clone();
                thread::spawn(move || worker.run(jobs, results))
            })
            .collect();

        drop(job_rx);
        drop(result_tx);

        for job in self.config.input_files.iter().cloned().enumerate() {
            if job_tx.send(job).is_err() {
                // Все рабочие потоки завершились раньше времени
                break;
            }
        }
        drop(job_tx);

        let mut outcomes: Vec<Option<RunOutcome>> = vec![None; total];
        for (idx, outcome) in result_rx.iter() {
            outcomes[idx] = Some(outcome);
        }

        for h in handles {
            if h.join().is_err() {
                warn!("Worker thread panicked");
            }
        }

        let outcomes = outcomes
            .into_iter()
            .zip(&self.config.input_files)
            .map(|(outcome, input)| {
                outcome.ok_or_else(|| {
                    RunnerError::Pipeline(format!("no outcome reported for {input:?}"))
                })
            })
            .collect::<RunnerResult<Vec<_>>>()?;

        info!(
            "Finished {total} files in {:.1} seconds",
            start.elapsed().as_secs_f64()
        );

        Ok(outcomes)
    }
}

struct Worker {
    binary: String,
    forward_stdout: bool,
    metrics: Arc<RunnerMetrics>,
    stop_flag: Arc<AtomicBool>,
    output: OutputSink,
}

impl Worker {
    fn run(
        self,
        jobs: Receiver<(usize, PathBuf)>,
        results: Sender<(usize, RunOutcome)>,
    ) {
        for (idx, input) in jobs.iter() {
            let outcome = if self.stop_flag.load(Ordering::Relaxed) {
                self.metrics.skipped.fetch_add(1, Ordering::Relaxed);
                RunOutcome::skipped(input)
            } else {
                self.metrics.started.fetch_add(1, Ordering::Relaxed);
                let outcome = run_one(&self.binary, input);
                self.report(&outcome);
                outcome
            };

            if results.send((idx, outcome)).is_err() {
                break;
            }
        }
    }

    fn report(
        &self,
        outcome: &RunOutcome,
    ) {
        let secs = outcome.elapsed.as_secs_f64();

        if outcome.is_success() {
            self.metrics.succeeded.fetch_add(1, Ordering::Relaxed);
            info!(
                "Finished {} with input file {:?} in {secs:.1} seconds.",
                self.binary, outcome.input
            );

            if self.forward_stdout && !outcome.stdout.is_empty() {
                let mut out = self.output.lock();
                if let Err(e) = out
                    .write_all(outcome.stdout.as_bytes())
                    .and_then(|()| out.flush())
                {
                    warn!("Failed to forward stdout of {:?}: {e}", outcome.input);
                }
            }
        } else {
            self.metrics.failed.fetch_add(1, Ordering::Relaxed);
            error!(
                "{} failed on {:?} ({}) after {secs:.1} seconds. [STDOUT]: {}, [STDERR]: {}",
                self.binary,
                outcome.input,
                outcome.status,
                flatten_lines(&outcome.stdout),
                flatten_lines(&outcome.stderr),
            );
        }
    }
}

fn run_one(
    binary: &str,
    input: PathBuf,
) -> RunOutcome {
    info!("Start {binary} with input file {input:?}");
    let start = Instant::now();

    let result = Command::new(binary)
        .arg(&input)
        .stdin(Stdio::null())
        .output();

    match result {
        Ok(output) => RunOutcome {
            status: if output.status.success() {
                RunStatus::Succeeded
            } else {
                RunStatus::Failed(output.status.code())
            },
            elapsed: start.elapsed(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            input,
        },
        Err(e) => RunOutcome {
            status: RunStatus::SpawnError(e.to_string()),
            elapsed: start.elapsed(),
            stdout: String::new(),
            stderr: String::new(),
            input,
        },
    }
}

/// Сводит многострочный вывод в одну строку для лога.
pub fn flatten_lines(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}
