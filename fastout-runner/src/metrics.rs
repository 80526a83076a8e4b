use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Instant,
};

/// Счётчики запусков, обновляемые lock-free из рабочих потоков.
#[derive(Debug, Default)]
pub struct RunnerMetrics {
    pub started: AtomicU64,
    pub succeeded: AtomicU64,
    pub failed: AtomicU64,
    pub skipped: AtomicU64,
}

/// Snapshot метрик для отображения / тестирования.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub duration_secs: f64,
    pub started: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub skipped: u64,
    pub failure_rate_pct: f64,
}

impl RunnerMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Процент неудачных среди запущенных (0.0-100.0).
    pub fn failure_rate_pct(&self) -> f64 {
        let failed = self.failed.load(Ordering::Relaxed);
        let finished = failed + self.succeeded.load(Ordering::Relaxed);

        if finished == 0 {
            0.0
        } else {
            failed as f64 / finished as f64 * 100.0
        }
    }

    pub fn summary(
        &self,
        elapsed: &Instant,
    ) -> MetricsSummary {
        MetricsSummary {
            duration_secs: elapsed.elapsed().as_secs_f64(),
            started: self.started.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failure_rate_pct: self.failure_rate_pct(),
        }
    }
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "  Duration      : {:.1}s", self.duration_secs)?;
        writeln!(f, "  Started       : {}", self.started)?;
        writeln!(f, "  Succeeded     : {}", self.succeeded)?;
        writeln!(
            f,
            "  Failed        : {} ({:.1}%)",
            self.failed, self.failure_rate_pct
        )?;
        writeln!(f, "  Skipped       : {}", self.skipped)?;
        write!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    #[test]
    fn test_initial_metrics_zero() {
        let metrics = RunnerMetrics::new();
        let summary = metrics.summary(&Instant::now());

        assert_eq!(summary.started, 0);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failure_rate_pct, 0.0);
    }

    #[test]
    fn test_failure_rate_ignores_skipped() {
        let metrics = RunnerMetrics::new();
        metrics.succeeded.store(3, Ordering::Relaxed);
        metrics.failed.store(1, Ordering::Relaxed);
        metrics.skipped.store(10, Ordering::Relaxed);

        assert!((metrics.failure_rate_pct() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_display() {
        let metrics = RunnerMetrics::new();
        metrics.started.store(2, Ordering::Relaxed);
        metrics.succeeded.store(1, Ordering::Relaxed);
        metrics.failed.store(1, Ordering::Relaxed);

        let start = Instant::now() - Duration::from_secs(2);
        let text = metrics.summary(&start).to_string();

        assert!(text.contains("Started       : 2"));
        assert!(text.contains("Failed        : 1 (50.0%)"));
    }

    #[test]
    fn test_multithreaded_updates() {
        let metrics = RunnerMetrics::new();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let m = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        m.started.fetch_add(1, Ordering::Relaxed);
                        m.succeeded.fetch_add(1, Ordering::Relaxed);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(metrics.started.load(Ordering::Relaxed), 4_000);
        assert_eq!(metrics.succeeded.load(Ordering::Relaxed), 4_000);
    }
}
