use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for report generation events.
///
/// Lets the CLI, tests and any embedding service observe per-speaker
/// progress without the use case knowing where output goes.
pub trait ReportLogger: Send {
    /// Report speaker-level progress.
    fn progress(&mut self, current: usize, total: usize, speaker: &str);

    /// Record how long a named stage took for one speaker.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Log a per-speaker failure that did not stop the batch.
    fn failure(&mut self, speaker: &str, message: &str);

    /// Emit an end-of-report summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullReportLogger;

impl ReportLogger for NullReportLogger {
    fn progress(&mut self, _current: usize, _total: usize, _speaker: &str) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
    fn failure(&mut self, _speaker: &str, _message: &str) {}
}

/// CLI-oriented logger that forwards events to the `log` crate and keeps
/// per-stage timings for a closing summary.
pub struct StdoutReportLogger {
    timings: HashMap<String, Vec<f64>>,
    failures: Vec<(String, String)>,
    start_time: Instant,
    speakers: usize,
}

impl StdoutReportLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            failures: Vec::new(),
            start_time: Instant::now(),
            speakers: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.failures.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Report summary ({} speakers, {:.1}s total):",
            self.speakers,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:7.1}ms  total {total_ms:8.0}ms"
            ));
        }

        if !self.failures.is_empty() {
            lines.push(format!("  Failed speakers: {}", self.failures.len()));
            for (speaker, message) in &self.failures {
                lines.push(format!("    {speaker}: {message}"));
            }
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn failures(&self) -> &[(String, String)] {
        &self.failures
    }
}

impl Default for StdoutReportLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportLogger for StdoutReportLogger {
    fn progress(&mut self, current: usize, total: usize, speaker: &str) {
        self.speakers = total;
        log::info!("Speaker {current}/{total}: {speaker}");
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn failure(&mut self, speaker: &str, message: &str) {
        log::warn!("Speaker {speaker} failed: {message}");
        self.failures
            .push((speaker.to_string(), message.to_string()));
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
