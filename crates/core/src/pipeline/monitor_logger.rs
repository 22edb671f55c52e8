use std::collections::HashMap;
use std::time::Instant;

use crate::alerting::domain::alert_dispatcher::Alert;
use crate::monitoring::domain::status::{Status, StatusReport};

/// Cross-cutting observer of the monitor loop.
///
/// Keeps the loop free of output concerns so the CLI can print a run
/// summary while tests stay silent.
pub trait MonitorLogger: Send {
    /// Record the status of an evaluated frame.
    fn frame(&mut self, report: &StatusReport);

    /// Record a frame that could not be measured.
    fn skipped(&mut self, reason: &str);

    fn alert(&mut self, alert: &Alert);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullMonitorLogger;

impl MonitorLogger for NullMonitorLogger {
    fn frame(&mut self, _report: &StatusReport) {}
    fn skipped(&mut self, _reason: &str) {}
    fn alert(&mut self, _alert: &Alert) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
}

/// Tallies frames per status, alerts per status and stage timings, and
/// logs status changes as they happen.
pub struct StdoutMonitorLogger {
    status_frames: HashMap<Status, usize>,
    alerts: HashMap<Status, usize>,
    timings: HashMap<String, Vec<f64>>,
    skipped: usize,
    last_status: Option<Status>,
    start_time: Instant,
}

impl StdoutMonitorLogger {
    pub fn new() -> Self {
        Self {
            status_frames: HashMap::new(),
            alerts: HashMap::new(),
            timings: HashMap::new(),
            skipped: 0,
            last_status: None,
            start_time: Instant::now(),
        }
    }

    pub fn frames_in(&self, status: Status) -> usize {
        self.status_frames.get(&status).copied().unwrap_or(0)
    }

    pub fn alerts_for(&self, status: Status) -> usize {
        self.alerts.get(&status).copied().unwrap_or(0)
    }

    pub fn skipped_frames(&self) -> usize {
        self.skipped
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        let evaluated: usize = self.status_frames.values().sum();
        if evaluated == 0 && self.skipped == 0 {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Monitor summary ({evaluated} frames evaluated, {} skipped, {elapsed_s:.1}s):",
            self.skipped
        )];

        for status in Status::ALL {
            let frames = self.frames_in(*status);
            if frames == 0 && self.alerts_for(*status) == 0 {
                continue;
            }
            let pct = frames as f64 / evaluated.max(1) as f64 * 100.0;
            lines.push(format!(
                "  {:10}: {frames:6} frames ({pct:5.1}%)  {} alerts",
                status.to_string(),
                self.alerts_for(*status)
            ));
        }

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let avg = durations.iter().sum::<f64>() / durations.len().max(1) as f64;
            lines.push(format!("  {stage}: avg {avg:.3}ms"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for StdoutMonitorLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorLogger for StdoutMonitorLogger {
    fn frame(&mut self, report: &StatusReport) {
        *self.status_frames.entry(report.status).or_default() += 1;
        if self.last_status != Some(report.status) {
            log::info!("Status: {}", report.status);
            self.last_status = Some(report.status);
        }
    }

    fn skipped(&mut self, reason: &str) {
        self.skipped += 1;
        log::debug!("Frame skipped: {reason}");
    }

    fn alert(&mut self, alert: &Alert) {
        *self.alerts.entry(alert.status).or_default() += 1;
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
