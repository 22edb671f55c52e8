use std::time::Instant;

use super::driver_monitor::DriverMonitor;
use super::monitor_logger::MonitorLogger;
use crate::monitoring::domain::status_banner::{StatusBanner, StatusDisplay};
use crate::sensing::domain::measurement_source::MeasurementSource;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub frames_evaluated: usize,
    pub frames_skipped: usize,
    pub alerts_raised: usize,
}

/// Monitoring loop: pull measurement → evaluate → display, until the
/// source runs dry.
///
/// Frames the source fails to deliver are skipped without touching any
/// state; they never end the run.
pub struct MonitorUseCase {
    source: Box<dyn MeasurementSource>,
    monitor: DriverMonitor,
    display: Box<dyn StatusDisplay>,
    logger: Box<dyn MonitorLogger>,
}

impl MonitorUseCase {
    pub fn new(
        source: Box<dyn MeasurementSource>,
        monitor: DriverMonitor,
        display: Box<dyn StatusDisplay>,
        logger: Box<dyn MonitorLogger>,
    ) -> Self {
        Self {
            source,
            monitor,
            display,
            logger,
        }
    }

    pub fn monitor(&self) -> &DriverMonitor {
        &self.monitor
    }

    pub fn execute(&mut self) -> RunStats {
        let Self {
            source,
            monitor,
            display,
            logger,
        } = self;
        let mut stats = RunStats::default();

        display.show(&StatusBanner::initializing());

        for item in source.measurements() {
            let measurement = match item {
                Ok(m) => m,
                Err(e) => {
                    stats.frames_skipped += 1;
                    logger.skipped(&e.to_string());
                    continue;
                }
            };

            let started = Instant::now();
            let outcome = monitor.step(&measurement);
            logger.timing("evaluate", started.elapsed().as_secs_f64() * 1000.0);

            stats.frames_evaluated += 1;
            logger.frame(&outcome.report);
            if let Some(alert) = &outcome.alert {
                stats.alerts_raised += 1;
                logger.alert(alert);
            }
            display.show(&outcome.banner);
        }

        monitor.shutdown();
        logger.summary();
        stats
    }
}
