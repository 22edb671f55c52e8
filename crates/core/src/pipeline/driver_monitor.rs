use std::time::Duration;

use crate::alerting::domain::alert_dispatcher::{Alert, AlertDispatcher};
use crate::liveness::domain::liveness_tracker::{LivenessTracker, LivenessVerdict};
use crate::monitoring::domain::presence_classifier::{Presence, PresenceClassifier};
use crate::monitoring::domain::status::StatusReport;
use crate::monitoring::domain::status_banner::StatusBanner;
use crate::monitoring::domain::status_machine::StatusMachine;
use crate::sensing::domain::measurement::Measurement;
use crate::shared::clock::{secs, WallClock};
use crate::shared::settings::MonitorSettings;

/// Result of evaluating one measurement.
#[derive(Debug, Clone)]
pub struct FrameOutcome {
    pub report: StatusReport,
    pub banner: StatusBanner,
    pub liveness: Option<LivenessVerdict>,
    pub alert: Option<Alert>,
}

/// Per-frame core: presence → liveness → status → alert.
pub struct DriverMonitor {
    classifier: PresenceClassifier,
    tracker: LivenessTracker,
    machine: StatusMachine,
    dispatcher: AlertDispatcher,
    clock: WallClock,
    absence_timeout: Duration,
}

impl DriverMonitor {
    pub fn new(settings: &MonitorSettings, dispatcher: AlertDispatcher, clock: WallClock) -> Self {
        Self {
            classifier: PresenceClassifier::new(settings.blocked_variance_threshold),
            tracker: LivenessTracker::new(settings.liveness_config()),
            machine: StatusMachine::new(),
            dispatcher,
            clock,
            absence_timeout: secs(settings.absence_timeout_secs),
        }
    }

    pub fn current(&self) -> Option<StatusReport> {
        self.machine.current()
    }

    pub fn tracker(&self) -> &LivenessTracker {
        &self.tracker
    }

    pub fn step(&mut self, measurement: &Measurement) -> FrameOutcome {
        let now = measurement.captured_at;
        let presence = self
            .classifier
            .classify(measurement.blur_variance, measurement.faces.len());

        let liveness = match (presence, measurement.primary_face()) {
            (Presence::Present, Some(face)) => {
                let verdict = self
                    .tracker
                    .update(now, face, measurement.eyes_in_primary_face);
                log::debug!(
                    "MoveDist: {:<4.1} | NoEyesFrames: {:<2}",
                    verdict.distance_moved,
                    verdict.no_eyes_streak
                );
                Some(verdict)
            }
            _ => {
                self.tracker.lose();
                None
            }
        };

        let report = self.machine.evaluate(now, presence, liveness.as_ref());
        let alert = self.dispatcher.maybe_alert(now, &report);
        let banner = StatusBanner::for_report(&report, now, self.absence_timeout, &self.clock);

        FrameOutcome {
            report,
            banner,
            liveness,
            alert,
        }
    }

    /// Stops any alert sound still playing.
    pub fn shutdown(&mut self) {
        self.dispatcher.silence();
    }
}
