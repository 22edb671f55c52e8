use std::time::Duration;

use super::presence_classifier::Presence;
use super::status::{Status, StatusReport};
use crate::liveness::domain::liveness_tracker::LivenessVerdict;

/// Fuses presence and liveness into one status per frame.
///
/// The status itself is recomputed from scratch every frame; only the
/// `since` stamp depends on history. A single slot holds it, so at most
/// one status has a live `since` and re-entering a status starts over.
#[derive(Debug, Default)]
pub struct StatusMachine {
    current: Option<StatusReport>,
}

impl StatusMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the first frame has been evaluated.
    pub fn current(&self) -> Option<StatusReport> {
        self.current
    }

    /// `liveness` is only consulted when `presence` is `Present`; a present
    /// face without a verdict counts as live.
    pub fn evaluate(
        &mut self,
        now: Duration,
        presence: Presence,
        liveness: Option<&LivenessVerdict>,
    ) -> StatusReport {
        let status = match presence {
            Presence::Blocked => Status::Blocked,
            Presence::Absent => Status::Absent,
            Presence::Present => {
                if liveness.map_or(true, |v| v.alive) {
                    Status::Attentive
                } else {
                    Status::Static
                }
            }
        };

        let report = match self.current {
            Some(prev) if prev.status == status => prev,
            _ => {
                let report = StatusReport {
                    status,
                    since: status.is_alertable().then_some(now),
                };
                log::debug!("Status changed to {status}");
                report
            }
        };
        self.current = Some(report);
        report
    }
}
