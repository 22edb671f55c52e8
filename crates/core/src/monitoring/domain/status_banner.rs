use std::time::Duration;

use super::status::{Status, StatusReport};
use crate::shared::clock::WallClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Initializing,
    Ok,
    Warning,
    Critical,
}

impl Severity {
    /// Display colour as RGB.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Severity::Initializing => (0, 255, 255),
            Severity::Ok => (0, 255, 0),
            Severity::Warning => (255, 100, 0),
            Severity::Critical => (255, 0, 0),
        }
    }
}

/// One line of on-screen status text with its severity tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub text: String,
    pub severity: Severity,
}

impl StatusBanner {
    pub fn initializing() -> Self {
        Self {
            text: "Initializing...".to_string(),
            severity: Severity::Initializing,
        }
    }

    /// Banner for an evaluated frame.
    ///
    /// An Absent driver stays at `Warning` until the absence has lasted
    /// longer than `absence_timeout`, then escalates to `Critical`.
    pub fn for_report(
        report: &StatusReport,
        now: Duration,
        absence_timeout: Duration,
        clock: &WallClock,
    ) -> Self {
        let since = clock.time_of_day(report.since.unwrap_or(now));
        match report.status {
            Status::Blocked => Self {
                text: format!("ALERT: CAMERA BLOCKED since {since}"),
                severity: Severity::Critical,
            },
            Status::Absent => {
                let absent_for = now.saturating_sub(report.since.unwrap_or(now));
                Self {
                    text: format!("ALERT: DRIVER MISSING since {since}"),
                    severity: if absent_for > absence_timeout {
                        Severity::Critical
                    } else {
                        Severity::Warning
                    },
                }
            }
            Status::Static => Self {
                text: format!("ALERT: STATIC IMAGE since {since}"),
                severity: Severity::Warning,
            },
            Status::Attentive => Self {
                text: "Status: OK | Driver Attentive".to_string(),
                severity: Severity::Ok,
            },
        }
    }
}

/// On-screen status surface, refreshed once per frame.
pub trait StatusDisplay: Send {
    fn show(&mut self, banner: &StatusBanner);
}

/// Discards every banner.
pub struct NullStatusDisplay;

impl StatusDisplay for NullStatusDisplay {
    fn show(&mut self, _banner: &StatusBanner) {}
}
