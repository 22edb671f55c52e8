use std::time::Duration;

use chrono::{Local, NaiveDateTime};

/// Maps monitor-relative timestamps onto local wall-clock time.
///
/// The core runs on offsets from monitor start so that tests and trace
/// replays are deterministic; only log and banner text need real time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallClock {
    origin: NaiveDateTime,
}

impl WallClock {
    pub fn new(origin: NaiveDateTime) -> Self {
        Self { origin }
    }

    pub fn starting_now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Wall-clock time `offset` after the origin, saturating at the latest
    /// representable date.
    pub fn at(&self, offset: Duration) -> NaiveDateTime {
        chrono::Duration::from_std(offset)
            .ok()
            .and_then(|d| self.origin.checked_add_signed(d))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// `HH:MM:SS` for the given offset.
    pub fn time_of_day(&self, offset: Duration) -> String {
        self.at(offset).format("%H:%M:%S").to_string()
    }

    /// `YYYY-MM-DD HH:MM:SS` for the given offset.
    pub fn timestamp(&self, offset: Duration) -> String {
        self.at(offset).format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Label written next to log timestamps when none is configured, e.g. `+05:30`.
pub fn local_timezone_label() -> String {
    Local::now().format("%:z").to_string()
}

/// Duration from fractional seconds, clamping negatives and NaN to zero.
pub fn secs(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}
