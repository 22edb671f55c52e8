use std::time::Duration;

use super::alert_channel::AlertChannel;
use super::alert_log::{format_log_line, AlertLog};
use super::alert_profile::AudioProfile;
use super::tone_player::TonePlayer;
use crate::monitoring::domain::status::{Status, StatusReport};
use crate::shared::clock::{secs, WallClock};
use crate::shared::settings::MonitorSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct AlertConfig {
    /// Minimum time between two alerts, whatever their status.
    pub repeat_interval: Duration,
    pub blocked_sound: AudioProfile,
    pub absent_sound: AudioProfile,
    pub static_sound: AudioProfile,
    pub timezone_label: String,
}

impl AlertConfig {
    pub fn from_settings(settings: &MonitorSettings, timezone_label: String) -> Self {
        Self {
            repeat_interval: secs(settings.alert_repeat_secs),
            blocked_sound: settings.blocked_sound,
            absent_sound: settings.absent_sound,
            static_sound: settings.static_sound,
            timezone_label,
        }
    }

    fn sound_for(&self, status: Status) -> Option<AudioProfile> {
        match status {
            Status::Blocked => Some(self.blocked_sound),
            Status::Absent => Some(self.absent_sound),
            Status::Static => Some(self.static_sound),
            Status::Attentive => None,
        }
    }
}

/// Process-wide alert bookkeeping.
#[derive(Debug, Default)]
pub struct AlertState {
    pub last_alert_at: Option<Duration>,
    /// Channel of the most recent audio emission.
    pub channel: AlertChannel,
}

/// An alert that was raised this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub status: Status,
    pub message: String,
    pub log_line: String,
    pub sound: AudioProfile,
}

/// Decides when to raise alerts and fans them out to audio and the log.
pub struct AlertDispatcher {
    config: AlertConfig,
    state: AlertState,
    player: Box<dyn TonePlayer>,
    log: Box<dyn AlertLog>,
    clock: WallClock,
}

impl AlertDispatcher {
    pub fn new(
        config: AlertConfig,
        player: Box<dyn TonePlayer>,
        log: Box<dyn AlertLog>,
        clock: WallClock,
    ) -> Self {
        Self {
            config,
            state: AlertState::default(),
            player,
            log,
            clock,
        }
    }

    pub fn state(&self) -> &AlertState {
        &self.state
    }

    /// Raises at most one alert for this frame.
    ///
    /// `Attentive` silences any sound still playing and never alerts.
    /// Other statuses alert whenever more than `repeat_interval` has passed
    /// since the previous alert, so a sustained condition keeps re-alerting.
    pub fn maybe_alert(&mut self, now: Duration, report: &StatusReport) -> Option<Alert> {
        let Some(sound) = self.config.sound_for(report.status) else {
            self.state.channel.silence();
            return None;
        };

        let due = self
            .state
            .last_alert_at
            .map_or(true, |last| now.saturating_sub(last) > self.config.repeat_interval);
        if !due {
            return None;
        }

        let since = self.clock.time_of_day(report.since.unwrap_or(now));
        let message = alert_message(report.status, &since);
        let log_line = format_log_line(
            &self.clock.timestamp(now),
            &self.config.timezone_label,
            &message,
        );

        // A new alert pre-empts whatever is still playing.
        self.state.channel.silence();
        self.state.channel = AlertChannel::open();
        self.player.play(sound, self.state.channel.clone());

        if let Err(e) = self.log.append(&log_line) {
            log::warn!("Failed to append alert log: {e}");
        }
        log::info!("LOG: {log_line}");
        self.state.last_alert_at = Some(now);

        Some(Alert {
            status: report.status,
            message,
            log_line,
            sound,
        })
    }

    /// Stops any sound in flight, e.g. on shutdown.
    pub fn silence(&mut self) {
        self.state.channel.silence();
    }
}

fn alert_message(status: Status, since: &str) -> String {
    let title = match status {
        Status::Blocked => "Camera Blocked Alert",
        Status::Absent => "Driver Missing Alert",
        Status::Static => "Static Image Alert",
        Status::Attentive => "Driver Attentive",
    };
    format!("{title} (since {since})")
}
