use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alerting::domain::alert_profile::{AudioProfile, ToneStyle};
use crate::liveness::domain::liveness_tracker::LivenessConfig;
use crate::shared::clock::secs;
use crate::shared::constants::*;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Every tunable of the monitor. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub blocked_variance_threshold: f64,
    pub liveness_timeout_secs: f64,
    pub blink_min_frames: u32,
    pub blink_max_frames: u32,
    pub no_movement_timeout_secs: f64,
    pub movement_threshold_pixels: f64,
    /// Only affects banner severity; Absent alerts are rate-limited like the rest.
    pub absence_timeout_secs: f64,
    pub alert_repeat_secs: f64,
    pub min_face_size: u32,
    pub blocked_sound: AudioProfile,
    pub absent_sound: AudioProfile,
    pub static_sound: AudioProfile,
    pub log_path: PathBuf,
    pub timezone_label: Option<String>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            blocked_variance_threshold: BLOCKED_VARIANCE_THRESHOLD,
            liveness_timeout_secs: LIVENESS_TIMEOUT_SECS,
            blink_min_frames: BLINK_MIN_FRAMES,
            blink_max_frames: BLINK_MAX_FRAMES,
            no_movement_timeout_secs: LIVENESS_NO_MOVEMENT_SECS,
            movement_threshold_pixels: STATIC_MOVEMENT_THRESHOLD_PIXELS,
            absence_timeout_secs: FACE_ABSENT_SECS,
            alert_repeat_secs: ALERT_REPEAT_SECS,
            min_face_size: MIN_FACE_SIZE_PIXELS,
            blocked_sound: AudioProfile::new(
                SOUND_BLOCKED_FREQ_HZ,
                SOUND_BLOCKED_DURATION_MS,
                ToneStyle::Beep,
            ),
            absent_sound: AudioProfile::new(
                SOUND_ABSENT_FREQ_HZ,
                SOUND_ABSENT_DURATION_MS,
                ToneStyle::Siren,
            ),
            static_sound: AudioProfile::new(
                SOUND_STATIC_FREQ_HZ,
                SOUND_STATIC_DURATION_MS,
                ToneStyle::Buzzer,
            ),
            log_path: PathBuf::from(LOG_FILE_NAME),
            timezone_label: None,
        }
    }
}

impl MonitorSettings {
    /// `<config dir>/DriverWatch/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads from the default location, falling back to defaults when the
    /// file does not exist. A file that exists but is broken is an error.
    pub fn load() -> Result<Self, SettingsError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |e| SettingsError::Write {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, json).map_err(write_err)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.blink_min_frames > self.blink_max_frames {
            return Err(SettingsError::Invalid(format!(
                "blink_min_frames ({}) exceeds blink_max_frames ({})",
                self.blink_min_frames, self.blink_max_frames
            )));
        }
        let non_negative = [
            ("blocked_variance_threshold", self.blocked_variance_threshold),
            ("liveness_timeout_secs", self.liveness_timeout_secs),
            ("no_movement_timeout_secs", self.no_movement_timeout_secs),
            ("movement_threshold_pixels", self.movement_threshold_pixels),
            ("absence_timeout_secs", self.absence_timeout_secs),
            ("alert_repeat_secs", self.alert_repeat_secs),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        for (name, profile) in [
            ("blocked_sound", &self.blocked_sound),
            ("absent_sound", &self.absent_sound),
            ("static_sound", &self.static_sound),
        ] {
            if profile.frequency_hz == 0 || profile.duration_ms == 0 {
                return Err(SettingsError::Invalid(format!(
                    "{name} needs a positive frequency and duration"
                )));
            }
        }
        Ok(())
    }

    pub fn liveness_config(&self) -> LivenessConfig {
        LivenessConfig {
            blink_timeout: secs(self.liveness_timeout_secs),
            blink_min_frames: self.blink_min_frames,
            blink_max_frames: self.blink_max_frames,
            no_movement_timeout: secs(self.no_movement_timeout_secs),
            movement_threshold_pixels: self.movement_threshold_pixels,
        }
    }
}
