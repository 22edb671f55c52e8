use serde::{Deserialize, Serialize};

const BEEP_PULSE_MS: u64 = 50;
const BUZZER_PULSE_MS: u64 = 40;
const BUZZER_PAUSE_MS: u64 = 20;
const SIREN_TONE_MS: u64 = 180;
const SIREN_LOW_RATIO: f64 = 0.7;

/// Pulse pattern of an alert tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    /// Back-to-back short pulses.
    Beep,
    /// Short pulses separated by silence.
    Buzzer,
    /// Alternating high and low tones.
    Siren,
}

impl std::fmt::Display for ToneStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToneStyle::Beep => write!(f, "beep"),
            ToneStyle::Buzzer => write!(f, "buzzer"),
            ToneStyle::Siren => write!(f, "siren"),
        }
    }
}

/// A tone request handed to the tone generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioProfile {
    pub frequency_hz: u32,
    pub duration_ms: u64,
    pub style: ToneStyle,
}

/// One tone followed by an optional silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub frequency_hz: u32,
    pub duration_ms: u64,
    pub pause_ms: u64,
}

impl AudioProfile {
    pub fn new(frequency_hz: u32, duration_ms: u64, style: ToneStyle) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            style,
        }
    }

    /// Expands the profile into its pulse sequence.
    ///
    /// Whole pattern cycles are emitted while the planned elapsed time is
    /// still below `duration_ms`, so the last cycle may overrun slightly.
    pub fn schedule(&self) -> Vec<Pulse> {
        let cycle = self.cycle();
        let cycle_ms: u64 = cycle.iter().map(|p| p.duration_ms + p.pause_ms).sum();
        if cycle_ms == 0 {
            return Vec::new();
        }

        let mut pulses = Vec::new();
        let mut planned_ms = 0;
        while planned_ms < self.duration_ms {
            pulses.extend_from_slice(&cycle);
            planned_ms += cycle_ms;
        }
        pulses
    }

    fn cycle(&self) -> Vec<Pulse> {
        let f = self.frequency_hz;
        match self.style {
            ToneStyle::Beep => vec![pulse(f, BEEP_PULSE_MS, 0)],
            ToneStyle::Buzzer => vec![pulse(f, BUZZER_PULSE_MS, BUZZER_PAUSE_MS)],
            ToneStyle::Siren => {
                let low = (f as f64 * SIREN_LOW_RATIO) as u32;
                vec![pulse(f, SIREN_TONE_MS, 0), pulse(low, SIREN_TONE_MS, 0)]
            }
        }
    }
}

fn pulse(frequency_hz: u32, duration_ms: u64, pause_ms: u64) -> Pulse {
    Pulse {
        frequency_hz,
        duration_ms,
        pause_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::beep(ToneStyle::Beep, 2200, 44)]
    #[case::buzzer(ToneStyle::Buzzer, 2000, 34)]
    #[case::siren(ToneStyle::Siren, 2200, 14)]
    #[case::beep_partial_cycle(ToneStyle::Beep, 120, 3)]
    fn test_schedule_length(#[case] style: ToneStyle, #[case] ms: u64, #[case] pulses: usize) {
        let profile = AudioProfile::new(1000, ms, style);
        assert_eq!(profile.schedule().len(), pulses);
    }

    #[test]
    fn test_beep_pulses_are_continuous() {
        let schedule = AudioProfile::new(500, 100, ToneStyle::Beep).schedule();
        assert!(schedule
            .iter()
            .all(|p| *p == pulse(500, BEEP_PULSE_MS, 0)));
    }

    #[test]
    fn test_buzzer_pauses_between_pulses() {
        let schedule = AudioProfile::new(2500, 60, ToneStyle::Buzzer).schedule();
        assert_eq!(schedule, vec![pulse(2500, 40, 20)]);
    }

    #[test]
    fn test_siren_alternates_high_and_low() {
        let schedule = AudioProfile::new(1500, 360, ToneStyle::Siren).schedule();
        let freqs: Vec<u32> = schedule.iter().map(|p| p.frequency_hz).collect();
        assert_eq!(freqs, vec![1500, 1050]);
    }

    #[test]
    fn test_zero_duration_is_silent() {
        assert!(AudioProfile::new(500, 0, ToneStyle::Beep).schedule().is_empty());
    }

    #[test]
    fn test_style_serializes_lowercase() {
        let json = serde_json::to_string(&AudioProfile::new(500, 10, ToneStyle::Siren)).unwrap();
        assert!(json.contains("\"siren\""));
    }
}
