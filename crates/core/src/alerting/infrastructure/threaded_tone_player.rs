use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::alerting::domain::alert_channel::AlertChannel;
use crate::alerting::domain::alert_profile::AudioProfile;
use crate::alerting::domain::tone_player::TonePlayer;
use crate::alerting::domain::tone_sink::ToneSink;

/// Plays each alert on its own detached thread.
///
/// The monitor loop never waits on these threads; they end when the
/// pulse schedule runs out or their channel is silenced.
pub struct ThreadedTonePlayer {
    sink: Arc<dyn ToneSink>,
}

impl ThreadedTonePlayer {
    pub fn new(sink: Arc<dyn ToneSink>) -> Self {
        Self { sink }
    }
}

impl TonePlayer for ThreadedTonePlayer {
    fn play(&self, profile: AudioProfile, channel: AlertChannel) {
        if !channel.is_active() {
            return;
        }
        let sink = Arc::clone(&self.sink);
        let spawned = thread::Builder::new()
            .name("alert-tone".to_string())
            .spawn(move || {
                play_schedule(&*sink, &profile, &channel);
            });
        if let Err(e) = spawned {
            log::warn!("Could not start alert sound: {e}");
        }
    }
}

/// Plays `profile` pulse by pulse, checking `channel` before each one.
///
/// Returns the number of pulses played.
pub fn play_schedule(sink: &dyn ToneSink, profile: &AudioProfile, channel: &AlertChannel) -> usize {
    let mut played = 0;
    for pulse in profile.schedule() {
        if !channel.is_active() {
            break;
        }
        if let Err(e) = sink.tone(pulse.frequency_hz, pulse.duration_ms) {
            log::warn!("Tone generator failed: {e}");
            break;
        }
        played += 1;
        if pulse.pause_ms > 0 {
            thread::sleep(Duration::from_millis(pulse.pause_ms));
        }
    }
    log::debug!(
        "Alert sound ({} {}Hz) stopped after {played} pulses",
        profile.style,
        profile.frequency_hz
    );
    played
}
