use super::alert_channel::AlertChannel;
use super::alert_profile::AudioProfile;

/// Starts an alert sound without blocking the caller.
///
/// Playback stops early once `channel` is silenced. Completion or failure
/// of playback is never reported back.
pub trait TonePlayer: Send {
    fn play(&self, profile: AudioProfile, channel: AlertChannel);
}
