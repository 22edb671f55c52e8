/// Tone generator: plays one pulse at `frequency_hz`, blocking for its duration.
///
/// Shared by every audio emission thread, hence `&self` and `Sync`.
pub trait ToneSink: Send + Sync {
    fn tone(
        &self,
        frequency_hz: u32,
        duration_ms: u64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
