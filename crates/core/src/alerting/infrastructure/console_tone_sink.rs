use std::io::Write;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::alerting::domain::tone_sink::ToneSink;

/// Rings the terminal bell once per pulse and holds for the pulse length.
///
/// Terminals cannot change the bell pitch, so frequency is only logged.
/// The bell goes to stdout so it never lands inside the status line on stderr.
pub struct ConsoleToneSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleToneSink {
    pub fn stdout() -> Self {
        Self::to_writer(std::io::stdout())
    }

    pub fn to_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }
}

impl ToneSink for ConsoleToneSink {
    fn tone(
        &self,
        frequency_hz: u32,
        duration_ms: u64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        log::trace!("tone {frequency_hz}Hz for {duration_ms}ms");
        {
            let mut out = self.out.lock().map_err(|_| "bell writer poisoned")?;
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        thread::sleep(Duration::from_millis(duration_ms));
        Ok(())
    }
}

/// Keeps the pulse timing but makes no sound.
pub struct MutedToneSink;

impl ToneSink for MutedToneSink {
    fn tone(
        &self,
        _frequency_hz: u32,
        duration_ms: u64,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        thread::sleep(Duration::from_millis(duration_ms));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_sink_rings_bell_on_its_own_writer() {
        let buffer = SharedBuffer::default();
        let sink = ConsoleToneSink::to_writer(buffer.clone());
        sink.tone(500, 1).unwrap();
        sink.tone(500, 1).unwrap();
        assert_eq!(buffer.0.lock().unwrap().as_slice(), b"\x07\x07");
    }

    #[test]
    fn test_muted_sink_blocks_for_pulse_duration() {
        let start = Instant::now();
        MutedToneSink.tone(500, 30).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
