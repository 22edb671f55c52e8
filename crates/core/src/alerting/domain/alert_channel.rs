use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared between the monitor loop and one
/// audio emission.
///
/// The loop is the only writer; the audio thread polls it between pulses,
/// so a pulse already playing finishes after `silence()`.
#[derive(Clone, Debug, Default)]
pub struct AlertChannel {
    active: Arc<AtomicBool>,
}

impl AlertChannel {
    /// A channel that starts out active.
    pub fn open() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    pub fn silence(&self) {
        self.active.store(false, Ordering::Relaxed);
    }
}
