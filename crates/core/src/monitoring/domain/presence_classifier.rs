use crate::shared::constants::BLOCKED_VARIANCE_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Blocked,
    Absent,
    Present,
}

/// Maps the blur score and face count of a frame to a presence class.
///
/// Blocked wins over Absent: a covered lens reports no faces either.
#[derive(Debug, Clone, Copy)]
pub struct PresenceClassifier {
    blocked_threshold: f64,
}

impl PresenceClassifier {
    pub fn new(blocked_threshold: f64) -> Self {
        Self { blocked_threshold }
    }

    pub fn classify(&self, blur_variance: f64, face_count: usize) -> Presence {
        if blur_variance < self.blocked_threshold {
            Presence::Blocked
        } else if face_count == 0 {
            Presence::Absent
        } else {
            Presence::Present
        }
    }
}

impl Default for PresenceClassifier {
    fn default() -> Self {
        Self::new(BLOCKED_VARIANCE_THRESHOLD)
    }
}
