//! Two-signal liveness check for the currently tracked face.
//!
//! A face is judged live while either its blink cadence or its position
//! has changed recently. Blink detection misses behind glasses or in low
//! light and motion detection is fooled by camera vibration, so only a
//! joint silence of both signals marks the subject as a static image.
//!
//! Identity is positional: the tracker keeps a single [`TrackedFace`]
//! while some face is visible on consecutive frames and cannot tell the
//! same person moving from a different person appearing in the same spot.

use std::time::Duration;

use crate::shared::bounding_box::{distance, BoundingBox};
use crate::shared::clock::secs;
use crate::shared::constants::{
    BLINK_MAX_FRAMES, BLINK_MIN_FRAMES, LIVENESS_NO_MOVEMENT_SECS, LIVENESS_TIMEOUT_SECS,
    STATIC_MOVEMENT_THRESHOLD_PIXELS,
};

#[derive(Clone, Debug, PartialEq)]
pub struct LivenessConfig {
    pub blink_timeout: Duration,
    /// Inclusive band of eyes-missing frames that counts as a blink.
    pub blink_min_frames: u32,
    pub blink_max_frames: u32,
    pub no_movement_timeout: Duration,
    pub movement_threshold_pixels: f64,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            blink_timeout: secs(LIVENESS_TIMEOUT_SECS),
            blink_min_frames: BLINK_MIN_FRAMES,
            blink_max_frames: BLINK_MAX_FRAMES,
            no_movement_timeout: secs(LIVENESS_NO_MOVEMENT_SECS),
            movement_threshold_pixels: STATIC_MOVEMENT_THRESHOLD_PIXELS,
        }
    }
}

/// Blink and motion history of the face being tracked.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedFace {
    pub center: (i64, i64),
    pub last_blink_at: Duration,
    pub last_motion_at: Duration,
    pub no_eyes_streak: u32,
}

impl TrackedFace {
    /// Fresh tracking state: both signals count as just observed.
    fn acquire(now: Duration, face: &BoundingBox) -> Self {
        Self {
            center: face.center(),
            last_blink_at: now,
            last_motion_at: now,
            no_eyes_streak: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LivenessVerdict {
    pub alive: bool,
    /// Center displacement since the previous frame; zero on acquisition.
    pub distance_moved: f64,
    pub no_eyes_streak: u32,
}

pub struct LivenessTracker {
    config: LivenessConfig,
    face: Option<TrackedFace>,
}

impl LivenessTracker {
    pub fn new(config: LivenessConfig) -> Self {
        Self { config, face: None }
    }

    pub fn tracked_face(&self) -> Option<&TrackedFace> {
        self.face.as_ref()
    }

    /// Drops the tracked face. The next `update` starts a new one.
    pub fn lose(&mut self) {
        if self.face.take().is_some() {
            log::debug!("Face lost; tracking reset");
        }
    }

    /// Folds one frame with a visible face into the history.
    ///
    /// `primary_face` is the largest detected face and `eyes_detected` the
    /// number of eyes found inside it.
    pub fn update(
        &mut self,
        now: Duration,
        primary_face: &BoundingBox,
        eyes_detected: usize,
    ) -> LivenessVerdict {
        let config = &self.config;
        let acquired = self.face.is_none();
        let face = self
            .face
            .get_or_insert_with(|| TrackedFace::acquire(now, primary_face));

        if eyes_detected > 0 {
            let streak = face.no_eyes_streak;
            if (config.blink_min_frames..=config.blink_max_frames).contains(&streak) {
                face.last_blink_at = now;
            }
            face.no_eyes_streak = 0;
        } else {
            face.no_eyes_streak = face.no_eyes_streak.saturating_add(1);
        }

        let center = primary_face.center();
        let distance_moved = if acquired {
            0.0
        } else {
            distance(center, face.center)
        };
        if distance_moved > config.movement_threshold_pixels {
            face.last_motion_at = now;
        }
        face.center = center;

        let no_blink = now.saturating_sub(face.last_blink_at) > config.blink_timeout;
        let no_motion = now.saturating_sub(face.last_motion_at) > config.no_movement_timeout;

        LivenessVerdict {
            alive: !(no_blink && no_motion),
            distance_moved,
            no_eyes_streak: face.no_eyes_streak,
        }
    }
}

impl Default for LivenessTracker {
    fn default() -> Self {
        Self::new(LivenessConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn face_at(x: u32, y: u32) -> BoundingBox {
        BoundingBox::new(x, y, 100, 100)
    }

    /// Feeds `streak` eyes-closed frames then one eyes-open frame, 100ms apart.
    fn blink_with_streak(tracker: &mut LivenessTracker, start: u64, streak: u32) -> Duration {
        let face = face_at(100, 100);
        let mut t = start;
        for _ in 0..streak {
            tracker.update(ms(t), &face, 0);
            t += 100;
        }
        tracker.update(ms(t), &face, 2);
        ms(t)
    }

    #[test]
    fn test_first_update_acquires_face() {
        let mut tracker = LivenessTracker::default();
        let verdict = tracker.update(ms(1000), &face_at(10, 20), 2);
        assert!(verdict.alive);
        assert_relative_eq!(verdict.distance_moved, 0.0);
        let face = tracker.tracked_face().unwrap();
        assert_eq!(face.center, (60, 70));
        assert_eq!(face.last_blink_at, ms(1000));
        assert_eq!(face.last_motion_at, ms(1000));
        assert_eq!(face.no_eyes_streak, 0);
    }

    #[test]
    fn test_missing_eyes_grow_streak() {
        let mut tracker = LivenessTracker::default();
        let face = face_at(0, 0);
        tracker.update(ms(0), &face, 0);
        let verdict = tracker.update(ms(100), &face, 0);
        assert_eq!(verdict.no_eyes_streak, 2);
    }

    #[rstest]
    #[case::band_low(3, true)]
    #[case::band_mid(5, true)]
    #[case::band_high(8, true)]
    #[case::too_short(2, false)]
    #[case::too_long(9, false)]
    #[case::no_gap(0, false)]
    fn test_blink_band(#[case] streak: u32, #[case] recognised: bool) {
        let mut tracker = LivenessTracker::default();
        tracker.update(ms(0), &face_at(100, 100), 2);
        let reopened_at = blink_with_streak(&mut tracker, 100, streak);

        let face = tracker.tracked_face().unwrap();
        assert_eq!(face.no_eyes_streak, 0);
        if recognised {
            assert_eq!(face.last_blink_at, reopened_at);
        } else {
            assert_eq!(face.last_blink_at, ms(0));
        }
    }

    #[test]
    fn test_movement_above_threshold_refreshes_motion() {
        let mut tracker = LivenessTracker::default();
        tracker.update(ms(0), &face_at(100, 100), 2);
        let verdict = tracker.update(ms(500), &face_at(103, 104), 2);
        assert_relative_eq!(verdict.distance_moved, 5.0);
        assert_eq!(tracker.tracked_face().unwrap().last_motion_at, ms(500));
    }

    #[test]
    fn test_movement_at_threshold_is_jitter() {
        let mut tracker = LivenessTracker::default();
        tracker.update(ms(0), &face_at(100, 100), 2);
        let verdict = tracker.update(ms(500), &face_at(104, 100), 2);
        assert_relative_eq!(verdict.distance_moved, 4.0);
        assert_eq!(tracker.tracked_face().unwrap().last_motion_at, ms(0));
    }

    #[test]
    fn test_small_drift_measured_frame_to_frame() {
        // 3px per frame never exceeds the threshold even though it accumulates.
        let mut tracker = LivenessTracker::default();
        for i in 0..5u32 {
            tracker.update(ms(i as u64 * 100), &face_at(100 + i * 3, 100), 2);
        }
        assert_eq!(tracker.tracked_face().unwrap().last_motion_at, ms(0));
    }

    #[test]
    fn test_static_face_with_open_eyes_turns_non_live_after_both_timeouts() {
        let mut tracker = LivenessTracker::default();
        let face = face_at(200, 150);
        tracker.update(ms(0), &face, 2);

        // Motion has failed (>4s) but the blink window (5s) is still open.
        assert!(tracker.update(ms(4500), &face, 2).alive);
        // Exactly at the blink timeout: strict comparison keeps it live.
        assert!(tracker.update(ms(5000), &face, 2).alive);
        assert!(!tracker.update(ms(5100), &face, 2).alive);
    }

    #[test]
    fn test_recent_blink_alone_keeps_face_live() {
        let mut tracker = LivenessTracker::default();
        tracker.update(ms(0), &face_at(100, 100), 2);
        let blink_at = blink_with_streak(&mut tracker, 4000, 4);
        assert!(tracker.update(blink_at + ms(4000), &face_at(100, 100), 2).alive);
    }

    #[test]
    fn test_recent_motion_alone_keeps_face_live() {
        let mut tracker = LivenessTracker::default();
        tracker.update(ms(0), &face_at(100, 100), 2);
        tracker.update(ms(5000), &face_at(120, 100), 2);
        assert!(tracker.update(ms(8000), &face_at(120, 100), 2).alive);
        assert!(!tracker.update(ms(9100), &face_at(120, 100), 2).alive);
    }

    #[test]
    fn test_reacquisition_resets_history() {
        let mut tracker = LivenessTracker::default();
        let face = face_at(100, 100);
        tracker.update(ms(0), &face, 0);
        assert!(!tracker.update(ms(10_000), &face, 0).alive);

        tracker.lose();
        assert!(tracker.tracked_face().is_none());

        let verdict = tracker.update(ms(12_000), &face, 0);
        assert!(verdict.alive);
        assert_relative_eq!(verdict.distance_moved, 0.0);
        let tracked = tracker.tracked_face().unwrap();
        assert_eq!(tracked.last_blink_at, ms(12_000));
        assert_eq!(tracked.no_eyes_streak, 1);
    }

    #[test]
    fn test_custom_band() {
        let mut tracker = LivenessTracker::new(LivenessConfig {
            blink_min_frames: 1,
            blink_max_frames: 2,
            ..LivenessConfig::default()
        });
        tracker.update(ms(0), &face_at(100, 100), 2);
        let at = blink_with_streak(&mut tracker, 100, 1);
        assert_eq!(tracker.tracked_face().unwrap().last_blink_at, at);
    }
}
