use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;

use driverwatch_core::alerting::domain::alert_channel::AlertChannel;
use driverwatch_core::alerting::domain::alert_dispatcher::{AlertConfig, AlertDispatcher};
use driverwatch_core::alerting::domain::alert_log::AlertLog;
use driverwatch_core::alerting::domain::alert_profile::AudioProfile;
use driverwatch_core::alerting::domain::tone_player::TonePlayer;
use driverwatch_core::monitoring::domain::status::Status;
use driverwatch_core::pipeline::driver_monitor::{DriverMonitor, FrameOutcome};
use driverwatch_core::sensing::domain::measurement::Measurement;
use driverwatch_core::sensing::domain::measurement_source::MeasurementSource;
use driverwatch_core::sensing::infrastructure::trace_measurement_source::TraceMeasurementSource;
use driverwatch_core::shared::bounding_box::BoundingBox;
use driverwatch_core::shared::clock::WallClock;
use driverwatch_core::shared::settings::MonitorSettings;

// --- Stubs ---

#[derive(Clone, Default)]
struct RecordingPlayer {
    channels: Arc<Mutex<Vec<AlertChannel>>>,
}

impl TonePlayer for RecordingPlayer {
    fn play(&self, _profile: AudioProfile, channel: AlertChannel) {
        self.channels.lock().unwrap().push(channel);
    }
}

#[derive(Clone, Default)]
struct MemoryLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl AlertLog for MemoryLog {
    fn append(&mut self, line: &str) -> std::io::Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

struct Harness {
    monitor: DriverMonitor,
    log: MemoryLog,
    player: RecordingPlayer,
}

impl Harness {
    fn new() -> Self {
        let settings = MonitorSettings::default();
        let clock = WallClock::new(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap(),
        );
        let log = MemoryLog::default();
        let player = RecordingPlayer::default();
        let dispatcher = AlertDispatcher::new(
            AlertConfig::from_settings(&settings, "IST".into()),
            Box::new(player.clone()),
            Box::new(log.clone()),
            clock,
        );
        Self {
            monitor: DriverMonitor::new(&settings, dispatcher, clock),
            log,
            player,
        }
    }

    fn step(&mut self, m: Measurement) -> FrameOutcome {
        self.monitor.step(&m)
    }

    fn log_lines(&self) -> Vec<String> {
        self.log.lines.lock().unwrap().clone()
    }
}

fn at(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn blocked(ms: u64) -> Measurement {
    Measurement {
        captured_at: at(ms),
        blur_variance: 10.0,
        faces: vec![],
        eyes_in_primary_face: 0,
    }
}

fn absent(ms: u64) -> Measurement {
    Measurement {
        captured_at: at(ms),
        blur_variance: 180.0,
        faces: vec![],
        eyes_in_primary_face: 0,
    }
}

fn face_at(ms: u64, x: u32, eyes: usize) -> Measurement {
    Measurement {
        captured_at: at(ms),
        blur_variance: 180.0,
        faces: vec![BoundingBox::new(x, 120, 140, 140)],
        eyes_in_primary_face: eyes,
    }
}

#[test]
fn blocked_for_three_frames_keeps_first_since() {
    let mut h = Harness::new();
    let outcomes: Vec<_> = [0, 100, 200].iter().map(|&t| h.step(blocked(t))).collect();

    for o in &outcomes {
        assert_eq!(o.report.status, Status::Blocked);
        assert_eq!(o.report.since, Some(at(0)));
    }
    assert_eq!(outcomes[2].banner.text, "ALERT: CAMERA BLOCKED since 07:00:00");
}

#[test]
fn absent_for_five_seconds_logs_once() {
    let mut h = Harness::new();
    for t in (0..=5000).step_by(1000) {
        h.step(absent(t));
    }
    assert_eq!(
        h.log_lines(),
        vec!["2024-06-01 07:00:00 (IST) | Driver Missing Alert (since 07:00:00)".to_string()]
    );

    // Past the repeat interval a sustained absence alerts again.
    h.step(absent(5100));
    assert_eq!(h.log_lines().len(), 2);
}

#[test]
fn blocked_frames_two_seconds_apart_log_once_six_seconds_apart_twice() {
    let mut h = Harness::new();
    h.step(blocked(0));
    h.step(blocked(2000));
    assert_eq!(h.log_lines().len(), 1);

    let mut h = Harness::new();
    h.step(blocked(0));
    h.step(blocked(6000));
    assert_eq!(h.log_lines().len(), 2);
}

#[test]
fn still_face_with_open_eyes_turns_static_once_after_five_seconds() {
    let mut h = Harness::new();
    let mut transitions = Vec::new();
    let mut prev = None;
    for t in (0..=6000).step_by(250) {
        let status = h.step(face_at(t, 200, 2)).report.status;
        if prev != Some(status) {
            transitions.push((t, status));
        }
        prev = Some(status);
    }

    assert_eq!(
        transitions,
        vec![(0, Status::Attentive), (5250, Status::Static)]
    );
    let lines = h.log_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("Static Image Alert (since 07:00:05)"));
}

#[test]
fn blinking_driver_stays_attentive_without_moving() {
    let mut h = Harness::new();
    let mut t = 0;
    while t <= 20_000 {
        // Eyes close for four 100ms frames once every three seconds.
        let eyes = if t % 3000 < 400 && t >= 3000 { 0 } else { 2 };
        let outcome = h.step(face_at(t, 200, eyes));
        assert_eq!(outcome.report.status, Status::Attentive, "at {t}ms");
        t += 100;
    }
    assert!(h.log_lines().is_empty());
}

#[test]
fn moving_driver_stays_attentive_without_blinking() {
    let mut h = Harness::new();
    for (i, t) in (0..=15_000).step_by(500).enumerate() {
        // Sway 10px every other second.
        let x = if (i / 4) % 2 == 0 { 200 } else { 210 };
        let outcome = h.step(face_at(t, x, 2));
        assert_eq!(outcome.report.status, Status::Attentive, "at {t}ms");
    }
}

#[test]
fn reacquired_face_is_never_static_on_first_frame() {
    let mut h = Harness::new();
    for t in (0..=7000).step_by(500) {
        h.step(face_at(t, 200, 2));
    }
    assert_eq!(h.monitor.current().unwrap().status, Status::Static);

    h.step(absent(7500));
    assert!(h.monitor.tracker().tracked_face().is_none());

    let outcome = h.step(face_at(8000, 200, 2));
    assert_eq!(outcome.report.status, Status::Attentive);
    assert!(outcome.liveness.unwrap().alive);
}

#[test]
fn blocked_frame_also_resets_tracking() {
    let mut h = Harness::new();
    h.step(face_at(0, 200, 2));
    h.step(blocked(100));
    assert!(h.monitor.tracker().tracked_face().is_none());
}

#[test]
fn returning_to_attentive_silences_alert_sound() {
    let mut h = Harness::new();
    h.step(blocked(0));
    assert!(h.player.channels.lock().unwrap()[0].is_active());

    h.step(face_at(500, 200, 2));
    assert!(!h.player.channels.lock().unwrap()[0].is_active());
}

#[test]
fn at_most_one_since_across_mixed_sequence() {
    let mut h = Harness::new();
    let frames = vec![
        blocked(0),
        absent(500),
        face_at(1000, 200, 2),
        absent(1500),
        absent(2000),
        blocked(2500),
    ];
    let sinces: Vec<_> = frames
        .into_iter()
        .map(|m| h.step(m).report.since)
        .collect();
    assert_eq!(
        sinces,
        vec![
            Some(at(0)),
            Some(at(500)),
            None,
            Some(at(1500)),
            Some(at(1500)),
            Some(at(2500)),
        ]
    );
}

#[test]
fn replayed_face_below_minimum_size_counts_as_absent() {
    let mut h = Harness::new();
    let trace = r#"{"t": 0.0, "blur": 180.0, "faces": [{"x": 300, "y": 200, "w": 40, "h": 40}], "eyes": 2}"#;
    let mut source = TraceMeasurementSource::from_reader(std::io::Cursor::new(trace))
        .with_min_face_size(MonitorSettings::default().min_face_size);

    let statuses: Vec<Status> = source
        .measurements()
        .map(|m| h.step(m.unwrap()).report.status)
        .collect();

    assert_eq!(statuses, vec![Status::Absent]);
}

#[test]
fn far_future_timestamp_still_alerts() {
    let mut h = Harness::new();
    let far = Duration::from_secs(10_000_000_000_000);
    let outcome = h.step(Measurement {
        captured_at: far,
        ..blocked(0)
    });

    assert_eq!(outcome.report.status, Status::Blocked);
    assert!(outcome.alert.is_some());
    assert_eq!(h.log_lines().len(), 1);
}
