/// Laplacian variance below which the lens is considered covered.
pub const BLOCKED_VARIANCE_THRESHOLD: f64 = 50.0;

/// Seconds without a recognised blink before the blink signal fails.
pub const LIVENESS_TIMEOUT_SECS: f64 = 5.0;
pub const BLINK_MIN_FRAMES: u32 = 3;
pub const BLINK_MAX_FRAMES: u32 = 8;

/// Seconds without face movement before the motion signal fails.
pub const LIVENESS_NO_MOVEMENT_SECS: f64 = 4.0;
/// Center displacement that counts as movement (absorbs camera jitter).
pub const STATIC_MOVEMENT_THRESHOLD_PIXELS: f64 = 4.0;

pub const FACE_ABSENT_SECS: f64 = 5.0;
pub const ALERT_REPEAT_SECS: f64 = 5.0;

/// Minimum face box side accepted from the face detector.
pub const MIN_FACE_SIZE_PIXELS: u32 = 60;

pub const SOUND_BLOCKED_FREQ_HZ: u32 = 500;
pub const SOUND_BLOCKED_DURATION_MS: u64 = 2200;
pub const SOUND_ABSENT_FREQ_HZ: u32 = 1500;
pub const SOUND_ABSENT_DURATION_MS: u64 = 2200;
pub const SOUND_STATIC_FREQ_HZ: u32 = 2500;
pub const SOUND_STATIC_DURATION_MS: u64 = 2000;

pub const LOG_FILE_NAME: &str = "driver_monitoring_log.txt";
pub const SETTINGS_DIR_NAME: &str = "DriverWatch";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
