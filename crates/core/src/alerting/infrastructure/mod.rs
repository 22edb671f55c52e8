pub mod console_tone_sink;
pub mod file_alert_log;
pub mod threaded_tone_player;
