/// Append-only persistent record of raised alerts, one line per alert.
pub trait AlertLog: Send {
    fn append(&mut self, line: &str) -> std::io::Result<()>;
}

/// `<YYYY-MM-DD HH:MM:SS> (<timezone label>) | <message>`
pub fn format_log_line(timestamp: &str, timezone_label: &str, message: &str) -> String {
    format!("{timestamp} ({timezone_label}) | {message}")
}
