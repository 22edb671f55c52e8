use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::alerting::domain::alert_log::AlertLog;

/// Appends alert lines to a text file, opening it per write.
///
/// Reopening means a log rotated or deleted mid-run is recreated on the
/// next alert.
pub struct FileAlertLog {
    path: PathBuf,
}

impl FileAlertLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AlertLog for FileAlertLog {
    fn append(&mut self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}
