use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::shared::bounding_box::BoundingBox;

/// Everything the core needs from one camera frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    /// Offset of the frame from monitor start.
    pub captured_at: Duration,
    pub blur_variance: f64,
    /// Detected faces in detector order.
    pub faces: Vec<BoundingBox>,
    pub eyes_in_primary_face: usize,
}

impl Measurement {
    pub fn primary_face(&self) -> Option<&BoundingBox> {
        BoundingBox::primary(&self.faces)
    }
}

/// One frame could not be measured. The monitor skips it and carries on.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("no frame returned by the camera")]
    NoFrame,
    #[error("frame source failed: {0}")]
    Frame(String),
    #[error("detector failed: {0}")]
    Detector(String),
    #[error("malformed measurement on line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// The measurement source cannot run at all. Fatal at startup.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("could not open measurement source {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("measurement source not found: {0}")]
    MissingResource(PathBuf),
}
