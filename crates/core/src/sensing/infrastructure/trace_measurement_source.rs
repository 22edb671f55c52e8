use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::sensing::domain::measurement::{AcquisitionError, Measurement, SourceError};
use crate::sensing::domain::measurement_source::MeasurementSource;
use crate::sensing::infrastructure::min_size_face_filter::retain_min_size;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::clock::secs;

/// Latest accepted record timestamp, about 136 years into a recording.
const MAX_TRACE_SECS: f64 = u32::MAX as f64;

/// One line of a recorded measurement trace.
///
/// ```json
/// {"t": 1.5, "blur": 180.2, "faces": [{"x": 220, "y": 90, "w": 140, "h": 140}], "eyes": 2}
/// {"t": 1.6, "dropped": true}
/// ```
#[derive(Debug, Deserialize)]
struct TraceRecord {
    t: f64,
    #[serde(default)]
    blur: Option<f64>,
    #[serde(default)]
    faces: Vec<BoundingBox>,
    #[serde(default)]
    eyes: usize,
    /// The camera returned no frame at `t`.
    #[serde(default)]
    dropped: bool,
}

/// Replays measurements recorded as JSON lines, one frame per line.
///
/// Blank lines and lines starting with `#` are ignored. With real-time
/// pacing enabled, each record is held back until its `t` has elapsed
/// since the first record was read. Faces smaller than the configured
/// minimum size are dropped, as a live face detector would.
pub struct TraceMeasurementSource {
    reader: Box<dyn BufRead + Send>,
    realtime: bool,
    min_face_size: u32,
}

impl TraceMeasurementSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::MissingResource(path.to_path_buf())
            } else {
                SourceError::Unavailable {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            realtime: false,
            min_face_size: 0,
        }
    }

    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn with_min_face_size(mut self, min_face_size: u32) -> Self {
        self.min_face_size = min_face_size;
        self
    }
}

impl MeasurementSource for TraceMeasurementSource {
    fn measurements(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Measurement, AcquisitionError>> + '_> {
        let realtime = self.realtime;
        let min_face_size = self.min_face_size;
        let mut started: Option<Instant> = None;

        Box::new(
            BufRead::lines(self.reader.as_mut())
                .enumerate()
                .filter_map(move |(index, line)| {
                    let line_no = index + 1;
                    match line {
                        Ok(text) => {
                            let trimmed = text.trim();
                            if trimmed.is_empty() || trimmed.starts_with('#') {
                                None
                            } else {
                                Some(parse_line(trimmed, line_no, min_face_size))
                            }
                        }
                        Err(e) => Some(Err(AcquisitionError::Malformed {
                            line: line_no,
                            reason: e.to_string(),
                        })),
                    }
                })
                .map(move |result| {
                    if realtime {
                        if let Ok(m) = &result {
                            let start = *started.get_or_insert_with(Instant::now);
                            wait_until(start, m.captured_at);
                        }
                    }
                    result
                }),
        )
    }
}

/// Sleeps until `offset` after `start`. Offsets beyond what `Instant` can
/// represent return at once.
fn wait_until(start: Instant, offset: Duration) {
    if let Some(due) = start.checked_add(offset) {
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
    }
}

fn parse_line(
    text: &str,
    line: usize,
    min_face_size: u32,
) -> Result<Measurement, AcquisitionError> {
    let record: TraceRecord =
        serde_json::from_str(text).map_err(|e| AcquisitionError::Malformed {
            line,
            reason: e.to_string(),
        })?;

    if record.dropped {
        return Err(AcquisitionError::NoFrame);
    }
    if !record.t.is_finite() || record.t < 0.0 || record.t > MAX_TRACE_SECS {
        return Err(AcquisitionError::Malformed {
            line,
            reason: format!(
                "timestamp must be between 0 and {MAX_TRACE_SECS} seconds, got {}",
                record.t
            ),
        });
    }
    let blur_variance = record.blur.ok_or_else(|| AcquisitionError::Malformed {
        line,
        reason: "missing blur".to_string(),
    })?;

    Ok(Measurement {
        captured_at: secs(record.t),
        blur_variance,
        faces: retain_min_size(record.faces, min_face_size),
        eyes_in_primary_face: record.eyes,
    })
}
