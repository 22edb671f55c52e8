use crate::sensing::domain::blur_scorer::BlurScorer;
use crate::sensing::domain::eye_detector::EyeDetector;
use crate::sensing::domain::face_detector::FaceDetector;
use crate::sensing::domain::frame_source::{FrameSource, TimedFrame};
use crate::sensing::domain::measurement::{AcquisitionError, Measurement};
use crate::sensing::domain::measurement_source::MeasurementSource;
use crate::shared::bounding_box::BoundingBox;

/// Runs the signal adapters over each camera frame.
///
/// Eyes are searched only inside the primary face; frames without a face
/// report zero eyes.
pub struct FrameMeasurementSource {
    frames: Box<dyn FrameSource>,
    face_detector: Box<dyn FaceDetector>,
    eye_detector: Box<dyn EyeDetector>,
    blur_scorer: Box<dyn BlurScorer>,
}

impl FrameMeasurementSource {
    pub fn new(
        frames: Box<dyn FrameSource>,
        face_detector: Box<dyn FaceDetector>,
        eye_detector: Box<dyn EyeDetector>,
        blur_scorer: Box<dyn BlurScorer>,
    ) -> Self {
        Self {
            frames,
            face_detector,
            eye_detector,
            blur_scorer,
        }
    }
}

impl MeasurementSource for FrameMeasurementSource {
    fn measurements(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Measurement, AcquisitionError>> + '_> {
        let Self {
            frames,
            face_detector,
            eye_detector,
            blur_scorer,
        } = self;

        Box::new(frames.frames().map(move |timed| {
            let timed = timed.map_err(|e| AcquisitionError::Frame(e.to_string()))?;
            measure(
                &timed,
                face_detector.as_mut(),
                eye_detector.as_mut(),
                blur_scorer.as_ref(),
            )
        }))
    }
}

fn measure(
    timed: &TimedFrame,
    face_detector: &mut dyn FaceDetector,
    eye_detector: &mut dyn EyeDetector,
    blur_scorer: &dyn BlurScorer,
) -> Result<Measurement, AcquisitionError> {
    let frame = &timed.frame;
    let detector_error = |e: Box<dyn std::error::Error>| {
        AcquisitionError::Detector(format!("frame {}: {e}", frame.index()))
    };
    let blur_variance = blur_scorer.score(frame);
    let faces = face_detector.detect(frame).map_err(detector_error)?;

    let eyes_in_primary_face = match BoundingBox::primary(&faces) {
        Some(face) => eye_detector
            .count_eyes(&frame.crop(face))
            .map_err(detector_error)?,
        None => 0,
    };

    Ok(Measurement {
        captured_at: timed.captured_at,
        blur_variance,
        faces,
        eyes_in_primary_face,
    })
}
