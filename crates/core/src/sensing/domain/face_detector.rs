use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::GrayFrame;

/// Finds face boxes in a frame. Order of the result is preserved downstream.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &GrayFrame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>>;
}
