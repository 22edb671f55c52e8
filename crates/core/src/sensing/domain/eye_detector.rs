use crate::shared::frame::GrayFrame;

/// Counts open eyes inside a face crop.
pub trait EyeDetector: Send {
    fn count_eyes(&mut self, face: &GrayFrame) -> Result<usize, Box<dyn std::error::Error>>;
}
