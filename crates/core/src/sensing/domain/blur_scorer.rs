use crate::shared::frame::GrayFrame;

/// Scores how much edge detail a frame has. Low values mean a uniform,
/// blurred or covered image.
pub trait BlurScorer: Send {
    fn score(&self, frame: &GrayFrame) -> f64;
}
