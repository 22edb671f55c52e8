use std::time::Duration;

use crate::shared::frame::GrayFrame;

#[derive(Clone, Debug)]
pub struct TimedFrame {
    pub captured_at: Duration,
    pub frame: GrayFrame,
}

/// Camera or recording that yields grayscale frames in capture order.
pub trait FrameSource: Send {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<TimedFrame, Box<dyn std::error::Error>>> + '_>;
}
