use crate::sensing::domain::face_detector::FaceDetector;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::GrayFrame;

/// Decorator that drops faces smaller than `min_size` on either side.
///
/// Distant faces in the back seat or on billboards would otherwise be
/// picked up as the driver.
pub struct MinSizeFaceFilter {
    inner: Box<dyn FaceDetector>,
    min_size: u32,
}

impl MinSizeFaceFilter {
    pub fn new(inner: Box<dyn FaceDetector>, min_size: u32) -> Self {
        Self { inner, min_size }
    }
}

impl FaceDetector for MinSizeFaceFilter {
    fn detect(&mut self, frame: &GrayFrame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        let faces = self.inner.detect(frame)?;
        Ok(retain_min_size(faces, self.min_size))
    }
}

/// Keeps faces at least `min_size` on both sides, preserving order.
pub fn retain_min_size(mut faces: Vec<BoundingBox>, min_size: u32) -> Vec<BoundingBox> {
    faces.retain(|f| f.w >= min_size && f.h >= min_size);
    faces
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDetector(Vec<BoundingBox>);

    impl FaceDetector for FixedDetector {
        fn detect(&mut self, _: &GrayFrame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
            Ok(self.0.clone())
        }
    }

    struct FailingDetector;

    impl FaceDetector for FailingDetector {
        fn detect(&mut self, _: &GrayFrame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
            Err("model crashed".into())
        }
    }

    fn frame() -> GrayFrame {
        GrayFrame::new(vec![0; 4], 2, 2, 0)
    }

    #[test]
    fn test_drops_small_faces_and_keeps_order() {
        let faces = vec![
            BoundingBox::new(0, 0, 80, 80),
            BoundingBox::new(0, 0, 59, 100),
            BoundingBox::new(0, 0, 60, 60),
        ];
        let mut filter = MinSizeFaceFilter::new(Box::new(FixedDetector(faces)), 60);
        let kept = filter.detect(&frame()).unwrap();
        assert_eq!(
            kept,
            vec![BoundingBox::new(0, 0, 80, 80), BoundingBox::new(0, 0, 60, 60)]
        );
    }

    #[test]
    fn test_propagates_detector_errors() {
        let mut filter = MinSizeFaceFilter::new(Box::new(FailingDetector), 60);
        assert!(filter.detect(&frame()).is_err());
    }
}
