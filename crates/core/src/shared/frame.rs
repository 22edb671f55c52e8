use ndarray::ArrayView2;

use crate::shared::bounding_box::BoundingBox;

/// A single grayscale camera frame: one luminance byte per pixel, row-major.
///
/// Colour conversion happens at acquisition; detectors and the blur
/// scorer only ever see luminance.
#[derive(Clone, Debug)]
pub struct GrayFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl GrayFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "data length must equal width * height"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies the sub-image under `region` (clamped to the frame) into a new frame.
    pub fn crop(&self, region: &BoundingBox) -> GrayFrame {
        let r = region.clamp_to(self.width, self.height);
        let (top, left) = (r.y as usize, r.x as usize);
        let (bottom, right) = (top + r.h as usize, left + r.w as usize);
        let view = self.as_ndarray();
        let sub = view.slice(ndarray::s![top..bottom, left..right]);
        GrayFrame::new(sub.iter().copied().collect(), r.w, r.h, self.index)
    }
}
