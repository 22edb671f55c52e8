use ndarray::ArrayView2;

use crate::sensing::domain::blur_scorer::BlurScorer;
use crate::shared::frame::GrayFrame;

/// Variance of the 4-neighbour Laplacian response.
///
/// Only interior pixels are evaluated, so frames narrower or shorter than
/// three pixels score zero.
pub struct LaplacianVarianceScorer;

impl BlurScorer for LaplacianVarianceScorer {
    fn score(&self, frame: &GrayFrame) -> f64 {
        laplacian_variance(frame.as_ndarray())
    }
}

pub fn laplacian_variance(image: ArrayView2<'_, u8>) -> f64 {
    let (rows, cols) = image.dim();
    if rows < 3 || cols < 3 {
        return 0.0;
    }

    let responses: Vec<f64> = image
        .windows((3, 3))
        .into_iter()
        .map(|w| {
            w[[0, 1]] as f64 + w[[1, 0]] as f64 + w[[1, 2]] as f64 + w[[2, 1]] as f64
                - 4.0 * w[[1, 1]] as f64
        })
        .collect();

    let n = responses.len() as f64;
    let mean = responses.iter().sum::<f64>() / n;
    responses.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n
}
