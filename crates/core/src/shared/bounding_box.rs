use serde::{Deserialize, Serialize};

/// Axis-aligned face or eye box in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Integer center, rounding half-extents down.
    pub fn center(&self) -> (i64, i64) {
        (
            self.x as i64 + (self.w / 2) as i64,
            self.y as i64 + (self.h / 2) as i64,
        )
    }

    /// Largest-area box; ties go to the earliest entry.
    pub fn primary(faces: &[BoundingBox]) -> Option<&BoundingBox> {
        faces.iter().fold(None, |best: Option<&BoundingBox>, candidate| match best {
            Some(b) if b.area() >= candidate.area() => Some(b),
            _ => Some(candidate),
        })
    }

    /// Clamps the box so it lies inside a `width` x `height` frame.
    pub fn clamp_to(&self, width: u32, height: u32) -> BoundingBox {
        let x = self.x.min(width);
        let y = self.y.min(height);
        BoundingBox {
            x,
            y,
            w: self.w.min(width - x),
            h: self.h.min(height - y),
        }
    }
}

/// Euclidean distance between two points.
pub fn distance(a: (i64, i64), b: (i64, i64)) -> f64 {
    let dx = (a.0 - b.0) as f64;
    let dy = (a.1 - b.1) as f64;
    (dx * dx + dy * dy).sqrt()
}
