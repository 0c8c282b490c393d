use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::coords::resolve::AbsolutePoint;
use crate::errors::HarnessResult;

/// Bounding quadrilateral of one recognized text run. Four corners in
/// the engine's consistent winding order starting top-left; capture
/// artifacts mean these are not necessarily axis-aligned.
pub type Quad = [(f32, f32); 4];

/// One recognized text run. `confidence` is kept for logs only — hit
/// order, not confidence, drives targeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrHit {
    pub text: String,
    pub quad: Quad,
    pub confidence: f32,
}

impl OcrHit {
    /// Geometric centre from the first and third corner (the quad
    /// diagonal).
    pub fn center(&self) -> AbsolutePoint {
        let (x1, y1) = self.quad[0];
        let (x3, y3) = self.quad[2];
        AbsolutePoint {
            x: ((x1 + x3) / 2.0) as i32,
            y: ((y1 + y3) / 2.0) as i32,
        }
    }
}

/// The OCR engine seam. The real engine is expensive to bring up, so
/// the process creates one instance and shares it (`Arc<dyn
/// Recognizer>`); tests inject a stub. Hits come back in the engine's
/// stable scan order, typically top-to-bottom reading order.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: &GrayImage) -> HarnessResult<Vec<OcrHit>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_uses_quad_diagonal() {
        let hit = OcrHit {
            text: "BLOCK1".into(),
            quad: [(10.0, 20.0), (110.0, 20.0), (110.0, 60.0), (10.0, 60.0)],
            confidence: 0.93,
        };
        assert_eq!(hit.center(), AbsolutePoint { x: 60, y: 40 });
    }

    #[test]
    fn center_tolerates_skewed_quads() {
        let hit = OcrHit {
            text: "tilted".into(),
            quad: [(12.0, 18.0), (108.0, 22.0), (112.0, 62.0), (8.0, 58.0)],
            confidence: 0.4,
        };
        // Only corners 0 and 2 matter.
        assert_eq!(hit.center(), AbsolutePoint { x: 62, y: 40 });
    }
}
