use serde::{Deserialize, Serialize};

use crate::common::LayoutBox;

/// Parameters needed to undo a letterbox transform.
///
/// `canvas = original * scale + pad`, so `original = (canvas - pad) / scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LetterboxMapping {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
    pub original_width: u32,
    pub original_height: u32,
}

impl LetterboxMapping {
    /// Canvas point to original-image point.
    pub fn to_original(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }

    /// Original-image point to canvas point.
    pub fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.pad_x, y * self.scale + self.pad_y)
    }

    pub fn box_to_original(&self, bbox: &LayoutBox) -> LayoutBox {
        let (x1, y1) = self.to_original(bbox.x1, bbox.y1);
        let (x2, y2) = self.to_original(bbox.x2, bbox.y2);
        LayoutBox::new(x1, y1, x2, y2)
    }
}
