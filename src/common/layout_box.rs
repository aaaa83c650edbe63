use serde::{Deserialize, Serialize};

/// Axis-aligned box in corner form, `x1 <= x2` and `y1 <= y2` for well-formed boxes.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, PartialOrd)]
pub struct LayoutBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl LayoutBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Builds a box from its center `(cx, cy)` and size `(w, h)`.
    pub fn from_cxcy_wh(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            x1: cx - w / 2.0,
            y1: cy - h / 2.0,
            x2: cx + w / 2.0,
            y2: cy + h / 2.0,
        }
    }

    /// Returns the width of the bounding box.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Returns the height of the bounding box.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Returns the center coordinates of the bounding box as `(cx, cy)`.
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2., (self.y1 + self.y2) / 2.)
    }

    /// Computes the area of the bounding box. Not clamped, inverted boxes give a negative area.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Computes the intersection area between this bounding box and another.
    pub fn intersect(&self, other: &LayoutBox) -> f32 {
        let left = self.x1.max(other.x1);
        let right = self.x2.min(other.x2);
        let top = self.y1.max(other.y1);
        let bottom = self.y2.min(other.y2);
        (right - left).max(0.) * (bottom - top).max(0.)
    }

    /// Computes the union area between this bounding box and another.
    pub fn union(&self, other: &LayoutBox) -> f32 {
        self.area() + other.area() - self.intersect(other)
    }

    /// Intersection over union. A non-positive union yields `0.0`.
    pub fn iou(&self, other: &LayoutBox) -> f32 {
        let union = self.union(other);
        if union <= 0. {
            0.
        } else {
            self.intersect(other) / union
        }
    }

    /// Clamps the box into `[0, width] x [0, height]`, for renderers.
    pub fn clamped(&self, width: f32, height: f32) -> Self {
        Self {
            x1: self.x1.clamp(0., width),
            y1: self.y1.clamp(0., height),
            x2: self.x2.clamp(0., width),
            y2: self.y2.clamp(0., height),
        }
    }
}

/// Free-standing form of [`LayoutBox::iou`].
pub fn iou(a: &LayoutBox, b: &LayoutBox) -> f32 {
    a.iou(b)
}
