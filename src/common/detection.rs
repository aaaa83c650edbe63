use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::common::{parse_hex_color, ClassTable, LayoutBox};

/// Decoded, not yet suppressed box in original-image coordinates.
#[derive(Default, Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub bbox: LayoutBox,
    pub confidence: f32,
    pub class_id: usize,
}

impl Candidate {
    pub fn new(bbox: LayoutBox, confidence: f32, class_id: usize) -> Self {
        Self { bbox, confidence, class_id }
    }

    /// Attaches label and colour from `table`, falling back when the id is unknown.
    pub fn labelled(self, table: &ClassTable) -> Detection {
        Detection {
            bbox: self.bbox,
            confidence: self.confidence,
            class_id: self.class_id,
            label: table.label(self.class_id).into_owned(),
            color: table.color(self.class_id).to_string(),
        }
    }
}

/// Final output of the pipeline, a [`Candidate`] with display label and colour.
///
/// Coordinates are in original-image pixels and may fall slightly outside the image,
/// see [`LayoutBox::clamped`].
#[derive(Default, Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Detection {
    #[serde(flatten)]
    pub bbox: LayoutBox,
    pub confidence: f32,
    pub class_id: usize,
    pub label: String,
    pub color: String,
}

impl Detection {
    pub fn candidate(&self) -> Candidate {
        Candidate::new(self.bbox, self.confidence, self.class_id)
    }

    pub fn rgb(&self) -> Rgb<u8> {
        parse_hex_color(&self.color)
    }

    /// `"label 87%"`, the caption a renderer draws above the box.
    pub fn caption(&self) -> String {
        format!("{} {:.0}%", self.label, self.confidence * 100.)
    }
}
