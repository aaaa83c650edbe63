use std::path::Path;

use serde::{Deserialize, Serialize};

pub const MODEL_SIZE: u32 = 640;
/// Letterbox fill, must match the value the model was trained with.
pub const PAD_VALUE: u8 = 114;
pub const DEFAULT_CONF_THRESHOLD: f32 = 0.5;
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.45;

/// Settings for one detection pipeline.
///
/// Thresholds are not validated; values outside `[0, 1]` simply keep everything or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub model_size: u32,
    pub pad_value: u8,
    pub conf_threshold: f32,
    pub iou_threshold: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_size: MODEL_SIZE,
            pad_value: PAD_VALUE,
            conf_threshold: DEFAULT_CONF_THRESHOLD,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
        }
    }
}

impl DetectorConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_model_size(mut self, n: u32) -> Self {
        self.model_size = n;
        self
    }

    pub fn with_pad_value(mut self, x: u8) -> Self {
        self.pad_value = x;
        self
    }

    pub fn with_conf_threshold(mut self, x: f32) -> Self {
        self.conf_threshold = x;
        self
    }

    pub fn with_iou_threshold(mut self, x: f32) -> Self {
        self.iou_threshold = x;
        self
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn summary(&self) -> String {
        format!("Model Input Resolution: {0}x{0}\n\
        Pad Value: {1}\n\
        Confidence Threshold: {2}\n\
        IoU Threshold: {3}",
                self.model_size, self.pad_value, self.conf_threshold, self.iou_threshold)
    }
}
