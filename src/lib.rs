//! Layout detection post-processing for classical Japanese documents.
//!
//! The pipeline is `SourceImage -> letterbox -> (Tensor, LetterboxMapping) -> model ->
//! Tensor -> decode -> per-class NMS -> Vec<Detection>`. Running the model is left to an
//! [`InferenceExecutor`](detection_runners::InferenceExecutor); with the `onnxruntime`
//! feature an ONNX Runtime executor is provided.

mod utils;
mod detectors;
pub mod data;
pub mod detection_runners;
pub mod common;

use std::time::Instant;

use crate::common::{Detection, DetectorConfig, SourceImage};
use crate::detection_runners::{InferenceExecutor, InferenceProcess};

pub use crate::common::{iou, DetectError, LetterboxMapping};
pub use crate::detection_runners::{decode, nms, preprocess};
pub use crate::detectors::spawn_detector;

pub type Result<T, E = DetectError> = std::result::Result<T, E>;

pub fn init_detector<E: InferenceExecutor>(executor: E, config: DetectorConfig) -> InferenceProcess<E> {
    log::info!("Initializing detector\n{}", config.summary());
    InferenceProcess::new(executor, config)
}

pub async fn run_detection<E: InferenceExecutor>(
    process: &InferenceProcess<E>,
    image: &SourceImage,
) -> anyhow::Result<Vec<Detection>> {
    let now = Instant::now();

    let detections = process.run(image).await?;

    log::debug!("Processing time: {:?}", now.elapsed());

    Ok(detections)
}
