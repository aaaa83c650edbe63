use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::common::{ClassTable, DetectError, Detection, DetectorConfig, LetterboxMapping, SourceImage, NDL_DOCL};
use crate::data::Tensor;
use crate::detection_runners::{decoder, letterbox};
use crate::utils;

/// Runs the model: `[1, 3, S, S]` in, `[1, 4 + nc, anchors]` out.
pub trait InferenceExecutor {
    fn run(&self, input: &Tensor) -> impl Future<Output = anyhow::Result<Tensor>> + Send;
}

impl<E: InferenceExecutor + Send + Sync> InferenceExecutor for Arc<E> {
    fn run(&self, input: &Tensor) -> impl Future<Output = anyhow::Result<Tensor>> + Send {
        self.as_ref().run(input)
    }
}

/// Letterbox, infer, decode. Holds no mutable state, so one instance can serve
/// any number of images concurrently.
#[derive(Debug)]
pub struct InferenceProcess<E> {
    executor: E,
    config: DetectorConfig,
    table: ClassTable,
}

impl<E: InferenceExecutor> InferenceProcess<E> {
    pub fn new(executor: E, config: DetectorConfig) -> Self {
        Self { executor, config, table: NDL_DOCL }
    }

    pub fn with_class_table(mut self, table: ClassTable) -> Self {
        self.table = table;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn class_table(&self) -> &ClassTable {
        &self.table
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Pre-process the input image.
    pub fn preprocess(&self, image: &SourceImage) -> Result<(Tensor, LetterboxMapping), DetectError> {
        letterbox::preprocess_with(image, self.config.model_size, self.config.pad_value)
    }

    /// Executes the model on the preprocessed data.
    pub async fn inference(&self, xs: &Tensor) -> anyhow::Result<Tensor> {
        self.executor.run(xs).await
    }

    /// Post-process the model's output.
    pub fn postprocess(&self, ys: &Tensor, mapping: &LetterboxMapping) -> Result<Vec<Detection>, DetectError> {
        decoder::decode_with_table(
            ys,
            mapping,
            self.config.conf_threshold,
            self.config.iou_threshold,
            &self.table,
        )
    }

    /// Executes the full pipeline, tracing the time spent in each stage.
    pub async fn run(&self, image: &SourceImage) -> anyhow::Result<Vec<Detection>> {
        let detect_time = Instant::now();

        let (xs, mapping) = self.preprocess(image)?;
        let elapsed = utils::trace("Preprocessing input", detect_time, detect_time.elapsed());

        let ys = self.inference(&xs).await?;
        let elapsed = utils::trace("Inference", detect_time, elapsed);

        let detections = self.postprocess(&ys, &mapping)?;
        utils::trace("Postprocessing", detect_time, elapsed);

        Ok(detections)
    }
}
