//! ONNX Runtime backed [`InferenceExecutor`].

use anyhow::Result;
use ort::session::{builder::GraphOptimizationLevel, Session};

use crate::data::{ConfigOrt, Tensor};
use crate::detection_runners::InferenceExecutor;

#[derive(Debug)]
pub struct OrtEngine {
    session: Session,
    input_name: String,
    output_name: String,
}

impl OrtEngine {
    pub fn new(config: &ConfigOrt) -> Result<Self> {
        // Dynamically load the library from given path
        if let Some(lib_path) = &config.ort_lib_path {
            if let Err(e) = ort::init_from(lib_path).commit() {
                return Err(anyhow::anyhow!("Failed to commit ORT: {:?}", e));
            }
        }

        let mut builder = Session::builder()?.with_optimization_level(GraphOptimizationLevel::Level3)?;
        if let Some(n) = config.intra_threads {
            builder = builder.with_intra_threads(n)?;
        }
        let session = builder.commit_from_file(&config.onnx_path)?;

        let input_name = match session.inputs.first() {
            Some(input) => input.name.clone(),
            None => anyhow::bail!("Model {} declares no inputs.", config.onnx_path),
        };
        let output_name = match session.outputs.first() {
            Some(output) => output.name.clone(),
            None => anyhow::bail!("Model {} declares no outputs.", config.onnx_path),
        };

        log::info!(
            "Backend: ONNXRuntime | Model: {} | Input: {} | Output: {}",
            config.onnx_path,
            input_name,
            output_name,
        );

        Ok(Self { session, input_name, output_name })
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

impl InferenceExecutor for OrtEngine {
    async fn run(&self, input: &Tensor) -> Result<Tensor> {
        let outputs = self.session.run(ort::inputs![self.input_name.as_str() => input.view()]?)?;
        let output = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?.into_owned();
        Ok(Tensor::from(output))
    }
}
