//! Options for building an ONNX Runtime session.

use anyhow::Result;

#[derive(Debug, Clone, Default)]
pub struct ConfigOrt {
    pub onnx_path: String,
    /// Path to `libonnxruntime`; `None` lets ORT search the usual locations.
    pub ort_lib_path: Option<String>,
    pub intra_threads: Option<usize>,
}

impl ConfigOrt {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_model(mut self, onnx_path: &str) -> Result<Self> {
        if onnx_path.is_empty() {
            anyhow::bail!("Model path must not be empty.");
        }
        self.onnx_path = onnx_path.to_string();
        Ok(self)
    }

    pub fn with_ort_lib_path(mut self, ort_lib_path: &str) -> Result<Self> {
        if ort_lib_path.is_empty() {
            anyhow::bail!("ONNX Runtime library path must not be empty.");
        }
        self.ort_lib_path = Some(ort_lib_path.to_string());
        Ok(self)
    }

    pub fn with_intra_threads(mut self, n: usize) -> Self {
        self.intra_threads = Some(n);
        self
    }
}
