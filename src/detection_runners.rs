pub mod decoder;
pub mod inference_process;
pub mod letterbox;
pub mod nms;
#[cfg(feature = "onnxruntime")]
mod ort_engine;

pub use decoder::{decode, decode_candidates, decode_with_table};
pub use inference_process::{InferenceExecutor, InferenceProcess};
pub use letterbox::{letterbox_params, preprocess, preprocess_with};
pub use nms::{nms, Nms};
#[cfg(feature = "onnxruntime")]
pub use ort_engine::OrtEngine;
