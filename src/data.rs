mod config_ort;
pub mod send_channels;
mod tensor;

pub use config_ort::ConfigOrt;
pub use send_channels::{detection_channels, DetectionReply, DetectionRequest, DetectionState, SendState};
pub use tensor::Tensor;
