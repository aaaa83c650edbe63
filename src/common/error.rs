use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("output tensor shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("tensor error: {0}")]
    Tensor(#[from] ndarray::ShapeError),

    #[error("resize error: {0}")]
    Resize(String),
}

impl From<fast_image_resize::ResizeError> for DetectError {
    fn from(err: fast_image_resize::ResizeError) -> Self {
        DetectError::Resize(err.to_string())
    }
}

impl From<fast_image_resize::ImageBufferError> for DetectError {
    fn from(err: fast_image_resize::ImageBufferError) -> Self {
        DetectError::Resize(err.to_string())
    }
}

impl From<fast_image_resize::CropBoxError> for DetectError {
    fn from(err: fast_image_resize::CropBoxError) -> Self {
        DetectError::Resize(err.to_string())
    }
}
