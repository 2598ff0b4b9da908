use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForensicsError {
    #[error("Image decoding error: {0}")]
    Decode(#[source] image::ImageError),

    #[error("JPEG re-encoding error: {0}")]
    Encode(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Classifier returned score {0} outside [0, 1]")]
    InvalidScore(f64),

    #[error("Unexpected raster shape: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, ForensicsError>;
