use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("window size must be at least 1")]
    InvalidWindowSize,

    #[error("stationary speed threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f32),
}
