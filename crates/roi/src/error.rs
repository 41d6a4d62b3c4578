use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoiError {
    #[error("Index {index} out of bounds for {len} coordinates")]
    InvalidIndex { index: usize, len: usize },

    #[error("Unsupported mutation: {operation}")]
    UnsupportedMutation { operation: &'static str },

    #[error("Malformed shape: {0}")]
    MalformedShape(String),
}

pub type Result<T> = std::result::Result<T, RoiError>;
