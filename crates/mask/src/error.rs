use roi::RoiError;
use thiserror::Error;

use crate::convert::Capability;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Invalid dimension {dimension} for a {num_dimensions}-dimensional mask")]
    InvalidDimension { dimension: usize, num_dimensions: usize },

    #[error("Expected a {expected}-dimensional position, got {actual} coordinates")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Index {index} out of bounds for {len} vertices")]
    InvalidIndex { index: usize, len: usize },

    #[error("Unsupported mutation: {operation}")]
    UnsupportedMutation { operation: &'static str },

    #[error("Malformed shape: {0}")]
    MalformedShape(String),

    #[error("No applicable converter to {target}")]
    NoApplicableConverter { target: Capability },

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MaskError {
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedMutation { operation }
    }
}

impl From<RoiError> for MaskError {
    fn from(err: RoiError) -> Self {
        match err {
            RoiError::InvalidIndex { index, len } => Self::InvalidIndex { index, len },
            RoiError::UnsupportedMutation { operation } => Self::UnsupportedMutation { operation },
            RoiError::MalformedShape(reason) => Self::MalformedShape(reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, MaskError>;
