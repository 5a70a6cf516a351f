//! `LambdaError` is the error every handler in this crate fails with.

use crate::stream_image::StreamImageError;
use lambda_runtime::Error as LambdaRuntimeError;

pub type Result<T> = std::result::Result<T, LambdaError>;
pub type LambdaRuntimeResult = std::result::Result<(), LambdaRuntimeError>;

#[derive(Debug, thiserror::Error)]
pub enum LambdaError {
    /// The payload does not have the expected shape. Retrying will not help.
    #[error("{0}")]
    Validation(String),
    #[error("{0:#}")]
    Unknown(#[source] anyhow::Error),
}

impl From<anyhow::Error> for LambdaError {
    fn from(e: anyhow::Error) -> Self {
        Self::Unknown(e)
    }
}

impl From<StreamImageError> for LambdaError {
    fn from(e: StreamImageError) -> Self {
        Self::Validation(e.to_string())
    }
}
