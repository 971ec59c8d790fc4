//! Conversion errors.

use quasar_template::ParseError;
use thiserror::Error;
use visual_node::BuildError;

pub type ProcessResult<T> = Result<T, ProcessorError>;
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Failure of a single component processor.
///
/// The orchestrator recovers from these by rebuilding the element with the
/// generic processor.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("invalid value {value:?} for `{attribute}`")]
    InvalidValue { attribute: String, value: String },

    #[error("missing structure: {0}")]
    MissingStructure(String),
}

impl ProcessorError {
    pub fn invalid_value(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn missing_structure(message: impl Into<String>) -> Self {
        Self::MissingStructure(message.into())
    }
}

/// Failure of a whole conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The root frame itself could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Even the generic fallback failed for the template root.
    #[error("could not convert template root: {0}")]
    Processor(#[from] ProcessorError),
}
