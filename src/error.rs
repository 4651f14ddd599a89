use thiserror::Error;

use crate::host::ParAppendResult;

/// Errors surfaced by the operator and its host-side helpers
#[derive(Debug, Error)]
pub enum ChopError {
    /// The host refused a parameter declaration during setup.
    #[error("parameter `{name}` was rejected by the host: {result:?}")]
    ParameterRejected {
        name: String,
        result: ParAppendResult,
    },

    /// Upstream channels must all hold the same number of samples.
    #[error("upstream channel {channel} has {len} samples, expected {expected}")]
    RaggedInput {
        channel: usize,
        len: usize,
        expected: usize,
    },

    /// The cook loop needs a positive, finite frame rate.
    #[error("frame rate must be positive and finite, got {0}")]
    InvalidFrameRate(f64),

    #[error("unknown menu entry `{value}` for parameter `{name}`")]
    UnknownMenuEntry { name: String, value: String },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
