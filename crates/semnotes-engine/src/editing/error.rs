use thiserror::Error;

/// Why a step was rejected. A rejected step aborts its whole transaction;
/// the source model is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid block index {index} for a document of {len} blocks")]
    InvalidBlockIndex { index: usize, len: usize },
}
