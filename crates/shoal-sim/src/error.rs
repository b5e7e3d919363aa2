use shoal_core::CoreError;
use shoal_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("neighborhood index already holds {0} agents; supply an empty index")]
    IndexNotEmpty(usize),

    #[error("frame delta must be finite and non-negative, got {0}")]
    InvalidDelta(f64),

    #[error("neighborhood index error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
