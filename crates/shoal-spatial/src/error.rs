//! Spatial-subsystem error type.

use thiserror::Error;

use shoal_core::AgentId;

/// Errors produced by `shoal-spatial`.
#[derive(Debug, Error, PartialEq)]
pub enum SpatialError {
    #[error("{0} is not registered with the neighborhood index")]
    UnknownAgent(AgentId),

    #[error("grid cell size must be finite and positive, got {0}")]
    InvalidCellSize(f64),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
