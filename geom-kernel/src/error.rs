//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
///
/// Only construction and editing operations fail with this error. Positional lookups (vertices,
/// segments, coordinates) never fail: they return `None` or `NaN` when the address is out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Input coordinates or parts violate the invariants of the geometry being constructed.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Two lines cannot be merged because they do not share an end point.
    #[error("lines don't touch at their end points")]
    DisjointLines,
    /// Axis count of `1` was given. Coordinates must have zero (empty) or at least two axes.
    #[error("invalid axis count {0}: must be 0 or at least 2")]
    InvalidAxisCount(usize),
    /// An editing operation addressed a vertex that does not exist.
    #[error("vertex out of range: {0}")]
    VertexOutOfRange(String),
    /// Factory configuration cannot be used.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl GeometryError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        log::debug!("Rejected geometry: {message}");
        Self::InvalidGeometry(message)
    }
}
