use thiserror::Error;
use tracing::debug;

/// Broad classification of a [`GeometryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An input was outside the domain of the operation.
    InvalidArgument,
    /// A computation had no defined result, e.g. normalizing a zero vector.
    Arithmetic,
}

/// Errors produced when constructing or transforming primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(f64),

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("start and end points must be different (degenerate line not allowed)")]
    DegenerateLine,

    #[error("a cube has exactly 8 vertices, got {0}")]
    VertexCount(usize),

    #[error("max must be greater than min in all dimensions")]
    InvertedBounds,

    #[error("cannot normalize zero vector (magnitude {0})")]
    ZeroVector(f64),
}

impl GeometryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeometryError::ZeroVector(_) => ErrorKind::Arithmetic,
            GeometryError::NegativeRadius(_)
            | GeometryError::NonPositive { .. }
            | GeometryError::DegenerateLine
            | GeometryError::VertexCount(_)
            | GeometryError::InvertedBounds => ErrorKind::InvalidArgument,
        }
    }

    /// Rejects `value` unless it is strictly positive. NaN is rejected too.
    pub(crate) fn require_positive(what: &'static str, value: f64) -> Result<f64, Self> {
        if value > 0.0 {
            Ok(value)
        } else {
            debug!(what, value, "rejected non-positive argument");
            Err(GeometryError::NonPositive { what, value })
        }
    }
}
