//! Error types for relief mesh conversion
//!
//! Every rejected input maps to a distinct variant; conversion never degrades
//! to a partial mesh.

use thiserror::Error;

/// Relief conversion error types
#[derive(Debug, Error)]
pub enum ReliefError {
    #[error("Image is empty or too small to sample: {rows}x{cols}")]
    EmptyImage { rows: usize, cols: usize },

    #[error("Grid {rows}x{cols} has no tessellable cell (need at least 2x2)")]
    DegenerateGrid { rows: usize, cols: usize },

    #[error("Row {row} has {found} samples, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Grid data has {found} samples, expected {expected}")]
    GridSizeMismatch { expected: usize, found: usize },

    #[error("Face {face} references vertex {index} outside [0, {limit})")]
    IndexOutOfRange { face: usize, index: u32, limit: u32 },

    #[error("Face {face} repeats a vertex index")]
    DegenerateFace { face: usize },

    #[error("{what}: found {found}, expected {expected}")]
    LayoutMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Write error: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReliefError {
    /// Internal invariant violations point at a bug in this crate, not bad input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ReliefError::IndexOutOfRange { .. }
                | ReliefError::DegenerateFace { .. }
                | ReliefError::LayoutMismatch { .. }
        )
    }
}

/// Result type alias for relief operations
pub type Result<T> = std::result::Result<T, ReliefError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_classification() {
        assert!(ReliefError::IndexOutOfRange {
            face: 0,
            index: 9,
            limit: 8
        }
        .is_internal());
        assert!(!ReliefError::DegenerateGrid { rows: 1, cols: 4 }.is_internal());
        assert!(!ReliefError::InvalidConfig("x".into()).is_internal());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ReliefError = io.into();
        assert!(matches!(err, ReliefError::WriteError(_)));
        assert!(err.to_string().contains("denied"));
    }
}
