//! Error types for the docstrata library.

use std::io;
use thiserror::Error;

use crate::model::{Layer, NodeId};

/// Result type alias for docstrata operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layer extraction and export.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A bounding-box union was requested over zero rectangles.
    ///
    /// Callers must guard the empty case; there is no sentinel rectangle.
    #[error("cannot compute the enclosing box of zero rectangles")]
    EmptyUnion,

    /// An identity-addressed node has no recorded offset in the symbol
    /// buffer. This indicates a traversal or indexing bug and is surfaced
    /// instead of silently producing a wrong span.
    #[error("no recorded symbol span for node {node:?} in layer {layer}")]
    MissingSpan {
        /// The node whose span lookup failed.
        node: NodeId,
        /// The layer being indexed when the lookup failed.
        layer: Layer,
    },

    /// A layer name from the outer surface did not match any known layer.
    #[error("unknown layer: {0}")]
    UnknownLayer(String),

    /// The input document tree could not be deserialized.
    #[error("document parse error: {0}")]
    Parse(String),

    /// Error serializing an export to JSON.
    #[error("render error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyUnion;
        assert_eq!(
            err.to_string(),
            "cannot compute the enclosing box of zero rectangles"
        );

        let err = Error::UnknownLayer("chapters".to_string());
        assert_eq!(err.to_string(), "unknown layer: chapters");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
