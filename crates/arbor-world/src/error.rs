//! Error types for the `arbor-world` crate.

use arbor_types::{Coordinate, CoordinateError, ShapeError};

/// Errors that can occur while building or addressing the tree.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The configured tree shape cannot be built.
    #[error("invalid tree shape: {source}")]
    Shape {
        /// The underlying shape error.
        #[from]
        source: ShapeError,
    },

    /// A generated coordinate did not fit.
    #[error("coordinate error: {source}")]
    Coordinate {
        /// The underlying coordinate error.
        #[from]
        source: CoordinateError,
    },

    /// A coordinate the topology should contain is missing.
    #[error("no pixel at {0}")]
    CellNotFound(Coordinate),

    /// The builder produced the same coordinate twice.
    #[error("duplicate pixel at {0}")]
    DuplicateCell(Coordinate),

    /// Pixel ids ran past `u32::MAX`.
    #[error("arithmetic overflow while numbering pixels")]
    ArithmeticOverflow,
}
