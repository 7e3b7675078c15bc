//! Shared type definitions for the Arbor LED tree.
//!
//! This crate is the single source of truth for the value types that flow
//! between the topology builder, the pixel space, the animation primitives,
//! and the wire protocol.
//!
//! # Modules
//!
//! - [`coordinate`] -- Fixed-capacity tree coordinates (`[trunk, b1.., leaf]`)
//! - [`color`] -- HSV/RGB byte colors, conversions, and color helpers
//! - [`shape`] -- Tree shape parameters (trunks, generations, branch counts)

pub mod color;
pub mod coordinate;
pub mod shape;

// Re-export all public types at crate root for convenience.
pub use color::{Hsv, Rgb};
pub use coordinate::{COORDINATE_CAPACITY, Coordinate, CoordinateError, MAX_GENERATIONS};
pub use shape::{ShapeError, TreeShape};
