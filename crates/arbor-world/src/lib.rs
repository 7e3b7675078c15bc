//! Pixel topology and pixel space for the Arbor LED tree.
//!
//! This crate models the physical sculpture: every addressable LED as a
//! [`Pixel`] with fixed geometry and a two-slot color buffer, generated once
//! by the [`topology`] builder and owned for the life of the process by a
//! [`PixelSpace`].
//!
//! # Modules
//!
//! - [`error`] -- Error types for topology and addressing.
//! - [`pixel`] -- [`Pixel`]: geometry plus current/next color buffers.
//! - [`pixel_space`] -- [`PixelSpace`]: coordinate-addressed mutation and the
//!   diff-and-push cycle.
//! - [`topology`] -- Deterministic recursive generation of the tree.

pub mod error;
pub mod pixel;
pub mod pixel_space;
pub mod topology;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use pixel::Pixel;
pub use pixel_space::PixelSpace;
pub use topology::{Point, build_topology};
