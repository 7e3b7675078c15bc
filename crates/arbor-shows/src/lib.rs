//! The show library for the Arbor LED tree.
//!
//! Every show implements [`arbor_core::Show`] and owns its own seeded
//! random generator. [`Rotation`] builds them by name, in order, for the
//! frame driver.
//!
//! # Modules
//!
//! - [`branches`] -- Walker shows: outward, inward, waves, and bouncing fronts.
//! - [`fill`] -- Whole-tree fills: [`TreeTest`] and [`LightOneUp`].
//! - [`registry`] -- Name lookup and the [`Rotation`] show source.
//! - [`sparkles`] -- [`Sparkles`].
//! - [`waves`] -- Beat-driven waves: [`BackForth`], [`Pulse`], [`Ring`], [`Radar`].

pub mod branches;
pub mod fill;
pub mod registry;
pub mod sparkles;
pub mod waves;

pub use branches::{InOutBranches, InwardBranch, MultipleBranches, OutwardBranch};
pub use fill::{LightOneUp, TreeTest};
pub use registry::{RegistryError, Rotation, SHOW_NAMES, create_show};
pub use sparkles::Sparkles;
pub use waves::{BackForth, Pulse, Radar, Ring};
