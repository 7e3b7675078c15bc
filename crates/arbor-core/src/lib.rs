//! Animation primitives, show plumbing, and the frame driver for the Arbor
//! LED tree.
//!
//! Shows are built from the two primitives here and driven frame by frame
//! against a [`PixelSpace`](arbor_world::PixelSpace).
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `arbor-config.yaml` into
//!   strongly-typed structs.
//! - [`driver`] -- The async frame loop: paint, delay, push, sleep, rotate.
//! - [`fader`] -- [`FadeController`]: per-pixel intensity fades.
//! - [`helpers`] -- Random, easing, and beat helpers shared by shows.
//! - [`show`] -- [`Show`] and [`ShowSource`] traits.
//! - [`walker`] -- [`BranchWalker`]: outward/inward fronts along a branch path.

pub mod config;
pub mod driver;
pub mod fader;
pub mod helpers;
pub mod show;
pub mod walker;

pub use config::{ArborConfig, ConfigError};
pub use driver::{DriverError, DriverSettings, EndReason, RunSummary, run_shows};
pub use fader::{FadeController, Fader};
pub use show::{Show, ShowError, ShowSource};
pub use walker::BranchWalker;
