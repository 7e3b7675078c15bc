//! Show trait and show source.
//!
//! A show is an explicit state object. The driver calls [`Show::start`]
//! once when the show comes up, then [`Show::next_frame`] repeatedly; each
//! call paints one complete frame into the [`PixelSpace`] and returns how
//! long the frame should stay up. Every side effect of a frame is in the
//! pixel space before the duration is returned, and nothing is pushed until
//! the driver does it.
//!
//! The driver does not know which shows exist. It asks a [`ShowSource`] for
//! the next one whenever the current show has run its course.

use std::time::Duration;

use arbor_types::CoordinateError;
use arbor_world::{PixelSpace, WorldError};

/// Errors a show can raise while painting.
#[derive(Debug, thiserror::Error)]
pub enum ShowError {
    /// A walker or fader addressed a pixel the tree does not have.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A walker coordinate could not be built.
    #[error("coordinate error: {source}")]
    Coordinate {
        /// The underlying coordinate error.
        #[from]
        source: CoordinateError,
    },
}

/// A visual pattern on the tree.
pub trait Show {
    /// Display name, used for logging and rotation lookup.
    fn name(&self) -> &str;

    /// Prepare the tree when the show comes up. The default forces a full
    /// repaint so the show starts from a known black tree.
    fn start(&mut self, space: &mut PixelSpace) {
        space.force_black_all();
    }

    /// Paint one frame and return how long it should be shown.
    ///
    /// # Errors
    ///
    /// Returns [`ShowError`] if the show addresses the tree inconsistently.
    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError>;
}

/// Supplies shows to the driver.
pub trait ShowSource {
    /// The next show to run, or `None` when there are no more.
    fn next_show(&mut self, space: &PixelSpace) -> Option<Box<dyn Show>>;
}
