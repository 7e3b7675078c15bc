//! Random twinkles.

use std::time::Duration;

use arbor_core::helpers::{one_in, reasonable_speed};
use arbor_core::{FadeController, Show, ShowError};
use arbor_types::Hsv;
use arbor_types::color::{random_color, random_color_range};
use arbor_world::PixelSpace;
use rand::rngs::SmallRng;

/// A steady population of pixels swelling and fading in colors near one
/// slowly drifting base color.
#[derive(Debug, Clone)]
pub struct Sparkles {
    rng: SmallRng,
    sparkles: FadeController,
    color: Hsv,
    limit: usize,
}

impl Sparkles {
    /// Display name.
    pub const NAME: &'static str = "Sparkles";

    const FRAME: Duration = Duration::from_millis(300);

    /// Create the show. One pixel in twenty sparkles at any time.
    pub fn new(space: &PixelSpace, mut rng: SmallRng) -> Self {
        let color = random_color(&mut rng, false);
        Self {
            rng,
            sparkles: FadeController::new(),
            color,
            limit: space.len() / 20,
        }
    }

    /// Live sparkles.
    pub fn live(&self) -> usize {
        self.sparkles.len()
    }
}

impl Show for Sparkles {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        while self.sparkles.len() < self.limit {
            let Some(coordinate) = space.random_coordinate(&mut self.rng) else {
                break;
            };
            let color = random_color_range(&mut self.rng, self.color, 0.05);
            let delta = 1.0 / f64::from(reasonable_speed(&mut self.rng));
            self.sparkles.add(color, coordinate, 0.01, true, delta);
        }
        self.sparkles.cycle(space, true);

        if one_in(&mut self.rng, 100) {
            self.color = random_color_range(&mut self.rng, self.color, 0.1);
        }
        Ok(Self::FRAME)
    }
}
