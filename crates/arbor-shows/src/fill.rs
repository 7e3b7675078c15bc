//! Whole-tree fills.

use std::time::Duration;

use arbor_core::helpers::{change_hue, one_in};
use arbor_core::{Show, ShowError};
use arbor_types::Hsv;
use arbor_types::color::{random_color, random_color_range};
use arbor_world::PixelSpace;
use rand::Rng;
use rand::rngs::SmallRng;

/// The whole tree in one slowly drifting color. Useful for checking wiring.
#[derive(Debug, Clone)]
pub struct TreeTest {
    rng: SmallRng,
    color: Hsv,
}

impl TreeTest {
    /// Display name.
    pub const NAME: &'static str = "TreeTest";

    const FRAME: Duration = Duration::from_millis(500);

    /// Create the show with a random starting color.
    pub fn new(mut rng: SmallRng) -> Self {
        let color = random_color(&mut rng, false);
        Self { rng, color }
    }
}

impl Show for TreeTest {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        space.set_all(self.color);
        if one_in(&mut self.rng, 10) {
            self.color = random_color_range(&mut self.rng, self.color, 0.02);
        }
        Ok(Self::FRAME)
    }
}

/// A band of lit pixels that climbs every segment of the tree in step.
///
/// Each pixel is lit when its position along its own segment falls inside
/// the band, so trunks and branches light up in parallel.
#[derive(Debug, Clone)]
pub struct LightOneUp {
    rng: SmallRng,
    frame: Duration,
    size: u32,
    count: u32,
    hue: u8,
}

impl LightOneUp {
    /// Display name.
    pub const NAME: &'static str = "LightOneUp";

    const STEPS: u32 = 20;

    /// Create the show with a random band size, speed, and hue.
    pub fn new(mut rng: SmallRng) -> Self {
        let frame = Duration::from_millis(rng.random_range(1..=10_u64).saturating_mul(100));
        let size = rng.random_range(1..=10);
        let hue = rng.random();
        Self {
            rng,
            frame,
            size,
            count: 0,
            hue,
        }
    }

    fn band(&self) -> (f64, f64) {
        let start = self.count % Self::STEPS;
        let steps = f64::from(Self::STEPS);
        (
            f64::from(start) / steps,
            f64::from(start.saturating_add(self.size)) / steps,
        )
    }
}

impl Show for LightOneUp {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        let (low, high) = self.band();
        let color = Hsv::saturated(self.hue);
        for pixel in space.pixels_mut() {
            if (low..high).contains(&pixel.fraction()) {
                pixel.set_color(color);
            } else {
                pixel.set_black();
            }
        }

        self.hue = change_hue(&mut self.rng, self.hue, 10);
        self.count = self.count.wrapping_add(1);
        Ok(self.frame)
    }
}
