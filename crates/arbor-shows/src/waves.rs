//! Beat-driven waves over segment position, radius, and angle.
//!
//! Each show keeps its own clock: the sum of the frame durations it has
//! returned. Beat helpers read that clock, so the animation is a pure
//! function of the seed and the frame count.

use core::f64::consts::{PI, TAU};
use std::time::Duration;

use arbor_core::helpers::{
    bpm_circle, bpm_wave, calc_packet, change_hue, min_dim, one_in, reasonable_bpm,
    reasonable_speed, up_or_down,
};
use arbor_core::{Show, ShowError};
use arbor_types::Hsv;
use arbor_types::color::{MIN_DIM, byte_clamp};
use arbor_world::PixelSpace;
use rand::Rng;
use rand::rngs::SmallRng;

/// A bright crest sweeping up and back down every segment.
#[derive(Debug, Clone)]
pub struct BackForth {
    rng: SmallRng,
    bpm: f64,
    hue: u8,
    elapsed: f64,
}

impl BackForth {
    /// Display name.
    pub const NAME: &'static str = "BackForth";

    const FRAME: Duration = Duration::from_millis(500);

    /// Create the show with a random tempo and hue.
    pub fn new(mut rng: SmallRng) -> Self {
        let bpm = f64::from(reasonable_bpm(&mut rng));
        let hue = rng.random();
        Self {
            rng,
            bpm,
            hue,
            elapsed: 0.0,
        }
    }
}

impl Show for BackForth {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        let wave = bpm_wave(self.bpm, self.elapsed);
        let span = f64::from(255_u8.saturating_sub(MIN_DIM));
        for pixel in space.pixels_mut() {
            let gap = (pixel.fraction() - wave).abs();
            let dimming = span * (1.0 + (gap * PI).sin()) / 2.0;
            pixel.set_color(Hsv::new(self.hue, 255, byte_clamp(255.0 - dimming)));
        }

        self.hue = change_hue(&mut self.rng, self.hue, 10);
        self.elapsed += Self::FRAME.as_secs_f64();
        Ok(Self::FRAME)
    }
}

/// Brightness waves rolling along every segment, occasionally reversing.
#[derive(Debug, Clone)]
pub struct Pulse {
    rng: SmallRng,
    bpm: f64,
    count: u32,
    reverse_count: u32,
    hue: u8,
    reverse: bool,
    elapsed: f64,
}

impl Pulse {
    /// Display name.
    pub const NAME: &'static str = "Pulse";

    const FRAME: Duration = Duration::from_millis(200);

    /// Create the show with a random tempo, hue, and reversal period.
    pub fn new(mut rng: SmallRng) -> Self {
        let bpm = f64::from(reasonable_bpm(&mut rng));
        let reverse_count = rng.random_range(100..=1000);
        let hue = rng.random();
        let reverse = rng.random_bool(0.5);
        Self {
            rng,
            bpm,
            count: 0,
            reverse_count,
            hue,
            reverse,
            elapsed: 0.0,
        }
    }
}

impl Show for Pulse {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        let circle = bpm_circle(self.bpm, self.elapsed);
        let wave = if self.reverse { 1.0 - circle } else { circle };
        for pixel in space.pixels_mut() {
            let phase = (pixel.fraction() + wave).rem_euclid(1.0);
            let value = 255.0 * (1.0 + (phase * PI).sin()) / 2.0;
            pixel.set_color(Hsv::new(self.hue, 255, byte_clamp(value)));
        }
        self.hue = change_hue(&mut self.rng, self.hue, 10);

        if self.count.checked_rem(self.reverse_count) == Some(0) {
            self.reverse = !self.reverse;
        }
        self.count = self.count.wrapping_add(1);
        self.elapsed += Self::FRAME.as_secs_f64();
        Ok(Self::FRAME)
    }
}

/// A ring expanding from (or collapsing to) the center once per beat.
#[derive(Debug, Clone)]
pub struct Ring {
    rng: SmallRng,
    bpm: f64,
    count: u32,
    /// Drawn at start but never consulted; the ring's direction is fixed
    /// for the life of the show.
    reverse_count: u32,
    hue: u8,
    reverse: bool,
    elapsed: f64,
}

impl Ring {
    /// Display name.
    pub const NAME: &'static str = "Ring";

    const FRAME: Duration = Duration::from_millis(200);

    /// Create the show with a random tempo, hue, and direction.
    pub fn new(mut rng: SmallRng) -> Self {
        let bpm = f64::from(reasonable_bpm(&mut rng));
        let reverse_count = reasonable_speed(&mut rng);
        let hue = rng.random();
        let reverse = rng.random_bool(0.5);
        Self {
            rng,
            bpm,
            count: 0,
            reverse_count,
            hue,
            reverse,
            elapsed: 0.0,
        }
    }

    /// Frames painted so far.
    pub const fn frames(&self) -> u32 {
        self.count
    }

    /// The reversal period drawn at start.
    pub const fn reverse_count(&self) -> u32 {
        self.reverse_count
    }
}

impl Show for Ring {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        let circle = bpm_circle(self.bpm, self.elapsed);
        let wave = if self.reverse { 1.0 - circle } else { circle };
        for pixel in space.pixels_mut() {
            let closeness = 1.0 - (pixel.distance() - wave).abs();
            let value = calc_packet(closeness, 1.0, 0.6, true);
            pixel.set_color(Hsv::new(self.hue, 255, value));
        }
        self.hue = change_hue(&mut self.rng, self.hue, 10);

        self.count = self.count.wrapping_add(1);
        self.elapsed += Self::FRAME.as_secs_f64();
        Ok(Self::FRAME)
    }
}

/// A sweeping beam rotating around the center, never fully dark.
#[derive(Debug, Clone)]
pub struct Radar {
    rng: SmallRng,
    freq: i32,
    count: u32,
    hue: u8,
}

impl Radar {
    /// Display name.
    pub const NAME: &'static str = "Radar";

    const FRAME: Duration = Duration::from_millis(100);

    /// Create the show with a random sweep rate and hue.
    pub fn new(mut rng: SmallRng) -> Self {
        let freq = rng.random_range(1..=4);
        let hue = rng.random();
        Self {
            rng,
            freq,
            count: 0,
            hue,
        }
    }

    /// Beam heading in `[0, 2π)`.
    fn beam(&self) -> f64 {
        TAU * f64::from(self.count % 360) / 360.0
    }
}

impl Show for Radar {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        let beam = self.beam();
        for pixel in space.pixels_mut() {
            let closeness = TAU - (beam - pixel.angle()).abs();
            let value = calc_packet(closeness, TAU, 0.5, true);
            pixel.set_color(Hsv::new(self.hue, 255, min_dim(value)));
        }
        self.hue = change_hue(&mut self.rng, self.hue, 10);

        if one_in(&mut self.rng, 50) {
            self.freq = up_or_down(&mut self.rng, self.freq, 1, 1, 4);
        }
        let step = u32::try_from(self.freq).unwrap_or(1);
        self.count = self.count.wrapping_add(step);
        Ok(Self::FRAME)
    }
}
