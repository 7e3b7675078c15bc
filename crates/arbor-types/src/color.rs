//! Byte colors for the LED tree.
//!
//! Colors travel through the system as [`Hsv`] triples with every channel in
//! the `0..=255` byte domain. Saturation is conventionally pinned to 255, so
//! in practice the space degenerates to (hue, brightness); the triple is kept
//! for transport uniformity. [`Rgb`] only exists at the wire boundary.
//!
//! Hue is circular over `0..255`: a hue of 255 renders the same as 0.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Brightness floor used by shows that should never go fully dark.
pub const MIN_DIM: u8 = 64;

/// A (hue, saturation, value) color with byte channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue, circular over `0..255`.
    pub hue: u8,
    /// Saturation, normally 255.
    pub saturation: u8,
    /// Brightness.
    pub value: u8,
}

/// An (red, green, blue) color with byte channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Hsv {
    /// The canonical black written by `black` operations.
    pub const BLACK: Self = Self::new(0, 255, 0);

    /// A near-black that differs from [`Hsv::BLACK`], used to force a full
    /// repaint on the next push.
    pub const FORCE_BLACK: Self = Self::new(0, 255, 1);

    /// Build a color from its channels.
    pub const fn new(hue: u8, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Fully saturated, full brightness color of the given hue.
    pub const fn saturated(hue: u8) -> Self {
        Self::new(hue, 255, 255)
    }

    /// Same hue and saturation with the brightness scaled by `intensity`
    /// (clamped to `[0.0, 1.0]`, truncated to a byte).
    #[must_use]
    pub fn dimmed(self, intensity: f64) -> Self {
        let scale = intensity.clamp(0.0, 1.0);
        Self {
            value: byte_clamp(f64::from(self.value) * scale),
            ..self
        }
    }

    /// Same hue and saturation with brightness set directly from a
    /// `[0.0, 1.0]` intensity.
    #[must_use]
    pub fn with_intensity(self, intensity: f64) -> Self {
        Self {
            value: byte_clamp(intensity.clamp(0.0, 1.0) * 255.0),
            ..self
        }
    }

    /// Rotate the hue by a `[-1.0, 1.0]` fraction of the wheel.
    #[must_use]
    pub fn shift_hue(self, amount: f64) -> Self {
        Self {
            hue: wrap_hue(i64::from(self.hue).saturating_add(truncate_i64(amount * 255.0))),
            ..self
        }
    }

    /// Convert to RGB. The hue is wrapped modulo 255 first.
    pub fn to_rgb(self) -> Rgb {
        if self.saturation == 0 {
            return Rgb::new(self.value, self.value, self.value);
        }

        let h = f64::from(self.hue.checked_rem(255).unwrap_or(0)) / 255.0;
        let s = f64::from(self.saturation) / 255.0;
        let v = f64::from(self.value) / 255.0;

        let scaled = h * 6.0;
        let sector = scaled.floor();
        let f = scaled - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match truncate_i64(sector) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Rgb::new(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))
    }
}

impl Rgb {
    /// Build a color from its channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Convert to HSV.
    pub fn to_hsv(self) -> Hsv {
        let max = self.red.max(self.green).max(self.blue);
        let min = self.red.min(self.green).min(self.blue);
        if max == min {
            return Hsv::new(0, 0, max);
        }

        let r = f64::from(self.red);
        let g = f64::from(self.green);
        let b = f64::from(self.blue);
        let maxf = f64::from(max);
        let span = maxf - f64::from(min);

        let saturation = span / maxf;
        let rc = (maxf - r) / span;
        let gc = (maxf - g) / span;
        let bc = (maxf - b) / span;

        let sector = if self.red == max {
            bc - gc
        } else if self.green == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        let hue = (sector / 6.0).rem_euclid(1.0);

        Hsv::new(unit_to_byte(hue), unit_to_byte(saturation), max)
    }
}

/// Truncate a float to a byte, clamping to `0..=255`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn byte_clamp(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Wrap an unbounded hue into `0..255`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn wrap_hue(value: i64) -> u8 {
    // rem_euclid by a positive constant is always in 0..255.
    value.rem_euclid(255) as u8
}

/// A random, fully saturated color. With `reds`, the hue is drawn from the
/// red arc `192..=287` wrapped onto the wheel.
pub fn random_color(rng: &mut impl Rng, reds: bool) -> Hsv {
    let hue = if reds {
        wrap_hue(rng.random_range(192..=287))
    } else {
        rng.random::<u8>()
    };
    Hsv::saturated(hue)
}

/// A random color near `base`: the hue moves by at most `shift_range`
/// (itself capped at 0.5) of the wheel in either direction.
pub fn random_color_range(rng: &mut impl Rng, base: Hsv, shift_range: f64) -> Hsv {
    let delta = (rng.random::<f64>() - 0.5) * shift_range.min(0.5) * 2.0;
    let hue = truncate_i64(f64::from(base.hue) + delta * 255.0).rem_euclid(256);
    Hsv {
        hue: u8::try_from(hue).unwrap_or(0),
        ..base
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_byte(fraction: f64) -> u8 {
    (fraction * 255.0).round().clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_i64(value: f64) -> i64 {
    value as i64
}
