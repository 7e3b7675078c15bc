//! Small numeric and random helpers shared by shows.
//!
//! Beat-based helpers take the show's elapsed time in seconds instead of
//! reading the wall clock, so a show driven with a fixed frame duration
//! animates identically on every run.

use core::f64::consts::PI;

use arbor_types::color::{MIN_DIM, byte_clamp, wrap_hue};
use rand::Rng;

/// True with probability `1 / chance`. A chance of 0 or 1 always fires.
pub fn one_in(rng: &mut impl Rng, chance: u32) -> bool {
    chance <= 1 || rng.random_range(0..chance) == 0
}

/// Either `1` or `-1`.
pub fn plus_or_minus(rng: &mut impl Rng) -> i32 {
    if rng.random_bool(0.5) { 1 } else { -1 }
}

/// Move `value` up or down by `amount` at random, kept within
/// `[minimum, maximum]`.
pub fn up_or_down(rng: &mut impl Rng, value: i32, amount: i32, minimum: i32, maximum: i32) -> i32 {
    let step = amount.saturating_mul(plus_or_minus(rng));
    bounds(value.saturating_add(step), minimum, maximum)
}

/// Add `increase` to `value`, kept within `[minimum, maximum]`.
pub fn inc(value: i32, increase: i32, minimum: i32, maximum: i32) -> i32 {
    bounds(value.saturating_add(increase), minimum, maximum)
}

/// Cap `value` at `maximum`, then raise it to at least `minimum`.
pub fn bounds<T: PartialOrd>(value: T, minimum: T, maximum: T) -> T {
    let capped = if value > maximum { maximum } else { value };
    if capped < minimum { minimum } else { capped }
}

/// Map `x` onto a byte: 0 at or below `max_x * fract_x`, 255 at or above
/// `max_x`, and a (optionally sine-smoothed) ramp in between.
///
/// # Panics
///
/// Panics if `fract_x` is outside `[0.0, 1.0]`.
pub fn calc_packet(x: f64, max_x: f64, fract_x: f64, smooth: bool) -> u8 {
    assert!((0.0..=1.0).contains(&fract_x), "fraction {fract_x} must be between 0 and 1");
    let min_x = max_x * fract_x;
    if x <= min_x {
        return 0;
    }
    if x >= max_x {
        return 255;
    }
    let ramp = (x - min_x) / (max_x - min_x);
    let ramp = if smooth { smooth_interpolation(ramp) } else { ramp };
    byte_clamp(255.0 * ramp)
}

/// Ease a `[0.0, 1.0]` ramp along a quarter sine wave.
///
/// # Panics
///
/// Panics if `x` is outside `[0.0, 1.0]`.
pub fn smooth_interpolation(x: f64) -> f64 {
    assert!((0.0..=1.0).contains(&x), "fraction {x} must be between 0 and 1");
    (x * PI * 0.5).sin()
}

/// Position within the current beat, `[0.0, 1.0)`.
pub fn bpm_circle(bpm: f64, seconds: f64) -> f64 {
    if bpm <= 0.0 {
        return 0.0;
    }
    let beat = 60.0 / bpm;
    seconds.rem_euclid(beat) / beat
}

/// A `[0.0, 1.0]` half-sine that rises and falls once per beat.
pub fn bpm_wave(bpm: f64, seconds: f64) -> f64 {
    (PI * bpm_circle(bpm, seconds)).sin()
}

/// Sweep from `min_x` toward `max_x` once per beat.
pub fn oscillate(min_x: f64, max_x: f64, bpm: f64, seconds: f64) -> f64 {
    bpm_circle(bpm, seconds).mul_add(max_x - min_x, min_x)
}

/// A beat rate slow enough to be soothing.
pub fn reasonable_bpm(rng: &mut impl Rng) -> u32 {
    rng.random_range(2..=10)
}

/// A walker speed slow enough to be soothing.
pub fn reasonable_speed(rng: &mut impl Rng) -> u32 {
    rng.random_range(10..=40)
}

/// Drift a hue by one step either way, on average once every `rate` calls.
pub fn change_hue(rng: &mut impl Rng, hue: u8, rate: u32) -> u8 {
    if one_in(rng, rate) {
        wrap_hue(i64::from(hue).saturating_add(rng.random_range(-1..=1)))
    } else {
        hue
    }
}

/// Rescale a brightness into `[MIN_DIM, 255]`.
pub fn min_dim(value: u8) -> u8 {
    let span = f64::from(255_u8.saturating_sub(MIN_DIM));
    byte_clamp(f64::from(value) * span / 255.0 + f64::from(MIN_DIM))
}

/// Euclidean distance between two planar points.
pub fn distance(from: (f64, f64), to: (f64, f64)) -> f64 {
    (to.0 - from.0).hypot(to.1 - from.1)
}
