//! Per-pixel intensity fades.
//!
//! A [`Fader`] paints one coordinate with its color scaled by an intensity,
//! then moves the intensity by `delta`. Growing faders rise to 1.0 and turn
//! around; shrinking faders fall to 0.0 and die. A [`FadeController`] owns
//! the live faders for a show and advances them all once per frame.
//!
//! Several faders may target the same pixel. Within one cycle the one
//! processed last wins.

use arbor_types::{Coordinate, Hsv};
use arbor_world::PixelSpace;

/// One fading pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Fader {
    coordinate: Coordinate,
    color: Hsv,
    intensity: f64,
    growing: bool,
    delta: f64,
}

impl Fader {
    /// Create a fader. `intensity` is clamped to `[0.0, 1.0]`.
    pub fn new(color: Hsv, coordinate: Coordinate, intensity: f64, growing: bool, delta: f64) -> Self {
        Self {
            coordinate,
            color,
            intensity: intensity.clamp(0.0, 1.0),
            growing,
            delta: delta.abs(),
        }
    }

    /// Target pixel.
    pub const fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Base color at full intensity.
    pub const fn color(&self) -> Hsv {
        self.color
    }

    /// Current intensity in `[0.0, 1.0]`.
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }

    /// True until the fader has peaked.
    pub const fn growing(&self) -> bool {
        self.growing
    }

    /// A fader is alive while it has any intensity left.
    pub fn is_alive(&self) -> bool {
        self.intensity > 0.0
    }

    fn draw(&self, space: &mut PixelSpace) {
        space.set(&self.coordinate, self.color.dimmed(self.intensity));
    }

    fn advance(&mut self) {
        if self.growing {
            self.intensity += self.delta;
            if self.intensity > 1.0 {
                self.intensity = 1.0;
                self.growing = false;
            }
        } else {
            self.intensity = (self.intensity - self.delta).max(0.0);
        }
    }
}

/// The set of live faders for one show.
#[derive(Debug, Clone, Default)]
pub struct FadeController {
    faders: Vec<Fader>,
}

impl FadeController {
    /// An empty controller.
    pub const fn new() -> Self {
        Self { faders: Vec::new() }
    }

    /// Start a new fade. Nothing is deduplicated.
    pub fn add(&mut self, color: Hsv, coordinate: Coordinate, intensity: f64, growing: bool, delta: f64) {
        self.faders
            .push(Fader::new(color, coordinate, intensity, growing, delta));
    }

    /// Paint and advance every live fader; black out and drop dead ones.
    ///
    /// With `refresh_first`, the whole tree is blacked out before painting,
    /// so pixels no fader covers go dark this frame.
    pub fn cycle(&mut self, space: &mut PixelSpace, refresh_first: bool) {
        if refresh_first {
            space.black_all();
        }
        self.faders.retain_mut(|fader| {
            if fader.is_alive() {
                fader.draw(space);
                fader.advance();
                true
            } else {
                space.black(&fader.coordinate);
                false
            }
        });
    }

    /// Black out every fader's pixel and drop them all.
    pub fn clear(&mut self, space: &mut PixelSpace) {
        for fader in self.faders.drain(..) {
            space.black(&fader.coordinate);
        }
    }

    /// Number of live faders.
    pub fn len(&self) -> usize {
        self.faders.len()
    }

    /// True when no faders are live.
    pub fn is_empty(&self) -> bool {
        self.faders.is_empty()
    }

    /// The live faders in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Fader> {
        self.faders.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use arbor_types::TreeShape;

    use super::*;

    fn space() -> PixelSpace {
        PixelSpace::build(TreeShape {
            trunks: 1,
            max_generation: 0,
            branches: 1,
            generation_lengths: vec![4],
        })
        .unwrap()
    }

    #[test]
    fn growing_fader_peaks_then_dies() {
        let mut space = space();
        let mut faders = FadeController::new();
        faders.add(Hsv::saturated(0), Coordinate::new(0, 1), 0.01, true, 0.3);

        let mut peaked = false;
        for _ in 0..20 {
            faders.cycle(&mut space, true);
            for fader in faders.iter() {
                assert!((0.0..=1.0).contains(&fader.intensity()));
                if !fader.growing() {
                    peaked = true;
                }
            }
        }
        assert!(peaked);
        assert!(faders.is_empty());
    }

    #[test]
    fn fader_landing_on_full_keeps_growing_one_more_frame() {
        let mut space = space();
        let mut faders = FadeController::new();
        faders.add(Hsv::saturated(0), Coordinate::new(0, 0), 0.5, true, 0.5);

        faders.cycle(&mut space, false);
        let fader = faders.iter().next().unwrap();
        assert!((fader.intensity() - 1.0).abs() < 1e-12);
        assert!(fader.growing());

        faders.cycle(&mut space, false);
        let painted = space.pixel(&Coordinate::new(0, 0)).unwrap().next_color();
        assert_eq!(painted, Hsv::saturated(0));
        let fader = faders.iter().next().unwrap();
        assert!((fader.intensity() - 1.0).abs() < 1e-12);
        assert!(!fader.growing());
    }

    #[test]
    fn zero_intensity_shrinking_fader_is_dropped_on_first_cycle() {
        let mut space = space();
        let mut faders = FadeController::new();
        faders.add(Hsv::saturated(0), Coordinate::new(0, 0), 0.0, false, 0.1);
        faders.cycle(&mut space, false);
        assert!(faders.is_empty());
        assert_eq!(space.pixel(&Coordinate::new(0, 0)).unwrap().next_color(), Hsv::BLACK);
    }

    #[test]
    fn live_fader_paints_scaled_brightness() {
        let mut space = space();
        let mut faders = FadeController::new();
        faders.add(Hsv::new(40, 255, 200), Coordinate::new(0, 2), 0.5, false, 0.25);
        faders.cycle(&mut space, true);
        let painted = space.pixel(&Coordinate::new(0, 2)).unwrap().next_color();
        assert_eq!(painted, Hsv::new(40, 255, 100));
        assert!((faders.iter().next().unwrap().intensity() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn dead_faders_are_removed_without_skipping_neighbors() {
        let mut space = space();
        let mut faders = FadeController::new();
        // Alternate dead and live faders so removal must not skip.
        for leaf in 0..4 {
            let intensity = if leaf % 2 == 0 { 0.0 } else { 1.0 };
            faders.add(Hsv::saturated(10), Coordinate::new(0, leaf), intensity, false, 0.5);
        }
        faders.cycle(&mut space, true);
        assert_eq!(faders.len(), 2);
        let survivors: Vec<u16> = faders.iter().map(|f| f.coordinate().leaf()).collect();
        assert_eq!(survivors, vec![1, 3]);
        assert!(faders.iter().all(|f| (f.intensity() - 0.5).abs() < 1e-12));
    }

    #[test]
    fn last_fader_on_a_pixel_wins() {
        let mut space = space();
        let mut faders = FadeController::new();
        let target = Coordinate::new(0, 3);
        faders.add(Hsv::saturated(10), target, 1.0, false, 0.1);
        faders.add(Hsv::saturated(90), target, 1.0, false, 0.1);
        faders.cycle(&mut space, false);
        assert_eq!(space.pixel(&target).unwrap().next_color().hue, 90);
    }

    #[test]
    fn clear_blacks_out_and_empties() {
        let mut space = space();
        let mut faders = FadeController::new();
        faders.add(Hsv::saturated(10), Coordinate::new(0, 0), 1.0, false, 0.1);
        faders.cycle(&mut space, false);
        faders.clear(&mut space);
        assert!(faders.is_empty());
        assert_eq!(space.pixel(&Coordinate::new(0, 0)).unwrap().next_color(), Hsv::BLACK);
    }

    #[test]
    fn intensity_is_clamped_on_add() {
        let fader = Fader::new(Hsv::saturated(0), Coordinate::new(0, 0), 3.0, true, 0.1);
        assert_eq!(fader.intensity(), 1.0);
    }
}
