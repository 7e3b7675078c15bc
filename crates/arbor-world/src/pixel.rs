//! A single addressable LED.
//!
//! A [`Pixel`] carries static geometry computed once at build time and two
//! color slots: `current` (what the peripheral is showing) and `next` (what
//! the frame being painted wants it to show). Shows write `next`; only the
//! push cycle copies `next` into `current`.

use core::f64::consts::{FRAC_PI_2, PI, SQRT_2, TAU};

use arbor_types::{Coordinate, Hsv};

use crate::topology::Point;

/// Raw x of the build origin; normalized x is 0 here.
pub const ORIGIN_X: f64 = 12250.0;

/// Raw y of the build origin; normalized y is 0 here.
pub const ORIGIN_Y: f64 = 10007.0;

/// Measured half-width of the default tree in raw units.
pub const EXTENT_X: f64 = 12249.0;

/// Measured half-height of the default tree in raw units.
pub const EXTENT_Y: f64 = 11438.0;

/// One LED: identity, geometry, and a dual color buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixel {
    coordinate: Coordinate,
    id: u32,
    fraction: f64,
    x: f64,
    y: f64,
    distance: f64,
    angle: f64,
    current: Hsv,
    next: Hsv,
}

impl Pixel {
    /// Create a black pixel at raw position `raw`.
    ///
    /// `fraction` is the pixel's progress along its segment in `[0.0, 1.0)`.
    pub fn new(coordinate: Coordinate, id: u32, fraction: f64, raw: Point) -> Self {
        let x = (raw.x - ORIGIN_X) / EXTENT_X;
        let y = (raw.y - ORIGIN_Y) / EXTENT_Y;
        Self {
            coordinate,
            id,
            fraction,
            x,
            y,
            distance: x.hypot(y) / SQRT_2,
            angle: planar_angle(x, y),
            current: Hsv::BLACK,
            next: Hsv::BLACK,
        }
    }

    /// The pixel's tree coordinate.
    pub const fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Dense build-order id; this is what goes on the wire.
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Branch generation (0 for trunks).
    pub const fn generation(&self) -> usize {
        self.coordinate.generation()
    }

    /// Position within the segment.
    pub fn leaf(&self) -> u16 {
        self.coordinate.leaf()
    }

    /// Progress along the segment, `0.0` at its base.
    pub const fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Normalized x, roughly in `[-1.0, 1.0]`.
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Normalized y, roughly in `[-1.0, 1.0]`.
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Radial distance from the center, roughly in `[0.0, 1.0]`.
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Angle around the center in `[0, 2π)`, measured from +y toward +x.
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Color the peripheral is currently showing.
    pub const fn current_color(&self) -> Hsv {
        self.current
    }

    /// Color queued for the next push.
    pub const fn next_color(&self) -> Hsv {
        self.next
    }

    /// Queue a color for the next push.
    pub const fn set_color(&mut self, color: Hsv) {
        self.next = color;
    }

    /// Queue the black sentinel for the next push.
    pub const fn set_black(&mut self) {
        self.next = Hsv::BLACK;
    }

    /// True when the next push must send this pixel.
    pub fn has_changed(&self) -> bool {
        self.current != self.next
    }

    /// Mark the current slot with a non-black value and queue black, so the
    /// pixel is guaranteed dirty on the next push.
    pub(crate) const fn force_black(&mut self) {
        self.current = Hsv::FORCE_BLACK;
        self.next = Hsv::BLACK;
    }

    /// Record that `next` has been sent.
    pub(crate) const fn commit(&mut self) {
        self.current = self.next;
    }
}

/// Quadrant-correct angle of `(x, y)` in `[0, 2π)`, zero along +y and
/// increasing toward +x. The on-axis case `y == 0` is handled explicitly.
pub fn planar_angle(x: f64, y: f64) -> f64 {
    if y == 0.0 {
        return if x > 0.0 {
            FRAC_PI_2
        } else if x < 0.0 {
            PI + FRAC_PI_2
        } else {
            0.0
        };
    }

    let base = (x / y).atan();
    if y > 0.0 {
        if x < 0.0 { base + TAU } else { base }
    } else {
        base + PI
    }
}
