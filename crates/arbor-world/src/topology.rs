//! Deterministic generation of the tree's pixels.
//!
//! The sculpture is drawn like a turtle walk. Each trunk starts at the
//! center, turned a further `2π / trunks` from the previous one, and lays a
//! straight line of `L[0]` pixels. From the end of every line the heading
//! turns by [`branch_turn`] and each child branch fans out by
//! [`SIBLING_SPREAD`] from its elder sibling, laying `L[g]` pixels for
//! generation `g`, until the configured depth is reached.
//!
//! Position and heading are passed down the recursion by value, so sibling
//! branches always start from their parent's end point. There is no
//! randomness: the same [`TreeShape`] always produces the same pixels, ids,
//! and positions.

use std::collections::BTreeMap;

use core::f64::consts::{PI, TAU};

use arbor_types::{Coordinate, TreeShape};
use tracing::debug;

use crate::error::WorldError;
use crate::pixel::{ORIGIN_X, ORIGIN_Y, Pixel};

/// Distance between neighboring pixels in raw units.
pub const STEP_LENGTH: f64 = 100.0;

/// Heading offset between sibling branches.
pub const SIBLING_SPREAD: f64 = TAU / 3.0;

/// A raw planar position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Build a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `distance` away along `heading` (zero heading is +y).
    #[must_use]
    pub fn advance(self, heading: f64, distance: f64) -> Self {
        Self {
            x: distance.mul_add(heading.sin(), self.x),
            y: distance.mul_add(heading.cos(), self.y),
        }
    }
}

/// Heading change applied at the end of a segment before its children fan
/// out. Tuned by eye for the physical sculpture.
pub fn branch_turn(branches: u16) -> f64 {
    PI + (TAU / f64::from(branches) + 1.0) / 2.0
}

/// Generate every pixel of the tree described by `shape`, keyed by
/// coordinate. Ids are assigned densely in build order starting at 0.
///
/// # Errors
///
/// Returns [`WorldError::Shape`] if the shape is invalid. The remaining
/// variants indicate a builder defect.
pub fn build_topology(shape: &TreeShape) -> Result<BTreeMap<Coordinate, Pixel>, WorldError> {
    shape.validate()?;
    let mut builder = Builder {
        shape,
        pixels: BTreeMap::new(),
        next_id: 0,
    };

    let origin = Point::new(ORIGIN_X, ORIGIN_Y);
    let trunk_spread = TAU / f64::from(shape.trunks);
    let mut heading = 0.0;
    for trunk in 0..shape.trunks {
        heading += trunk_spread;
        let prefix = Coordinate::from_slice(&[trunk])?;
        let end = builder.lay_segment(prefix, 0, origin, heading)?;
        builder.grow_branches(prefix, 1, end, heading)?;
    }

    debug!(
        pixels = builder.pixels.len(),
        trunks = shape.trunks,
        max_generation = shape.max_generation,
        "topology built"
    );
    Ok(builder.pixels)
}

struct Builder<'a> {
    shape: &'a TreeShape,
    pixels: BTreeMap<Coordinate, Pixel>,
    next_id: u32,
}

impl Builder<'_> {
    fn grow_branches(
        &mut self,
        parent: Coordinate,
        generation: usize,
        origin: Point,
        heading: f64,
    ) -> Result<(), WorldError> {
        if generation > self.shape.deepest() {
            return Ok(());
        }

        let turned = heading + branch_turn(self.shape.branches);
        for slot in 0..self.shape.branches {
            let branch_heading = f64::from(slot).mul_add(SIBLING_SPREAD, turned);
            let prefix = parent.child(slot)?;
            let end = self.lay_segment(prefix, generation, origin, branch_heading)?;
            self.grow_branches(prefix, generation.saturating_add(1), end, branch_heading)?;
        }
        Ok(())
    }

    /// Lay one straight segment and return the position after its last
    /// pixel.
    fn lay_segment(
        &mut self,
        prefix: Coordinate,
        generation: usize,
        origin: Point,
        heading: f64,
    ) -> Result<Point, WorldError> {
        let length = self
            .shape
            .generation_length(generation)
            .ok_or(WorldError::CellNotFound(prefix))?;

        let mut position = origin;
        for leaf in 0..length {
            let coordinate = prefix.child(leaf)?;
            let fraction = f64::from(leaf) / f64::from(length);
            self.drop_pixel(coordinate, fraction, position)?;
            position = position.advance(heading, STEP_LENGTH);
        }
        Ok(position)
    }

    fn drop_pixel(
        &mut self,
        coordinate: Coordinate,
        fraction: f64,
        position: Point,
    ) -> Result<(), WorldError> {
        if self.pixels.contains_key(&coordinate) {
            return Err(WorldError::DuplicateCell(coordinate));
        }
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(WorldError::ArithmeticOverflow)?;
        self.pixels
            .insert(coordinate, Pixel::new(coordinate, id, fraction, position));
        Ok(())
    }
}
