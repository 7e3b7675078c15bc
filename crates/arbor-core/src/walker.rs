//! Branch walker: a front moving along one root-to-tip path.
//!
//! A [`BranchWalker`] holds only a [`Coordinate`]. Stepping outward walks up
//! the current segment and, at its tip, picks a random child branch and
//! enters it at leaf 0. Stepping inward is the exact inverse: down the
//! segment and, at leaf 0, back to the tip of the parent segment. A step that
//! would leave the tree reports exhaustion and leaves the walker in place.
//!
//! Starting from a trunk root a walker visits `sum(L[g])` pixels: that many
//! positions, so one fewer successful step before it is exhausted.

use arbor_types::color::random_color;
use arbor_types::{Coordinate, CoordinateError, Hsv, TreeShape};
use arbor_world::{PixelSpace, WorldError};
use rand::Rng;

/// A growth or retreat front on the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchWalker {
    coordinate: Coordinate,
    moving_outward: bool,
    color: Hsv,
    speed: u32,
}

impl BranchWalker {
    /// A walker at the root of a random trunk, moving outward.
    pub fn from_center(shape: &TreeShape, rng: &mut impl Rng, color: Hsv, speed: u32) -> Self {
        let trunk = rng.random_range(0..shape.trunks.max(1));
        Self {
            coordinate: Coordinate::new(trunk, 0),
            moving_outward: true,
            color,
            speed,
        }
    }

    /// A walker at the tip of a random deepest-generation branch, moving
    /// inward.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if the shape is deeper than a coordinate
    /// can hold. A validated shape never is.
    pub fn from_edge(
        shape: &TreeShape,
        rng: &mut impl Rng,
        color: Hsv,
        speed: u32,
    ) -> Result<Self, CoordinateError> {
        let trunk = rng.random_range(0..shape.trunks.max(1));
        let mut parts = vec![trunk];
        for _ in 0..shape.deepest() {
            parts.push(rng.random_range(0..shape.branches.max(1)));
        }
        let tip = shape
            .generation_length(shape.deepest())
            .unwrap_or(1)
            .saturating_sub(1);
        parts.push(tip);

        Ok(Self {
            coordinate: Coordinate::from_slice(&parts)?,
            moving_outward: false,
            color,
            speed,
        })
    }

    /// Where the walker is.
    pub const fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// The walker's color.
    pub const fn color(&self) -> Hsv {
        self.color
    }

    /// Steps per frame the owning show should take.
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// True while walking away from the center.
    pub const fn moving_outward(&self) -> bool {
        self.moving_outward
    }

    /// Move one pixel in the current direction. Returns `false`, without
    /// moving, once the walker has run off the tree.
    pub fn step(&mut self, shape: &TreeShape, rng: &mut impl Rng) -> bool {
        if self.moving_outward {
            self.step_outward(shape, rng)
        } else {
            self.step_inward(shape)
        }
    }

    /// Reverse direction and pick a fresh random color.
    pub fn switch_direction(&mut self, rng: &mut impl Rng) {
        self.moving_outward = !self.moving_outward;
        self.color = random_color(rng, false);
    }

    /// Paint the walker's color at its coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellNotFound`] if the walker has left the
    /// topology, which means it was built for a different shape.
    pub fn draw(&self, space: &mut PixelSpace) -> Result<(), WorldError> {
        space.paint(&self.coordinate, self.color)
    }

    fn step_outward(&mut self, shape: &TreeShape, rng: &mut impl Rng) -> bool {
        let generation = self.coordinate.generation();
        let Some(length) = shape.generation_length(generation) else {
            return false;
        };

        let next_leaf = self.coordinate.leaf().saturating_add(1);
        if next_leaf < length {
            self.coordinate.set_leaf(next_leaf);
            return true;
        }

        if generation >= shape.deepest() {
            return false;
        }
        let mut next = self.coordinate;
        next.set_leaf(rng.random_range(0..shape.branches.max(1)));
        if next.push(0).is_err() {
            return false;
        }
        self.coordinate = next;
        true
    }

    fn step_inward(&mut self, shape: &TreeShape) -> bool {
        let leaf = self.coordinate.leaf();
        if leaf > 0 {
            self.coordinate.set_leaf(leaf.saturating_sub(1));
            return true;
        }

        let generation = self.coordinate.generation();
        if generation == 0 {
            return false;
        }
        let Some(parent_length) = shape.generation_length(generation.saturating_sub(1)) else {
            return false;
        };
        let mut next = self.coordinate;
        if next.pop().is_none() {
            return false;
        }
        next.set_leaf(parent_length.saturating_sub(1));
        self.coordinate = next;
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn outward(shape: &TreeShape, rng: &mut SmallRng) -> BranchWalker {
        BranchWalker::from_center(shape, rng, Hsv::saturated(0), 10)
    }

    #[test]
    fn trunk_root_walker_exhausts_after_path_length() {
        let shape = TreeShape::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let mut walker = outward(&shape, &mut rng);
        assert_eq!(walker.coordinate().leaf(), 0);

        let mut successes = 0;
        let mut calls = 0;
        loop {
            calls += 1;
            if !walker.step(&shape, &mut rng) {
                break;
            }
            successes += 1;
            assert!(calls < 10_000, "walker never exhausted");
        }
        assert_eq!(successes, shape.path_length() - 1);
        assert_eq!(calls, shape.path_length());
        assert_eq!(walker.coordinate().generation(), shape.deepest());
        assert_eq!(walker.coordinate().leaf(), 19);
    }

    #[test]
    fn exhausted_walker_stays_put() {
        let shape = TreeShape::default();
        let mut rng = SmallRng::seed_from_u64(12);
        let mut walker = outward(&shape, &mut rng);
        while walker.step(&shape, &mut rng) {}
        let end = *walker.coordinate();
        assert!(!walker.step(&shape, &mut rng));
        assert_eq!(*walker.coordinate(), end);
    }

    #[test]
    fn outward_then_inward_returns_to_root() {
        let shape = TreeShape::default();
        let mut rng = SmallRng::seed_from_u64(13);
        for steps in [1_usize, 55, 56, 93, 141] {
            let mut walker = outward(&shape, &mut rng);
            let trunk = walker.coordinate().trunk();
            for _ in 0..steps {
                assert!(walker.step(&shape, &mut rng));
            }
            walker.switch_direction(&mut rng);
            assert!(!walker.moving_outward());
            for _ in 0..steps {
                assert!(walker.step(&shape, &mut rng));
            }
            assert_eq!(*walker.coordinate(), Coordinate::new(trunk, 0));
            assert!(!walker.step(&shape, &mut rng));
        }
    }

    #[test]
    fn crossing_into_a_branch_picks_a_valid_slot() {
        let shape = TreeShape::default();
        let mut rng = SmallRng::seed_from_u64(14);
        let mut walker = outward(&shape, &mut rng);
        for _ in 0..56 {
            assert!(walker.step(&shape, &mut rng));
        }
        let coordinate = walker.coordinate();
        assert_eq!(coordinate.generation(), 1);
        assert_eq!(coordinate.leaf(), 0);
        assert!(coordinate.as_slice().get(1).is_some_and(|&slot| slot < shape.branches));
    }

    #[test]
    fn edge_walker_retreats_to_a_trunk_root() {
        let shape = TreeShape::default();
        let mut rng = SmallRng::seed_from_u64(15);
        let mut walker = BranchWalker::from_edge(&shape, &mut rng, Hsv::saturated(30), 5).unwrap();
        assert!(!walker.moving_outward());
        assert_eq!(walker.coordinate().generation(), 3);
        assert_eq!(walker.coordinate().leaf(), 19);

        let mut successes = 0;
        while walker.step(&shape, &mut rng) {
            successes += 1;
        }
        assert_eq!(successes, shape.path_length() - 1);
        assert_eq!(walker.coordinate().leaf(), 0);
        assert_eq!(walker.coordinate().generation(), 0);
    }

    #[test]
    fn every_visited_coordinate_exists() {
        let shape = TreeShape::default();
        let mut space = PixelSpace::build(shape.clone()).unwrap();
        let mut rng = SmallRng::seed_from_u64(16);
        for _ in 0..20 {
            let mut walker = outward(&shape, &mut rng);
            walker.draw(&mut space).unwrap();
            while walker.step(&shape, &mut rng) {
                walker.draw(&mut space).unwrap();
            }
        }
    }

    #[test]
    fn switch_direction_flips_flag() {
        let shape = TreeShape::default();
        let mut rng = SmallRng::seed_from_u64(17);
        let mut walker = outward(&shape, &mut rng);
        walker.switch_direction(&mut rng);
        assert!(!walker.moving_outward());
        assert_eq!(walker.color().saturation, 255);
        walker.switch_direction(&mut rng);
        assert!(walker.moving_outward());
    }
}
