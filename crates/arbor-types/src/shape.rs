//! Tree shape parameters.
//!
//! A [`TreeShape`] fixes everything the topology builder needs: how many
//! trunks radiate from the center, how deep branching goes, how many children
//! each segment splits into, and how many pixels each generation's segment
//! carries. The same shape always builds the same tree.

use serde::Deserialize;

use crate::coordinate::MAX_GENERATIONS;

/// Errors describing an unusable tree shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// At least one trunk is required.
    #[error("tree needs at least one trunk")]
    NoTrunks,

    /// At least one branch per generation is required.
    #[error("tree needs at least one branch per generation")]
    NoBranches,

    /// The generation depth does not fit in a coordinate.
    #[error("max generation {requested} exceeds supported depth {supported}")]
    TooDeep {
        /// Requested depth.
        requested: u16,
        /// Deepest supported generation.
        supported: usize,
    },

    /// The length table does not cover generations `0..=max_generation`.
    #[error("expected {expected} generation lengths, got {actual}")]
    LengthTableMismatch {
        /// Required number of entries.
        expected: usize,
        /// Entries supplied.
        actual: usize,
    },

    /// A segment must hold at least two pixels so a walker can enter and
    /// leave it.
    #[error("generation {generation} has length {length}, minimum is 2")]
    SegmentTooShort {
        /// Offending generation.
        generation: usize,
        /// Its configured length.
        length: u16,
    },
}

/// Parameters for procedural tree generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeShape {
    /// Number of trunks radiating from the center.
    #[serde(default = "default_trunks")]
    pub trunks: u16,

    /// Deepest branch generation (trunks are generation 0).
    #[serde(default = "default_max_generation")]
    pub max_generation: u16,

    /// Child branches per segment.
    #[serde(default = "default_branches")]
    pub branches: u16,

    /// Pixels per segment, indexed by generation.
    #[serde(default = "default_generation_lengths")]
    pub generation_lengths: Vec<u16>,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            trunks: default_trunks(),
            max_generation: default_max_generation(),
            branches: default_branches(),
            generation_lengths: default_generation_lengths(),
        }
    }
}

impl TreeShape {
    /// Check the shape can be built and walked.
    ///
    /// # Errors
    ///
    /// Returns the first [`ShapeError`] found.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.trunks == 0 {
            return Err(ShapeError::NoTrunks);
        }
        if self.branches == 0 {
            return Err(ShapeError::NoBranches);
        }
        if usize::from(self.max_generation) > MAX_GENERATIONS {
            return Err(ShapeError::TooDeep {
                requested: self.max_generation,
                supported: MAX_GENERATIONS,
            });
        }
        let expected = usize::from(self.max_generation).saturating_add(1);
        if self.generation_lengths.len() != expected {
            return Err(ShapeError::LengthTableMismatch {
                expected,
                actual: self.generation_lengths.len(),
            });
        }
        for (generation, &length) in self.generation_lengths.iter().enumerate() {
            if length < 2 {
                return Err(ShapeError::SegmentTooShort { generation, length });
            }
        }
        Ok(())
    }

    /// Pixel count of one segment in `generation`, if that generation exists.
    pub fn generation_length(&self, generation: usize) -> Option<u16> {
        self.generation_lengths.get(generation).copied()
    }

    /// Deepest generation as an index.
    pub fn deepest(&self) -> usize {
        usize::from(self.max_generation)
    }

    /// Closed-form pixel count: `trunks * sum(branches^g * L[g])`.
    pub fn pixel_count(&self) -> usize {
        let mut per_trunk: usize = 0;
        let mut fan_out: usize = 1;
        for &length in &self.generation_lengths {
            per_trunk = per_trunk.saturating_add(fan_out.saturating_mul(usize::from(length)));
            fan_out = fan_out.saturating_mul(usize::from(self.branches));
        }
        per_trunk.saturating_mul(usize::from(self.trunks))
    }

    /// Pixels on one root-to-tip path: `sum(L[g])`.
    pub fn path_length(&self) -> usize {
        self.generation_lengths
            .iter()
            .fold(0_usize, |acc, &length| acc.saturating_add(usize::from(length)))
    }
}

const fn default_trunks() -> u16 {
    3
}

const fn default_max_generation() -> u16 {
    3
}

const fn default_branches() -> u16 {
    2
}

fn default_generation_lengths() -> Vec<u16> {
    vec![56, 38, 28, 20]
}
