//! Tree coordinates.
//!
//! A [`Coordinate`] is the path from a trunk root to one pixel:
//! `[trunk, b1, b2, .., bk, leaf]`. Each `b` is the branch slot chosen at
//! that generation and `leaf` is the position within the final segment, so
//! the length is always `2 + generation`.
//!
//! The deepest possible path is known at compile time, so a coordinate is a
//! fixed-capacity array plus a length. Slots past the length are kept at zero,
//! which keeps equality, ordering, and hashing plain slice operations.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// Deepest branch generation the coordinate type can address.
pub const MAX_GENERATIONS: usize = 3;

/// Number of elements a coordinate can hold (`trunk + generations + leaf`).
pub const COORDINATE_CAPACITY: usize = MAX_GENERATIONS + 2;

/// Errors raised when building or growing a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// A coordinate needs at least one element.
    #[error("coordinate must not be empty")]
    Empty,

    /// The path is deeper than [`COORDINATE_CAPACITY`] allows.
    #[error("coordinate exceeds capacity of {capacity} elements")]
    CapacityExceeded {
        /// The fixed capacity.
        capacity: usize,
    },
}

/// A path through the tree topology, from trunk to leaf.
#[derive(Clone, Copy)]
pub struct Coordinate {
    parts: [u16; COORDINATE_CAPACITY],
    len: u8,
}

impl Coordinate {
    /// Build a generation-0 coordinate `[trunk, leaf]`.
    pub const fn new(trunk: u16, leaf: u16) -> Self {
        let mut parts = [0; COORDINATE_CAPACITY];
        parts[0] = trunk;
        parts[1] = leaf;
        Self { parts, len: 2 }
    }

    /// Build a coordinate from its elements.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::Empty`] for an empty slice and
    /// [`CoordinateError::CapacityExceeded`] if it is too long.
    pub fn from_slice(values: &[u16]) -> Result<Self, CoordinateError> {
        if values.is_empty() {
            return Err(CoordinateError::Empty);
        }
        let mut parts = [0; COORDINATE_CAPACITY];
        let dest = parts
            .get_mut(..values.len())
            .ok_or(CoordinateError::CapacityExceeded {
                capacity: COORDINATE_CAPACITY,
            })?;
        dest.copy_from_slice(values);
        let len = u8::try_from(values.len())
            .ok()
            .ok_or(CoordinateError::CapacityExceeded {
                capacity: COORDINATE_CAPACITY,
            })?;
        Ok(Self { parts, len })
    }

    /// The populated elements.
    pub fn as_slice(&self) -> &[u16] {
        self.parts.get(..usize::from(self.len)).unwrap_or(&[])
    }

    /// Number of populated elements.
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// True when no element is populated. Never true for a coordinate built
    /// through the public constructors.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Branch generation this coordinate sits in (`len - 2`).
    pub const fn generation(&self) -> usize {
        (self.len as usize).saturating_sub(2)
    }

    /// The trunk index (first element).
    pub const fn trunk(&self) -> u16 {
        self.parts[0]
    }

    /// The leaf index (last element).
    pub fn leaf(&self) -> u16 {
        self.as_slice().last().copied().unwrap_or(0)
    }

    /// Overwrite the last element.
    pub fn set_leaf(&mut self, value: u16) {
        let last = usize::from(self.len).saturating_sub(1);
        if let Some(slot) = self.parts.get_mut(last) {
            *slot = value;
        }
    }

    /// Append an element.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::CapacityExceeded`] when the coordinate is
    /// already at full depth.
    pub fn push(&mut self, value: u16) -> Result<(), CoordinateError> {
        let slot = self
            .parts
            .get_mut(usize::from(self.len))
            .ok_or(CoordinateError::CapacityExceeded {
                capacity: COORDINATE_CAPACITY,
            })?;
        *slot = value;
        self.len = self.len.saturating_add(1);
        Ok(())
    }

    /// Remove and return the last element, zeroing its slot.
    pub fn pop(&mut self) -> Option<u16> {
        let last = usize::from(self.len.checked_sub(1)?);
        let slot = self.parts.get_mut(last)?;
        let value = *slot;
        *slot = 0;
        self.len = self.len.saturating_sub(1);
        Some(value)
    }

    /// Copy of this coordinate with `value` appended.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::CapacityExceeded`] at full depth.
    pub fn child(&self, value: u16) -> Result<Self, CoordinateError> {
        let mut next = *self;
        next.push(value)?;
        Ok(next)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Tuple form: `(0, 1, 5)`, and `(0,)` for a single element.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        let parts = self.as_slice();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{part}")?;
        }
        if parts.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}
