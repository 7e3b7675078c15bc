//! The pixel space: every LED of the tree, addressed by coordinate.
//!
//! [`PixelSpace`] owns all [`Pixel`]s for the life of the process. Topology
//! is fixed at construction; afterwards only the color buffers change. Shows
//! write the `next` slot through the mutation methods here, then the driver
//! calls [`PixelSpace::push`], which sends exactly the pixels whose `next`
//! differs from `current` and commits them.
//!
//! Iteration is in coordinate order, so every pixel is visited exactly once
//! and in the same order on every run.

use std::collections::BTreeMap;

use arbor_protocol::{ChannelModel, ProtocolError, Transport};
use arbor_types::{Coordinate, Hsv, TreeShape};
use rand::Rng;
use tracing::{debug, warn};

use crate::error::WorldError;
use crate::pixel::Pixel;
use crate::topology::build_topology;

/// Owns every pixel of the tree and runs the diff-and-push cycle.
#[derive(Debug, Clone)]
pub struct PixelSpace {
    shape: TreeShape,
    pixels: BTreeMap<Coordinate, Pixel>,
    /// Coordinates in id order, for uniform random picks.
    by_id: Vec<Coordinate>,
}

impl PixelSpace {
    /// Build the tree described by `shape`. Every pixel starts clean black.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Shape`] if the shape is invalid.
    pub fn build(shape: TreeShape) -> Result<Self, WorldError> {
        let pixels = build_topology(&shape)?;
        let mut by_id: Vec<(u32, Coordinate)> =
            pixels.values().map(|p| (p.id(), *p.coordinate())).collect();
        by_id.sort_unstable_by_key(|&(id, _)| id);

        debug!(pixels = pixels.len(), "pixel space ready");
        Ok(Self {
            shape,
            pixels,
            by_id: by_id.into_iter().map(|(_, c)| c).collect(),
        })
    }

    /// The shape this space was built from.
    pub const fn shape(&self) -> &TreeShape {
        &self.shape
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True if the tree has no pixels. Never the case for a valid shape.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Whether `coordinate` addresses a pixel.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.pixels.contains_key(coordinate)
    }

    /// The pixel at `coordinate`.
    pub fn pixel(&self, coordinate: &Coordinate) -> Option<&Pixel> {
        self.pixels.get(coordinate)
    }

    /// The pixel with build id `id`.
    pub fn pixel_by_id(&self, id: u32) -> Option<&Pixel> {
        let index = usize::try_from(id).ok()?;
        self.by_id.get(index).and_then(|c| self.pixels.get(c))
    }

    /// All pixels in coordinate order.
    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> {
        self.pixels.values()
    }

    /// All pixels in coordinate order, mutably.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut Pixel> {
        self.pixels.values_mut()
    }

    /// All coordinates in order.
    pub fn coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.pixels.keys()
    }

    /// Number of pixels the next push would send.
    pub fn dirty_count(&self) -> usize {
        self.pixels.values().filter(|p| p.has_changed()).count()
    }

    /// A uniformly random coordinate.
    pub fn random_coordinate(&self, rng: &mut impl Rng) -> Option<Coordinate> {
        if self.by_id.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.by_id.len());
        self.by_id.get(index).copied()
    }

    /// Queue `color` at `coordinate`. A miss is logged and ignored.
    pub fn set(&mut self, coordinate: &Coordinate, color: Hsv) {
        match self.pixels.get_mut(coordinate) {
            Some(pixel) => pixel.set_color(color),
            None => warn!(coordinate = %coordinate, "set on unknown pixel ignored"),
        }
    }

    /// Queue `color` at each coordinate.
    pub fn set_many<'a>(&mut self, coordinates: impl IntoIterator<Item = &'a Coordinate>, color: Hsv) {
        for coordinate in coordinates {
            self.set(coordinate, color);
        }
    }

    /// Queue `color` on every pixel.
    pub fn set_all(&mut self, color: Hsv) {
        for pixel in self.pixels.values_mut() {
            pixel.set_color(color);
        }
    }

    /// Queue black at `coordinate`.
    pub fn black(&mut self, coordinate: &Coordinate) {
        self.set(coordinate, Hsv::BLACK);
    }

    /// Queue black on every pixel.
    pub fn black_all(&mut self) {
        for pixel in self.pixels.values_mut() {
            pixel.set_black();
        }
    }

    /// Make every pixel dirty and black, so the next push repaints the
    /// whole tree regardless of what the peripheral currently shows.
    pub fn force_black_all(&mut self) {
        for pixel in self.pixels.values_mut() {
            pixel.force_black();
        }
    }

    /// Queue `color` at a coordinate that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellNotFound`] if the topology has no such
    /// pixel.
    pub fn paint(&mut self, coordinate: &Coordinate, color: Hsv) -> Result<(), WorldError> {
        let pixel = self
            .pixels
            .get_mut(coordinate)
            .ok_or(WorldError::CellNotFound(*coordinate))?;
        pixel.set_color(color);
        Ok(())
    }

    /// Send every changed pixel to `sink`, commit it, and close the frame.
    ///
    /// Returns the number of pixels sent.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the transport fails. Pixels already
    /// committed stay committed.
    pub fn push<T: Transport>(&mut self, sink: &mut ChannelModel<T>) -> Result<usize, ProtocolError> {
        for pixel in self.pixels.values_mut() {
            if pixel.has_changed() {
                sink.set_cell(pixel.id(), pixel.next_color());
                pixel.commit();
            }
        }
        let sent = sink.go()?;
        debug!(sent, "frame pushed");
        Ok(sent)
    }

    /// Force every pixel black and push the result.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the transport fails.
    pub fn clear<T: Transport>(&mut self, sink: &mut ChannelModel<T>) -> Result<usize, ProtocolError> {
        self.force_black_all();
        self.push(sink)
    }

    /// Tell the peripheral how long to morph into the next frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the transport fails.
    pub fn send_delay<T: Transport>(
        &self,
        sink: &mut ChannelModel<T>,
        seconds: f64,
    ) -> Result<(), ProtocolError> {
        sink.send_delay(seconds)
    }

    /// Set the peripheral's global intensity.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the transport fails.
    pub fn send_intensity<T: Transport>(
        &self,
        sink: &mut ChannelModel<T>,
        intensity: u8,
    ) -> Result<(), ProtocolError> {
        sink.send_intensity(intensity)
    }
}
