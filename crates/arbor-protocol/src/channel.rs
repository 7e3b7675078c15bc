//! Channel framing.
//!
//! A [`ChannelModel`] is one logical display on a shared connection. Cell
//! updates are buffered with [`ChannelModel::set_cell`] and written as one
//! batch by [`ChannelModel::go`]: exactly one `<channel>X` line, then one
//! `<channel><cell>,<r>,<g>,<b>` line per buffered cell in unspecified order.
//! A second update to the same cell before `go` replaces the first.

use std::collections::BTreeMap;
use std::fmt::Display;

use arbor_types::Hsv;
use tracing::debug;

use crate::error::ProtocolError;
use crate::transport::Transport;

/// Buffers cell colors for one channel and frames them onto a transport.
#[derive(Debug)]
pub struct ChannelModel<T> {
    channel: String,
    transport: T,
    dirty: BTreeMap<String, Hsv>,
    echo: bool,
}

impl<T: Transport> ChannelModel<T> {
    /// Create a model addressing `channel` over `transport`.
    pub fn new(channel: impl Into<String>, transport: T) -> Self {
        Self {
            channel: channel.into(),
            transport,
            dirty: BTreeMap::new(),
            echo: false,
        }
    }

    /// Log every emitted line at `debug` level.
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// The channel token prefixed to every line.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// The underlying transport, mutably.
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the model and return its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Number of cells waiting for the next [`go`](Self::go).
    pub fn pending(&self) -> usize {
        self.dirty.len()
    }

    /// Buffer a color for `cell`. Nothing is written until [`go`](Self::go).
    pub fn set_cell(&mut self, cell: impl Display, color: Hsv) {
        self.dirty.insert(cell.to_string(), color);
    }

    /// Write the frame start and every buffered cell, then flush.
    ///
    /// Returns the number of cell lines written.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] on the first failed write. Cells not yet
    /// written are dropped with the rest of the frame.
    pub fn go(&mut self) -> Result<usize, ProtocolError> {
        let dirty = std::mem::take(&mut self.dirty);
        self.emit(&frame_start_line(&self.channel))?;
        for (cell, color) in &dirty {
            self.emit(&pixel_line(&self.channel, cell, *color))?;
        }
        self.transport.flush()?;
        Ok(dirty.len())
    }

    /// Send a morph delay, converting seconds to whole milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the write fails.
    pub fn send_delay(&mut self, seconds: f64) -> Result<(), ProtocolError> {
        self.emit(&delay_line(&self.channel, seconds))?;
        self.transport.flush()
    }

    /// Send a global intensity.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError`] if the write fails.
    pub fn send_intensity(&mut self, intensity: u8) -> Result<(), ProtocolError> {
        self.emit(&intensity_line(&self.channel, intensity))?;
        self.transport.flush()
    }

    fn emit(&mut self, line: &str) -> Result<(), ProtocolError> {
        if self.echo {
            debug!(line, "tx");
        }
        self.transport.send_line(line)
    }
}

/// `<channel>X`
pub fn frame_start_line(channel: &str) -> String {
    format!("{channel}X")
}

/// `<channel><cell>,<r>,<g>,<b>` with the color converted to RGB.
pub fn pixel_line(channel: &str, cell: &str, color: Hsv) -> String {
    let rgb = color.to_rgb();
    format!("{channel}{cell},{},{},{}", rgb.red, rgb.green, rgb.blue)
}

/// `<channel>D<milliseconds>`; negative delays are sent as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn delay_line(channel: &str, seconds: f64) -> String {
    let millis = (seconds * 1000.0).max(0.0) as u64;
    format!("{channel}D{millis}")
}

/// `<channel>I<value>`
pub fn intensity_line(channel: &str, intensity: u8) -> String {
    format!("{channel}I{intensity}")
}
