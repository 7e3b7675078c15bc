//! Wire protocol between the Arbor controller and its display peripheral.
//!
//! The peripheral speaks newline-delimited ASCII, one instruction per line,
//! with no acknowledgements. Every line starts with a channel token so that
//! several logical displays can share one connection.
//!
//! ```text
//! 1X                 frame start
//! 1<cell>,<r>,<g>,<b> pixel update
//! 1D<ms>             morph delay
//! 1I<0-255>          intensity
//! ```
//!
//! # Modules
//!
//! - [`channel`] -- [`ChannelModel`] buffers cell updates and frames them.
//! - [`error`] -- [`ProtocolError`] for connection and write failures.
//! - [`transport`] -- The [`Transport`] seam plus TCP and in-memory
//!   implementations.

pub mod channel;
pub mod error;
pub mod transport;

pub use channel::ChannelModel;
pub use error::ProtocolError;
pub use transport::{MemoryTransport, TcpTransport, Transport};
