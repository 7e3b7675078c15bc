//! Error types for the `arbor-protocol` crate.

/// Errors raised while talking to the display peripheral.
///
/// There is no retry layer: a failed write surfaces to the caller and is
/// expected to end the process so a supervisor can restart it.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The connection could not be established.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        /// The address that was dialed.
        addr: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Writing to an established connection failed.
    #[error("transport write failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
