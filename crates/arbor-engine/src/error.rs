//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during start-up and the show
//! loop so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: arbor_core::ConfigError,
    },

    /// The configured tree shape could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: arbor_world::WorldError,
    },

    /// Connecting to or writing to the peripheral failed.
    #[error("protocol error: {source}")]
    Protocol {
        /// The underlying protocol error.
        #[from]
        source: arbor_protocol::ProtocolError,
    },

    /// The show rotation names a show that does not exist.
    #[error("registry error: {source}")]
    Registry {
        /// The underlying registry error.
        #[from]
        source: arbor_shows::RegistryError,
    },

    /// The frame loop stopped on an error.
    #[error("driver error: {source}")]
    Driver {
        /// The underlying driver error.
        #[from]
        source: arbor_core::DriverError,
    },
}
