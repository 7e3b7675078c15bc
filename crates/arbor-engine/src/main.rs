//! Show engine for the Arbor LED tree.
//!
//! Wires the topology, the peripheral connection, and the show rotation
//! together and runs the frame loop until the frame limit is hit or the
//! process is interrupted.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `arbor-config.yaml` (or `ARBOR_CONFIG`)
//! 3. Build the pixel space for the configured tree shape
//! 4. Connect to the display peripheral
//! 5. Build the show rotation
//! 6. Run the frame loop until done or Ctrl-C
//! 7. Blank the tree and log the result

mod error;

use std::path::PathBuf;

use arbor_core::{ArborConfig, DriverError, DriverSettings, RunSummary, run_shows};
use arbor_protocol::{ChannelModel, ProtocolError, TcpTransport};
use arbor_shows::Rotation;
use arbor_world::PixelSpace;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

const DEFAULT_CONFIG_PATH: &str = "arbor-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the frame loop fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("arbor-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        trunks = config.tree.trunks,
        max_generation = config.tree.max_generation,
        branches = config.tree.branches,
        host = config.display.host,
        port = config.display.port,
        channel = config.display.channel,
        "Configuration loaded"
    );

    // 3. Build the pixel space.
    let mut space = PixelSpace::build(config.tree.clone()).map_err(EngineError::from)?;
    info!(pixels = space.len(), "Topology built");

    // 4. Connect to the peripheral.
    let transport = TcpTransport::connect(&config.display.host, config.display.port)
        .map_err(EngineError::from)?;
    let mut sink = ChannelModel::new(config.display.channel.clone(), transport)
        .with_echo(config.display.debug);

    // 5. Build the rotation.
    let mut rotation =
        Rotation::new(&config.show.rotation, config.show.seed).map_err(EngineError::from)?;
    info!(
        shows = rotation.names().len(),
        seed = ?config.show.seed,
        "Show rotation ready"
    );

    // 6. Run until the frame limit or Ctrl-C.
    let settings = DriverSettings {
        seconds_per_show: config.show.seconds_per_show,
        max_frames: config.show.max_frames,
        intensity: config.show.intensity,
    };
    let outcome = tokio::select! {
        result = run_shows(&mut space, &mut sink, &mut rotation, &settings) => Some(result),
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(error = %e, "failed to listen for Ctrl-C");
            }
            info!("Interrupted");
            None
        }
    };

    // 7. Blank the tree and report.
    let cleared = space.clear(&mut sink);
    match settle(outcome, cleared)? {
        Some(summary) => info!(
            end_reason = ?summary.end_reason,
            frames = summary.frames,
            shows = summary.shows,
            pixels_sent = summary.pixels_sent,
            "arbor-engine shutdown complete"
        ),
        None => info!("arbor-engine shutdown complete"),
    }

    Ok(())
}

/// Combine the driver outcome (`None` if interrupted) with the result of
/// blanking the tree. A driver error outranks a failed clear, which is only
/// logged in that case.
fn settle(
    outcome: Option<Result<RunSummary, DriverError>>,
    cleared: Result<usize, ProtocolError>,
) -> Result<Option<RunSummary>, EngineError> {
    match outcome {
        Some(Err(e)) => {
            if let Err(clear_error) = cleared {
                warn!(error = %clear_error, "failed to blank the tree");
            }
            Err(e.into())
        }
        Some(Ok(summary)) => {
            cleared?;
            Ok(Some(summary))
        }
        None => {
            cleared?;
            Ok(None)
        }
    }
}

/// Load configuration from `ARBOR_CONFIG`, falling back to
/// `arbor-config.yaml` in the working directory. A missing file means
/// defaults.
fn load_config() -> Result<ArborConfig, EngineError> {
    let config_path = std::env::var_os("ARBOR_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        let config = ArborConfig::from_file(&config_path)?;
        Ok(config)
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        Ok(ArborConfig::parse("")?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::io;

    use arbor_core::EndReason;

    use super::*;

    fn write_failure(message: &str) -> ProtocolError {
        ProtocolError::from(io::Error::new(io::ErrorKind::BrokenPipe, message.to_owned()))
    }

    fn summary() -> RunSummary {
        RunSummary {
            end_reason: EndReason::FrameLimit,
            frames: 3,
            shows: 1,
            pixels_sent: 12,
        }
    }

    #[test]
    fn driver_error_survives_a_failed_clear() {
        let outcome = Some(Err(DriverError::from(write_failure("driver"))));
        let err = settle(outcome, Err(write_failure("clear"))).unwrap_err();
        let EngineError::Driver { source } = err else {
            panic!("expected driver error, got {err:?}");
        };
        assert!(source.to_string().contains("driver"));
    }

    #[test]
    fn clear_failure_is_reported_after_a_clean_run() {
        let err = settle(Some(Ok(summary())), Err(write_failure("clear"))).unwrap_err();
        assert!(matches!(err, EngineError::Protocol { .. }));
        let err = settle(None, Err(write_failure("clear"))).unwrap_err();
        assert!(matches!(err, EngineError::Protocol { .. }));
    }

    #[test]
    fn clean_run_returns_its_summary() {
        assert_eq!(settle(Some(Ok(summary())), Ok(1212)).unwrap(), Some(summary()));
        assert_eq!(settle(None, Ok(1212)).unwrap(), None);
    }
}
