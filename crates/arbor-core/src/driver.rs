//! Frame driver.
//!
//! [`run_shows`] is the top-level loop. It pulls shows from a
//! [`ShowSource`], and for each frame:
//!
//! 1. asks the show to paint one frame,
//! 2. sends the frame's duration as the peripheral's morph delay,
//! 3. pushes every changed pixel,
//! 4. sleeps for the frame's duration.
//!
//! A show runs until its accumulated frame time reaches
//! [`DriverSettings::seconds_per_show`], then the next show is requested.
//! The loop ends when the frame limit is reached or the source runs dry.
//! Interrupting the process is handled by the caller dropping the future;
//! frames are painted and pushed synchronously, so a partial frame is never
//! sent.

use arbor_protocol::{ChannelModel, ProtocolError, Transport};
use arbor_world::PixelSpace;
use tracing::{debug, info};

use crate::show::{ShowError, ShowSource};

/// Errors that end a driver run.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A show failed to paint a frame.
    #[error("show error: {source}")]
    Show {
        /// The underlying show error.
        #[from]
        source: ShowError,
    },

    /// The peripheral connection failed.
    #[error("protocol error: {source}")]
    Protocol {
        /// The underlying protocol error.
        #[from]
        source: ProtocolError,
    },
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured frame limit was reached.
    FrameLimit,
    /// The show source had nothing more to run.
    SourceExhausted,
}

/// Loop parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverSettings {
    /// Show time before rotating to the next show.
    pub seconds_per_show: f64,
    /// Stop after this many frames. 0 runs until the source runs dry.
    pub max_frames: u64,
    /// Global intensity sent once before the first frame.
    pub intensity: u8,
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Why the run stopped.
    pub end_reason: EndReason,
    /// Frames painted and pushed.
    pub frames: u64,
    /// Shows started.
    pub shows: u64,
    /// Pixel updates sent across all frames.
    pub pixels_sent: u64,
}

/// Drive shows from `source` onto `sink` until a stop condition is met.
///
/// # Errors
///
/// Returns [`DriverError`] if a show fails or the transport fails. There is
/// no retry.
pub async fn run_shows<T: Transport>(
    space: &mut PixelSpace,
    sink: &mut ChannelModel<T>,
    source: &mut dyn ShowSource,
    settings: &DriverSettings,
) -> Result<RunSummary, DriverError> {
    let mut summary = RunSummary {
        end_reason: EndReason::SourceExhausted,
        frames: 0,
        shows: 0,
        pixels_sent: 0,
    };

    info!(
        pixels = space.len(),
        seconds_per_show = settings.seconds_per_show,
        max_frames = settings.max_frames,
        "driver starting"
    );
    space.send_intensity(sink, settings.intensity)?;

    'shows: while let Some(mut show) = source.next_show(space) {
        summary.shows = summary.shows.saturating_add(1);
        info!(show = show.name(), "show starting");
        show.start(space);

        let mut show_time = 0.0;
        loop {
            if settings.max_frames > 0 && summary.frames >= settings.max_frames {
                summary.end_reason = EndReason::FrameLimit;
                break 'shows;
            }

            let duration = show.next_frame(space)?;
            space.send_delay(sink, duration.as_secs_f64())?;
            let sent = space.push(sink)?;
            summary.frames = summary.frames.saturating_add(1);
            summary.pixels_sent = summary
                .pixels_sent
                .saturating_add(u64::try_from(sent).unwrap_or(u64::MAX));
            debug!(show = show.name(), frame = summary.frames, sent, "frame");

            if !duration.is_zero() {
                tokio::time::sleep(duration).await;
            }
            show_time += duration.as_secs_f64();
            if show_time >= settings.seconds_per_show {
                break;
            }
        }
    }

    info!(
        frames = summary.frames,
        shows = summary.shows,
        pixels_sent = summary.pixels_sent,
        reason = ?summary.end_reason,
        "driver stopped"
    );
    Ok(summary)
}
