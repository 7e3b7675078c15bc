//! Integration tests for the show library running under the frame driver.
//!
//! Time is paused, so frame sleeps complete instantly while still advancing
//! the tokio clock.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::missing_panics_doc
)]

use arbor_core::{DriverSettings, EndReason, run_shows};
use arbor_protocol::{ChannelModel, MemoryTransport};
use arbor_shows::{Rotation, SHOW_NAMES};
use arbor_types::TreeShape;
use arbor_world::PixelSpace;

fn settings(seconds_per_show: f64, max_frames: u64) -> DriverSettings {
    DriverSettings {
        seconds_per_show,
        max_frames,
        intensity: 200,
    }
}

async fn run(seed: u64, settings: &DriverSettings) -> (u64, Vec<String>) {
    let mut space = PixelSpace::build(TreeShape::default()).expect("default shape builds");
    let mut sink = ChannelModel::new("1", MemoryTransport::new());
    let mut rotation = Rotation::new(&[], Some(seed)).unwrap();
    let summary = run_shows(&mut space, &mut sink, &mut rotation, settings)
        .await
        .unwrap();
    assert_eq!(summary.end_reason, EndReason::FrameLimit);
    (summary.shows, sink.into_transport().take_lines())
}

#[tokio::test(start_paused = true)]
async fn every_show_runs_in_turn() {
    // Any frame is long enough to use up the show's time.
    let frames = u64::try_from(SHOW_NAMES.len()).unwrap();
    let (shows, lines) = run(1, &settings(0.01, frames)).await;
    assert_eq!(shows, frames);
    assert_eq!(lines[0], "1I200");
    let frame_starts = lines.iter().filter(|l| *l == "1X").count();
    assert_eq!(frame_starts, SHOW_NAMES.len());
    let delays = lines.iter().filter(|l| l.starts_with("1D")).count();
    assert_eq!(delays, SHOW_NAMES.len());
}

#[tokio::test(start_paused = true)]
async fn seeded_runs_are_identical() {
    let settings = settings(2.0, 60);
    let (_, first) = run(7, &settings).await;
    let (_, second) = run(7, &settings).await;
    assert_eq!(first, second);
}

#[tokio::test(start_paused = true)]
async fn frames_always_precede_pixels_with_a_delay() {
    let (_, lines) = run(3, &settings(5.0, 40)).await;
    for (index, line) in lines.iter().enumerate() {
        if line == "1X" {
            assert!(lines[index - 1].starts_with("1D"), "line {index}: {line}");
        }
    }
}
