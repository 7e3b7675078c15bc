//! Integration tests for the `arbor-world` build and push cycle.
//!
//! These drive a full default-shape tree through the in-memory transport and
//! check what would have gone over the wire.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc
)]

use std::collections::BTreeSet;

use arbor_protocol::{ChannelModel, MemoryTransport};
use arbor_types::{Coordinate, Hsv, TreeShape};
use arbor_world::PixelSpace;

fn default_space() -> PixelSpace {
    PixelSpace::build(TreeShape::default()).expect("default shape builds")
}

/// Parse `1<id>,r,g,b` lines back into ids.
fn sent_ids(lines: &[String]) -> BTreeSet<u32> {
    lines
        .iter()
        .skip(1)
        .map(|line| {
            let body = line.strip_prefix('1').unwrap();
            body.split(',').next().unwrap().parse().unwrap()
        })
        .collect()
}

// =============================================================================
// Topology
// =============================================================================

#[test]
fn default_tree_builds_identically_twice() {
    let a = default_space();
    let b = default_space();
    assert_eq!(a.len(), 1212);
    let left: Vec<_> = a.coordinates().copied().collect();
    let right: Vec<_> = b.coordinates().copied().collect();
    assert_eq!(left, right);
    for (p, q) in a.pixels().zip(b.pixels()) {
        assert_eq!(p, q);
    }
}

// =============================================================================
// Push cycle
// =============================================================================

#[test]
fn clear_sends_every_pixel_once() {
    let mut space = default_space();
    let mut sink = ChannelModel::new("1", MemoryTransport::new());

    assert_eq!(space.clear(&mut sink).unwrap(), 1212);

    let lines = sink.transport_mut().take_lines();
    assert_eq!(lines[0], "1X");
    assert_eq!(lines.len(), 1213);
    let ids = sent_ids(&lines);
    assert_eq!(ids.len(), 1212);
    assert_eq!(ids.last(), Some(&1211));
}

#[test]
fn only_changed_pixels_are_sent() {
    let mut space = default_space();
    let mut sink = ChannelModel::new("1", MemoryTransport::new());
    space.clear(&mut sink).unwrap();
    sink.transport_mut().take_lines();

    let touched = [
        Coordinate::new(0, 0),
        Coordinate::from_slice(&[1, 1, 37]).unwrap(),
        Coordinate::from_slice(&[2, 0, 1, 0, 19]).unwrap(),
    ];
    space.set_many(&touched, Hsv::saturated(85));
    assert_eq!(space.push(&mut sink).unwrap(), 3);

    let lines = sink.transport_mut().take_lines();
    let expected: BTreeSet<u32> = touched
        .iter()
        .map(|c| space.pixel(c).unwrap().id())
        .collect();
    assert_eq!(sent_ids(&lines), expected);
    assert!(lines.iter().skip(1).all(|l| l.ends_with(",0,255,0")));

    // Nothing changed since: an empty frame.
    assert_eq!(space.push(&mut sink).unwrap(), 0);
    assert_eq!(sink.transport().lines(), &["1X"]);
}

#[test]
fn force_black_repaints_after_external_reset() {
    let mut space = default_space();
    let mut sink = ChannelModel::new("1", MemoryTransport::new());
    space.black_all();
    // Already black: nothing to send.
    assert_eq!(space.push(&mut sink).unwrap(), 0);
    space.force_black_all();
    assert_eq!(space.dirty_count(), 1212);
    assert_eq!(space.push(&mut sink).unwrap(), 1212);
}
