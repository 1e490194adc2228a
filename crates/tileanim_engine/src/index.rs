//! Overlay groups keyed by animation interval.
//!
//! The scheduler only needs to know, per interval, which overlay shows which
//! frame and which static overlays wait to be revealed.

use std::collections::BTreeMap;

use crate::host::{OverlayCanvas, OverlayId};

/// Overlays holding the frames of one animated tile, one id per frame.
///
/// Repeated frame tokens map to the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameGroup {
	overlays: Vec<OverlayId>,
}

impl FrameGroup {
	/// Creates a group from per-frame overlay ids.
	pub fn new(overlays: Vec<OverlayId>) -> Self {
		Self {
			overlays,
		}
	}

	/// Number of frames.
	pub fn len(&self) -> usize {
		self.overlays.len()
	}

	/// Returns true if the group has no frames.
	pub fn is_empty(&self) -> bool {
		self.overlays.is_empty()
	}

	/// Overlay showing a frame.
	pub fn overlay(&self, frame: usize) -> Option<OverlayId> {
		self.overlays.get(frame).copied()
	}

	/// Per-frame overlay ids.
	pub fn overlays(&self) -> &[OverlayId] {
		&self.overlays
	}
}

/// Static overlays of one map coordinate, revealed with its animations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticGroup {
	/// Static overlays of the coordinate
	pub overlays: Vec<OverlayId>,
	/// True once the overlays have been shown
	pub revealed: bool,
}

/// Frame and static groups keyed by interval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationIndex {
	pub(crate) frames: BTreeMap<u32, Vec<FrameGroup>>,
	pub(crate) statics: BTreeMap<u32, Vec<StaticGroup>>,
}

impl AnimationIndex {
	/// Creates an empty index.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a frame group under an interval.
	pub fn register_frames(&mut self, interval: u32, group: FrameGroup) {
		self.frames.entry(interval).or_default().push(group);
	}

	/// Adds a static group under an interval. Empty groups are skipped.
	pub fn register_statics(&mut self, interval: u32, overlays: Vec<OverlayId>) {
		if overlays.is_empty() {
			return;
		}
		self.statics.entry(interval).or_default().push(StaticGroup {
			overlays,
			revealed: false,
		});
	}

	/// Frame groups of an interval.
	pub fn frame_groups(&self, interval: u32) -> &[FrameGroup] {
		self.frames.get(&interval).map(Vec::as_slice).unwrap_or_default()
	}

	/// Static groups of an interval.
	pub fn static_groups(&self, interval: u32) -> &[StaticGroup] {
		self.statics.get(&interval).map(Vec::as_slice).unwrap_or_default()
	}

	/// Intervals with at least one frame group, ascending.
	pub fn intervals(&self) -> impl Iterator<Item = u32> + '_ {
		self.frames.keys().copied()
	}

	/// Total number of frame groups.
	pub fn frame_group_count(&self) -> usize {
		self.frames.values().map(Vec::len).sum()
	}

	/// Total number of static groups.
	pub fn static_group_count(&self) -> usize {
		self.statics.values().map(Vec::len).sum()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty() && self.statics.is_empty()
	}

	/// Marks every static group as not yet revealed.
	pub fn conceal_statics(&mut self) {
		for group in self.statics.values_mut().flatten() {
			group.revealed = false;
		}
	}

	/// Counts registered overlays that are currently visible.
	pub fn visible_overlays<C: OverlayCanvas + ?Sized>(&self, canvas: &C) -> usize {
		let frames = self.frames.values().flatten().flat_map(|group| group.overlays.iter());
		let statics = self.statics.values().flatten().flat_map(|group| group.overlays.iter());
		frames.chain(statics).filter(|&&id| canvas.is_visible(id)).count()
	}

	/// Drops every group.
	pub fn clear(&mut self) {
		self.frames.clear();
		self.statics.clear();
	}
}
