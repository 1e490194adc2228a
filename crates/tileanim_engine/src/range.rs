//! Per-coordinate overlay bookkeeping.

use std::ops::Range;

use tileanim_types::constants::{METATILE_HEIGHT, METATILE_WIDTH};

use crate::host::OverlayId;

/// Pixel position of a map coordinate.
pub fn screen_position(x: u32, y: u32) -> (u32, u32) {
	(x * METATILE_WIDTH, y * METATILE_HEIGHT)
}

/// Contiguous, half-open run of overlay ids owned by one map coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayRange {
	/// First id of the run
	pub start: OverlayId,
	/// One past the last id of the run
	pub end: OverlayId,
}

impl OverlayRange {
	/// Number of overlays in the range.
	pub fn len(&self) -> usize {
		self.end.0.saturating_sub(self.start.0) as usize
	}

	/// Returns true if the range holds no overlays.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Iterates over the ids in the range.
	pub fn ids(self) -> impl Iterator<Item = OverlayId> {
		Range {
			start: self.start.0,
			end: self.end.0,
		}
		.map(OverlayId)
	}
}

fn wrap(coord: u32, delta: i64, size: u32) -> u32 {
	if size == 0 {
		return 0;
	}
	(i64::from(coord) + delta).rem_euclid(i64::from(size)) as u32
}

/// Overlay ranges for every coordinate of the current map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayRangeMap {
	width: u32,
	height: u32,
	ranges: Vec<Option<OverlayRange>>,
}

impl OverlayRangeMap {
	/// Creates an empty map for the given dimensions.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			ranges: vec![None; width as usize * height as usize],
		}
	}

	/// Map width.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Map height.
	pub fn height(&self) -> u32 {
		self.height
	}

	fn slot(&self, x: u32, y: u32) -> Option<usize> {
		(x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
	}

	/// Range owned by a coordinate.
	pub fn get(&self, x: u32, y: u32) -> Option<OverlayRange> {
		self.slot(x, y).and_then(|slot| self.ranges[slot])
	}

	/// Replaces the range of a coordinate. Out-of-bounds coordinates are ignored.
	pub fn set(&mut self, x: u32, y: u32, range: Option<OverlayRange>) {
		if let Some(slot) = self.slot(x, y) {
			self.ranges[slot] = range;
		}
	}

	/// Removes and returns the range of a coordinate.
	pub fn take(&mut self, x: u32, y: u32) -> Option<OverlayRange> {
		self.slot(x, y).and_then(|slot| self.ranges[slot].take())
	}

	/// Iterates over `(x, y, range)` for every coordinate owning overlays.
	pub fn iter(&self) -> impl Iterator<Item = (u32, u32, OverlayRange)> + '_ {
		let width = self.width.max(1) as usize;
		self.ranges
			.iter()
			.enumerate()
			.filter_map(move |(slot, range)| {
				range.map(|r| ((slot % width) as u32, (slot / width) as u32, r))
			})
	}

	/// Number of coordinates owning overlays.
	pub fn occupied(&self) -> usize {
		self.ranges.iter().filter(|range| range.is_some()).count()
	}

	/// Moves every range by `(dx, dy)`, wrapping around the map edges.
	pub fn shift(&mut self, dx: i32, dy: i32) {
		let mut shifted = vec![None; self.ranges.len()];
		for (x, y, range) in self.iter() {
			let nx = wrap(x, i64::from(dx), self.width);
			let ny = wrap(y, i64::from(dy), self.height);
			shifted[ny as usize * self.width as usize + nx as usize] = Some(range);
		}
		self.ranges = shifted;
	}
}
