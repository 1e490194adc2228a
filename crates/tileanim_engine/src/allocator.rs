//! Overlay id allocation for a single map coordinate.
//!
//! Ids are handed out sequentially from [`FIRST_OVERLAY_ID`] and never reused
//! until the next full rebuild. Each coordinate owns the contiguous run of
//! ids allocated while it was built.
//!
//! Within one layer of a coordinate, animated tiles that share an interval
//! and a frame repeat pattern draw onto the same frame overlays. This keeps a
//! merged 2×2 water tile on two overlays instead of eight.

use std::collections::{BTreeSet, HashMap};

use tileanim_types::{
	constants::FIRST_OVERLAY_ID,
	registry::TileAnimation,
	tile::{Tile, TilePosition, layer_of, pixel_x, pixel_y},
};

use crate::{
	host::{ImageRequest, OverlayCanvas, OverlayId, TileImageRequest},
	index::{AnimationIndex, FrameGroup},
	planner::ImageDimension,
	range::{OverlayRange, screen_position},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PackKey {
	interval: u32,
	pattern: Vec<usize>,
}

/// Frame overlays open for reuse in the current layer.
#[derive(Debug, Default)]
struct LayerPackingState {
	layer: Option<usize>,
	runs: HashMap<PackKey, Vec<OverlayId>>,
}

impl LayerPackingState {
	fn enter(&mut self, layer: usize) {
		if self.layer != Some(layer) {
			self.layer = Some(layer);
			self.runs.clear();
		}
	}

	fn reset(&mut self) {
		self.layer = None;
		self.runs.clear();
	}
}

/// Allocation state of the coordinate being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceAllocation {
	x: u32,
	y: u32,
	start: OverlayId,
	intervals: BTreeSet<u32>,
	statics: Vec<OverlayId>,
}

impl SpaceAllocation {
	/// Pixel position of the coordinate on the map.
	pub fn screen_position(&self) -> (u32, u32) {
		screen_position(self.x, self.y)
	}

	/// Intervals of the animations placed so far.
	pub fn intervals(&self) -> impl Iterator<Item = u32> + '_ {
		self.intervals.iter().copied()
	}
}

/// Sequential overlay id allocator.
#[derive(Debug)]
pub struct OverlayAllocator {
	next: OverlayId,
	packing: LayerPackingState,
}

impl Default for OverlayAllocator {
	fn default() -> Self {
		Self::new()
	}
}

impl OverlayAllocator {
	/// Creates an allocator starting at [`FIRST_OVERLAY_ID`].
	pub fn new() -> Self {
		Self {
			next: OverlayId(FIRST_OVERLAY_ID),
			packing: LayerPackingState::default(),
		}
	}

	/// Id the next allocation will use.
	pub fn next_id(&self) -> OverlayId {
		self.next
	}

	/// Number of ids handed out since the last reset.
	pub fn allocated(&self) -> u32 {
		self.next.0 - FIRST_OVERLAY_ID
	}

	/// Restarts allocation at [`FIRST_OVERLAY_ID`].
	pub fn reset(&mut self) {
		self.next = OverlayId(FIRST_OVERLAY_ID);
		self.packing.reset();
	}

	fn take(&mut self) -> OverlayId {
		let id = self.next;
		self.next = id.next();
		id
	}

	/// Starts allocating for a map coordinate.
	pub fn begin_space(&mut self, x: u32, y: u32) -> SpaceAllocation {
		self.packing.reset();
		SpaceAllocation {
			x,
			y,
			start: self.next,
			intervals: BTreeSet::new(),
			statics: Vec::new(),
		}
	}

	/// Draws every frame of an animated tile, allocating or reusing frame overlays.
	///
	/// New overlays are hidden, positioned on the coordinate and registered
	/// with `index` as a frame group.
	#[allow(clippy::too_many_arguments)]
	pub fn allocate_animated<C: OverlayCanvas + ?Sized>(
		&mut self,
		canvas: &mut C,
		index: &mut AnimationIndex,
		space: &mut SpaceAllocation,
		pos: TilePosition,
		tile: Tile,
		dimension: ImageDimension,
		animation: &TileAnimation,
	) {
		self.packing.enter(layer_of(pos));
		let pattern = animation.repeat_pattern();
		let key = PackKey {
			interval: animation.interval,
			pattern: pattern.clone(),
		};

		let overlays = match self.packing.runs.get(&key) {
			Some(overlays) => overlays.clone(),
			None => {
				let (screen_x, screen_y) = space.screen_position();
				let mut overlays: Vec<OverlayId> = Vec::with_capacity(pattern.len());
				for (frame, &first) in pattern.iter().enumerate() {
					if first != frame {
						overlays.push(overlays[first]);
						continue;
					}
					let id = self.take();
					canvas.hide(id);
					canvas.set_position(id, screen_x, screen_y);
					overlays.push(id);
				}
				index.register_frames(animation.interval, FrameGroup::new(overlays.clone()));
				self.packing.runs.insert(key, overlays.clone());
				overlays
			}
		};

		for (frame, &first) in pattern.iter().enumerate() {
			if first != frame {
				continue;
			}
			let (Some(&overlay), Some(path)) =
				(overlays.get(frame), animation.filepaths.get(frame))
			else {
				continue;
			};
			canvas.create_image(&ImageRequest {
				overlay,
				x: pixel_x(pos),
				y: pixel_y(pos),
				path: path.as_path(),
				width: dimension.width,
				height: dimension.height,
				x_offset: dimension.x_offset,
				y_offset: dimension.y_offset,
				hflip: tile.xflip,
				vflip: tile.yflip,
				palette: tile.palette,
			});
		}
		space.intervals.insert(animation.interval);
	}

	/// Draws a run of static tiles onto one new hidden overlay.
	pub fn allocate_static_run<C: OverlayCanvas + ?Sized>(
		&mut self,
		canvas: &mut C,
		space: &mut SpaceAllocation,
		tiles: &[(TilePosition, Tile)],
	) -> Option<OverlayId> {
		if tiles.is_empty() {
			return None;
		}
		let id = self.take();
		canvas.hide(id);
		for &(pos, tile) in tiles {
			canvas.add_tile_image(&TileImageRequest {
				overlay: id,
				x: pixel_x(pos),
				y: pixel_y(pos),
				tile,
			});
		}
		let (screen_x, screen_y) = space.screen_position();
		canvas.set_position(id, screen_x, screen_y);
		space.statics.push(id);
		Some(id)
	}

	/// Registers the coordinate's static overlays and returns its id range.
	///
	/// Statics are added under every interval the coordinate animates with, so
	/// they appear on the first tick any of its animations advance.
	pub fn finish_space(
		&mut self,
		index: &mut AnimationIndex,
		space: SpaceAllocation,
	) -> Option<OverlayRange> {
		self.packing.reset();
		for &interval in &space.intervals {
			index.register_statics(interval, space.statics.clone());
		}
		if self.next == space.start {
			return None;
		}
		Some(OverlayRange {
			start: space.start,
			end: self.next,
		})
	}
}
