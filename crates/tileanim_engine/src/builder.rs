//! Builds overlays for a whole map or a single coordinate.

use tileanim_types::{
	registry::ActiveAnimations,
	tile::{ProjectLimits, Tile, TilePosition, layer_of},
};

use crate::{
	allocator::OverlayAllocator,
	host::{MapSource, OverlayCanvas},
	index::AnimationIndex,
	metatile::{MetatileCache, PlanEntry},
	range::{OverlayRange, OverlayRangeMap, screen_position},
};

/// Counters from a full map build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
	/// Coordinates that received overlays
	pub animated_spaces: usize,
	/// Overlay ids handed out
	pub overlays: u32,
	/// Distinct metatiles planned
	pub metatiles: usize,
}

/// Overlay state of the current map.
#[derive(Debug, Default)]
pub struct MapAnimationBuilder {
	log_prefix: String,
	limits: ProjectLimits,
	active: Option<ActiveAnimations>,
	cache: MetatileCache,
	allocator: OverlayAllocator,
	index: AnimationIndex,
	ranges: OverlayRangeMap,
	built: bool,
}

impl MapAnimationBuilder {
	/// Creates an empty builder.
	pub fn new(limits: ProjectLimits) -> Self {
		Self {
			limits,
			..Self::default()
		}
	}

	/// Sets the prefix of every log message.
	pub fn with_log_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.log_prefix = prefix.into();
		self
	}

	/// Drops all state and prepares for a map of the given size.
	///
	/// Overlay ids restart at 1, the plan cache is emptied and `active`
	/// becomes the animation set for subsequent builds.
	pub fn reset(
		&mut self,
		limits: ProjectLimits,
		active: Option<ActiveAnimations>,
		width: u32,
		height: u32,
	) {
		self.limits = limits;
		self.active = active;
		self.cache.clear();
		self.allocator.reset();
		self.index.clear();
		self.ranges = OverlayRangeMap::new(width, height);
		self.built = false;
	}

	/// Returns true once a full build has completed since the last reset.
	pub fn is_built(&self) -> bool {
		self.built
	}

	/// Animation set used for builds.
	pub fn active(&self) -> Option<&ActiveAnimations> {
		self.active.as_ref()
	}

	/// Interval index of the built overlays.
	pub fn index(&self) -> &AnimationIndex {
		&self.index
	}

	/// Mutable interval index, for the scheduler.
	pub fn index_mut(&mut self) -> &mut AnimationIndex {
		&mut self.index
	}

	/// Per-coordinate overlay ranges.
	pub fn ranges(&self) -> &OverlayRangeMap {
		&self.ranges
	}

	/// Overlay allocator.
	pub fn allocator(&self) -> &OverlayAllocator {
		&self.allocator
	}

	/// Cached metatile plans.
	pub fn cache(&self) -> &MetatileCache {
		&self.cache
	}

	/// Builds overlays for every coordinate, row by row.
	pub fn build_map<H: MapSource + OverlayCanvas + ?Sized>(
		&mut self,
		host: &mut H,
	) -> BuildSummary {
		let mut summary = BuildSummary::default();
		if self.active.is_some() {
			for y in 0..self.ranges.height() {
				for x in 0..self.ranges.width() {
					if self.build_space(host, x, y).is_some() {
						summary.animated_spaces += 1;
					}
				}
			}
		}
		self.built = true;
		summary.overlays = self.allocator.allocated();
		summary.metatiles = self.cache.len();
		summary
	}

	/// Builds overlays for one coordinate and records its range.
	///
	/// Returns `None` when the coordinate needs no overlays.
	pub fn build_space<H: MapSource + OverlayCanvas + ?Sized>(
		&mut self,
		host: &mut H,
		x: u32,
		y: u32,
	) -> Option<OverlayRange> {
		self.ranges.set(x, y, None);
		let active = self.active.as_ref()?;
		let metatile_id = host.metatile_id(x, y)?;
		let prefix = &self.log_prefix;
		let plan = self.cache.plan(metatile_id, &self.limits, active, || {
			let tiles = host.metatile_tiles(metatile_id);
			if tiles.is_none() {
				log::debug!("{prefix}Metatile {metatile_id} has no tile data");
			}
			tiles
		});
		if plan.is_empty() {
			return None;
		}

		let mut space = self.allocator.begin_space(x, y);
		let mut run: Vec<(TilePosition, Tile)> = Vec::new();
		for entry in plan.entries() {
			match entry {
				PlanEntry::Static {
					pos,
					tile,
				} => {
					if run.last().is_some_and(|&(last, _)| layer_of(last) != entry.layer()) {
						self.allocator.allocate_static_run(host, &mut space, &run);
						run.clear();
					}
					run.push((*pos, *tile));
				}
				PlanEntry::Animated {
					pos,
					tile,
					dimension,
					animation,
				} => {
					self.allocator.allocate_static_run(host, &mut space, &run);
					run.clear();
					self.allocator.allocate_animated(
						host,
						&mut self.index,
						&mut space,
						*pos,
						*tile,
						*dimension,
						animation,
					);
				}
			}
		}
		self.allocator.allocate_static_run(host, &mut space, &run);

		let range = self.allocator.finish_space(&mut self.index, space);
		self.ranges.set(x, y, range);
		if let Some(range) = range {
			log::trace!(
				"{}Metatile {metatile_id:#05x} at ({x}, {y}) uses overlays {}..{}",
				self.log_prefix,
				range.start,
				range.end
			);
		}
		range
	}

	/// Clears the overlays of one coordinate and forgets its range.
	///
	/// The ids stay allocated and any frame groups that reference them stay
	/// in the index until the next full rebuild.
	pub fn clear_space<C: OverlayCanvas + ?Sized>(&mut self, canvas: &mut C, x: u32, y: u32) {
		if let Some(range) = self.ranges.take(x, y) {
			for id in range.ids() {
				canvas.clear(id);
			}
		}
	}

	/// Moves every range by `(dx, dy)` with wrap-around and repositions its overlays.
	pub fn shift<C: OverlayCanvas + ?Sized>(&mut self, canvas: &mut C, dx: i32, dy: i32) {
		self.ranges.shift(dx, dy);
		for (x, y, range) in self.ranges.iter() {
			let (screen_x, screen_y) = screen_position(x, y);
			for id in range.ids() {
				canvas.set_position(id, screen_x, screen_y);
			}
		}
	}
}
