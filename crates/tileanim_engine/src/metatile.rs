//! Per-metatile draw plans and their cache.

use std::{collections::HashMap, sync::Arc};

use tileanim_types::{
	registry::{ActiveAnimations, TileAnimation},
	tile::{ProjectLimits, Tile, TilePosition, layer_of},
};

use crate::{
	planner::{ImageDimension, plan_dimensions},
	scanner::scan_tiles,
};

/// One tile position the engine has to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEntry {
	/// Non-animated tile drawn on a static overlay
	Static {
		/// Position in the metatile
		pos: TilePosition,
		/// Tile to draw
		tile: Tile,
	},
	/// Animated tile drawn on frame overlays
	Animated {
		/// Position in the metatile
		pos: TilePosition,
		/// Tile flip and palette attributes
		tile: Tile,
		/// Source rectangle in the frame images
		dimension: ImageDimension,
		/// Animation the tile plays
		animation: Arc<TileAnimation>,
	},
}

impl PlanEntry {
	/// Position in the metatile.
	pub fn pos(&self) -> TilePosition {
		match self {
			Self::Static {
				pos,
				..
			}
			| Self::Animated {
				pos,
				..
			} => *pos,
		}
	}

	/// Layer of the entry.
	pub fn layer(&self) -> usize {
		layer_of(self.pos())
	}

	/// Returns true for static entries.
	pub fn is_static(&self) -> bool {
		matches!(self, Self::Static { .. })
	}

	fn sort_key(&self) -> (usize, bool, TilePosition) {
		(self.layer(), !self.is_static(), self.pos())
	}
}

/// Draw plan for a metatile: entries ordered by layer, statics first within a layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetatilePlan {
	entries: Vec<PlanEntry>,
}

impl MetatilePlan {
	/// Builds the plan for a metatile's tiles.
	pub fn build(tiles: &[Tile], limits: &ProjectLimits, active: &ActiveAnimations) -> Self {
		let scan = scan_tiles(tiles, limits.tiles_per_metatile, active);
		if scan.is_static() {
			return Self::default();
		}

		let dimensions =
			plan_dimensions(&scan.tiles, &scan.animated, limits.layers_per_metatile, active);

		let mut entries: Vec<PlanEntry> = scan
			.statics
			.iter()
			.map(|&pos| PlanEntry::Static {
				pos,
				tile: scan.tiles[pos],
			})
			.collect();
		for &pos in &scan.animated {
			let tile = scan.tiles[pos];
			let (Some(dimension), Some(animation)) = (dimensions[pos], active.get(tile.tile_id))
			else {
				continue;
			};
			entries.push(PlanEntry::Animated {
				pos,
				tile,
				dimension,
				animation: Arc::clone(animation),
			});
		}
		entries.sort_by_key(PlanEntry::sort_key);

		Self {
			entries,
		}
	}

	/// Entries in draw order.
	pub fn entries(&self) -> &[PlanEntry] {
		&self.entries
	}

	/// Returns true if the metatile needs no overlays.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of frame images the plan draws, summed over every frame.
	pub fn image_count(&self) -> usize {
		self.entries
			.iter()
			.map(|entry| match entry {
				PlanEntry::Static {
					..
				} => 1,
				PlanEntry::Animated {
					animation,
					..
				} => animation.frame_count(),
			})
			.sum()
	}
}

/// Plans keyed by metatile id, valid for one active animation set.
#[derive(Debug, Default)]
pub struct MetatileCache {
	plans: HashMap<u16, Arc<MetatilePlan>>,
}

impl MetatileCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached plan for a metatile, building it on first use.
	///
	/// `tiles` is only called on a miss. Unknown metatiles get an empty plan.
	pub fn plan<F>(
		&mut self,
		metatile_id: u16,
		limits: &ProjectLimits,
		active: &ActiveAnimations,
		tiles: F,
	) -> Arc<MetatilePlan>
	where
		F: FnOnce() -> Option<Vec<Tile>>,
	{
		let plan = self.plans.entry(metatile_id).or_insert_with(|| {
			let plan = tiles().map_or_else(MetatilePlan::default, |tiles| {
				MetatilePlan::build(&tiles, limits, active)
			});
			Arc::new(plan)
		});
		Arc::clone(plan)
	}

	/// Number of cached metatiles.
	pub fn len(&self) -> usize {
		self.plans.len()
	}

	/// Returns true if nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.plans.is_empty()
	}

	/// Drops every cached plan.
	pub fn clear(&mut self) {
		self.plans.clear();
	}
}
