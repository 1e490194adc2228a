//! Metatile scanning.
//!
//! A metatile stacks several layers of 2×2 tiles. Positions that share an
//! in-layer column sit on top of each other on screen. When any tile in a
//! column animates, the whole column has to be drawn by the engine: animated
//! tiles on frame overlays, the remaining non-empty tiles on static overlays
//! so they keep their place above or below the animation. Columns without
//! animation are left to the host's own rendering.

use tileanim_types::{
	constants::TILES_PER_LAYER,
	registry::ActiveAnimations,
	tile::{Tile, TilePosition},
};

/// Classification of a metatile's tile positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetatileScan {
	/// Tiles of the metatile, layer-major
	pub tiles: Vec<Tile>,
	/// Positions of animated tiles, ascending
	pub animated: Vec<TilePosition>,
	/// Positions of non-empty static tiles sharing a column with an animated tile, ascending
	pub statics: Vec<TilePosition>,
}

impl MetatileScan {
	/// Returns true when nothing in the metatile animates.
	pub fn is_static(&self) -> bool {
		self.animated.is_empty()
	}
}

/// Classifies the tiles of a metatile into animated and static positions.
///
/// Only the first `tiles_per_metatile` tiles are considered.
pub fn scan_tiles(
	tiles: &[Tile],
	tiles_per_metatile: usize,
	active: &ActiveAnimations,
) -> MetatileScan {
	let count = tiles.len().min(tiles_per_metatile);
	let mut animated = Vec::new();
	let mut statics = Vec::new();
	let mut saved_columns = [false; TILES_PER_LAYER];

	for i in 0..count {
		let column = i % TILES_PER_LAYER;
		if saved_columns[column] || !active.is_animated(tiles[i].tile_id) {
			continue;
		}
		for j in (column..count).step_by(TILES_PER_LAYER) {
			let tile = &tiles[j];
			if tile.is_empty() {
				continue;
			}
			if i == j || active.is_animated(tile.tile_id) {
				animated.push(j);
			} else {
				statics.push(j);
			}
		}
		saved_columns[column] = true;
	}

	animated.sort_unstable();
	statics.sort_unstable();
	MetatileScan {
		tiles: tiles.to_vec(),
		animated,
		statics,
	}
}
