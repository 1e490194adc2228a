//! Tiles, metatile positions and project-wide limits.

use crate::constants::{METATILE_TILE_WIDTH, TILE_HEIGHT, TILE_WIDTH, TILES_PER_LAYER};

/// A single 8×8 tile reference inside a metatile.
///
/// A tile with id 0 is treated as empty: it draws nothing and never
/// participates in animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile {
	/// Tile id within the combined primary + secondary tileset space
	pub tile_id: u16,
	/// Horizontal flip flag
	pub xflip: bool,
	/// Vertical flip flag
	pub yflip: bool,
	/// Palette index
	pub palette: u8,
}

impl Tile {
	/// Creates an unflipped tile using palette 0.
	pub fn new(tile_id: u16) -> Self {
		Self {
			tile_id,
			..Self::default()
		}
	}

	/// Returns a copy of this tile with the given flip flags.
	pub fn with_flip(mut self, xflip: bool, yflip: bool) -> Self {
		self.xflip = xflip;
		self.yflip = yflip;
		self
	}

	/// Returns a copy of this tile using the given palette.
	pub fn with_palette(mut self, palette: u8) -> Self {
		self.palette = palette;
		self
	}

	/// Returns true when the tile draws nothing (id 0).
	pub fn is_empty(&self) -> bool {
		self.tile_id == 0
	}

	/// Returns true when both tiles would render with the same attributes.
	pub fn same_attributes(&self, other: &Tile) -> bool {
		self.xflip == other.xflip && self.yflip == other.yflip && self.palette == other.palette
	}
}

/// Project-wide limits supplied by the host when a project opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectLimits {
	/// Total tiles in one metatile (all layers)
	pub tiles_per_metatile: usize,
	/// Number of layers in one metatile
	pub layers_per_metatile: usize,
	/// Number of tiles addressable by a primary tileset
	pub max_primary_tiles: u32,
	/// Number of tiles addressable by a secondary tileset
	pub max_secondary_tiles: u32,
}

impl Default for ProjectLimits {
	fn default() -> Self {
		Self {
			tiles_per_metatile: 12,
			layers_per_metatile: 3,
			max_primary_tiles: 512,
			max_secondary_tiles: 512,
		}
	}
}

impl ProjectLimits {
	/// Exclusive tile-id ceiling for primary tilesets.
	pub fn primary_ceiling(&self) -> u32 {
		self.max_primary_tiles
	}

	/// Exclusive tile-id ceiling for secondary tilesets (primary + secondary).
	pub fn secondary_ceiling(&self) -> u32 {
		self.max_primary_tiles + self.max_secondary_tiles
	}
}

/// Index of a tile inside a metatile, `layer * 4 + column`.
pub type TilePosition = usize;

/// Layer a tile position belongs to.
pub fn layer_of(pos: TilePosition) -> usize {
	pos / TILES_PER_LAYER
}

/// Position of a tile inside its layer (0..4), shared by every layer.
pub fn column_of(pos: TilePosition) -> usize {
	pos % TILES_PER_LAYER
}

/// Horizontal pixel offset of a tile position within its metatile.
pub fn pixel_x(pos: TilePosition) -> u32 {
	(pos % METATILE_TILE_WIDTH) as u32 * TILE_WIDTH
}

/// Vertical pixel offset of a tile position within its metatile.
pub fn pixel_y(pos: TilePosition) -> u32 {
	(column_of(pos) / METATILE_TILE_WIDTH) as u32 * TILE_HEIGHT
}
