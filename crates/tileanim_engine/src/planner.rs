//! Image layout planning.
//!
//! Every animated tile position draws a rectangle cut out of its frame
//! images. Neighbouring tiles of the same run usually sit next to each other
//! in the image as well, in which case a single wider or taller rectangle
//! replaces several 8×8 ones. A merged 2×2 layer needs one image per frame
//! instead of four.

use tileanim_types::{
	constants::{TILE_HEIGHT, TILE_WIDTH, TILES_PER_LAYER},
	registry::{ActiveAnimations, AnimationId, TileAnimation},
	tile::{Tile, TilePosition},
};

/// Source rectangle a tile position draws from its frame images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimension {
	/// Width in pixels
	pub width: u32,
	/// Height in pixels
	pub height: u32,
	/// Left edge in the frame image
	pub x_offset: u32,
	/// Top edge in the frame image
	pub y_offset: u32,
}

/// Pixel offset of a tile's 8×8 region inside its frame images.
pub fn source_offset(anim: &TileAnimation) -> (u32, u32) {
	if anim.image_width == 0 {
		return (0, 0);
	}
	let linear = anim.index * TILE_WIDTH;
	(linear % anim.image_width, (linear / anim.image_width) * TILE_HEIGHT)
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
	id: &'a AnimationId,
	tile: Tile,
	x: u32,
	y: u32,
}

impl Candidate<'_> {
	fn compatible(&self, other: &Candidate<'_>) -> bool {
		self.id == other.id && self.tile.same_attributes(&other.tile)
	}

	fn continues_right(&self, right: &Candidate<'_>) -> bool {
		self.compatible(right) && right.x == self.x + TILE_WIDTH && right.y == self.y
	}

	fn continues_down(&self, below: &Candidate<'_>) -> bool {
		self.compatible(below) && below.x == self.x && below.y == self.y + TILE_HEIGHT
	}
}

/// Plans source rectangles for the animated positions of a metatile.
///
/// The returned vector is parallel to `tiles`. `None` marks positions that
/// are not animated or whose rectangle was merged into a neighbour.
pub fn plan_dimensions(
	tiles: &[Tile],
	animated: &[TilePosition],
	layers: usize,
	active: &ActiveAnimations,
) -> Vec<Option<ImageDimension>> {
	let mut dimensions: Vec<Option<ImageDimension>> = vec![None; tiles.len()];

	for layer in 0..layers {
		let base = layer * TILES_PER_LAYER;
		if base >= tiles.len() {
			break;
		}

		let mut slots: [Option<Candidate<'_>>; TILES_PER_LAYER] = [None; TILES_PER_LAYER];
		for (column, slot) in slots.iter_mut().enumerate() {
			let pos = base + column;
			if pos >= tiles.len() || !animated.contains(&pos) {
				continue;
			}
			let tile = tiles[pos];
			let Some(anim) = active.get(tile.tile_id) else {
				continue;
			};
			let (x, y) = source_offset(anim);
			*slot = Some(Candidate {
				id: &anim.id,
				tile,
				x,
				y,
			});
			dimensions[pos] = Some(ImageDimension {
				width: TILE_WIDTH,
				height: TILE_HEIGHT,
				x_offset: x,
				y_offset: y,
			});
		}

		let mut merged_rows = [false; 2];
		for (row, merged) in merged_rows.iter_mut().enumerate() {
			let (left, right) = (row * 2, row * 2 + 1);
			let (Some(a), Some(b)) = (slots[left], slots[right]) else {
				continue;
			};
			if a.continues_right(&b) {
				if let Some(dim) = dimensions[base + left].as_mut() {
					dim.width += TILE_WIDTH;
				}
				dimensions[base + right] = None;
				slots[right] = None;
				*merged = true;
			}
		}

		// Mixed row merges leave rectangles of different widths.
		if merged_rows[0] != merged_rows[1] {
			continue;
		}

		for column in 0..2 {
			let (top, bottom) = (column, column + 2);
			let (Some(a), Some(b)) = (slots[top], slots[bottom]) else {
				continue;
			};
			if a.continues_down(&b) {
				if let Some(dim) = dimensions[base + top].as_mut() {
					dim.height += TILE_HEIGHT;
				}
				dimensions[base + bottom] = None;
				slots[bottom] = None;
			}
		}
	}

	dimensions
}
