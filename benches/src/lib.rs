//! Benchmark helper utilities for tileanim-rs
//!
//! This module provides a synthetic map host and animation set for
//! benchmarking full-map builds and tick throughput.

use std::{
	collections::{BTreeSet, HashMap},
	path::PathBuf,
	sync::Arc,
	time::Duration,
};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tileanim_engine::{
	ActionSpec, Host, ImageRequest, MapSource, OverlayCanvas, OverlayId, TileImageRequest,
};
use tileanim_types::{
	registry::{ActiveAnimations, AnimationId, TileAnimation},
	tile::Tile,
};

/// First tile id of the synthetic water run.
pub const WATER_BASE: u16 = 432;

/// Tiles in the synthetic water run.
pub const WATER_TILES: u16 = 16;

/// First tile id of the synthetic flower run.
pub const FLOWER_BASE: u16 = 508;

/// Number of distinct metatiles on a synthetic map.
pub const METATILE_COUNT: u16 = 64;

fn run(
	name: &str,
	base: u16,
	count: u16,
	frames: &[&str],
	interval: u32,
) -> Vec<(u16, Arc<TileAnimation>)> {
	let base_path = PathBuf::from(name);
	let id = AnimationId {
		tileset: Arc::from("gTileset_General"),
		base_tile: base,
		rotation: 0,
	};
	(0..count)
		.map(|index| {
			let anim = TileAnimation {
				id: id.clone(),
				frames: frames.iter().map(|f| f.to_string()).collect(),
				filepaths: frames.iter().map(|f| base_path.join(format!("{f}.png"))).collect(),
				interval,
				image_width: 16,
				index: u32::from(index),
				num_tiles: u32::from(count),
				base_path: base_path.clone(),
			};
			(base + index, Arc::new(anim))
		})
		.collect()
}

/// Water (8 frames, 16 ticks) and flower (4 frames with a repeat, 16 ticks) runs.
pub fn synthetic_animations() -> ActiveAnimations {
	let water_frames = ["0", "1", "2", "3", "4", "5", "6", "7"];
	let mut animations = run("water", WATER_BASE, WATER_TILES, &water_frames, 16);
	animations.extend(run("flower", FLOWER_BASE, 4, &["0", "1", "0", "2"], 16));
	ActiveAnimations::from_animations(animations)
}

/// In-memory host that counts draw calls.
#[derive(Debug, Default)]
pub struct BenchHost {
	width: u32,
	height: u32,
	blocks: Vec<u16>,
	metatiles: HashMap<u16, Vec<Tile>>,
	visible: BTreeSet<OverlayId>,
	/// Images drawn since the last clear
	pub images: usize,
}

impl BenchHost {
	/// Generates a map where roughly `animated_percent` of the metatiles animate.
	pub fn generate(width: u32, height: u32, animated_percent: u32, seed: u64) -> Self {
		let mut rng = SmallRng::seed_from_u64(seed);
		let mut metatiles = HashMap::new();
		for id in 0..METATILE_COUNT {
			let animated = rng.random_range(0..100) < animated_percent;
			let tiles: Vec<Tile> = (0..12)
				.map(|pos| {
					if animated && pos < 4 {
						Tile::new(WATER_BASE + (id + pos) % WATER_TILES)
					} else if animated && pos == 8 {
						Tile::new(FLOWER_BASE + pos % 4)
					} else if pos < 8 {
						Tile::new(1 + rng.random_range(0..400))
					} else {
						Tile::new(0)
					}
				})
				.collect();
			metatiles.insert(id, tiles);
		}
		let blocks = (0..width * height).map(|_| rng.random_range(0..METATILE_COUNT)).collect();
		Self {
			width,
			height,
			blocks,
			metatiles,
			..Self::default()
		}
	}
}

impl MapSource for BenchHost {
	fn map_width(&self) -> u32 {
		self.width
	}

	fn map_height(&self) -> u32 {
		self.height
	}

	fn metatile_id(&self, x: u32, y: u32) -> Option<u16> {
		self.blocks.get((y * self.width + x) as usize).copied()
	}

	fn metatile_tiles(&self, metatile_id: u16) -> Option<Vec<Tile>> {
		self.metatiles.get(&metatile_id).cloned()
	}

	fn primary_tileset(&self) -> String {
		"gTileset_General".to_string()
	}

	fn secondary_tileset(&self) -> String {
		String::new()
	}

	fn main_tab(&self) -> usize {
		0
	}

	fn map_view_tab(&self) -> usize {
		0
	}
}

impl OverlayCanvas for BenchHost {
	fn create_image(&mut self, _request: &ImageRequest<'_>) {
		self.images += 1;
	}

	fn add_tile_image(&mut self, _request: &TileImageRequest) {
		self.images += 1;
	}

	fn show(&mut self, overlay: OverlayId) {
		self.visible.insert(overlay);
	}

	fn hide(&mut self, overlay: OverlayId) {
		self.visible.remove(&overlay);
	}

	fn hide_all(&mut self) {
		self.visible.clear();
	}

	fn clear(&mut self, _overlay: OverlayId) {}

	fn clear_all(&mut self) {
		self.images = 0;
		self.visible.clear();
	}

	fn is_visible(&self, overlay: OverlayId) -> bool {
		self.visible.contains(&overlay)
	}

	fn set_position(&mut self, _overlay: OverlayId, _x: u32, _y: u32) {}
}

impl Host for BenchHost {
	fn schedule_tick(&mut self, _delay: Duration) {}

	fn register_action(&mut self, _spec: &ActionSpec) {}
}

/// Common benchmark map sizes in metatiles
pub mod sizes {
	/// Small town: 20x20
	pub const SMALL: (u32, u32) = (20, 20);
	/// Route: 40x40
	pub const MEDIUM: (u32, u32) = (40, 40);
	/// Large ocean route: 80x80
	pub const LARGE: (u32, u32) = (80, 80);
}

#[cfg(test)]
mod tests {
	use tileanim_types::settings::Settings;

	use super::*;

	#[test]
	fn test_generate_is_deterministic() {
		let a = BenchHost::generate(10, 10, 50, 7);
		let b = BenchHost::generate(10, 10, 50, 7);
		assert_eq!(a.blocks, b.blocks);
		assert_eq!(a.metatiles.len(), usize::from(METATILE_COUNT));
	}

	#[test]
	fn test_synthetic_animations() {
		let active = synthetic_animations();
		assert_eq!(active.len(), usize::from(WATER_TILES) + 4);
		assert_eq!(active.cycle_length(&Settings::default()), 128);
	}
}
