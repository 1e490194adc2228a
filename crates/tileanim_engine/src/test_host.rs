//! In-memory host for tests.
//!
//! [`RecordingHost`] keeps every image, visibility change, position and
//! scheduled tick so tests can assert on what the engine asked the host to
//! do. Enabled for downstream tests with the `test-support` feature.

use std::{
	collections::{BTreeSet, HashMap},
	path::PathBuf,
	sync::Arc,
	time::Duration,
};

use tileanim_types::{
	registry::{ActiveAnimations, AnimationId, TileAnimation},
	tile::Tile,
};

use crate::host::{
	ActionSpec, Host, ImageRequest, MapSource, OverlayCanvas, OverlayId, TileImageRequest,
};

/// Animation descriptor with frame files under `name/`.
pub fn anim(
	name: &str,
	frames: &[&str],
	interval: u32,
	image_width: u32,
	index: u32,
) -> Arc<TileAnimation> {
	let base_path = PathBuf::from(name);
	Arc::new(TileAnimation {
		id: AnimationId {
			tileset: Arc::from(name),
			base_tile: 0,
			rotation: 0,
		},
		frames: frames.iter().map(|f| f.to_string()).collect(),
		filepaths: frames.iter().map(|f| base_path.join(format!("{f}.png"))).collect(),
		interval,
		image_width,
		index,
		num_tiles: index + 1,
		base_path,
	})
}

/// Lookup built from `(tile id, descriptor)` pairs.
pub fn active_with(animations: Vec<(u16, Arc<TileAnimation>)>) -> ActiveAnimations {
	ActiveAnimations::from_animations(animations)
}

/// Frame image drawn through [`OverlayCanvas::create_image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedImage {
	/// Target overlay
	pub overlay: OverlayId,
	/// Frame image file
	pub path: PathBuf,
	/// Pixel x within the metatile
	pub x: u32,
	/// Pixel y within the metatile
	pub y: u32,
	/// Source rectangle width
	pub width: u32,
	/// Source rectangle height
	pub height: u32,
}

/// Map and overlay canvas that records every call.
#[derive(Debug, Default)]
#[allow(missing_docs)]
pub struct RecordingHost {
	pub width: u32,
	pub height: u32,
	pub blocks: Vec<u16>,
	pub metatiles: HashMap<u16, Vec<Tile>>,
	pub primary: String,
	pub secondary: String,
	pub main_tab: usize,
	pub map_view_tab: usize,
	pub images: Vec<RecordedImage>,
	pub tile_images: Vec<TileImageRequest>,
	pub visible: BTreeSet<OverlayId>,
	pub positions: HashMap<OverlayId, (u32, u32)>,
	/// Every delay passed to `schedule_tick`
	pub scheduled: Vec<Duration>,
	/// Tick scheduled but not fired yet
	pub pending: Option<Duration>,
	pub clear_all_calls: usize,
	pub actions: Vec<ActionSpec>,
}

impl RecordingHost {
	/// Creates a `width` x `height` map filled with metatile 0.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			blocks: vec![0; (width * height) as usize],
			primary: "gTileset_General".to_string(),
			secondary: "gTileset_Petalburg".to_string(),
			..Self::default()
		}
	}

	/// Puts a metatile on the map.
	pub fn place(&mut self, x: u32, y: u32, metatile_id: u16) {
		self.blocks[(y * self.width + x) as usize] = metatile_id;
	}

	/// Defines a metatile from its tile ids, layer-major.
	pub fn define(&mut self, metatile_id: u16, tile_ids: &[u16]) {
		self.metatiles.insert(metatile_id, tile_ids.iter().map(|&id| Tile::new(id)).collect());
	}

	/// Last position set for an overlay.
	pub fn position(&self, overlay: OverlayId) -> Option<(u32, u32)> {
		self.positions.get(&overlay).copied()
	}

	/// Number of frame and tile images drawn on an overlay.
	pub fn images_on(&self, overlay: OverlayId) -> usize {
		self.images.iter().filter(|image| image.overlay == overlay).count()
			+ self.tile_images.iter().filter(|image| image.overlay == overlay).count()
	}
}

impl MapSource for RecordingHost {
	fn map_width(&self) -> u32 {
		self.width
	}

	fn map_height(&self) -> u32 {
		self.height
	}

	fn metatile_id(&self, x: u32, y: u32) -> Option<u16> {
		if x >= self.width || y >= self.height {
			return None;
		}
		self.blocks.get((y * self.width + x) as usize).copied()
	}

	fn metatile_tiles(&self, metatile_id: u16) -> Option<Vec<Tile>> {
		self.metatiles.get(&metatile_id).cloned()
	}

	fn primary_tileset(&self) -> String {
		self.primary.clone()
	}

	fn secondary_tileset(&self) -> String {
		self.secondary.clone()
	}

	fn main_tab(&self) -> usize {
		self.main_tab
	}

	fn map_view_tab(&self) -> usize {
		self.map_view_tab
	}
}

impl OverlayCanvas for RecordingHost {
	fn create_image(&mut self, request: &ImageRequest<'_>) {
		self.images.push(RecordedImage {
			overlay: request.overlay,
			path: request.path.to_path_buf(),
			x: request.x,
			y: request.y,
			width: request.width,
			height: request.height,
		});
	}

	fn add_tile_image(&mut self, request: &TileImageRequest) {
		self.tile_images.push(*request);
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

	fn clear(&mut self, overlay: OverlayId) {
		self.images.retain(|image| image.overlay != overlay);
		self.tile_images.retain(|image| image.overlay != overlay);
	}

	fn clear_all(&mut self) {
		self.clear_all_calls += 1;
		self.images.clear();
		self.tile_images.clear();
	}

	fn is_visible(&self, overlay: OverlayId) -> bool {
		self.visible.contains(&overlay)
	}

	fn set_position(&mut self, overlay: OverlayId, x: u32, y: u32) {
		self.positions.insert(overlay, (x, y));
	}
}

impl Host for RecordingHost {
	fn schedule_tick(&mut self, delay: Duration) {
		self.scheduled.push(delay);
		self.pending = Some(delay);
	}

	fn register_action(&mut self, spec: &ActionSpec) {
		self.actions.push(spec.clone());
	}
}
