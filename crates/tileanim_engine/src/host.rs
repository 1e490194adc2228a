//! Interface to the host map editor.
//!
//! The engine never draws pixels itself. Everything it knows about the map
//! comes through [`MapSource`], everything it draws goes through
//! [`OverlayCanvas`], and its tick loop is driven by [`Host::schedule_tick`].
//!
//! An overlay is a host-managed layer addressed by [`OverlayId`]. It can hold
//! several images, is positioned as a whole and is shown or hidden as a whole.

use std::{fmt, path::Path, time::Duration};

use tileanim_types::tile::Tile;

/// Handle of a host overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u32);

impl OverlayId {
	/// Returns the id following this one.
	pub fn next(self) -> Self {
		Self(self.0 + 1)
	}
}

impl fmt::Display for OverlayId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Parameters for drawing a region of a frame image onto an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRequest<'a> {
	/// Overlay receiving the image
	pub overlay: OverlayId,
	/// Horizontal pixel position relative to the overlay
	pub x: u32,
	/// Vertical pixel position relative to the overlay
	pub y: u32,
	/// Frame image file
	pub path: &'a Path,
	/// Width of the source region in pixels
	pub width: u32,
	/// Height of the source region in pixels
	pub height: u32,
	/// Left edge of the source region in the image
	pub x_offset: u32,
	/// Top edge of the source region in the image
	pub y_offset: u32,
	/// Mirror horizontally
	pub hflip: bool,
	/// Mirror vertically
	pub vflip: bool,
	/// Palette to render with
	pub palette: u8,
}

/// Parameters for drawing a tileset tile onto an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileImageRequest {
	/// Overlay receiving the tile
	pub overlay: OverlayId,
	/// Horizontal pixel position relative to the overlay
	pub x: u32,
	/// Vertical pixel position relative to the overlay
	pub y: u32,
	/// Tile to draw, with its flip and palette attributes
	pub tile: Tile,
}

/// User actions the engine exposes to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
	/// Start or stop map animations
	ToggleAnimation,
	/// Reload animation tables and rebuild the map
	ReloadAnimations,
}

impl Action {
	/// Stable identifier for host action registries.
	pub fn id(self) -> &'static str {
		match self {
			Self::ToggleAnimation => "toggleAnimation",
			Self::ReloadAnimations => "reloadAnimations",
		}
	}

	/// Menu label.
	pub fn label(self) -> &'static str {
		match self {
			Self::ToggleAnimation => "Toggle Map Animations",
			Self::ReloadAnimations => "Reload Map Animations",
		}
	}
}

/// Registration request for an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
	/// Action being registered
	pub action: Action,
	/// Key shortcut, e.g. `"Ctrl+A"`
	pub shortcut: String,
	/// Initial checked state for toggle actions
	pub checked: Option<bool>,
}

/// Read access to the map being edited.
pub trait MapSource {
	/// Map width in metatiles.
	fn map_width(&self) -> u32;

	/// Map height in metatiles.
	fn map_height(&self) -> u32;

	/// Metatile id placed at a map coordinate.
	fn metatile_id(&self, x: u32, y: u32) -> Option<u16>;

	/// Tiles of a metatile, layer-major. `None` if the metatile is unknown.
	fn metatile_tiles(&self, metatile_id: u16) -> Option<Vec<Tile>>;

	/// Name of the map's primary tileset.
	fn primary_tileset(&self) -> String;

	/// Name of the map's secondary tileset.
	fn secondary_tileset(&self) -> String;

	/// Index of the active main editor tab; 0 is the map tab.
	fn main_tab(&self) -> usize;

	/// Index of the active map view tab; 0 is the metatile view.
	fn map_view_tab(&self) -> usize;
}

/// Overlay drawing primitives.
pub trait OverlayCanvas {
	/// Draws a region of an image file onto an overlay.
	fn create_image(&mut self, request: &ImageRequest<'_>);

	/// Draws a tileset tile onto an overlay.
	fn add_tile_image(&mut self, request: &TileImageRequest);

	/// Makes an overlay visible.
	fn show(&mut self, overlay: OverlayId);

	/// Hides an overlay.
	fn hide(&mut self, overlay: OverlayId);

	/// Hides every overlay.
	fn hide_all(&mut self);

	/// Removes all images from an overlay.
	fn clear(&mut self, overlay: OverlayId);

	/// Removes all images from every overlay.
	fn clear_all(&mut self);

	/// Returns true if the overlay is visible.
	fn is_visible(&self, overlay: OverlayId) -> bool;

	/// Moves an overlay to a pixel position on the map.
	fn set_position(&mut self, overlay: OverlayId, x: u32, y: u32);
}

/// Everything the engine needs from the host editor.
pub trait Host: MapSource + OverlayCanvas {
	/// Asks the host to call [`AnimationEngine::on_timer`] after `delay`.
	///
	/// [`AnimationEngine::on_timer`]: crate::AnimationEngine::on_timer
	fn schedule_tick(&mut self, delay: Duration);

	/// Registers a user action under a key shortcut.
	fn register_action(&mut self, spec: &ActionSpec);
}
