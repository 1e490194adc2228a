//! Prelude module for `tileanim_types`.
//!
//! This module provides a convenient way to import commonly used types and constants.
//!
//! # Examples
//!
//! ```no_run
//! use tileanim_types::prelude::*;
//!
//! let tile = Tile::new(432).with_palette(3);
//! let limits = ProjectLimits::default();
//! assert!(u32::from(tile.tile_id) < limits.primary_ceiling());
//! ```

// Constants
#[doc(inline)]
pub use crate::constants::{
	DEFAULT_CYCLE_LENGTH, DEFAULT_REFRESH_MS, FIRST_OVERLAY_ID, METATILE_HEIGHT, METATILE_WIDTH,
	TILE_HEIGHT, TILE_WIDTH, TILES_PER_LAYER,
};

// Errors
#[doc(inline)]
pub use crate::error::{Diagnostic, RegistryError, SettingsError, Severity};

// Registry types
#[doc(inline)]
pub use crate::registry::{
	ActiveAnimations, AnimationId, AnimationRegistry, RegistryReport, TileAnimation,
	TilesetAnimations,
};

// Settings
#[doc(inline)]
pub use crate::settings::{LoggingSettings, Settings, VersionTables};

// Tiles
#[doc(inline)]
pub use crate::tile::{ProjectLimits, Tile, TilePosition};
