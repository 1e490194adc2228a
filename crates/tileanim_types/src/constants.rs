//! Geometry and timing constants.
//!
//! Tiles are fixed at 8×8 pixels and metatiles are built from 2×2 tiles per
//! layer. The number of layers per metatile is project-specific and comes
//! from [`ProjectLimits`](crate::tile::ProjectLimits).

/// Width of a single tile in pixels
pub const TILE_WIDTH: u32 = 8;

/// Height of a single tile in pixels
pub const TILE_HEIGHT: u32 = 8;

/// Number of tile columns in one metatile layer
pub const METATILE_TILE_WIDTH: usize = 2;

/// Number of tile rows in one metatile layer
pub const METATILE_TILE_HEIGHT: usize = 2;

/// Number of tiles in one metatile layer (4)
pub const TILES_PER_LAYER: usize = METATILE_TILE_WIDTH * METATILE_TILE_HEIGHT;

/// Width of a metatile in pixels (16)
pub const METATILE_WIDTH: u32 = TILE_WIDTH * METATILE_TILE_WIDTH as u32;

/// Height of a metatile in pixels (16)
pub const METATILE_HEIGHT: u32 = TILE_HEIGHT * METATILE_TILE_HEIGHT as u32;

/// Cycle length used when no animation is active.
///
/// 55440 is highly composite, so the tick counter still wraps on a boundary
/// shared by most small intervals.
pub const DEFAULT_CYCLE_LENGTH: u64 = 55440;

/// Tick period in milliseconds, `round(1000 / 59.73)`.
pub const DEFAULT_REFRESH_MS: u64 = 17;

/// First overlay id handed out in a build generation.
///
/// Overlay 0 is left to the host's own drawing.
pub const FIRST_OVERLAY_ID: u32 = 1;
