//! Tile animation engine for a map editor host.
//!
//! The engine plays tileset animations on top of a map by drawing every
//! frame of every animated tile onto host overlays once, then toggling
//! overlay visibility on a fixed tick.
//!
//! # Pipeline
//!
//! - [`scanner`]: which tile positions of a metatile need overlays
//! - [`planner`]: merges neighbouring tiles into larger source rectangles
//! - [`metatile`]: per-metatile draw plans, cached by metatile id
//! - [`allocator`]: overlay ids for one map coordinate, with frame sharing
//! - [`index`]: frame and static groups keyed by interval
//! - [`builder`]: full-map and single-coordinate builds
//! - [`scheduler`]: the tick counter and per-tick show/hide
//! - [`engine`]: lifecycle events, lazy rebuilds and the tick chain
//!
//! The host implements the traits in [`host`]. The `test-support` feature
//! exposes `test_host`, an in-memory host that records every call.

pub mod allocator;
pub mod builder;
pub mod engine;
pub mod host;
pub mod index;
pub mod metatile;
pub mod planner;
pub mod range;
pub mod scanner;
pub mod scheduler;

#[cfg(any(test, feature = "test-support"))]
pub mod test_host;

pub use engine::{AnimationEngine, LifecycleEvent};
pub use host::{
	Action, ActionSpec, Host, ImageRequest, MapSource, OverlayCanvas, OverlayId, TileImageRequest,
};
