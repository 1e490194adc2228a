//! Prelude module for `tileanim_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use tileanim_internal::prelude::*;
//!
//! let settings = Settings::default();
//! let engine = AnimationEngine::new(settings, VersionTables::new());
//! assert!(!engine.is_running());
//! assert!(engine.rebuild_pending());
//! ```

// Re-export everything from tileanim_types::prelude
#[doc(inline)]
pub use tileanim_types::prelude::*;

// Engine entry points and host interface
#[doc(inline)]
pub use tileanim_engine::{
	Action, ActionSpec, AnimationEngine, Host, ImageRequest, LifecycleEvent, MapSource,
	OverlayCanvas, OverlayId, TileImageRequest,
	builder::{BuildSummary, MapAnimationBuilder},
	index::{AnimationIndex, FrameGroup, StaticGroup},
	range::{OverlayRange, OverlayRangeMap},
	scheduler::{PlaybackState, Scheduler},
};

// Re-export the member crates for advanced usage
#[doc(inline)]
pub use tileanim_engine;
#[doc(inline)]
pub use tileanim_types;
