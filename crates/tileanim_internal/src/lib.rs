//! This module is separated into its own crate to keep the facade thin, and should not be used
//! directly.

/// `use tileanim_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export the member crates for convenience
pub use tileanim_engine;
pub use tileanim_types;

// Re-export commonly used types at crate root
pub use tileanim_engine::{AnimationEngine, Host, LifecycleEvent};
pub use tileanim_types::{registry::AnimationRegistry, settings::Settings};
