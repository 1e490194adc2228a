#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `tileanim-rs` plays tileset tile animations inside a map editor.
//!
//! Animated tiles are drawn once per frame onto host overlays, and a fixed
//! tick shows and hides those overlays in step with each animation's interval.
//!
pub use tileanim_internal::*;
