//! This crate provides the data model and configuration layer for the `tileanim-rs` project.
//!
//! # Contents
//!
//! - **Tiles**: [`tile::Tile`] references, metatile positions and [`tile::ProjectLimits`]
//! - **Registry**: validation and expansion of authored tileset animation tables
//!   into per-tile [`registry::TileAnimation`] descriptors
//! - **Settings**: engine settings loaded through the `config` crate, and the
//!   per-version animation tables they point at
//! - **Errors**: [`error::RegistryError`] diagnostics and [`error::SettingsError`]
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use tileanim_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load("tileanim.toml")?;
//! let tables = VersionTables::load(&settings, ".")?;
//! let report = AnimationRegistry::for_version(
//!     Path::new("/path/to/project"),
//!     &tables,
//!     "pokeemerald",
//!     &ProjectLimits::default(),
//!     &settings,
//! );
//! for diagnostic in &report.diagnostics {
//!     println!("{diagnostic}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod registry;
pub mod settings;
pub mod tile;

/// `use tileanim_types::prelude::*;` to import commonly used items.
pub mod prelude;
