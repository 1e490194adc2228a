//! Tileset animation registry.
//!
//! Animation tables are authored per tileset: each entry describes one
//! animation starting at a tile id and spanning `numTiles` sequential tiles.
//! Building the registry validates those entries and expands them into a
//! flat lookup of one [`TileAnimation`] per animated tile id.
//!
//! # Table Format
//!
//! ```json
//! {
//!     "gTileset_General": {
//!         "folder": "general/anim",
//!         "primary": true,
//!         "tileAnimations": {
//!             "432": {
//!                 "folder": "water",
//!                 "frames": ["0", "1", "2", "3", "4", "5", "6", "7"],
//!                 "numTiles": 30,
//!                 "interval": 16,
//!                 "imageWidth": 16
//!             },
//!             "640": {
//!                 "folder": "windy_water",
//!                 "frames": ["0", "1", "2", "3", "4", "5", "6", "7"],
//!                 "numTiles": 4,
//!                 "interval": 8,
//!                 "imageWidth": 16,
//!                 "frameOffsets": [1, 2, 3],
//!                 "copies": [{ "tileId": 700, "frameOffset": 4 }]
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! # Expansion
//!
//! - **Tile copies**: the entry at `T` is copied to `T+1 .. T+numTiles-1`,
//!   each copy differing only in its `index`.
//! - **Frame offsets**: for the j-th value of `frameOffsets`, a further run of
//!   `numTiles` tiles starts at `T + numTiles * (j + 1)` with the frame list
//!   rotated by `|numFrames - offset|`.
//! - **Explicit copies**: each `copies` item places such a rotated run at its
//!   own `tileId`.
//!
//! A copy never overwrites a claimed tile id, and tile ids are checked
//! against the tileset's ceiling. Problems are reported as
//! [`Diagnostic`]s; they drop the offending entry but never the registry.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use tileanim_types::{registry::AnimationRegistry, settings::Settings, tile::ProjectLimits};
//!
//! let table = serde_json::json!({
//!     "gTileset_General": {
//!         "folder": "general/anim",
//!         "primary": true,
//!         "tileAnimations": {
//!             "100": { "folder": "flower", "frames": ["0", "1"], "numTiles": 2, "interval": 16, "imageWidth": 16 }
//!         }
//!     }
//! });
//! let report = AnimationRegistry::build(
//!     Path::new("/project"),
//!     &table,
//!     &ProjectLimits::default(),
//!     &Settings::default(),
//! );
//! assert!(report.diagnostics.is_empty());
//!
//! let active = report.registry.active("gTileset_General", "gTileset_Unused").unwrap();
//! assert!(active.is_animated(100));
//! assert!(active.is_animated(101));
//! assert_eq!(active.cycle_length(&Settings::default()), 32);
//! ```

mod active;
mod expand;
mod validate;


use std::{
	collections::BTreeMap,
	path::{Path, PathBuf},
	sync::Arc,
};

pub use active::ActiveAnimations;

use crate::{
	error::{Diagnostic, RegistryError},
	settings::{Settings, VersionTables},
	tile::ProjectLimits,
};

/// Identity of one authored animation phase.
///
/// Tile copies of an authored entry share the identity so the layout planner
/// can merge neighbouring tiles into one image. Offset copies record their
/// rotation, keeping differently-phased runs apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId {
	/// Tileset that authored the animation
	pub tileset: Arc<str>,
	/// Tile id of the authored entry
	pub base_tile: u16,
	/// Frame rotation applied to this run (0 for the authored run)
	pub rotation: usize,
}

/// Animation descriptor for a single animated tile id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileAnimation {
	/// Identity shared by tiles of the same authored run
	pub id: AnimationId,
	/// Frame tokens in playback order
	pub frames: Arc<[String]>,
	/// Image file for each frame, parallel to `frames`
	pub filepaths: Arc<[PathBuf]>,
	/// Ticks between frame advances
	pub interval: u32,
	/// Width in pixels of the frame images
	pub image_width: u32,
	/// Position of this tile within its run (0-based)
	pub index: u32,
	/// Number of tiles in the run
	pub num_tiles: u32,
	/// Directory holding the frame images
	pub base_path: PathBuf,
}

impl TileAnimation {
	/// Number of frames in the animation.
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Ticks needed to play every frame once.
	pub fn full_cycle(&self) -> u64 {
		u64::from(self.interval) * self.frames.len() as u64
	}

	/// Maps each frame to the index of the first frame with the same token.
	///
	/// `["0", "1", "0", "2"]` yields `[0, 1, 0, 3]`.
	pub fn repeat_pattern(&self) -> Vec<usize> {
		self.frames
			.iter()
			.enumerate()
			.map(|(i, frame)| self.frames[..i].iter().position(|f| f == frame).unwrap_or(i))
			.collect()
	}
}

/// Expanded animations of a single tileset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetAnimations {
	/// Tileset name as used by the host
	pub name: String,
	/// Whether this is a primary tileset
	pub primary: bool,
	/// Tileset animation folder, relative to the tileset directory
	pub folder: String,
	/// Descriptor for every animated tile id
	pub animations: BTreeMap<u16, Arc<TileAnimation>>,
}

impl TilesetAnimations {
	/// Returns the descriptor for a tile id.
	pub fn get(&self, tile_id: u16) -> Option<&Arc<TileAnimation>> {
		self.animations.get(&tile_id)
	}

	/// Number of animated tile ids.
	pub fn len(&self) -> usize {
		self.animations.len()
	}

	/// Returns true when the tileset animates nothing.
	pub fn is_empty(&self) -> bool {
		self.animations.is_empty()
	}
}

/// Validated, expanded animation data for every configured tileset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationRegistry {
	tilesets: BTreeMap<String, TilesetAnimations>,
}

/// Result of building a registry: the usable data plus everything dropped.
#[derive(Debug, Clone, Default)]
pub struct RegistryReport {
	/// Registry built from the valid entries
	pub registry: AnimationRegistry,
	/// Problems found during validation and expansion
	pub diagnostics: Vec<Diagnostic>,
}

impl RegistryReport {
	/// Returns true if any entry was dropped.
	pub fn has_errors(&self) -> bool {
		self.diagnostics.iter().any(Diagnostic::is_error)
	}
}

impl AnimationRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Validates and expands a raw tileset table.
	///
	/// Diagnostics are logged as they are found and returned in the report.
	pub fn build(
		project_root: &Path,
		table: &serde_json::Value,
		limits: &ProjectLimits,
		settings: &Settings,
	) -> RegistryReport {
		let mut diagnostics = Vec::new();
		let mut tilesets = BTreeMap::new();

		match table.as_object() {
			Some(entries) => {
				for (name, value) in entries {
					let Some(header) = validate::tileset_header(name, value, &mut diagnostics)
					else {
						continue;
					};
					let authored = validate::animations(&header, limits, &mut diagnostics);
					let tileset = expand::expand_tileset(
						&header,
						&authored,
						project_root,
						limits,
						settings,
						&mut diagnostics,
					);
					tilesets.insert(name.clone(), tileset);
				}
			}
			None => diagnostics.push(Diagnostic::error(RegistryError::InvalidTable)),
		}

		for diagnostic in &diagnostics {
			if diagnostic.is_error() {
				log::error!("{}{}", settings.log_prefix, diagnostic.error);
			} else {
				log::warn!("{}{}", settings.log_prefix, diagnostic.error);
			}
		}

		RegistryReport {
			registry: Self {
				tilesets,
			},
			diagnostics,
		}
	}

	/// Builds the registry from the table configured for a base game version.
	///
	/// An unknown version yields an empty registry and a warning.
	pub fn for_version(
		project_root: &Path,
		tables: &VersionTables,
		version: &str,
		limits: &ProjectLimits,
		settings: &Settings,
	) -> RegistryReport {
		match tables.get(version) {
			Some(table) => Self::build(project_root, table, limits, settings),
			None => {
				let error = RegistryError::UnknownVersion(version.to_string());
				log::warn!("{}{}", settings.log_prefix, error);
				RegistryReport {
					registry: Self::new(),
					diagnostics: vec![Diagnostic::warning(error)],
				}
			}
		}
	}

	/// Returns a tileset's animations by name.
	pub fn tileset(&self, name: &str) -> Option<&TilesetAnimations> {
		self.tilesets.get(name)
	}

	/// Iterates over tilesets in name order.
	pub fn tilesets(&self) -> impl Iterator<Item = &TilesetAnimations> {
		self.tilesets.values()
	}

	/// Number of tilesets with animation data.
	pub fn len(&self) -> usize {
		self.tilesets.len()
	}

	/// Returns true when no tileset has animation data.
	pub fn is_empty(&self) -> bool {
		self.tilesets.is_empty()
	}

	/// Combines the animations of an active primary/secondary tileset pair.
	///
	/// Returns `None` when neither tileset has animation data. A tile id
	/// present in both keeps the primary tileset's descriptor.
	pub fn active(&self, primary: &str, secondary: &str) -> Option<ActiveAnimations> {
		ActiveAnimations::union(self.tileset(primary), self.tileset(secondary))
	}

	/// Like [`active`](Self::active), but returns `None` for excluded maps.
	///
	/// Tile ids animated by both tilesets are reported as warnings.
	pub fn active_for_map(
		&self,
		primary: &str,
		secondary: &str,
		map_name: &str,
		settings: &Settings,
	) -> Option<ActiveAnimations> {
		if settings.is_map_excluded(map_name) {
			return None;
		}
		if let (Some(primary), Some(secondary)) = (self.tileset(primary), self.tileset(secondary)) {
			for id in secondary.animations.keys().filter(|id| primary.animations.contains_key(id)) {
				log::warn!(
					"{}Tile {id} is animated by both {} and {}; keeping the primary animation",
					settings.log_prefix,
					primary.name,
					secondary.name
				);
			}
		}
		self.active(primary, secondary)
	}
}
