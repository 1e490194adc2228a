//! Error types for animation configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Problems found while validating and expanding tileset animation tables.
///
/// None of these are fatal: the offending tileset or animation entry is
/// dropped and the rest of the table is still used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// The table root is not a JSON object
	#[error("Animation table is not an object")]
	InvalidTable,

	/// A tileset entry lacks a required property
	#[error("{tileset} is missing property '{property}'")]
	MissingTilesetProperty {
		/// Tileset name
		tileset: String,
		/// Property name
		property: &'static str,
	},

	/// A tileset property has the wrong type or value
	#[error("{tileset} has invalid property '{property}': {reason}")]
	InvalidTilesetProperty {
		/// Tileset name
		tileset: String,
		/// Property name
		property: &'static str,
		/// Why the value was rejected
		reason: String,
	},

	/// A tileset header declares no animations
	#[error("{tileset} has a header but no tile animations")]
	EmptyTileset {
		/// Tileset name
		tileset: String,
	},

	/// A `tileAnimations` key is not a tile id
	#[error("{tileset} has an animation keyed by '{key}', which is not a tile id")]
	InvalidTileId {
		/// Tileset name
		tileset: String,
		/// Offending key
		key: String,
	},

	/// An animation entry lacks a required property
	#[error("Animation for tile {tile_id} of {tileset} is missing property '{property}'")]
	MissingAnimationProperty {
		/// Tileset name
		tileset: String,
		/// Authored tile id
		tile_id: u32,
		/// Property name
		property: &'static str,
	},

	/// An animation property has the wrong type or value
	#[error("Animation for tile {tile_id} of {tileset} has invalid property '{property}': {reason}")]
	InvalidAnimationProperty {
		/// Tileset name
		tileset: String,
		/// Authored tile id
		tile_id: u32,
		/// Property name
		property: &'static str,
		/// Why the value was rejected
		reason: String,
	},

	/// A synthesized copy would overwrite an existing animation
	#[error(
		"Animation for tile {source_tile} of {tileset} would overwrite existing animation at tile {target_tile}"
	)]
	CopyCollision {
		/// Tileset name
		tileset: String,
		/// Tile id the copy run starts from
		source_tile: u32,
		/// Tile id that is already claimed
		target_tile: u32,
	},

	/// A tile id reaches past the tileset's ceiling
	#[error("Tile {tile_id} exceeds limit of {max_tile} for {tileset}")]
	TileLimit {
		/// Tileset name
		tileset: String,
		/// Offending tile id
		tile_id: u32,
		/// Highest legal tile id
		max_tile: u32,
	},

	/// The project's base game version has no configured table
	#[error("No animation table configured for base game version '{0}'")]
	UnknownVersion(String),
}

/// How serious a recorded registry problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
	/// Legal but likely unintended; the entry is kept
	Warning,
	/// The entry (or tileset) was dropped
	Error,
}

/// A registry problem together with its severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	/// Severity of the problem
	pub severity: Severity,
	/// The problem itself
	pub error: RegistryError,
}

impl Diagnostic {
	/// Creates an error-level diagnostic.
	pub fn error(error: RegistryError) -> Self {
		Self {
			severity: Severity::Error,
			error,
		}
	}

	/// Creates a warning-level diagnostic.
	pub fn warning(error: RegistryError) -> Self {
		Self {
			severity: Severity::Warning,
			error,
		}
	}

	/// Returns true for error-level diagnostics.
	pub fn is_error(&self) -> bool {
		self.severity == Severity::Error
	}
}

impl std::fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.severity {
			Severity::Warning => write!(f, "warning: {}", self.error),
			Severity::Error => write!(f, "error: {}", self.error),
		}
	}
}

/// Errors that can occur while loading settings or animation tables
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The settings source could not be read or deserialized
	#[error(transparent)]
	Config(#[from] config::ConfigError),

	/// An animation table file could not be read
	#[error("Cannot read animation table {path}: {source}")]
	TableIo {
		/// Path of the table file
		path: PathBuf,
		/// Underlying IO error
		#[source]
		source: std::io::Error,
	},

	/// An animation table file is not valid JSON
	#[error("Cannot parse animation table {path}: {source}")]
	TableParse {
		/// Path of the table file
		path: PathBuf,
		/// Underlying JSON error
		#[source]
		source: serde_json::Error,
	},

	/// A numeric setting is out of range
	#[error("Setting '{name}' must be positive, got {value}")]
	NotPositive {
		/// Setting name
		name: &'static str,
		/// Rejected value
		value: u64,
	},
}
