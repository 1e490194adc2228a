//! Engine settings and per-version animation tables.
//!
//! Settings are read from a TOML file through the `config` crate and can be
//! overridden from the environment, e.g. `TILEANIM__REFRESH_TIME_MS=20` or
//! `TILEANIM__LOGGING__DEBUG_INFO=true`.
//!
//! ```toml
//! toggle_shortcut = "Ctrl+A"
//! animate_on_launch = true
//! map_exceptions = ["PetalburgCity"]
//!
//! [logging]
//! usage_info = true
//!
//! [tables]
//! pokeemerald = "animations/emerald.json"
//! pokefirered = "animations/firered.json"
//! ```

use std::{
	collections::BTreeMap,
	path::{Path, PathBuf},
	time::Duration,
};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::{
	constants::{DEFAULT_CYCLE_LENGTH, DEFAULT_REFRESH_MS},
	error::SettingsError,
};

/// Toggles for the optional log reports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// Lifecycle messages (animations on/off, map loaded)
	pub basic_info: bool,
	/// Overlay usage reports after every build; slows builds down
	pub usage_info: bool,
	/// Scan results and expanded animation data; slows builds down
	pub debug_info: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			basic_info: true,
			usage_info: false,
			debug_info: false,
		}
	}
}

/// Global animation engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Shortcut bound to the toggle action
	pub toggle_shortcut: String,
	/// Shortcut bound to the reload action; empty registers no action
	pub reload_shortcut: String,
	/// Start animating as soon as a project opens
	pub animate_on_launch: bool,
	/// Delay between scheduler ticks in milliseconds
	pub refresh_time_ms: u64,
	/// Map names that never animate
	pub map_exceptions: Vec<String>,
	/// Tileset root, relative to the project root
	pub tilesets_path: PathBuf,
	/// Folder holding primary tilesets, relative to `tilesets_path`
	pub primary_folder: String,
	/// Folder holding secondary tilesets, relative to `tilesets_path`
	pub secondary_folder: String,
	/// Extension of frame image files, without the dot
	pub anim_file_extension: String,
	/// Tick cycle length used when no animation is active
	pub default_cycle_length: u64,
	/// Prefix prepended to every log message
	pub log_prefix: String,
	/// Optional log reports
	pub logging: LoggingSettings,
	/// Base game version name to animation table file
	pub tables: BTreeMap<String, PathBuf>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			toggle_shortcut: "Ctrl+A".to_string(),
			reload_shortcut: String::new(),
			animate_on_launch: true,
			refresh_time_ms: DEFAULT_REFRESH_MS,
			map_exceptions: Vec::new(),
			tilesets_path: PathBuf::from("data/tilesets"),
			primary_folder: "primary".to_string(),
			secondary_folder: "secondary".to_string(),
			anim_file_extension: "png".to_string(),
			default_cycle_length: DEFAULT_CYCLE_LENGTH,
			log_prefix: "ANIM: ".to_string(),
			logging: LoggingSettings::default(),
			tables: BTreeMap::new(),
		}
	}
}

impl Settings {
	/// Loads settings from a TOML file, applying `TILEANIM__*` environment overrides.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or deserialized, or if a
	/// numeric setting is zero.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let settings: Settings = Config::builder()
			.add_source(File::from(path.as_ref()))
			.add_source(Environment::with_prefix("TILEANIM").separator("__"))
			.build()?
			.try_deserialize()?;
		settings.validate()?;
		Ok(settings)
	}

	/// Parses settings from TOML text without consulting the environment.
	///
	/// # Errors
	///
	/// Returns an error if the text cannot be deserialized or a numeric
	/// setting is zero.
	pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
		let settings: Settings = Config::builder()
			.add_source(File::from_str(text, FileFormat::Toml))
			.build()?
			.try_deserialize()?;
		settings.validate()?;
		Ok(settings)
	}

	fn validate(&self) -> Result<(), SettingsError> {
		if self.refresh_time_ms == 0 {
			return Err(SettingsError::NotPositive {
				name: "refresh_time_ms",
				value: 0,
			});
		}
		if self.default_cycle_length == 0 {
			return Err(SettingsError::NotPositive {
				name: "default_cycle_length",
				value: 0,
			});
		}
		Ok(())
	}

	/// Delay between scheduler ticks.
	pub fn refresh_interval(&self) -> Duration {
		Duration::from_millis(self.refresh_time_ms)
	}

	/// Returns true if the named map never animates.
	pub fn is_map_excluded(&self, map_name: &str) -> bool {
		self.map_exceptions.iter().any(|name| name == map_name)
	}

	/// Directory holding tilesets of the given kind under `project_root`.
	pub fn tileset_dir(&self, project_root: &Path, primary: bool) -> PathBuf {
		let folder = if primary {
			&self.primary_folder
		} else {
			&self.secondary_folder
		};
		project_root.join(&self.tilesets_path).join(folder)
	}
}

/// Raw animation tables keyed by base game version name.
///
/// Each table is the unvalidated JSON object mapping tileset names to their
/// animation headers; validation happens in
/// [`AnimationRegistry::build`](crate::registry::AnimationRegistry::build).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionTables {
	tables: BTreeMap<String, serde_json::Value>,
}

impl VersionTables {
	/// Creates an empty set of tables.
	pub fn new() -> Self {
		Self::default()
	}

	/// Loads every table listed in `settings.tables`.
	///
	/// Relative paths are resolved against `base_dir`, normally the directory
	/// holding the settings file.
	///
	/// # Errors
	///
	/// Returns an error if a table file cannot be read or is not valid JSON.
	pub fn load(settings: &Settings, base_dir: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let mut tables = Self::new();
		for (version, path) in &settings.tables {
			let path = if path.is_absolute() {
				path.clone()
			} else {
				base_dir.as_ref().join(path)
			};
			let text = std::fs::read_to_string(&path).map_err(|source| SettingsError::TableIo {
				path: path.clone(),
				source,
			})?;
			let value = serde_json::from_str(&text).map_err(|source| SettingsError::TableParse {
				path: path.clone(),
				source,
			})?;
			tables.insert(version.clone(), value);
		}
		Ok(tables)
	}

	/// Adds or replaces the table for a version.
	pub fn insert(&mut self, version: impl Into<String>, table: serde_json::Value) {
		self.tables.insert(version.into(), table);
	}

	/// Builder-style variant of [`insert`](Self::insert).
	pub fn with_table(mut self, version: impl Into<String>, table: serde_json::Value) -> Self {
		self.insert(version, table);
		self
	}

	/// Returns the table for a version.
	pub fn get(&self, version: &str) -> Option<&serde_json::Value> {
		self.tables.get(version)
	}

	/// Iterates over configured version names.
	pub fn versions(&self) -> impl Iterator<Item = &str> {
		self.tables.keys().map(String::as_str)
	}
}
