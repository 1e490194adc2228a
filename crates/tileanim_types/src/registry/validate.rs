//! Field validation for raw tileset tables.
//!
//! Every property is checked individually so a single bad field reports
//! exactly one diagnostic. An entry with any error-level problem is dropped.

use serde_json::{Map, Value};

use crate::{
	error::{Diagnostic, RegistryError},
	tile::ProjectLimits,
};

/// Tileset header that passed validation.
#[derive(Debug, Clone)]
pub(crate) struct TilesetHeader<'a> {
	pub name: &'a str,
	pub folder: String,
	pub primary: bool,
	pub animations: &'a Map<String, Value>,
}

/// Explicit offset copy placed at its own tile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OffsetCopy {
	pub tile_id: u32,
	pub frame_offset: u32,
}

/// Animation entry that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuthoredAnimation {
	pub tile_id: u32,
	pub folder: String,
	pub frames: Vec<String>,
	pub num_tiles: u32,
	pub interval: u32,
	pub image_width: u32,
	pub external_folder: bool,
	pub frame_offsets: Vec<u32>,
	pub copies: Vec<OffsetCopy>,
}

fn positive(value: &Value) -> Result<u32, String> {
	match value.as_u64().and_then(|v| u32::try_from(v).ok()) {
		Some(v) if v > 0 => Ok(v),
		_ => Err(format!("'{value}' is not a positive integer")),
	}
}

fn non_negative(value: &Value) -> Result<u32, String> {
	value
		.as_u64()
		.and_then(|v| u32::try_from(v).ok())
		.ok_or_else(|| format!("'{value}' is not a non-negative integer"))
}

fn string(value: &Value) -> Result<String, String> {
	value.as_str().map(str::to_string).ok_or_else(|| format!("'{value}' is not a string"))
}

fn boolean(value: &Value) -> Result<bool, String> {
	value.as_bool().ok_or_else(|| format!("'{value}' is not a boolean"))
}

fn object(value: &Value) -> Result<&Map<String, Value>, String> {
	value.as_object().ok_or_else(|| format!("'{value}' is not an object"))
}

fn non_empty_array(value: &Value) -> Result<&Vec<Value>, String> {
	match value.as_array() {
		Some(items) if !items.is_empty() => Ok(items),
		_ => Err(format!("'{value}' is not a non-empty array")),
	}
}

fn frame_tokens(value: &Value) -> Result<Vec<String>, String> {
	non_empty_array(value)?
		.iter()
		.map(|frame| match frame {
			Value::String(s) => Ok(s.clone()),
			Value::Number(n) if n.is_u64() => Ok(n.to_string()),
			other => Err(format!("frame '{other}' is not a string or integer")),
		})
		.collect()
}

fn offset_list(value: &Value) -> Result<Vec<u32>, String> {
	non_empty_array(value)?.iter().map(non_negative).collect()
}

fn offset_copies(value: &Value) -> Result<Vec<OffsetCopy>, String> {
	non_empty_array(value)?
		.iter()
		.map(|item| {
			let item = object(item)?;
			let tile_id =
				non_negative(
					item.get("tileId").ok_or_else(|| "copy is missing 'tileId'".to_string())?,
				)?;
			let frame_offset = non_negative(
				item.get("frameOffset").ok_or_else(|| "copy is missing 'frameOffset'".to_string())?,
			)?;
			Ok(OffsetCopy {
				tile_id,
				frame_offset,
			})
		})
		.collect()
}

/// Validates a tileset header. Returns `None` if the tileset must be dropped.
pub(crate) fn tileset_header<'a>(
	name: &'a str,
	value: &'a Value,
	diagnostics: &mut Vec<Diagnostic>,
) -> Option<TilesetHeader<'a>> {
	let Some(entry) = value.as_object() else {
		diagnostics.push(Diagnostic::error(RegistryError::InvalidTilesetProperty {
			tileset: name.to_string(),
			property: "header",
			reason: format!("'{value}' is not an object"),
		}));
		return None;
	};

	let before = diagnostics.len();
	let invalid = |property: &'static str, reason: String| {
		Diagnostic::error(RegistryError::InvalidTilesetProperty {
			tileset: name.to_string(),
			property,
			reason,
		})
	};
	let missing = |property: &'static str| {
		Diagnostic::error(RegistryError::MissingTilesetProperty {
			tileset: name.to_string(),
			property,
		})
	};

	let animations = match entry.get("tileAnimations") {
		None => {
			diagnostics.push(missing("tileAnimations"));
			None
		}
		Some(value) => match object(value) {
			Ok(map) => Some(map),
			Err(reason) => {
				diagnostics.push(invalid("tileAnimations", reason));
				None
			}
		},
	};
	let folder = match entry.get("folder") {
		None => {
			diagnostics.push(missing("folder"));
			None
		}
		Some(value) => {
			string(value).map_err(|reason| diagnostics.push(invalid("folder", reason))).ok()
		}
	};
	let primary = match entry.get("primary") {
		None => false,
		Some(value) => boolean(value)
			.map_err(|reason| diagnostics.push(invalid("primary", reason)))
			.unwrap_or_default(),
	};

	if diagnostics.len() != before {
		return None;
	}
	let (animations, folder) = (animations?, folder?);
	if animations.is_empty() {
		diagnostics.push(Diagnostic::warning(RegistryError::EmptyTileset {
			tileset: name.to_string(),
		}));
		return None;
	}

	Some(TilesetHeader {
		name,
		folder,
		primary,
		animations,
	})
}

/// Checks a tile id against the tileset's ceiling.
///
/// Reaching past the primary ceiling is legal for a primary tileset as long as
/// the id stays under the secondary ceiling, so that case only warns.
pub(crate) fn check_tile_limit(
	tile_id: u32,
	tileset: &str,
	primary: bool,
	limits: &ProjectLimits,
) -> Result<Option<Diagnostic>, Diagnostic> {
	let ceiling = if primary {
		limits.primary_ceiling()
	} else {
		limits.secondary_ceiling()
	};
	let over_u16 = u16::try_from(tile_id).is_err();
	if tile_id < ceiling && !over_u16 {
		return Ok(None);
	}
	let error = RegistryError::TileLimit {
		tileset: tileset.to_string(),
		tile_id,
		max_tile: ceiling.saturating_sub(1),
	};
	if primary && tile_id < limits.secondary_ceiling() && !over_u16 {
		Ok(Some(Diagnostic::warning(error)))
	} else {
		Err(Diagnostic::error(error))
	}
}

/// Validates every animation entry of a tileset, in ascending tile id order.
pub(crate) fn animations(
	header: &TilesetHeader<'_>,
	limits: &ProjectLimits,
	diagnostics: &mut Vec<Diagnostic>,
) -> Vec<AuthoredAnimation> {
	let mut keyed = Vec::with_capacity(header.animations.len());
	for (key, value) in header.animations {
		match key.trim().parse::<u32>() {
			Ok(tile_id) => keyed.push((tile_id, value)),
			Err(_) => diagnostics.push(Diagnostic::error(RegistryError::InvalidTileId {
				tileset: header.name.to_string(),
				key: key.clone(),
			})),
		}
	}
	keyed.sort_by_key(|&(tile_id, _)| tile_id);

	keyed
		.into_iter()
		.filter_map(|(tile_id, value)| animation(header, tile_id, value, limits, diagnostics))
		.collect()
}

fn animation(
	header: &TilesetHeader<'_>,
	tile_id: u32,
	value: &Value,
	limits: &ProjectLimits,
	diagnostics: &mut Vec<Diagnostic>,
) -> Option<AuthoredAnimation> {
	let tileset = header.name;
	let invalid = |property: &'static str, reason: String| {
		Diagnostic::error(RegistryError::InvalidAnimationProperty {
			tileset: tileset.to_string(),
			tile_id,
			property,
			reason,
		})
	};
	let missing = |property: &'static str| {
		Diagnostic::error(RegistryError::MissingAnimationProperty {
			tileset: tileset.to_string(),
			tile_id,
			property,
		})
	};

	let Some(entry) = value.as_object() else {
		diagnostics.push(invalid("entry", format!("'{value}' is not an object")));
		return None;
	};

	let mut valid = true;
	match check_tile_limit(tile_id, tileset, header.primary, limits) {
		Ok(None) => {}
		Ok(Some(warning)) => diagnostics.push(warning),
		Err(error) => {
			diagnostics.push(error);
			valid = false;
		}
	}

	macro_rules! required {
		($name:literal, $check:expr) => {
			match entry.get($name) {
				None => {
					diagnostics.push(missing($name));
					valid = false;
					None
				}
				Some(value) => match $check(value) {
					Ok(v) => Some(v),
					Err(reason) => {
						diagnostics.push(invalid($name, reason));
						valid = false;
						None
					}
				},
			}
		};
	}
	macro_rules! optional {
		($name:literal, $check:expr) => {
			match entry.get($name) {
				None => None,
				Some(value) => match $check(value) {
					Ok(v) => Some(v),
					Err(reason) => {
						diagnostics.push(invalid($name, reason));
						valid = false;
						None
					}
				},
			}
		};
	}

	let num_tiles = required!("numTiles", positive);
	let frames = required!("frames", frame_tokens);
	let interval = required!("interval", positive);
	let folder = required!("folder", string);
	let image_width = required!("imageWidth", positive);
	let frame_offsets = optional!("frameOffsets", offset_list);
	let external_folder = optional!("externalFolder", boolean);
	let copies = optional!("copies", offset_copies);

	if !valid {
		return None;
	}
	Some(AuthoredAnimation {
		tile_id,
		folder: folder?,
		frames: frames?,
		num_tiles: num_tiles?,
		interval: interval?,
		image_width: image_width?,
		external_folder: external_folder.unwrap_or(false),
		frame_offsets: frame_offsets.unwrap_or_default(),
		copies: copies.unwrap_or_default(),
	})
}
