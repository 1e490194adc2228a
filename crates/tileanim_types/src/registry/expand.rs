//! Expansion of authored animation entries into per-tile descriptors.

use std::{
	collections::{BTreeMap, BTreeSet},
	path::{Path, PathBuf},
	sync::Arc,
};

use super::{
	AnimationId, TileAnimation, TilesetAnimations,
	validate::{self, AuthoredAnimation, TilesetHeader},
};
use crate::{
	error::{Diagnostic, RegistryError},
	settings::Settings,
	tile::ProjectLimits,
};

/// Rotates `items` left by `rotation` positions.
fn rotated<T: Clone>(items: &[T], rotation: usize) -> Vec<T> {
	let len = items.len();
	(0..len).map(|i| items[(i + rotation) % len].clone()).collect()
}

struct Expander<'a> {
	tileset: Arc<str>,
	primary: bool,
	limits: &'a ProjectLimits,
	claimed: BTreeSet<u32>,
	animations: BTreeMap<u16, Arc<TileAnimation>>,
	diagnostics: &'a mut Vec<Diagnostic>,
}

impl Expander<'_> {
	/// Returns the target id if a copy may be written there.
	fn claim(&mut self, target: u32, source: u32) -> Option<u16> {
		let mut valid = true;
		if self.claimed.contains(&target) {
			self.diagnostics.push(Diagnostic::error(RegistryError::CopyCollision {
				tileset: self.tileset.to_string(),
				source_tile: source,
				target_tile: target,
			}));
			valid = false;
		}
		match validate::check_tile_limit(target, &self.tileset, self.primary, self.limits) {
			Ok(None) => {}
			Ok(Some(warning)) => self.diagnostics.push(warning),
			Err(error) => {
				self.diagnostics.push(error);
				valid = false;
			}
		}
		if !valid {
			return None;
		}
		self.claimed.insert(target);
		u16::try_from(target).ok()
	}

	/// Writes `template` to `start .. start + num_tiles`, stopping at the first
	/// id that cannot be claimed.
	fn write_run(&mut self, template: &TileAnimation, start: u32, first_index: u32) {
		for index in first_index..template.num_tiles {
			let target = start + index;
			let Some(tile_id) = self.claim(target, start) else {
				break;
			};
			let mut copy = template.clone();
			copy.index = index;
			self.animations.insert(tile_id, Arc::new(copy));
		}
	}

	fn write_offset_run(&mut self, base: &TileAnimation, start: u32, frame_offset: u32) {
		let frame_count = base.frames.len();
		let rotation =
			(frame_count as u64).abs_diff(u64::from(frame_offset)) as usize % frame_count;
		let mut template = base.clone();
		template.id.rotation = rotation;
		template.frames = rotated(&base.frames, rotation).into();
		template.filepaths = rotated(&base.filepaths, rotation).into();
		self.write_run(&template, start, 0);
	}

	fn expand(
		&mut self,
		authored: &AuthoredAnimation,
		tileset_dir: &Path,
		settings: &Settings,
		root: &Path,
	) {
		let Ok(base_tile) = u16::try_from(authored.tile_id) else {
			return;
		};
		let base_path = if authored.external_folder {
			root.join(&authored.folder)
		} else {
			tileset_dir.join(&authored.folder)
		};
		let filepaths: Vec<PathBuf> = authored
			.frames
			.iter()
			.map(|frame| base_path.join(format!("{frame}.{}", settings.anim_file_extension)))
			.collect();

		let base = TileAnimation {
			id: AnimationId {
				tileset: Arc::clone(&self.tileset),
				base_tile,
				rotation: 0,
			},
			frames: authored.frames.clone().into(),
			filepaths: filepaths.into(),
			interval: authored.interval,
			image_width: authored.image_width,
			index: 0,
			num_tiles: authored.num_tiles,
			base_path,
		};

		self.animations.insert(base_tile, Arc::new(base.clone()));
		self.write_run(&base, authored.tile_id, 1);

		for (j, &offset) in authored.frame_offsets.iter().enumerate() {
			let start = authored.tile_id + authored.num_tiles * (j as u32 + 1);
			self.write_offset_run(&base, start, offset);
		}
		for copy in &authored.copies {
			self.write_offset_run(&base, copy.tile_id, copy.frame_offset);
		}
	}
}

/// Expands the validated entries of one tileset.
pub(crate) fn expand_tileset(
	header: &TilesetHeader<'_>,
	authored: &[AuthoredAnimation],
	project_root: &Path,
	limits: &ProjectLimits,
	settings: &Settings,
	diagnostics: &mut Vec<Diagnostic>,
) -> TilesetAnimations {
	let tileset_dir = settings.tileset_dir(project_root, header.primary).join(&header.folder);

	// Every authored key is claimed up front, valid or not, so copies never
	// land on an id the table declares explicitly.
	let claimed =
		header.animations.keys().filter_map(|key| key.trim().parse::<u32>().ok()).collect();

	let mut expander = Expander {
		tileset: Arc::from(header.name),
		primary: header.primary,
		limits,
		claimed,
		animations: BTreeMap::new(),
		diagnostics,
	};
	for entry in authored {
		expander.expand(entry, &tileset_dir, settings, project_root);
	}

	TilesetAnimations {
		name: header.name.to_string(),
		primary: header.primary,
		folder: header.folder.clone(),
		animations: expander.animations,
	}
}
