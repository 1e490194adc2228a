//! Animation lookup for the active primary/secondary tileset pair.

use std::{collections::BTreeMap, sync::Arc};

use super::{TileAnimation, TilesetAnimations};
use crate::settings::Settings;

fn gcd(a: u64, b: u64) -> u64 {
	if a == 0 {
		b
	} else {
		gcd(b % a, a)
	}
}

fn lcm(a: u64, b: u64) -> Option<u64> {
	(a / gcd(a, b)).checked_mul(b)
}

/// Flat tile id to descriptor lookup for the tilesets used by a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveAnimations {
	by_tile: BTreeMap<u16, Arc<TileAnimation>>,
}

impl ActiveAnimations {
	/// Combines a primary and a secondary tileset. Primary entries win on conflict.
	///
	/// Returns `None` when neither tileset contributes an animated tile.
	pub(crate) fn union(
		primary: Option<&TilesetAnimations>,
		secondary: Option<&TilesetAnimations>,
	) -> Option<Self> {
		let mut by_tile = BTreeMap::new();
		for tileset in [secondary, primary].into_iter().flatten() {
			by_tile.extend(tileset.animations.iter().map(|(&id, anim)| (id, Arc::clone(anim))));
		}
		if by_tile.is_empty() {
			return None;
		}
		Some(Self {
			by_tile,
		})
	}

	/// Builds a lookup directly from descriptors.
	pub fn from_animations(
		animations: impl IntoIterator<Item = (u16, Arc<TileAnimation>)>,
	) -> Self {
		Self {
			by_tile: animations.into_iter().collect(),
		}
	}

	/// Returns the descriptor for a tile id.
	pub fn get(&self, tile_id: u16) -> Option<&Arc<TileAnimation>> {
		self.by_tile.get(&tile_id)
	}

	/// Returns true if the tile id animates.
	pub fn is_animated(&self, tile_id: u16) -> bool {
		self.by_tile.contains_key(&tile_id)
	}

	/// Number of animated tile ids.
	pub fn len(&self) -> usize {
		self.by_tile.len()
	}

	/// Returns true if nothing animates.
	pub fn is_empty(&self) -> bool {
		self.by_tile.is_empty()
	}

	/// Iterates over `(tile id, descriptor)` in tile id order.
	pub fn iter(&self) -> impl Iterator<Item = (u16, &Arc<TileAnimation>)> {
		self.by_tile.iter().map(|(&id, anim)| (id, anim))
	}

	/// Tick count after which every active animation is back at frame 0.
	///
	/// This is the least common multiple of `interval * frame count` over the
	/// distinct animations. `settings.default_cycle_length` is returned when
	/// nothing animates or the multiple does not fit in a `u64`.
	pub fn cycle_length(&self, settings: &Settings) -> u64 {
		let default = settings.default_cycle_length;
		let mut full_cycles: Vec<u64> =
			self.by_tile.values().map(|anim| anim.full_cycle()).filter(|&c| c > 0).collect();
		full_cycles.sort_unstable();
		full_cycles.dedup();

		let Some((&first, rest)) = full_cycles.split_first() else {
			return default;
		};
		let mut result = first;
		for &cycle in rest {
			match lcm(result, cycle) {
				Some(next) => result = next,
				None => {
					log::warn!(
						"{}Animation cycle length overflows, using {default}",
						settings.log_prefix
					);
					return default;
				}
			}
		}
		result
	}
}
