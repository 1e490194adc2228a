//! Lifecycle controller.
//!
//! [`AnimationEngine`] owns every piece of animation state for one map view.
//! The host feeds it [`LifecycleEvent`]s and calls [`AnimationEngine::on_timer`]
//! whenever a tick it scheduled fires. Nothing here blocks: structural
//! changes only mark a rebuild as pending, and the rebuild runs at the top of
//! the next tick.
//!
//! The tick loop is a chain of one-shot timers. Stopping is cooperative: the
//! next tick sees that animation should not run, hides everything and does
//! not schedule another one.

use std::path::PathBuf;

use log::{debug, info};
use tileanim_types::{
	registry::{ActiveAnimations, AnimationRegistry},
	settings::{Settings, VersionTables},
	tile::ProjectLimits,
};

use crate::{
	builder::{BuildSummary, MapAnimationBuilder},
	host::{Action, ActionSpec, Host, OverlayCanvas},
	range::OverlayRange,
	scheduler::Scheduler,
};

/// Events delivered by the host editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
	/// A project was opened
	ProjectOpened {
		/// Project root directory
		project_root: PathBuf,
		/// Base game version, e.g. `"pokeemerald"`
		base_game_version: String,
		/// Metatile and tileset limits of the project
		limits: ProjectLimits,
	},
	/// A map was opened
	MapOpened {
		/// Name of the map
		map_name: String,
	},
	/// The current map changed size
	MapResized {
		/// New width in metatiles
		width: u32,
		/// New height in metatiles
		height: u32,
	},
	/// The current map's contents were shifted with wrap-around
	MapShifted {
		/// Horizontal shift in metatiles
		dx: i32,
		/// Vertical shift in metatiles
		dy: i32,
	},
	/// A tileset's graphics or metatiles changed
	TilesetUpdated {
		/// Name of the tileset
		tileset: String,
	},
	/// The main editor tab changed
	MainTabChanged {
		/// Newly selected tab
		tab: usize,
	},
	/// The map view tab changed
	MapViewTabChanged {
		/// Newly selected tab
		tab: usize,
	},
	/// A map block was edited
	BlockChanged {
		/// Horizontal coordinate
		x: u32,
		/// Vertical coordinate
		y: u32,
		/// Metatile id before the edit
		previous: u16,
		/// Metatile id after the edit
		current: u16,
	},
	/// A registered action was triggered by the user
	ActionTriggered(Action),
}

#[derive(Debug, Clone)]
struct ProjectContext {
	root: PathBuf,
	base_game_version: String,
	limits: ProjectLimits,
}

/// Tile animation engine for one map view.
#[derive(Debug)]
pub struct AnimationEngine {
	settings: Settings,
	tables: VersionTables,
	project: Option<ProjectContext>,
	registry: AnimationRegistry,
	map_name: String,
	map_width: u32,
	map_height: u32,
	builder: MapAnimationBuilder,
	scheduler: Scheduler,
	animating: bool,
	in_animated_view: bool,
	loop_active: bool,
	rebuild_pending: bool,
}

impl AnimationEngine {
	/// Creates an idle engine.
	///
	/// `tables` holds the tileset animation table of every supported base
	/// game version; the one matching the project is used when it opens.
	pub fn new(settings: Settings, tables: VersionTables) -> Self {
		let scheduler = Scheduler::new(settings.default_cycle_length);
		let builder = MapAnimationBuilder::default().with_log_prefix(settings.log_prefix.clone());
		Self {
			settings,
			tables,
			project: None,
			registry: AnimationRegistry::new(),
			map_name: String::new(),
			map_width: 0,
			map_height: 0,
			builder,
			scheduler,
			animating: false,
			in_animated_view: true,
			loop_active: false,
			rebuild_pending: true,
		}
	}

	/// Engine settings.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Animation registry of the open project.
	pub fn registry(&self) -> &AnimationRegistry {
		&self.registry
	}

	/// Overlay state of the current map.
	pub fn builder(&self) -> &MapAnimationBuilder {
		&self.builder
	}

	/// Tick counter and playback state.
	pub fn scheduler(&self) -> &Scheduler {
		&self.scheduler
	}

	/// Returns true when the user has animation switched on.
	pub fn is_animating(&self) -> bool {
		self.animating
	}

	/// Returns true while the tick chain is alive.
	pub fn is_running(&self) -> bool {
		self.loop_active
	}

	/// Returns true when the editor shows a view that can animate.
	pub fn in_animated_view(&self) -> bool {
		self.in_animated_view
	}

	/// Returns true when the next tick will rebuild the map.
	pub fn rebuild_pending(&self) -> bool {
		self.rebuild_pending
	}

	/// Overlay range owned by a map coordinate.
	pub fn overlay_range(&self, x: u32, y: u32) -> Option<OverlayRange> {
		self.builder.ranges().get(x, y)
	}

	fn should_animate(&self) -> bool {
		self.animating && self.in_animated_view
	}

	/// Dispatches a host event.
	pub fn handle_event<H: Host + ?Sized>(&mut self, host: &mut H, event: LifecycleEvent) {
		match event {
			LifecycleEvent::ProjectOpened {
				project_root,
				base_game_version,
				limits,
			} => self.open_project(host, project_root, base_game_version, limits),
			LifecycleEvent::MapOpened {
				map_name,
			} => {
				host.clear_all();
				self.map_name = map_name;
				self.map_width = host.map_width();
				self.map_height = host.map_height();
				self.rebuild_pending = true;
			}
			LifecycleEvent::MapResized {
				width,
				height,
			} => {
				host.clear_all();
				self.map_width = width;
				self.map_height = height;
				self.rebuild_pending = true;
			}
			LifecycleEvent::MapShifted {
				dx,
				dy,
			} => self.shift_map(host, dx, dy),
			LifecycleEvent::TilesetUpdated {
				tileset,
			} => {
				debug!("{}Tileset {tileset} updated", self.settings.log_prefix);
				host.clear_all();
				self.rebuild_pending = true;
			}
			LifecycleEvent::MainTabChanged {
				tab,
			} => {
				self.in_animated_view = tab == 0 && host.map_view_tab() == 0;
				self.try_start(host);
			}
			LifecycleEvent::MapViewTabChanged {
				tab,
			} => {
				self.in_animated_view = host.main_tab() == 0 && tab == 0;
				self.try_start(host);
			}
			LifecycleEvent::BlockChanged {
				x,
				y,
				previous,
				current,
			} => self.change_block(host, x, y, previous, current),
			LifecycleEvent::ActionTriggered(Action::ToggleAnimation) => self.toggle_animation(host),
			LifecycleEvent::ActionTriggered(Action::ReloadAnimations) => self.reload(host),
		}
	}

	fn open_project<H: Host + ?Sized>(
		&mut self,
		host: &mut H,
		root: PathBuf,
		base_game_version: String,
		limits: ProjectLimits,
	) {
		self.in_animated_view = host.main_tab() == 0 && host.map_view_tab() == 0;

		host.register_action(&ActionSpec {
			action: Action::ToggleAnimation,
			shortcut: self.settings.toggle_shortcut.clone(),
			checked: Some(self.settings.animate_on_launch),
		});
		if !self.settings.reload_shortcut.is_empty() {
			host.register_action(&ActionSpec {
				action: Action::ReloadAnimations,
				shortcut: self.settings.reload_shortcut.clone(),
				checked: None,
			});
		}

		self.project = Some(ProjectContext {
			root,
			base_game_version,
			limits,
		});
		self.load_registry();
		self.rebuild_pending = true;

		if self.settings.animate_on_launch {
			self.toggle_animation(host);
		}
	}

	fn load_registry(&mut self) {
		let Some(project) = &self.project else {
			return;
		};
		let report = AnimationRegistry::for_version(
			&project.root,
			&self.tables,
			&project.base_game_version,
			&project.limits,
			&self.settings,
		);
		if self.settings.logging.basic_info {
			info!(
				"{}Loaded animations for {} tilesets ({} problems)",
				self.settings.log_prefix,
				report.registry.len(),
				report.diagnostics.len()
			);
		}
		if self.settings.logging.debug_info {
			for tileset in report.registry.tilesets() {
				for (tile_id, anim) in &tileset.animations {
					debug!(
						"{}{}: tile {tile_id} frames {:?} interval {} index {}/{}",
						self.settings.log_prefix,
						tileset.name,
						anim.frames,
						anim.interval,
						anim.index,
						anim.num_tiles
					);
				}
			}
		}
		self.registry = report.registry;
	}

	/// Switches animation on or off.
	pub fn toggle_animation<H: Host + ?Sized>(&mut self, host: &mut H) {
		self.animating = !self.animating;
		if self.settings.logging.basic_info {
			let state = if self.animating { "on" } else { "off" };
			info!("{}Animations {state}", self.settings.log_prefix);
		}
		self.try_start(host);
	}

	/// Reloads the animation tables and schedules a full rebuild.
	pub fn reload<H: Host + ?Sized>(&mut self, host: &mut H) {
		if self.settings.logging.basic_info {
			info!("{}Reloading animations", self.settings.log_prefix);
		}
		self.load_registry();
		host.clear_all();
		self.rebuild_pending = true;
	}

	/// Starts the tick chain if animation should run and it is not running yet.
	fn try_start<H: Host + ?Sized>(&mut self, host: &mut H) {
		if !self.should_animate() || self.loop_active {
			return;
		}
		self.loop_active = true;
		self.scheduler.start();
		self.on_timer(host);
	}

	/// Runs one tick. Called by the host when a scheduled tick fires.
	///
	/// Rebuilds the map first if a rebuild is pending, then advances frames
	/// and schedules the next tick. When animation should no longer run,
	/// hides every overlay and ends the chain instead.
	pub fn on_timer<H: Host + ?Sized>(&mut self, host: &mut H) {
		if !self.loop_active {
			return;
		}
		if !self.should_animate() {
			self.loop_active = false;
			self.scheduler.stop(self.builder.index_mut(), host);
			return;
		}
		if self.rebuild_pending {
			self.rebuild(host);
		}
		self.scheduler.step(self.builder.index_mut(), host);
		host.schedule_tick(self.settings.refresh_interval());
	}

	fn rebuild<H: Host + ?Sized>(&mut self, host: &mut H) {
		self.rebuild_pending = false;
		host.clear_all();

		let limits = self.project.as_ref().map(|p| p.limits).unwrap_or_default();
		let active = self.registry.active_for_map(
			&host.primary_tileset(),
			&host.secondary_tileset(),
			&self.map_name,
			&self.settings,
		);
		let cycle_length = active
			.as_ref()
			.map_or(self.settings.default_cycle_length, |a| a.cycle_length(&self.settings));
		self.scheduler.set_cycle_length(cycle_length);

		let has_animations = active.is_some();
		if self.settings.logging.debug_info {
			if let Some(active) = &active {
				self.log_active(active);
			}
			debug!("{}Cycle length: {cycle_length}", self.settings.log_prefix);
		}

		self.builder.reset(limits, active, self.map_width, self.map_height);
		let summary = self.builder.build_map(host);

		if self.settings.logging.basic_info {
			if has_animations {
				info!("{}Map animations loaded", self.settings.log_prefix);
			} else {
				info!("{}No animations on this map", self.settings.log_prefix);
			}
		}
		if self.settings.logging.usage_info {
			self.log_usage(&summary, host);
		}
	}

	fn change_block<H: Host + ?Sized>(
		&mut self,
		host: &mut H,
		x: u32,
		y: u32,
		previous: u16,
		current: u16,
	) {
		if previous == current || self.rebuild_pending || !self.builder.is_built() {
			return;
		}
		self.builder.clear_space(host, x, y);
		if let Some(range) = self.builder.build_space(host, x, y) {
			debug!(
				"{}Block ({x}, {y}) rebuilt on overlays {}..{}",
				self.settings.log_prefix, range.start, range.end
			);
		}
	}

	fn shift_map<H: Host + ?Sized>(&mut self, host: &mut H, dx: i32, dy: i32) {
		if (dx == 0 && dy == 0) || self.rebuild_pending || !self.builder.is_built() {
			return;
		}
		self.builder.shift(host, dx, dy);
	}

	fn log_active(&self, active: &ActiveAnimations) {
		for (tile_id, anim) in active.iter() {
			debug!(
				"{}Active tile {tile_id}: {} frames every {} ticks from {}",
				self.settings.log_prefix,
				anim.frame_count(),
				anim.interval,
				anim.base_path.display()
			);
		}
	}

	fn log_usage<C: OverlayCanvas + ?Sized>(&self, summary: &BuildSummary, canvas: &C) {
		let prefix = &self.settings.log_prefix;
		let index = self.builder.index();
		info!(
			"{prefix}Overlays used: {} across {} spaces ({} metatiles planned)",
			summary.overlays, summary.animated_spaces, summary.metatiles
		);
		for interval in index.intervals() {
			info!(
				"{prefix}Interval {interval}: {} frame groups, {} static groups",
				index.frame_groups(interval).len(),
				index.static_groups(interval).len()
			);
		}
		debug!("{prefix}Visible overlays: {}", index.visible_overlays(canvas));
		for (x, y, range) in self.builder.ranges().iter() {
			debug!("{prefix}({x}, {y}): overlays {}..{}", range.start, range.end);
		}
	}
}
