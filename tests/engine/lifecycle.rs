//! Lifecycle events, rebuilds and the tick chain.

use std::path::Path;

use tileanim_engine::test_host::RecordingHost;
use tileanim_rs::prelude::*;

use crate::host::{engine_with, fire, open, water_table};

fn water_map() -> RecordingHost {
	let mut host = RecordingHost::new(3, 2);
	host.define(1, &[100, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0]);
	host.place(0, 0, 1);
	host.place(2, 1, 1);
	host
}

fn ranges(engine: &AnimationEngine) -> Vec<(u32, u32, OverlayRange)> {
	engine.builder().ranges().iter().collect()
}

#[test_log::test]
fn test_rebuild_is_deterministic() {
	let mut host = water_map();
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);
	engine.toggle_animation(&mut host);
	let first = ranges(&engine);
	let allocated = engine.builder().allocator().allocated();
	assert_eq!(first.len(), 2);

	engine.handle_event(
		&mut host,
		LifecycleEvent::TilesetUpdated {
			tileset: "gTileset_General".to_string(),
		},
	);
	assert!(engine.rebuild_pending());
	assert!(host.images.is_empty());
	assert!(fire(&mut engine, &mut host));

	assert!(!engine.rebuild_pending());
	assert_eq!(ranges(&engine), first);
	assert_eq!(engine.builder().allocator().allocated(), allocated);
	assert_eq!(engine.scheduler().tick(), 1);
}

#[test]
fn test_restart_does_not_rebuild() {
	let mut host = water_map();
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);
	engine.toggle_animation(&mut host);
	// One clear for the opened map, one for the build.
	assert_eq!(host.clear_all_calls, 2);
	assert_eq!(engine.scheduler().tick(), 1);

	// Already running: no second chain.
	engine.handle_event(
		&mut host,
		LifecycleEvent::MainTabChanged {
			tab: 0,
		},
	);
	assert_eq!(engine.scheduler().tick(), 1);

	engine.toggle_animation(&mut host);
	assert!(engine.is_running());
	assert!(fire(&mut engine, &mut host));
	assert!(!engine.is_running());
	assert!(host.visible.is_empty());
	assert!(!fire(&mut engine, &mut host));

	let images = host.images.len();
	engine.toggle_animation(&mut host);
	assert!(engine.is_running());
	assert_eq!(host.clear_all_calls, 2);
	assert_eq!(host.images.len(), images);
	assert_eq!(engine.scheduler().tick(), 1);
	assert!(host.visible.contains(&OverlayId(1)));
	assert!(host.visible.contains(&OverlayId(3)));
}

#[test]
fn test_quick_toggle_keeps_one_chain() {
	let mut host = water_map();
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);
	engine.toggle_animation(&mut host);

	engine.toggle_animation(&mut host);
	engine.toggle_animation(&mut host);
	assert!(engine.is_animating());
	assert_eq!(engine.scheduler().tick(), 1);
	assert!(fire(&mut engine, &mut host));
	assert_eq!(engine.scheduler().tick(), 2);
}

#[test]
fn test_map_shift_moves_overlays() {
	let mut host = water_map();
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);
	engine.toggle_animation(&mut host);
	assert_eq!(host.position(OverlayId(1)), Some((0, 0)));

	engine.handle_event(
		&mut host,
		LifecycleEvent::MapShifted {
			dx: 1,
			dy: 0,
		},
	);
	assert_eq!(engine.overlay_range(1, 0).map(|r| r.start), Some(OverlayId(1)));
	assert_eq!(engine.overlay_range(0, 1).map(|r| r.start), Some(OverlayId(4)));
	assert_eq!(host.position(OverlayId(1)), Some((16, 0)));
	assert_eq!(host.position(OverlayId(3)), Some((16, 0)));
	assert_eq!(host.position(OverlayId(4)), Some((0, 16)));
}

#[test]
fn test_edits_wait_for_pending_rebuild() {
	let mut host = water_map();
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);

	// Nothing is built before animation starts.
	host.place(1, 0, 1);
	engine.handle_event(
		&mut host,
		LifecycleEvent::BlockChanged {
			x: 1,
			y: 0,
			previous: 0,
			current: 1,
		},
	);
	engine.handle_event(
		&mut host,
		LifecycleEvent::MapShifted {
			dx: 1,
			dy: 1,
		},
	);
	assert!(host.images.is_empty());
	assert!(host.positions.is_empty());

	engine.toggle_animation(&mut host);
	assert_eq!(engine.builder().ranges().occupied(), 3);
	assert_eq!(engine.overlay_range(1, 0).map(|r| r.start), Some(OverlayId(4)));
}

#[test]
fn test_resize_rebuilds_with_new_bounds() {
	let mut host = water_map();
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);
	engine.toggle_animation(&mut host);

	host.width = 2;
	host.height = 1;
	host.blocks = vec![1, 0];
	engine.handle_event(
		&mut host,
		LifecycleEvent::MapResized {
			width: 2,
			height: 1,
		},
	);
	assert!(engine.rebuild_pending());
	assert!(fire(&mut engine, &mut host));

	assert_eq!(engine.builder().ranges().width(), 2);
	assert_eq!(engine.builder().ranges().height(), 1);
	assert_eq!(engine.builder().ranges().occupied(), 1);
	assert_eq!(engine.builder().allocator().allocated(), 3);
}

#[test]
fn test_reload_action() {
	let mut host = water_map();
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);
	engine.toggle_animation(&mut host);
	let clears = host.clear_all_calls;

	engine.handle_event(&mut host, LifecycleEvent::ActionTriggered(Action::ReloadAnimations));
	assert!(engine.rebuild_pending());
	assert_eq!(host.clear_all_calls, clears + 1);
	assert_eq!(engine.registry().len(), 1);

	assert!(fire(&mut engine, &mut host));
	assert_eq!(engine.builder().ranges().occupied(), 2);
	assert_eq!(host.images.len(), 4);
}

#[test]
fn test_toggle_action_and_view() {
	let mut host = water_map();
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);
	assert_eq!(host.actions.len(), 1);
	assert_eq!(host.actions[0].action, Action::ToggleAnimation);
	assert_eq!(host.actions[0].checked, Some(false));

	host.map_view_tab = 1;
	engine.handle_event(
		&mut host,
		LifecycleEvent::MapViewTabChanged {
			tab: 1,
		},
	);
	engine.handle_event(&mut host, LifecycleEvent::ActionTriggered(Action::ToggleAnimation));
	assert!(engine.is_animating());
	assert!(!engine.in_animated_view());
	assert!(!engine.is_running());
	assert!(host.pending.is_none());

	host.map_view_tab = 0;
	engine.handle_event(
		&mut host,
		LifecycleEvent::MapViewTabChanged {
			tab: 0,
		},
	);
	assert!(engine.is_running());
	assert!(host.visible.contains(&OverlayId(1)));
}

#[test]
fn test_demo_settings_load() {
	let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/data/settings.toml");
	let settings = Settings::load(&path).expect("demo settings should load");
	assert_eq!(settings.reload_shortcut, "Ctrl+Shift+A");
	assert!(settings.is_map_excluded("SecretBase_BlueCave1"));

	let base_dir = path.parent().expect("settings file has a parent");
	let tables = VersionTables::load(&settings, base_dir).expect("demo tables should load");
	let report = AnimationRegistry::for_version(
		Path::new("/projects/emerald"),
		&tables,
		"pokeemerald",
		&ProjectLimits::default(),
		&settings,
	);
	assert!(!report.has_errors(), "{:?}", report.diagnostics);
	assert_eq!(report.registry.len(), 3);

	let active = report.registry.active("gTileset_General", "gTileset_Rustboro");
	assert!(active.is_some_and(|active| active.is_animated(432)));
}
