//! Frame playback through the public engine API.

use serde_json::json;
use tileanim_engine::test_host::RecordingHost;
use tileanim_rs::prelude::*;

use crate::host::{engine_with, fire, open, water_table};

#[test_log::test]
fn test_two_frame_scenario() {
	let mut host = RecordingHost::new(1, 1);
	host.define(1, &[100, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
	host.place(0, 0, 1);
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);

	engine.toggle_animation(&mut host);
	assert_eq!(engine.scheduler().cycle_length(), 8);
	assert_eq!(engine.builder().allocator().allocated(), 2);
	assert_eq!(
		engine.overlay_range(0, 0),
		Some(OverlayRange {
			start: OverlayId(1),
			end: OverlayId(3),
		})
	);
	assert_eq!(host.images.len(), 2);
	assert!(host.images[0].path.ends_with("general/anim/water/a.png"));
	assert!(host.images[1].path.ends_with("general/anim/water/b.png"));

	// Tick 0 shows frame 0.
	assert!(host.visible.contains(&OverlayId(1)));
	assert!(!host.visible.contains(&OverlayId(2)));

	// Ticks 1-3 change nothing, tick 4 swaps frames.
	for _ in 1..4 {
		assert!(fire(&mut engine, &mut host));
		assert!(host.visible.contains(&OverlayId(1)));
	}
	assert!(fire(&mut engine, &mut host));
	assert!(!host.visible.contains(&OverlayId(1)));
	assert!(host.visible.contains(&OverlayId(2)));

	// Ticks 5-7, then the counter wraps and frame 0 returns.
	for _ in 5..8 {
		assert!(fire(&mut engine, &mut host));
	}
	assert_eq!(engine.scheduler().tick(), 0);
	assert!(fire(&mut engine, &mut host));
	assert!(host.visible.contains(&OverlayId(1)));
	assert!(!host.visible.contains(&OverlayId(2)));
}

#[test]
fn test_frames_cycle_in_lockstep() {
	let table = json!({
		"gTileset_General": {
			"folder": "general/anim",
			"tileAnimations": {
				"200": {
					"folder": "flower",
					"frames": ["0", "1", "2"],
					"numTiles": 1,
					"interval": 2,
					"imageWidth": 8
				}
			}
		}
	});
	let mut host = RecordingHost::new(1, 1);
	host.define(1, &[200, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
	host.place(0, 0, 1);
	let mut engine = engine_with(table);
	open(&mut engine, &mut host);
	engine.toggle_animation(&mut host);
	assert_eq!(engine.scheduler().cycle_length(), 6);

	for tick in 1..=24u64 {
		let frame = ((tick - 1) / 2 % 3) as u32;
		let shown: Vec<u32> = host.visible.iter().map(|id| id.0).collect();
		assert_eq!(shown, vec![frame + 1], "after tick {}", tick - 1);
		assert!(fire(&mut engine, &mut host));
	}
}

#[test]
fn test_static_and_animated_reveal_together() {
	let mut host = RecordingHost::new(2, 1);
	host.define(1, &[100, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
	// Water under a bridge tile on layer 1.
	host.define(2, &[100, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0]);
	host.place(0, 0, 1);
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);
	engine.toggle_animation(&mut host);
	assert!(fire(&mut engine, &mut host));
	assert_eq!(engine.scheduler().tick(), 2);

	host.place(1, 0, 2);
	engine.handle_event(
		&mut host,
		LifecycleEvent::BlockChanged {
			x: 1,
			y: 0,
			previous: 0,
			current: 2,
		},
	);
	let range = engine.overlay_range(1, 0).map(|r| r.ids().collect::<Vec<_>>());
	assert_eq!(range, Some(vec![OverlayId(3), OverlayId(4), OverlayId(5)]));
	assert_eq!(host.tile_images.len(), 1);
	let static_overlay = host.tile_images[0].overlay;
	assert_eq!(static_overlay, OverlayId(5));

	for _ in 2..8 {
		let tick = engine.scheduler().tick();
		let frames_visible =
			host.visible.contains(&OverlayId(3)) || host.visible.contains(&OverlayId(4));
		assert_eq!(frames_visible, host.visible.contains(&static_overlay), "tick {tick}");
		assert!(fire(&mut engine, &mut host));
	}
	assert!(host.visible.contains(&static_overlay));
	assert!(host.visible.contains(&OverlayId(4)));
}

#[test]
fn test_static_metatile_allocates_nothing() {
	let mut host = RecordingHost::new(3, 3);
	host.define(1, &[5, 6, 7, 8, 9, 10, 11, 12, 0, 0, 0, 0]);
	for y in 0..3 {
		for x in 0..3 {
			host.place(x, y, 1);
		}
	}
	let mut engine = engine_with(water_table());
	open(&mut engine, &mut host);
	engine.toggle_animation(&mut host);

	assert_eq!(engine.builder().allocator().allocated(), 0);
	assert_eq!(engine.builder().ranges().occupied(), 0);
	assert!(host.images.is_empty());
	assert!(host.tile_images.is_empty());
}

#[test]
fn test_repeated_frames_share_overlays() {
	let table = json!({
		"gTileset_General": {
			"folder": "general/anim",
			"tileAnimations": {
				"508": {
					"folder": "flower",
					"frames": [0, 1, 0, 2],
					"numTiles": 4,
					"interval": 16,
					"imageWidth": 16
				}
			}
		}
	});
	let mut host = RecordingHost::new(1, 1);
	host.define(1, &[508, 509, 510, 511, 0, 0, 0, 0, 0, 0, 0, 0]);
	host.place(0, 0, 1);
	let mut engine = engine_with(table);
	open(&mut engine, &mut host);
	engine.toggle_animation(&mut host);

	// One merged 16x16 image for each of the three distinct frames.
	assert_eq!(engine.builder().allocator().allocated(), 3);
	assert_eq!(host.images.len(), 3);
	assert!(host.images.iter().all(|image| image.width == 16 && image.height == 16));
	assert_eq!(engine.scheduler().cycle_length(), 64);

	let group = &engine.builder().index().frame_groups(16)[0];
	assert_eq!(group.overlays(), &[OverlayId(1), OverlayId(2), OverlayId(1), OverlayId(3)]);
}
