//! Engine fixtures shared by the integration tests.

use std::path::PathBuf;

use serde_json::{Value, json};
use tileanim_engine::test_host::RecordingHost;
use tileanim_rs::prelude::*;

/// Table with one two-frame animation on tile 100 of the primary tileset.
pub fn water_table() -> Value {
	json!({
		"gTileset_General": {
			"folder": "general/anim",
			"primary": true,
			"tileAnimations": {
				"100": {
					"folder": "water",
					"frames": ["a", "b"],
					"numTiles": 1,
					"interval": 4,
					"imageWidth": 8
				}
			}
		}
	})
}

/// Engine that waits for an explicit toggle.
pub fn engine_with(table: Value) -> AnimationEngine {
	let settings = Settings {
		animate_on_launch: false,
		..Settings::default()
	};
	AnimationEngine::new(settings, VersionTables::new().with_table("pokeemerald", table))
}

/// Opens a project and a map.
pub fn open(engine: &mut AnimationEngine, host: &mut RecordingHost) {
	engine.handle_event(
		host,
		LifecycleEvent::ProjectOpened {
			project_root: PathBuf::from("/projects/emerald"),
			base_game_version: "pokeemerald".to_string(),
			limits: ProjectLimits::default(),
		},
	);
	engine.handle_event(
		host,
		LifecycleEvent::MapOpened {
			map_name: "Route104".to_string(),
		},
	);
}

/// Fires the pending tick, if any.
pub fn fire(engine: &mut AnimationEngine, host: &mut RecordingHost) -> bool {
	if host.pending.take().is_none() {
		return false;
	}
	engine.on_timer(host);
	true
}
