//! Tileset animation utility.
//!
//! Provides three subcommands:
//! - `validate`: build the animation registry from a settings file and report
//!   every configuration problem.
//! - `inspect`: list the expanded animations of one tileset or one tile.
//! - `simulate`: run the engine against an in-memory map and print how many
//!   overlays are visible as the ticks go by.

use std::{
	collections::{BTreeSet, HashMap},
	path::{Path, PathBuf},
	time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::info;
use tileanim_rs::prelude::*;

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Validate(opts) => run_validate(opts),
		Command::Inspect(opts) => run_inspect(opts),
		Command::Simulate(opts) => run_simulate(opts),
	}
}

#[derive(Parser)]
#[command(name = "anim_utils")]
#[command(author = "tileanim-rs project")]
#[command(version)]
#[command(about = "Validate, inspect and simulate tileset animation tables", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Validate the animation table of a base game version
	Validate(ValidateArgs),
	/// Show expanded animations of a tileset
	Inspect(InspectArgs),
	/// Run the engine on a synthetic map
	Simulate(SimulateArgs),
}

#[derive(Args)]
struct TableArgs {
	/// Settings file listing the animation tables
	#[arg(short, long, value_name = "FILE", default_value = "demos/data/settings.toml")]
	settings: PathBuf,

	/// Base game version whose table is used
	#[arg(long, value_name = "NAME", default_value = "pokeemerald")]
	version: String,

	/// Project root used to resolve frame image paths
	#[arg(long, value_name = "DIR", default_value = ".")]
	project_root: PathBuf,
}

#[derive(Args)]
struct ValidateArgs {
	#[command(flatten)]
	table: TableArgs,

	/// Exit with an error when warnings are encountered
	#[arg(long, default_value_t = false)]
	fail_on_warning: bool,
}

#[derive(Args)]
struct InspectArgs {
	#[command(flatten)]
	table: TableArgs,

	/// Tileset to inspect; lists all tilesets when omitted
	#[arg(value_name = "TILESET")]
	tileset: Option<String>,

	/// Only show this tile id
	#[arg(short, long, value_name = "ID")]
	tile: Option<u16>,
}

#[derive(Args)]
struct SimulateArgs {
	#[command(flatten)]
	table: TableArgs,

	/// Primary tileset of the synthetic map
	#[arg(long, default_value = "gTileset_General")]
	primary: String,

	/// Secondary tileset of the synthetic map
	#[arg(long, default_value = "gTileset_Rustboro")]
	secondary: String,

	/// Map width in metatiles
	#[arg(long, default_value_t = 8)]
	width: u32,

	/// Map height in metatiles
	#[arg(long, default_value_t = 8)]
	height: u32,

	/// Comma-separated tile ids of the placed metatile, layer-major
	#[arg(long, value_delimiter = ',', default_value = "432,433,434,435,0,0,0,0,1,0,0,0")]
	tiles: Vec<u16>,

	/// Number of ticks to run
	#[arg(long, default_value_t = 64)]
	ticks: u32,
}

fn load_tables(args: &TableArgs) -> Result<(Settings, VersionTables)> {
	let settings = Settings::load(&args.settings)
		.with_context(|| format!("Failed to load settings from {}", args.settings.display()))?;
	let base_dir = args.settings.parent().unwrap_or(Path::new("."));
	let tables =
		VersionTables::load(&settings, base_dir).context("Failed to load animation tables")?;
	Ok((settings, tables))
}

fn build_registry(args: &TableArgs) -> Result<(Settings, VersionTables, RegistryReport)> {
	let (settings, tables) = load_tables(args)?;
	if tables.get(&args.version).is_none() {
		let known: Vec<&str> = tables.versions().collect();
		bail!("No table configured for {} (known: {})", args.version, known.join(", "));
	}
	let report = AnimationRegistry::for_version(
		&args.project_root,
		&tables,
		&args.version,
		&ProjectLimits::default(),
		&settings,
	);
	Ok((settings, tables, report))
}

fn run_validate(args: ValidateArgs) -> Result<()> {
	let (_, _, report) = build_registry(&args.table)?;

	let errors = report.diagnostics.iter().filter(|d| d.is_error()).count();
	let warnings = report.diagnostics.len() - errors;
	for diagnostic in &report.diagnostics {
		println!("{diagnostic}");
	}

	let tiles: usize = report.registry.tilesets().map(TilesetAnimations::len).sum();
	println!(
		"{} tilesets, {} animated tiles | warnings: {} | errors: {}",
		report.registry.len(),
		tiles,
		warnings,
		errors
	);

	if errors > 0 {
		bail!("Validation finished with errors");
	}
	if args.fail_on_warning && warnings > 0 {
		bail!("Validation finished with warnings");
	}
	Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
	let (settings, _, report) = build_registry(&args.table)?;
	let registry = report.registry;

	let Some(name) = args.tileset else {
		for tileset in registry.tilesets() {
			println!(
				"{:<24} {:<9} {:>4} tiles  {}",
				tileset.name,
				if tileset.primary { "primary" } else { "secondary" },
				tileset.len(),
				tileset.folder
			);
		}
		return Ok(());
	};

	let Some(tileset) = registry.tileset(&name) else {
		bail!("Tileset {name} has no animation data");
	};
	let active = ActiveAnimations::from_animations(
		tileset.animations.iter().map(|(&id, anim)| (id, anim.clone())),
	);
	println!(
		"{} ({}), cycle length {}",
		tileset.name,
		tileset.folder,
		active.cycle_length(&settings)
	);

	for (tile_id, anim) in &tileset.animations {
		if args.tile.is_some_and(|tile| tile != *tile_id) {
			continue;
		}
		println!(
			"  {tile_id:>4} ({tile_id:#05x})  run {}/{}  every {:>2} ticks  frames [{}]",
			anim.index,
			anim.num_tiles,
			anim.interval,
			anim.frames.join(", ")
		);
		if args.tile.is_some() {
			for path in anim.filepaths.iter() {
				println!("        {}", path.display());
			}
		}
	}
	Ok(())
}

fn run_simulate(args: SimulateArgs) -> Result<()> {
	if args.width == 0 || args.height == 0 {
		bail!("Map dimensions must be greater than zero");
	}
	let (settings, tables) = load_tables(&args.table)?;

	let mut host = DemoHost::new(&args);
	let mut engine = AnimationEngine::new(
		Settings {
			animate_on_launch: false,
			..settings
		},
		tables,
	);
	engine.handle_event(
		&mut host,
		LifecycleEvent::ProjectOpened {
			project_root: args.table.project_root.clone(),
			base_game_version: args.table.version.clone(),
			limits: ProjectLimits::default(),
		},
	);
	engine.handle_event(
		&mut host,
		LifecycleEvent::MapOpened {
			map_name: "DemoMap".to_string(),
		},
	);
	engine.toggle_animation(&mut host);

	let mut last_visible = usize::MAX;
	for _ in 1..args.ticks {
		let tick = engine.scheduler().tick();
		if host.visible.len() != last_visible {
			last_visible = host.visible.len();
			println!("tick {tick:>5}: {last_visible} overlays visible");
		}
		if host.pending.take().is_none() {
			break;
		}
		engine.on_timer(&mut host);
	}

	info!(
		"Simulated {} ticks: {} overlays, {} images, cycle length {}",
		args.ticks,
		engine.builder().allocator().allocated(),
		host.images,
		engine.scheduler().cycle_length()
	);
	Ok(())
}

/// Checkerboard map with one animated metatile.
struct DemoHost {
	width: u32,
	height: u32,
	primary: String,
	secondary: String,
	metatiles: HashMap<u16, Vec<Tile>>,
	visible: BTreeSet<OverlayId>,
	images: usize,
	pending: Option<Duration>,
}

impl DemoHost {
	fn new(args: &SimulateArgs) -> Self {
		let mut metatiles = HashMap::new();
		metatiles.insert(1, args.tiles.iter().map(|&id| Tile::new(id)).collect());
		Self {
			width: args.width,
			height: args.height,
			primary: args.primary.clone(),
			secondary: args.secondary.clone(),
			metatiles,
			visible: BTreeSet::new(),
			images: 0,
			pending: None,
		}
	}
}

impl MapSource for DemoHost {
	fn map_width(&self) -> u32 {
		self.width
	}

	fn map_height(&self) -> u32 {
		self.height
	}

	fn metatile_id(&self, x: u32, y: u32) -> Option<u16> {
		(x < self.width && y < self.height).then_some(if (x + y) % 2 == 0 { 1 } else { 0 })
	}

	fn metatile_tiles(&self, metatile_id: u16) -> Option<Vec<Tile>> {
		self.metatiles.get(&metatile_id).cloned()
	}

	fn primary_tileset(&self) -> String {
		self.primary.clone()
	}

	fn secondary_tileset(&self) -> String {
		self.secondary.clone()
	}

	fn main_tab(&self) -> usize {
		0
	}

	fn map_view_tab(&self) -> usize {
		0
	}
}

impl OverlayCanvas for DemoHost {
	fn create_image(&mut self, _request: &ImageRequest<'_>) {
		self.images += 1;
	}

	fn add_tile_image(&mut self, _request: &TileImageRequest) {
		self.images += 1;
	}

	fn show(&mut self, overlay: OverlayId) {
		self.visible.insert(overlay);
	}

	fn hide(&mut self, overlay: OverlayId) {
		self.visible.remove(&overlay);
	}

	fn hide_all(&mut self) {
		self.visible.clear();
	}

	fn clear(&mut self, _overlay: OverlayId) {}

	fn clear_all(&mut self) {
		self.images = 0;
	}

	fn is_visible(&self, overlay: OverlayId) -> bool {
		self.visible.contains(&overlay)
	}

	fn set_position(&mut self, _overlay: OverlayId, _x: u32, _y: u32) {}
}

impl Host for DemoHost {
	fn schedule_tick(&mut self, delay: Duration) {
		self.pending = Some(delay);
	}

	fn register_action(&mut self, spec: &ActionSpec) {
		info!("Registered {} ({}) on {}", spec.action.label(), spec.action.id(), spec.shortcut);
	}
}
