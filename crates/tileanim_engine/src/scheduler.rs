//! Tick-driven frame playback.
//!
//! A global tick counter advances once per timer callback and wraps at the
//! cycle length. On every tick that is a multiple of an interval, each frame
//! group registered under that interval hides its previous frame and shows
//! the current one:
//!
//! ```text
//! current  = (tick / interval) % frames
//! previous = current - 1, or frames - 1 when current is 0
//! ```
//!
//! Hide always precedes show, so a group whose previous and current frames
//! share an overlay keeps it visible.

use tileanim_types::constants::DEFAULT_CYCLE_LENGTH;

use crate::{host::OverlayCanvas, index::AnimationIndex};

/// Playback state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
	/// No per-tick work; every overlay is hidden
	#[default]
	Stopped,
	/// Frames advance on each tick
	Running,
}

/// Frame displayed by a group of `frames` frames at `tick`.
pub fn frame_at(tick: u64, interval: u32, frames: usize) -> usize {
	if interval == 0 || frames == 0 {
		return 0;
	}
	((tick / u64::from(interval)) % frames as u64) as usize
}

/// Tick counter and playback state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
	state: PlaybackState,
	tick: u64,
	cycle_length: u64,
}

impl Default for Scheduler {
	fn default() -> Self {
		Self::new(DEFAULT_CYCLE_LENGTH)
	}
}

impl Scheduler {
	/// Creates a stopped scheduler.
	pub fn new(cycle_length: u64) -> Self {
		Self {
			state: PlaybackState::Stopped,
			tick: 0,
			cycle_length: cycle_length.max(1),
		}
	}

	/// Current playback state.
	pub fn state(&self) -> PlaybackState {
		self.state
	}

	/// Returns true while running.
	pub fn is_running(&self) -> bool {
		self.state == PlaybackState::Running
	}

	/// Tick the next step will process.
	pub fn tick(&self) -> u64 {
		self.tick
	}

	/// Tick count at which the counter wraps to 0.
	pub fn cycle_length(&self) -> u64 {
		self.cycle_length
	}

	/// Sets the wrap point and restarts the counter.
	pub fn set_cycle_length(&mut self, cycle_length: u64) {
		self.cycle_length = cycle_length.max(1);
		self.tick = 0;
	}

	/// Enters `Running` with the counter at 0.
	pub fn start(&mut self) {
		self.state = PlaybackState::Running;
		self.tick = 0;
	}

	/// Enters `Stopped`, hiding every overlay.
	///
	/// Static groups are marked unrevealed so they reappear with their
	/// animations on the next start.
	pub fn stop<C: OverlayCanvas + ?Sized>(&mut self, index: &mut AnimationIndex, canvas: &mut C) {
		self.state = PlaybackState::Stopped;
		canvas.hide_all();
		index.conceal_statics();
	}

	/// Processes the current tick and advances the counter.
	pub fn step<C: OverlayCanvas + ?Sized>(&mut self, index: &mut AnimationIndex, canvas: &mut C) {
		let tick = self.tick;
		for (&interval, groups) in &index.frames {
			if interval == 0 || tick % u64::from(interval) != 0 {
				continue;
			}
			for group in groups {
				let frames = group.len();
				if frames == 0 {
					continue;
				}
				let current = frame_at(tick, interval, frames);
				let previous = if current == 0 { frames - 1 } else { current - 1 };
				if let Some(id) = group.overlay(previous) {
					canvas.hide(id);
				}
				if let Some(id) = group.overlay(current) {
					canvas.show(id);
				}
			}
			if let Some(statics) = index.statics.get_mut(&interval) {
				for group in statics.iter_mut().filter(|group| !group.revealed) {
					for &id in &group.overlays {
						canvas.show(id);
					}
					group.revealed = true;
				}
			}
		}

		self.tick += 1;
		if self.tick >= self.cycle_length {
			self.tick = 0;
		}
	}
}
