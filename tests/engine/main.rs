//! Integration tests for `tileanim-rs`

mod host;
mod lifecycle;
mod playback;
