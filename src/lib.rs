//! castplay - podcast episode player core
//!
//! A playback controller driving one audio stream and keeping a progress
//! display in sync with it, hosted on a single-threaded message loop.

pub mod api;
pub mod app;
pub mod audio;
pub mod features;
pub mod player;
pub mod ui;
pub mod utils;
