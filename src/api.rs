//! Episode metadata API
//!
//! Provides the episode source seam and its HTTP/file implementation.

mod episode_source;

pub use episode_source::{EpisodeLocation, EpisodeSource, HttpEpisodeSource, resolve};
