//! Transient state of one loaded episode

/// Player state as seen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// No episode requested
    Idle,
    /// Fetching metadata or buffering audio
    Loading,
    Paused,
    Playing,
    /// The seek control is being dragged; audio may still play underneath
    Scrubbing,
}

/// Playback session tied to one loaded episode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackSession {
    /// Last position reported to the display, in seconds
    pub position: f64,
    /// The display is previewing a dragged position
    pub scrubbing: bool,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_scrub(&mut self) {
        self.scrubbing = true;
    }

    /// Leave scrubbing, committing `target` as the new position
    pub fn end_scrub(&mut self, target: f64) {
        self.scrubbing = false;
        self.position = target;
    }
}
