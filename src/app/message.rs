//! Application messages

use crate::audio::{AudioEvent, LoadRequest};
use crate::features::Command;
use crate::player::{EpisodePayload, TickToken};

/// Sender half of the application message channel
pub type MessageSender = tokio::sync::mpsc::UnboundedSender<Message>;

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // ============ Input ============
    /// A raw line typed by the user
    Input(String),
    /// A parsed, bound command
    ExecuteCommand(Command),

    // ============ Episodes ============
    /// Load the episode at a location
    LoadEpisode(String),
    NextEpisode,
    PrevEpisode,
    /// Episode metadata arrived (or failed) for a load request
    EpisodeFetched {
        request: LoadRequest,
        result: Result<EpisodePayload, String>,
    },

    // ============ Playback ============
    TogglePlayback,
    SeekBackward,
    SeekForward,
    /// Preview a position while dragging the seek control
    Scrub(f64),
    /// Seek control released at a position
    ScrubEnd(f64),
    /// Notification from the audio engine
    Audio(AudioEvent),
    /// Polling loop tick
    Tick(TickToken),

    // ============ Player Window ============
    Show,
    Hide,
    Close,

    Help,
    Quit,
}
