//! Audio playback module
//!
//! - `AudioEngine`: Single long-lived engine with capability detection
//! - `AudioBackend`: Seam to the host audio facility
//! - `RodioBackend`: Default backend playing through rodio
//! - `events`: One-shot readiness notifications tagged by load request

mod engine;
pub mod events;
mod player;
#[cfg(test)]
pub(crate) mod testing;

pub use engine::{AudioBackend, AudioEngine, EngineStatus, seek_target};
pub use events::{
    AudioEvent, AudioEventReceiver, AudioEventSender, LoadRequest, ReadyNotifier,
    audio_event_channel,
};
pub use player::RodioBackend;
