//! Audio engine notifications
//!
//! Buffering happens off the UI loop, so the backend reports its result
//! asynchronously:
//! - `AudioEvent` - Events sent from the buffering task to the UI loop
//! - `ReadyNotifier` - One-shot handle given to the backend on every load
//! - `LoadRequest` - Identity of the load an event belongs to
//!
//! ## Architecture
//! ```text
//! UI loop (AudioEngine) --load(source, ReadyNotifier)--> Backend
//! UI loop              <--[AudioEvent]----------------- buffering task
//! ```

use std::fmt;

/// Identity of one episode load.
///
/// Allocated by the controller for every `load_episode` call and strictly
/// increasing, so a continuation tagged with an older request is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LoadRequest(u64);

impl LoadRequest {
    /// The request following this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============ Events (buffering task -> UI loop) ============

/// Events emitted by the audio backend
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// Enough data is buffered to play through without stalling
    Ready { request: LoadRequest },
    /// The source could not be fetched or decoded
    Failed { request: LoadRequest, error: String },
}

impl AudioEvent {
    /// The load this event was issued for
    pub fn request(&self) -> LoadRequest {
        match self {
            Self::Ready { request } | Self::Failed { request, .. } => *request,
        }
    }
}

// ============ Ready Notifier ============

/// One-shot notification handle handed to the backend on `load`.
///
/// Consuming `self` guarantees a load reports at most once.
#[derive(Debug)]
pub struct ReadyNotifier {
    request: LoadRequest,
    tx: AudioEventSender,
}

impl ReadyNotifier {
    pub fn new(request: LoadRequest, tx: AudioEventSender) -> Self {
        Self { request, tx }
    }

    pub fn request(&self) -> LoadRequest {
        self.request
    }

    /// Signal that the source can play through
    pub fn ready(self) {
        let _ = self.tx.send(AudioEvent::Ready {
            request: self.request,
        });
    }

    /// Signal that the source failed to load
    pub fn failed(self, error: impl Into<String>) {
        let _ = self.tx.send(AudioEvent::Failed {
            request: self.request,
            error: error.into(),
        });
    }
}

// ============ Channel Types ============

/// Sender for audio events (held by the engine and its buffering tasks)
pub type AudioEventSender = tokio::sync::mpsc::UnboundedSender<AudioEvent>;

/// Receiver for audio events (held by App)
pub type AudioEventReceiver = tokio::sync::mpsc::UnboundedReceiver<AudioEvent>;

/// Create a new audio event channel
pub fn audio_event_channel() -> (AudioEventSender, AudioEventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}
