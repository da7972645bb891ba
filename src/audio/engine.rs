//! Audio engine with capability detection
//!
//! `AudioEngine` wraps a single `AudioBackend` for the whole lifetime of the
//! player. The playable resource is swapped through `load`, the backend itself
//! is never recreated. When the host has no usable output device the engine
//! runs without a backend and every playback operation is a no-op.

use std::time::Duration;

use super::events::{AudioEventSender, LoadRequest, ReadyNotifier};
use super::player::RodioBackend;

/// Host audio facility driven by the engine.
///
/// Implementations must report the outcome of every `load` through the given
/// notifier, exactly once.
pub trait AudioBackend {
    /// Replace the current resource and start buffering it (paused)
    fn load(&mut self, source: &str, notifier: ReadyNotifier);
    /// Start or resume output
    fn play(&mut self);
    /// Stop output, keeping the position
    fn pause(&mut self);
    /// Current playback clock
    fn position(&self) -> Duration;
    /// Move the playback clock
    fn seek(&mut self, position: Duration) -> Result<(), String>;
    /// Whether the loaded resource has played to its end
    fn is_drained(&self) -> bool;
    /// Queue the loaded resource again after it drained, starting at
    /// `position`
    fn rewind(&mut self, position: Duration) -> Result<(), String>;
}

/// Engine status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Nothing buffered yet
    NotLoaded,
    Paused,
    Playing,
}

/// Audio engine owning the backend
pub struct AudioEngine {
    backend: Option<Box<dyn AudioBackend>>,
    status: EngineStatus,
    /// Seek target received before the resource was ready, in seconds
    pending_seek: Option<u64>,
    events: AudioEventSender,
}

impl std::fmt::Debug for AudioEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioEngine")
            .field("can_play", &self.can_play())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl AudioEngine {
    /// Open the default output device, degrading to a silent engine if the
    /// host has none
    pub fn detect(events: AudioEventSender, volume: f32) -> Self {
        match RodioBackend::open_default(volume) {
            Ok(backend) => Self::with_backend(Box::new(backend), events),
            Err(e) => {
                tracing::warn!("No audio output available, playback disabled: {}", e);
                Self::disabled(events)
            }
        }
    }

    pub fn with_backend(backend: Box<dyn AudioBackend>, events: AudioEventSender) -> Self {
        Self {
            backend: Some(backend),
            status: EngineStatus::NotLoaded,
            pending_seek: None,
            events,
        }
    }

    /// Engine without playback capability
    pub fn disabled(events: AudioEventSender) -> Self {
        Self {
            backend: None,
            status: EngineStatus::NotLoaded,
            pending_seek: None,
            events,
        }
    }

    /// Whether the host can produce sound at all
    pub fn can_play(&self) -> bool {
        self.backend.is_some()
    }

    /// Current status. A resource that played to its end reports `Paused`.
    pub fn status(&self) -> EngineStatus {
        match (&self.backend, self.status) {
            (Some(backend), EngineStatus::Playing) if backend.is_drained() => {
                EngineStatus::Paused
            }
            (_, status) => status,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status() == EngineStatus::Playing
    }

    /// Start buffering `source`. Readiness arrives as `AudioEvent::Ready`
    /// tagged with `request`; playback does not start by itself.
    pub fn load(&mut self, source: &str, request: LoadRequest) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        tracing::info!("Loading audio {} for request {}", source, request);
        self.status = EngineStatus::NotLoaded;
        self.pending_seek = None;
        backend.load(source, ReadyNotifier::new(request, self.events.clone()));
    }

    /// The current resource finished buffering. A seek requested while
    /// buffering is applied now.
    pub fn mark_ready(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if self.status != EngineStatus::NotLoaded {
            return;
        }
        self.status = EngineStatus::Paused;
        if let Some(target) = self.pending_seek.take() {
            if let Err(e) = backend.seek(Duration::from_secs(target)) {
                tracing::warn!("Deferred seek to {}s failed: {}", target, e);
            }
        }
    }

    pub fn play(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match self.status {
            EngineStatus::NotLoaded => {
                tracing::debug!("play ignored: audio not buffered yet");
            }
            EngineStatus::Paused | EngineStatus::Playing => {
                // Played to the end: start over like a fresh play
                if backend.is_drained() {
                    if let Err(e) = backend.rewind(Duration::ZERO) {
                        tracing::warn!("Cannot restart audio: {}", e);
                        return;
                    }
                }
                backend.play();
                self.status = EngineStatus::Playing;
            }
        }
    }

    /// No-op unless audio is actually being produced
    pub fn pause(&mut self) {
        if !self.is_playing() {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.pause();
            self.status = EngineStatus::Paused;
        }
    }

    /// Playback clock in seconds. Before the resource is ready this is the
    /// pending seek target, or zero.
    pub fn current_position(&self) -> f64 {
        match (&self.backend, self.status) {
            (Some(backend), EngineStatus::Paused | EngineStatus::Playing) => {
                backend.position().as_secs_f64()
            }
            (Some(_), EngineStatus::NotLoaded) => self.pending_seek.unwrap_or(0) as f64,
            (None, _) => 0.0,
        }
    }

    /// Move the playback clock to `seconds`, truncated to whole seconds
    pub fn seek(&mut self, seconds: f64) {
        let target = seek_target(seconds);
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if self.status == EngineStatus::NotLoaded {
            tracing::debug!("Deferring seek to {}s until audio is buffered", target);
            self.pending_seek = Some(target);
            return;
        }

        let position = Duration::from_secs(target);
        if backend.is_drained() {
            // Nothing left in the sink to move; queue the resource again
            // and hold it paused at the target
            if let Err(e) = backend.rewind(position) {
                tracing::warn!("Seek to {}s failed: {}", target, e);
                return;
            }
            if self.status == EngineStatus::Playing {
                backend.pause();
                self.status = EngineStatus::Paused;
            }
            return;
        }
        if let Err(e) = backend.seek(position) {
            tracing::warn!("Seek to {}s failed: {}", target, e);
        }
    }
}

/// Truncate to whole seconds, then clamp below at zero.
///
/// NaN and negative input both land on 0.
pub fn seek_target(seconds: f64) -> u64 {
    let whole = seconds.trunc();
    if whole > 0.0 { whole as u64 } else { 0 }
}
