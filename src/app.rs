//! Main application module
//!
//! `App` hosts the playback controller on a single-threaded loop. Every
//! message is handled to completion before the next one is received, and the
//! effects a handler returns are performed by spawning tasks that post their
//! results back as messages.

mod message;
mod update;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::EpisodeSource;
use crate::audio::{AudioEngine, AudioEventReceiver, audio_event_channel};
use crate::features::{KeyBindings, PlaybackSettings, Settings};
use crate::player::{DisplaySurface, Effect, PlaybackController, Task};

pub use message::{Message, MessageSender};

/// Application host
pub struct App<D> {
    controller: PlaybackController<D>,
    source: Arc<dyn EpisodeSource>,
    playback: PlaybackSettings,
    keybindings: KeyBindings,
    tx: MessageSender,
    rx: mpsc::UnboundedReceiver<Message>,
    audio_rx: AudioEventReceiver,
    /// Set once `Message::Quit` has been handled
    quit: bool,
}

impl<D: DisplaySurface> App<D> {
    /// Create new application instance on the default audio output
    pub fn new(settings: &Settings, source: Arc<dyn EpisodeSource>, display: D) -> Self {
        let (audio_tx, audio_rx) = audio_event_channel();
        let engine = AudioEngine::detect(audio_tx, settings.playback.volume());
        Self::with_engine(engine, audio_rx, settings, source, display)
    }

    /// Create an application around an already constructed engine.
    ///
    /// `audio_rx` must be the receiver paired with the engine's event sender.
    pub fn with_engine(
        engine: AudioEngine,
        audio_rx: AudioEventReceiver,
        settings: &Settings,
        source: Arc<dyn EpisodeSource>,
        display: D,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller: PlaybackController::initialize(engine, display),
            source,
            playback: settings.playback.clone(),
            keybindings: settings.keybindings.clone(),
            tx,
            rx,
            audio_rx,
            quit: false,
        }
    }

    /// Sender for posting messages into the loop
    pub fn sender(&self) -> MessageSender {
        self.tx.clone()
    }

    pub fn controller(&self) -> &PlaybackController<D> {
        &self.controller
    }

    /// Run until a quit is handled
    pub async fn run(&mut self) {
        tracing::info!("Player loop started");
        loop {
            let message = tokio::select! {
                Some(message) = self.rx.recv() => message,
                Some(event) = self.audio_rx.recv() => Message::Audio(event),
                else => break,
            };

            let task = self.update(message);
            self.perform(task);
            self.controller.display_mut().present();

            if self.quit {
                break;
            }
        }
        tracing::info!("Player loop stopped");
    }

    /// Perform the effects of a task
    fn perform(&self, task: Task) {
        for effect in task.into_effects() {
            match effect {
                Effect::FetchEpisode { request, location } => {
                    let fetch = self.source.fetch(&location);
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        let result = fetch.await.map_err(|e| format!("{:#}", e));
                        let _ = tx.send(Message::EpisodeFetched { request, result });
                    });
                }
                Effect::ScheduleTick(token) => {
                    let interval = self.playback.frame_interval();
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(interval).await;
                        let _ = tx.send(Message::Tick(token));
                    });
                }
            }
        }
    }
}
