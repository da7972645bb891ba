//! Playback control message handlers

use crate::app::App;
use crate::app::message::Message;
use crate::player::{DisplaySurface, Task};

impl<D: DisplaySurface> App<D> {
    /// Handle playback-related messages
    pub(super) fn handle_playback(&mut self, message: &Message) -> Option<Task> {
        match message {
            Message::TogglePlayback => Some(self.controller.toggle_play_pause()),

            Message::SeekBackward => {
                self.controller.seek_by(-self.playback.skip_seconds);
                Some(Task::none())
            }

            Message::SeekForward => {
                self.controller.seek_by(self.playback.skip_seconds);
                Some(Task::none())
            }

            Message::Scrub(target) => {
                self.controller.scrub(*target);
                Some(Task::none())
            }

            Message::ScrubEnd(target) => {
                tracing::debug!("Seeking to {}s", target);
                self.controller.scrub_end(*target);
                Some(Task::none())
            }

            Message::Audio(event) => Some(self.controller.on_audio_event(event.clone())),

            Message::Tick(token) => Some(self.controller.step(*token)),

            _ => None,
        }
    }
}
