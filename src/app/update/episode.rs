//! Episode loading and navigation message handlers

use crate::app::App;
use crate::app::message::Message;
use crate::player::{DisplaySurface, Task};

impl<D: DisplaySurface> App<D> {
    /// Handle episode-related messages
    pub(super) fn handle_episode(&mut self, message: &Message) -> Option<Task> {
        match message {
            Message::LoadEpisode(location) => Some(self.controller.load_episode(location)),

            Message::NextEpisode => Some(self.controller.play_next()),

            Message::PrevEpisode => Some(self.controller.play_prev()),

            Message::EpisodeFetched { request, result } => {
                self.controller
                    .on_episode_fetched(*request, result.clone());
                Some(Task::none())
            }

            _ => None,
        }
    }
}
