//! Message update handlers - thin dispatcher delegating to submodules

mod episode;
mod keyboard;
mod playback;
mod window;

use crate::player::{DisplaySurface, Task};

use super::{App, Message};

impl<D: DisplaySurface> App<D> {
    /// Handle messages by delegating to appropriate submodule handlers
    pub fn update(&mut self, message: Message) -> Task {
        // Try each handler in order until one handles the message
        if let Some(task) = self.handle_keyboard(&message) {
            return task;
        }
        if let Some(task) = self.handle_episode(&message) {
            return task;
        }
        if let Some(task) = self.handle_playback(&message) {
            return task;
        }
        if let Some(task) = self.handle_window(&message) {
            return task;
        }

        // Default: no task
        Task::none()
    }
}
