//! Player visibility and exit message handlers

use crate::app::App;
use crate::app::message::Message;
use crate::player::{DisplaySurface, Task};

impl<D: DisplaySurface> App<D> {
    /// Handle visibility-related messages
    pub(super) fn handle_window(&mut self, message: &Message) -> Option<Task> {
        match message {
            Message::Show => {
                self.controller.show();
                Some(Task::none())
            }

            Message::Hide => {
                self.controller.hide();
                Some(Task::none())
            }

            Message::Close => {
                self.controller.close();
                Some(Task::none())
            }

            Message::Quit => {
                tracing::info!("Quit requested");
                self.controller.close();
                self.quit = true;
                Some(Task::none())
            }

            _ => None,
        }
    }
}
