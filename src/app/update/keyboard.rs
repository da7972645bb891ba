//! Command input message handlers

use crate::app::App;
use crate::app::message::Message;
use crate::features::{Action, Command};
use crate::player::{DisplaySurface, Task};
use crate::utils::parse_time;

impl<D: DisplaySurface> App<D> {
    /// Handle input-related messages
    pub(super) fn handle_keyboard(&mut self, message: &Message) -> Option<Task> {
        match message {
            Message::Input(line) => match self.keybindings.parse(line) {
                Ok(command) => Some(self.update(Message::ExecuteCommand(command))),
                Err(e) => {
                    tracing::warn!("{}", e);
                    Some(Task::none())
                }
            },

            Message::ExecuteCommand(command) => Some(self.execute_command(command)),

            Message::Help => {
                let display = self.controller.display_mut();
                for line in self.keybindings.help_lines() {
                    display.notice(&line);
                }
                Some(Task::none())
            }

            _ => None,
        }
    }

    /// Execute a bound command
    fn execute_command(&mut self, command: &Command) -> Task {
        let argument = command.argument.as_deref().unwrap_or_default();
        let message = match command.action {
            Action::PlayPause => Message::TogglePlayback,
            Action::SeekForward => Message::SeekForward,
            Action::SeekBackward => Message::SeekBackward,
            Action::Scrub | Action::Seek => {
                let Some(target) = parse_time(argument) else {
                    tracing::warn!("Invalid time: {}", argument);
                    return Task::none();
                };
                if command.action == Action::Scrub {
                    Message::Scrub(target)
                } else {
                    Message::ScrubEnd(target)
                }
            }
            Action::Load => Message::LoadEpisode(argument.to_string()),
            Action::NextEpisode => Message::NextEpisode,
            Action::PrevEpisode => Message::PrevEpisode,
            Action::Show => Message::Show,
            Action::Hide => Message::Hide,
            Action::Close => Message::Close,
            Action::Help => Message::Help,
            Action::Quit => Message::Quit,
        };
        self.update(message)
    }
}
