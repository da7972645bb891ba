//! Feature modules - configuration separated from the player core
//!
//! Each feature module contains the logic for one piece of user-facing
//! configuration. Features do not depend on the player directly.

pub mod keybindings;
pub mod settings;

pub use keybindings::{Action, Command, CommandError, KeyBindings};

pub use settings::{NetworkSettings, PlaybackSettings, Settings, SettingsError};
