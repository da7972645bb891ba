//! Terminal front end
//!
//! - `TerminalSurface`: Display surface rendering the player as a status line
//! - `input`: Forwards typed command lines into the application loop

pub mod input;
mod terminal;

pub use terminal::{TerminalSurface, status_line};
