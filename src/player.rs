//! Episode player
//!
//! - `PlaybackController`: State machine mediating user intent, the audio
//!   engine and the display
//! - `DisplaySurface`: Named update operations the controller writes to
//! - `Episode`: The playable unit and its adjacent links
//! - `Task`: Deferred effects for the host loop

mod controller;
pub mod display;
mod episode;
mod session;
mod task;

pub use controller::PlaybackController;
pub use display::{ContainerFlags, DisplayModel, DisplaySurface, NavSlot, PlayControlFlags};
pub use episode::{Episode, EpisodeLink, EpisodePayload};
pub use session::{PlaybackSession, PlayerState};
pub use task::{Effect, Task, TickToken};
