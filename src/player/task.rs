//! Deferred work returned by controller operations
//!
//! Controller operations never spawn anything themselves. They return a
//! `Task` and the host loop performs its effects, feeding the results back as
//! messages.

use crate::audio::LoadRequest;

/// Identity of one polling-loop invocation.
///
/// Only the loop holding the current token may write or reschedule; starting
/// a new loop invalidates every older token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TickToken(u64);

impl TickToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A single effect for the host to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch episode metadata, answer with `Message::EpisodeFetched`
    FetchEpisode {
        request: LoadRequest,
        location: String,
    },
    /// Deliver `Message::Tick(token)` on the next display frame
    ScheduleTick(TickToken),
}

/// Effects produced by handling one message
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Task {
    effects: Vec<Effect>,
}

impl Task {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn done(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
        }
    }

    pub fn batch(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            effects: tasks.into_iter().flat_map(|t| t.effects).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn into_effects(self) -> Vec<Effect> {
        self.effects
    }
}
