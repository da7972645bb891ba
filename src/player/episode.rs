//! Episode records

use serde::{Deserialize, Deserializer, Serialize};

/// Link to an adjacent episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeLink {
    /// Display number, e.g. "284"
    #[serde(deserialize_with = "number_label")]
    pub number: String,
    /// Where to fetch the episode from
    pub location: String,
}

/// Episode metadata as served by the episode source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodePayload {
    pub audio_url: String,
    #[serde(default)]
    pub art_url: String,
    pub title: String,
    #[serde(default)]
    pub now_playing: String,
    /// Length in whole seconds
    pub duration: u64,
    #[serde(default)]
    pub prev: Option<EpisodeLink>,
    #[serde(default)]
    pub next: Option<EpisodeLink>,
}

/// The playable unit: audio plus metadata plus adjacent links.
///
/// Immutable once loaded; a new load replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    location: String,
    payload: EpisodePayload,
}

impl Episode {
    pub fn new(location: impl Into<String>, payload: EpisodePayload) -> Self {
        Self {
            location: location.into(),
            payload,
        }
    }

    /// Identity of the episode
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn audio(&self) -> &str {
        &self.payload.audio_url
    }

    pub fn art(&self) -> &str {
        &self.payload.art_url
    }

    pub fn title(&self) -> &str {
        &self.payload.title
    }

    pub fn now_playing(&self) -> &str {
        &self.payload.now_playing
    }

    pub fn duration(&self) -> u64 {
        self.payload.duration
    }

    pub fn prev(&self) -> Option<&EpisodeLink> {
        self.payload.prev.as_ref()
    }

    pub fn next(&self) -> Option<&EpisodeLink> {
        self.payload.next.as_ref()
    }

    pub fn has_prev(&self) -> bool {
        self.payload.prev.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.payload.next.is_some()
    }

    pub fn prev_number(&self) -> Option<&str> {
        self.prev().map(|link| link.number.as_str())
    }

    pub fn prev_location(&self) -> Option<&str> {
        self.prev().map(|link| link.location.as_str())
    }

    pub fn next_number(&self) -> Option<&str> {
        self.next().map(|link| link.number.as_str())
    }

    pub fn next_location(&self) -> Option<&str> {
        self.next().map(|link| link.location.as_str())
    }
}

/// Accept episode numbers written either as JSON strings or integers
fn number_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(u64),
    }

    Ok(match Label::deserialize(deserializer)? {
        Label::Text(text) => text,
        Label::Number(number) => number.to_string(),
    })
}
