//! Customizable command bindings
//!
//! The terminal front end reads one command per line. Each command word is
//! bound to an `Action`; users can rebind words in the settings file.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// All bindable actions in the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Playback controls
    PlayPause,
    SeekForward,
    SeekBackward,
    /// Preview a position without moving the audio
    Scrub,
    /// Commit a position
    Seek,

    // Episodes
    Load,
    NextEpisode,
    PrevEpisode,

    // Player visibility
    Show,
    Hide,
    Close,

    Help,
    Quit,
}

impl Action {
    /// Get all available actions
    pub fn all() -> &'static [Action] {
        &[
            Action::PlayPause,
            Action::SeekForward,
            Action::SeekBackward,
            Action::Scrub,
            Action::Seek,
            Action::Load,
            Action::NextEpisode,
            Action::PrevEpisode,
            Action::Show,
            Action::Hide,
            Action::Close,
            Action::Help,
            Action::Quit,
        ]
    }

    /// Get human-readable name for the action
    pub fn display_name(&self) -> &'static str {
        match self {
            Action::PlayPause => "Play/Pause",
            Action::SeekForward => "Skip forward",
            Action::SeekBackward => "Skip back",
            Action::Scrub => "Preview position",
            Action::Seek => "Seek to position",
            Action::Load => "Load episode",
            Action::NextEpisode => "Next episode",
            Action::PrevEpisode => "Previous episode",
            Action::Show => "Show player",
            Action::Hide => "Hide/unhide player",
            Action::Close => "Close player",
            Action::Help => "Help",
            Action::Quit => "Quit",
        }
    }

    /// Whether the command needs an argument (a location or a time)
    pub fn takes_argument(&self) -> bool {
        matches!(self, Action::Scrub | Action::Seek | Action::Load)
    }
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub action: Action,
    pub argument: Option<String>,
}

/// The keybindings configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Map from action to command words
    bindings: HashMap<Action, Vec<String>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |action: Action, words: &[&str]| {
            bindings.insert(action, words.iter().map(|w| w.to_string()).collect());
        };

        // Playback
        bind(Action::PlayPause, &["p", "play", "pause"]);
        bind(Action::SeekForward, &["f", "ff"]);
        bind(Action::SeekBackward, &["b", "rew"]);
        bind(Action::Scrub, &["scrub"]);
        bind(Action::Seek, &["s", "seek"]);

        // Episodes
        bind(Action::Load, &["l", "load", "open"]);
        bind(Action::NextEpisode, &["n", "next"]);
        bind(Action::PrevEpisode, &["v", "prev"]);

        // Visibility
        bind(Action::Show, &["show"]);
        bind(Action::Hide, &["h", "hide"]);
        bind(Action::Close, &["c", "close"]);

        bind(Action::Help, &["?", "help"]);
        bind(Action::Quit, &["q", "quit", "exit"]);

        Self { bindings }
    }
}

impl KeyBindings {
    /// Create empty keybindings
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Get the command words for an action
    pub fn get(&self, action: &Action) -> Option<&Vec<String>> {
        self.bindings.get(action)
    }

    /// Set command words for an action
    pub fn set(&mut self, action: Action, words: Vec<String>) {
        self.bindings.insert(action, words);
    }

    /// Add a command word for an action
    pub fn add(&mut self, action: Action, word: impl Into<String>) {
        self.bindings.entry(action).or_default().push(word.into());
    }

    /// Remove all command words for an action
    pub fn clear(&mut self, action: &Action) {
        self.bindings.remove(action);
    }

    /// Find the action bound to `word`, ignoring case
    pub fn find_action(&self, word: &str) -> Option<Action> {
        Action::all().iter().copied().find(|action| {
            self.bindings
                .get(action)
                .is_some_and(|words| words.iter().any(|w| w.eq_ignore_ascii_case(word)))
        })
    }

    /// Words bound to more than one action
    pub fn conflicts(&self) -> Vec<String> {
        let mut seen: HashMap<String, Action> = HashMap::new();
        let mut conflicts = Vec::new();
        for action in Action::all() {
            for word in self.bindings.get(action).into_iter().flatten() {
                let key = word.to_ascii_lowercase();
                match seen.get(&key) {
                    Some(other) if other != action => {
                        if !conflicts.contains(&key) {
                            conflicts.push(key);
                        }
                    }
                    _ => {
                        seen.insert(key, *action);
                    }
                }
            }
        }
        conflicts
    }

    /// Split a line into a bound action and its argument
    pub fn parse(&self, line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        if word.is_empty() {
            return Err(CommandError::Empty);
        }

        let action = self
            .find_action(word)
            .ok_or_else(|| CommandError::Unknown(word.to_string()))?;

        let argument = (!rest.is_empty()).then(|| rest.to_string());
        match (action.takes_argument(), &argument) {
            (true, None) => Err(CommandError::MissingArgument(action)),
            (false, Some(_)) => Err(CommandError::UnexpectedArgument(action)),
            _ => Ok(Command { action, argument }),
        }
    }

    /// Get display string for an action's command words
    pub fn display_for_action(&self, action: &Action) -> String {
        self.bindings
            .get(action)
            .filter(|words| !words.is_empty())
            .map(|words| words.join(", "))
            .unwrap_or_else(|| "None".to_string())
    }

    /// One line per action, for the help screen
    pub fn help_lines(&self) -> Vec<String> {
        Action::all()
            .iter()
            .map(|action| {
                let usage = if action.takes_argument() { " <arg>" } else { "" };
                format!(
                    "{:<20} {}{}",
                    action.display_name(),
                    self.display_for_action(action),
                    usage
                )
            })
            .collect()
    }
}

/// Errors from parsing a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument(Action),
    UnexpectedArgument(Action),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Empty command"),
            CommandError::Unknown(word) => write!(f, "Unknown command: {}", word),
            CommandError::MissingArgument(action) => {
                write!(f, "{} needs an argument", action.display_name())
            }
            CommandError::UnexpectedArgument(action) => {
                write!(f, "{} takes no argument", action.display_name())
            }
        }
    }
}

impl std::error::Error for CommandError {}
