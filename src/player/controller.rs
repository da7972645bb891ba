//! Playback controller
//!
//! Owns the audio engine, the current episode and the display surface, and
//! mediates between user intent and display updates.
//!
//! ```text
//! Idle --load_episode--> Loading --fetched + ready--> Playing <--> Paused
//!                                                        |  ^
//!                                                  scrub |  | scrub_end
//!                                                        v  |
//!                                                      Scrubbing
//! ```
//!
//! Every asynchronous continuation is tagged with the `LoadRequest` it was
//! issued for and dropped if a newer load has started since. The polling loop
//! is tagged with a `TickToken` the same way.

use crate::audio::{AudioEngine, AudioEvent, LoadRequest};
use crate::utils::{format_time, progress_percent};

use super::display::{ContainerFlags, DisplaySurface, NavSlot, PlayControlFlags};
use super::episode::{Episode, EpisodeLink, EpisodePayload};
use super::session::{PlaybackSession, PlayerState};
use super::task::{Effect, Task, TickToken};

const LOADING_LABEL: &str = "Loading...";

/// Where the current load is
#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadPhase {
    Idle,
    /// Waiting for episode metadata
    Fetching {
        request: LoadRequest,
        location: String,
    },
    /// Waiting for the engine's ready notification
    Buffering(LoadRequest),
    Ready,
}

/// Playback state machine over one engine and one current episode
pub struct PlaybackController<D> {
    engine: AudioEngine,
    display: D,
    episode: Option<Episode>,
    session: Option<PlaybackSession>,
    phase: LoadPhase,
    request: LoadRequest,
    /// Token of the live polling loop, if any
    tick_loop: Option<TickToken>,
    last_token: TickToken,
    controls: PlayControlFlags,
    container: ContainerFlags,
}

impl<D> std::fmt::Debug for PlaybackController<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("engine", &self.engine)
            .field("phase", &self.phase)
            .field("episode", &self.episode.as_ref().map(Episode::location))
            .field("tick_loop", &self.tick_loop)
            .finish_non_exhaustive()
    }
}

impl<D: DisplaySurface> PlaybackController<D> {
    /// Create the controller and blank the display.
    ///
    /// Call once per player. Every region of `display` must already exist.
    pub fn initialize(engine: AudioEngine, display: D) -> Self {
        if !engine.can_play() {
            tracing::warn!("Audio playback unavailable, player controls are inert");
        }

        let mut controller = Self {
            engine,
            display,
            episode: None,
            session: None,
            phase: LoadPhase::Idle,
            request: LoadRequest::default(),
            tick_loop: None,
            last_token: TickToken::default(),
            controls: PlayControlFlags::default(),
            container: ContainerFlags::default(),
        };
        controller.reset_display("");
        controller.set_controls(PlayControlFlags::default());
        controller.set_container(ContainerFlags::default());
        controller
    }

    // ============ Queries ============

    pub fn state(&self) -> PlayerState {
        match self.phase {
            LoadPhase::Idle => PlayerState::Idle,
            LoadPhase::Fetching { .. } | LoadPhase::Buffering(_) => PlayerState::Loading,
            LoadPhase::Ready => {
                if self.session.as_ref().is_some_and(|s| s.scrubbing) {
                    PlayerState::Scrubbing
                } else if self.engine.is_playing() {
                    PlayerState::Playing
                } else {
                    PlayerState::Paused
                }
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn engine(&self) -> &AudioEngine {
        &self.engine
    }

    pub fn episode(&self) -> Option<&Episode> {
        self.episode.as_ref()
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// The most recently issued load request
    pub fn current_request(&self) -> LoadRequest {
        self.request
    }

    pub fn controls(&self) -> PlayControlFlags {
        self.controls
    }

    pub fn container(&self) -> ContainerFlags {
        self.container
    }

    // ============ Loading ============

    /// Begin loading the episode at `location`.
    ///
    /// The display is blanked before returning so nothing from the previous
    /// episode stays visible while the fetch is in flight.
    pub fn load_episode(&mut self, location: &str) -> Task {
        self.request = self.request.next();
        let request = self.request;
        tracing::info!("Loading episode {} (request {})", location, request);

        self.phase = LoadPhase::Fetching {
            request,
            location: location.to_string(),
        };
        self.episode = None;
        self.session = None;
        self.tick_loop = None;

        self.reset_display(LOADING_LABEL);
        self.set_controls(self.controls.with_loading());

        Task::done(Effect::FetchEpisode {
            request,
            location: location.to_string(),
        })
    }

    /// Metadata for `request` arrived
    pub fn on_episode_fetched(
        &mut self,
        request: LoadRequest,
        result: Result<EpisodePayload, String>,
    ) {
        let location = match &self.phase {
            LoadPhase::Fetching {
                request: current,
                location,
            } if *current == request => location.clone(),
            _ => {
                tracing::debug!("Dropping stale episode metadata for request {}", request);
                return;
            }
        };

        match result {
            Ok(payload) => {
                let episode = Episode::new(location, payload);
                tracing::info!(
                    "Loaded episode: {} ({}s)",
                    episode.title(),
                    episode.duration()
                );
                self.render_episode(&episode);
                self.episode = Some(episode);
                self.session = Some(PlaybackSession::new());
                self.phase = LoadPhase::Ready;
                self.show();
                self.start();
            }
            Err(e) => {
                tracing::error!("Failed to load episode {}: {}", location, e);
                self.phase = LoadPhase::Idle;
                self.display.set_now_playing("");
                self.set_controls(self.controls.without_loading());
            }
        }
    }

    /// Start buffering the current episode's audio
    pub fn start(&mut self) {
        let Some(episode) = &self.episode else {
            tracing::debug!("start ignored: no episode loaded");
            return;
        };

        if !self.engine.can_play() {
            tracing::warn!("Cannot play {}: no audio output", episode.title());
            self.phase = LoadPhase::Ready;
            self.set_controls(PlayControlFlags::paused());
            return;
        }

        let source = episode.audio().to_string();
        self.phase = LoadPhase::Buffering(self.request);
        self.engine.load(&source, self.request);
    }

    pub fn on_audio_event(&mut self, event: AudioEvent) -> Task {
        match event {
            AudioEvent::Ready { request } => self.on_audio_ready(request),
            AudioEvent::Failed { request, error } => {
                self.on_audio_failed(request, &error);
                Task::none()
            }
        }
    }

    /// The engine buffered enough of `request`'s audio to play through
    pub fn on_audio_ready(&mut self, request: LoadRequest) -> Task {
        if self.phase != LoadPhase::Buffering(request) {
            tracing::debug!("Dropping stale ready notification for request {}", request);
            return Task::none();
        }
        self.engine.mark_ready();
        self.phase = LoadPhase::Ready;
        self.play()
    }

    pub fn on_audio_failed(&mut self, request: LoadRequest, error: &str) {
        if self.phase != LoadPhase::Buffering(request) {
            tracing::debug!("Dropping stale load failure for request {}", request);
            return;
        }
        tracing::error!("Audio for request {} failed to load: {}", request, error);
        self.phase = LoadPhase::Ready;
        self.set_controls(PlayControlFlags::paused());
    }

    // ============ Transport ============

    /// Start output and a fresh polling loop
    pub fn play(&mut self) -> Task {
        if self.session.is_none() || self.phase != LoadPhase::Ready {
            tracing::debug!("play ignored: nothing ready to play");
            return Task::none();
        }

        self.engine.play();
        if !self.engine.is_playing() {
            tracing::debug!("play ignored: engine cannot start output");
            self.set_controls(PlayControlFlags::paused());
            return Task::none();
        }

        let token = self.last_token.next();
        self.last_token = token;
        self.tick_loop = Some(token);

        self.set_controls(PlayControlFlags::playing());
        Task::done(Effect::ScheduleTick(token))
    }

    pub fn pause(&mut self) {
        self.engine.pause();
        self.set_controls(PlayControlFlags::paused());
    }

    pub fn toggle_play_pause(&mut self) -> Task {
        if self.engine.is_playing() {
            self.pause();
            Task::none()
        } else {
            self.play()
        }
    }

    /// Move the playback clock by `delta` seconds
    pub fn seek_by(&mut self, delta: f64) {
        let position = self.engine.current_position();
        self.engine.seek(position + delta);
        if self.tick_loop.is_none() {
            self.report_position();
        }
    }

    // ============ Scrubbing ============

    /// Show `target` as if it were the live position, without seeking
    pub fn scrub(&mut self, target: f64) {
        let (Some(episode), Some(session)) = (&self.episode, self.session.as_mut()) else {
            return;
        };
        session.begin_scrub();
        self.display.set_elapsed(&format_time(target));
        self.display
            .set_progress(progress_percent(target, episode.duration()));
    }

    /// Commit the dragged position with a single seek
    pub fn scrub_end(&mut self, target: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.end_scrub(target);
        self.engine.seek(target);
        if self.tick_loop.is_none() {
            self.report_position();
        }
    }

    // ============ Polling Loop ============

    /// One tick of the polling loop.
    ///
    /// Reschedules itself while the engine is playing; a tick from a
    /// cancelled loop does nothing.
    pub fn step(&mut self, token: TickToken) -> Task {
        if self.tick_loop != Some(token) {
            tracing::trace!("Dropping tick from cancelled loop {:?}", token);
            return Task::none();
        }

        self.report_position();

        if self.engine.is_playing() {
            return Task::done(Effect::ScheduleTick(token));
        }

        tracing::debug!("Playback stopped, polling loop ends");
        self.tick_loop = None;
        if self.controls.playing {
            self.set_controls(PlayControlFlags::paused());
        }
        Task::none()
    }

    fn report_position(&mut self) {
        let (Some(episode), Some(session)) = (&self.episode, self.session.as_mut()) else {
            return;
        };
        let seek = self.engine.current_position().round();
        session.position = seek;
        if session.scrubbing {
            return;
        }
        self.display.set_elapsed(&format_time(seek));
        self.display.set_seek_value(seek);
        self.display
            .set_progress(progress_percent(seek, episode.duration()));
    }

    // ============ Visibility ============

    pub fn show(&mut self) {
        self.set_container(ContainerFlags {
            active: true,
            hidden: false,
        });
    }

    /// Toggle the hidden state, leaving playback untouched
    pub fn hide(&mut self) {
        let mut container = self.container;
        container.hidden = !container.hidden;
        self.set_container(container);
    }

    pub fn close(&mut self) {
        tracing::info!("Closing player");
        self.pause();
        let mut container = self.container;
        container.active = false;
        self.set_container(container);
    }

    // ============ Navigation ============

    pub fn play_next(&mut self) -> Task {
        match self.episode.as_ref().and_then(Episode::next_location) {
            Some(location) => {
                let location = location.to_string();
                self.load_episode(&location)
            }
            None => Task::none(),
        }
    }

    pub fn play_prev(&mut self) -> Task {
        match self.episode.as_ref().and_then(Episode::prev_location) {
            Some(location) => {
                let location = location.to_string();
                self.load_episode(&location)
            }
            None => Task::none(),
        }
    }

    // ============ Display Helpers ============

    fn reset_display(&mut self, now_playing: &str) {
        self.display.set_artwork("");
        self.display.set_now_playing(now_playing);
        self.display.set_title("");
        self.display.set_elapsed(&format_time(0.0));
        self.display.set_duration(&format_time(0.0));
        self.render_nav(NavSlot::Prev, None);
        self.render_nav(NavSlot::Next, None);
        self.display.set_seek_value(0.0);
        self.display.set_progress(0.0);
    }

    fn render_episode(&mut self, episode: &Episode) {
        let duration = episode.duration() as f64;
        self.display.set_artwork(episode.art());
        self.display.set_now_playing(episode.now_playing());
        self.display.set_title(episode.title());
        self.display.set_duration(&format_time(duration));
        self.display.set_seek_range(0.0, duration);
        self.render_nav(NavSlot::Prev, episode.prev());
        self.render_nav(NavSlot::Next, episode.next());
    }

    fn render_nav(&mut self, slot: NavSlot, link: Option<&EpisodeLink>) {
        match link {
            Some(link) => self
                .display
                .set_nav(slot, &link.number, Some(&link.location)),
            None => self.display.set_nav(slot, "", None),
        }
    }

    fn set_controls(&mut self, flags: PlayControlFlags) {
        self.controls = flags;
        self.display.set_play_control(flags);
    }

    fn set_container(&mut self, flags: ContainerFlags) {
        self.container = flags;
        self.display.set_container(flags);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::audio::testing::{FakeBackend, FakeHandle};
    use crate::audio::{AudioEventReceiver, audio_event_channel};
    use crate::player::display::DisplayModel;

    struct Harness {
        player: PlaybackController<DisplayModel>,
        audio: FakeHandle,
        events: AudioEventReceiver,
    }

    impl Harness {
        fn new() -> Self {
            let (tx, events) = audio_event_channel();
            let (backend, audio) = FakeBackend::new();
            let engine = AudioEngine::with_backend(Box::new(backend), tx);
            Self {
                player: PlaybackController::initialize(engine, DisplayModel::default()),
                audio,
                events,
            }
        }

        fn view(&self) -> &DisplayModel {
            self.player.display()
        }

        /// Deliver whatever the fake backend reported
        fn deliver_audio_event(&mut self) -> Task {
            let event = self.events.try_recv().expect("no audio event pending");
            self.player.on_audio_event(event)
        }

        /// Load an episode through metadata and audio readiness
        fn load_and_play(&mut self, location: &str, payload: EpisodePayload) -> TickToken {
            let request = fetch_request(&self.player.load_episode(location));
            self.player.on_episode_fetched(request, Ok(payload));
            self.audio.fire_ready();
            tick_token(&self.deliver_audio_event())
        }
    }

    fn payload(duration: u64) -> EpisodePayload {
        EpisodePayload {
            audio_url: "https://cdn.example.com/283.mp3".to_string(),
            art_url: "https://cdn.example.com/283.png".to_string(),
            title: "Shipping Rust".to_string(),
            now_playing: "The Changelog 283".to_string(),
            duration,
            prev: Some(EpisodeLink {
                number: "282".to_string(),
                location: "/podcast/282".to_string(),
            }),
            next: None,
        }
    }

    fn fetch_request(task: &Task) -> LoadRequest {
        match task.effects() {
            [Effect::FetchEpisode { request, .. }] => *request,
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    fn tick_token(task: &Task) -> TickToken {
        match task.effects() {
            [Effect::ScheduleTick(token)] => *token,
            other => panic!("expected a tick, got {:?}", other),
        }
    }

    #[test]
    fn test_initialize_blanks_display() {
        let h = Harness::new();
        assert_eq!(h.player.state(), PlayerState::Idle);
        assert_eq!(h.view().elapsed, "0:00");
        assert_eq!(h.view().duration, "0:00");
        assert_eq!(h.view().now_playing, "");
        assert!(!h.view().container.active);
    }

    #[test]
    fn test_load_to_playing_end_to_end() {
        let mut h = Harness::new();
        let token = h.load_and_play("/podcast/283", payload(125));

        assert_eq!(h.player.state(), PlayerState::Playing);
        assert_eq!(h.audio.borrow().loads, vec!["https://cdn.example.com/283.mp3"]);
        assert_eq!(h.view().elapsed, "0:00");
        assert_eq!(h.view().duration, "2:05");
        assert_eq!(h.view().progress_width(), "0%");
        assert_eq!(h.view().seek_max, 125.0);
        assert_eq!(h.view().title, "Shipping Rust");
        assert_eq!(h.view().play_control, PlayControlFlags::playing());
        assert!(h.view().container.active);

        h.audio.set_position(62.0);
        let next = h.player.step(token);
        assert_eq!(tick_token(&next), token);
        assert_eq!(h.view().elapsed, "1:02");
        assert_eq!(h.view().seek_value, 62.0);
        assert!((h.view().progress - 49.6).abs() < 1e-9);
    }

    #[test]
    fn test_tick_rounds_position() {
        let mut h = Harness::new();
        let token = h.load_and_play("/podcast/283", payload(125));

        h.audio.set_position(61.6);
        let _ = h.player.step(token);
        assert_eq!(h.view().elapsed, "1:02");
        assert_eq!(h.player.session().unwrap().position, 62.0);
    }

    #[test]
    fn test_toggle_pauses_and_resumes() {
        let mut h = Harness::new();
        let first = h.load_and_play("/podcast/283", payload(125));

        let task = h.player.toggle_play_pause();
        assert!(task.is_none());
        assert_eq!(h.player.state(), PlayerState::Paused);
        assert_eq!(h.audio.borrow().pause_calls, 1);
        assert_eq!(h.view().play_control, PlayControlFlags::paused());
        assert!(!h.view().play_control.loading);

        let second = tick_token(&h.player.toggle_play_pause());
        assert_ne!(first, second);
        assert_eq!(h.player.state(), PlayerState::Playing);
        assert_eq!(h.view().play_control, PlayControlFlags::playing());
    }

    #[test]
    fn test_load_resets_display_while_playing() {
        let mut h = Harness::new();
        let token = h.load_and_play("/podcast/283", payload(125));
        h.audio.set_position(62.0);
        let _ = h.player.step(token);

        let task = h.player.load_episode("/podcast/284");
        assert!(matches!(
            task.effects(),
            [Effect::FetchEpisode { location, .. }] if location == "/podcast/284"
        ));
        assert_eq!(h.player.state(), PlayerState::Loading);
        assert_eq!(h.view().now_playing, "Loading...");
        assert_eq!(h.view().title, "");
        assert_eq!(h.view().elapsed, "0:00");
        assert_eq!(h.view().duration, "0:00");
        assert_eq!(h.view().progress, 0.0);
        assert_eq!(h.view().seek_value, 0.0);
        assert_eq!(h.view().prev.label, "");
        assert_eq!(h.view().prev.target, None);
        assert!(h.view().play_control.loading);

        // The old loop is cancelled and must not overwrite the reset
        assert!(h.player.step(token).is_none());
        assert_eq!(h.view().elapsed, "0:00");
    }

    #[test]
    fn test_stale_metadata_is_ignored() {
        let mut h = Harness::new();
        let first = fetch_request(&h.player.load_episode("/podcast/282"));
        let second = fetch_request(&h.player.load_episode("/podcast/283"));
        assert!(second > first);

        let mut stale = payload(60);
        stale.title = "Old".to_string();
        h.player.on_episode_fetched(first, Ok(stale));
        assert_eq!(h.view().title, "");
        assert_eq!(h.player.state(), PlayerState::Loading);
        assert!(h.audio.borrow().loads.is_empty());

        h.player.on_episode_fetched(second, Ok(payload(125)));
        assert_eq!(h.view().title, "Shipping Rust");
        assert_eq!(h.player.episode().unwrap().location(), "/podcast/283");
    }

    #[test]
    fn test_stale_ready_is_ignored() {
        let mut h = Harness::new();
        let first = fetch_request(&h.player.load_episode("/podcast/283"));
        h.player.on_episode_fetched(first, Ok(payload(125)));
        let _ = h.player.load_episode("/podcast/284");

        let task = h.player.on_audio_ready(first);
        assert!(task.is_none());
        assert_eq!(h.player.state(), PlayerState::Loading);
        assert_eq!(h.audio.borrow().play_calls, 0);
    }

    #[test]
    fn test_scrub_never_seeks_until_release() {
        let mut h = Harness::new();
        let token = h.load_and_play("/podcast/283", payload(125));
        h.audio.set_position(10.0);

        h.player.scrub(30.0);
        h.player.scrub(45.0);
        h.player.scrub(90.0);
        assert_eq!(h.player.state(), PlayerState::Scrubbing);
        assert_eq!(h.view().elapsed, "1:30");
        assert!((h.view().progress - 72.0).abs() < 1e-9);
        assert!(h.audio.borrow().seeks.is_empty());

        // Ticks keep running but do not write while scrubbing
        let _ = h.player.step(token);
        assert_eq!(h.view().elapsed, "1:30");
        assert!((h.view().progress - 72.0).abs() < 1e-9);

        h.player.scrub_end(90.0);
        assert_eq!(h.audio.borrow().seeks, vec![Duration::from_secs(90)]);
        assert_eq!(h.player.state(), PlayerState::Playing);

        h.audio.set_position(91.0);
        let _ = h.player.step(token);
        assert_eq!(h.view().elapsed, "1:31");
    }

    #[test]
    fn test_nav_links_follow_episode() {
        let mut h = Harness::new();
        let _ = h.load_and_play("/podcast/283", payload(125));

        assert_eq!(h.view().prev.label, "282");
        assert_eq!(h.view().prev.target.as_deref(), Some("/podcast/282"));
        assert_eq!(h.view().next.label, "");
        assert_eq!(h.view().next.target, None);

        assert!(h.player.play_next().is_none());
        let task = h.player.play_prev();
        assert!(matches!(
            task.effects(),
            [Effect::FetchEpisode { location, .. }] if location == "/podcast/282"
        ));
    }

    #[test]
    fn test_seek_by_offsets_current_position() {
        let mut h = Harness::new();
        let _ = h.load_and_play("/podcast/283", payload(125));

        h.audio.set_position(10.0);
        h.player.seek_by(-15.0);
        h.audio.set_position(10.7);
        h.player.seek_by(15.0);

        assert_eq!(
            h.audio.borrow().seeks,
            vec![Duration::ZERO, Duration::from_secs(25)]
        );
        assert_eq!(h.player.state(), PlayerState::Playing);
    }

    #[test]
    fn test_seek_while_paused_refreshes_display() {
        let mut h = Harness::new();
        let token = h.load_and_play("/podcast/283", payload(125));
        h.player.pause();
        let _ = h.player.step(token);

        h.player.seek_by(15.0);
        assert_eq!(h.view().elapsed, "0:15");
        assert_eq!(h.player.state(), PlayerState::Paused);
    }

    #[test]
    fn test_second_play_cancels_first_loop() {
        let mut h = Harness::new();
        let first = h.load_and_play("/podcast/283", payload(125));
        let second = tick_token(&h.player.play());

        h.audio.set_position(30.0);
        assert!(h.player.step(first).is_none());
        assert_eq!(h.view().elapsed, "0:00");
        assert_eq!(tick_token(&h.player.step(second)), second);
        assert_eq!(h.view().elapsed, "0:30");
    }

    #[test]
    fn test_loop_ends_when_playback_stops() {
        let mut h = Harness::new();
        let token = h.load_and_play("/podcast/283", payload(125));
        h.audio.set_position(125.0);
        h.audio.borrow_mut().drained = true;

        assert!(h.player.step(token).is_none());
        assert_eq!(h.view().elapsed, "2:05");
        assert_eq!(h.view().play_control, PlayControlFlags::paused());
        assert!(h.player.step(token).is_none());
    }

    #[test]
    fn test_toggle_after_end_plays_again() {
        let mut h = Harness::new();
        let token = h.load_and_play("/podcast/283", payload(125));
        h.audio.set_position(125.0);
        h.audio.borrow_mut().drained = true;
        assert!(h.player.step(token).is_none());
        assert_eq!(h.player.state(), PlayerState::Paused);

        let restarted = tick_token(&h.player.toggle_play_pause());
        assert_ne!(restarted, token);
        assert_eq!(h.player.state(), PlayerState::Playing);
        assert_eq!(h.audio.borrow().rewinds, vec![Duration::ZERO]);
        assert_eq!(h.view().play_control, PlayControlFlags::playing());

        let _ = h.player.step(restarted);
        assert_eq!(h.view().elapsed, "0:00");
    }

    #[test]
    fn test_scrub_while_buffering_seeks_once_ready() {
        let mut h = Harness::new();
        let request = fetch_request(&h.player.load_episode("/podcast/283"));
        h.player.on_episode_fetched(request, Ok(payload(125)));
        assert_eq!(h.player.state(), PlayerState::Loading);

        h.player.scrub(90.0);
        h.player.scrub_end(90.0);
        assert!(h.audio.borrow().seeks.is_empty());
        assert_eq!(h.view().elapsed, "1:30");

        h.audio.fire_ready();
        let token = tick_token(&h.deliver_audio_event());
        assert_eq!(h.audio.borrow().seeks, vec![Duration::from_secs(90)]);
        assert_eq!(h.player.state(), PlayerState::Playing);

        let _ = h.player.step(token);
        assert_eq!(h.view().elapsed, "1:30");
    }

    #[test]
    fn test_visibility_transitions() {
        let mut h = Harness::new();
        let _ = h.load_and_play("/podcast/283", payload(125));

        h.player.hide();
        assert!(h.view().container.hidden);
        h.player.hide();
        assert!(!h.view().container.hidden);

        h.player.close();
        assert_eq!(h.player.state(), PlayerState::Paused);
        assert!(!h.view().container.active);
        assert_eq!(h.audio.borrow().pause_calls, 1);

        h.player.show();
        assert_eq!(
            h.view().container,
            ContainerFlags {
                active: true,
                hidden: false
            }
        );
    }

    #[test]
    fn test_fetch_failure_returns_to_idle() {
        let mut h = Harness::new();
        let request = fetch_request(&h.player.load_episode("/podcast/404"));
        h.player
            .on_episode_fetched(request, Err("404 Not Found".to_string()));

        assert_eq!(h.player.state(), PlayerState::Idle);
        assert!(!h.view().play_control.loading);
        assert_eq!(h.view().now_playing, "");
        assert!(h.audio.borrow().loads.is_empty());
    }

    #[test]
    fn test_audio_failure_leaves_episode_paused() {
        let mut h = Harness::new();
        let request = fetch_request(&h.player.load_episode("/podcast/283"));
        h.player.on_episode_fetched(request, Ok(payload(125)));
        h.player.on_audio_failed(request, "unsupported codec");

        assert_eq!(h.player.state(), PlayerState::Paused);
        assert_eq!(h.view().play_control, PlayControlFlags::paused());
        assert!(h.player.toggle_play_pause().is_none());
    }

    #[test]
    fn test_start_without_episode_is_skipped() {
        let mut h = Harness::new();
        h.player.start();
        assert!(h.audio.borrow().loads.is_empty());
        assert!(h.player.play().is_none());
        assert_eq!(h.player.state(), PlayerState::Idle);
    }

    #[test]
    fn test_disabled_engine_shows_episode_without_playing() {
        let (tx, _events) = audio_event_channel();
        let engine = AudioEngine::disabled(tx);
        let mut player = PlaybackController::initialize(engine, DisplayModel::default());

        let request = fetch_request(&player.load_episode("/podcast/283"));
        player.on_episode_fetched(request, Ok(payload(125)));

        assert_eq!(player.state(), PlayerState::Paused);
        assert_eq!(player.display().title, "Shipping Rust");
        assert_eq!(player.display().play_control, PlayControlFlags::paused());
        assert!(player.toggle_play_pause().is_none());
        assert!(!player.is_playing());
    }
}
