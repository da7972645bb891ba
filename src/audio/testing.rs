//! In-memory audio backend for tests

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;

use super::engine::AudioBackend;
use super::events::ReadyNotifier;

/// Observable state of a `FakeBackend`
#[derive(Debug, Default)]
pub(crate) struct FakeAudio {
    pub loads: Vec<String>,
    pub pending: Option<ReadyNotifier>,
    pub position: Duration,
    pub seeks: Vec<Duration>,
    pub rewinds: Vec<Duration>,
    pub playing: bool,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub drained: bool,
    /// Report ready immediately from `load`
    pub auto_ready: bool,
}

/// Test-side handle onto the fake's state
#[derive(Debug, Clone)]
pub(crate) struct FakeHandle(Rc<RefCell<FakeAudio>>);

impl FakeHandle {
    pub fn borrow(&self) -> Ref<'_, FakeAudio> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, FakeAudio> {
        self.0.borrow_mut()
    }

    /// Complete the pending load
    pub fn fire_ready(&self) {
        if let Some(notifier) = self.0.borrow_mut().pending.take() {
            notifier.ready();
        }
    }

    pub fn set_position(&self, seconds: f64) {
        self.0.borrow_mut().position = Duration::from_secs_f64(seconds);
    }
}

pub(crate) struct FakeBackend(Rc<RefCell<FakeAudio>>);

impl FakeBackend {
    pub fn new() -> (Self, FakeHandle) {
        let state = Rc::new(RefCell::new(FakeAudio::default()));
        (Self(state.clone()), FakeHandle(state))
    }

    pub fn auto_ready() -> (Self, FakeHandle) {
        let (backend, handle) = Self::new();
        handle.borrow_mut().auto_ready = true;
        (backend, handle)
    }
}

impl AudioBackend for FakeBackend {
    fn load(&mut self, source: &str, notifier: ReadyNotifier) {
        let mut state = self.0.borrow_mut();
        state.loads.push(source.to_string());
        state.position = Duration::ZERO;
        state.playing = false;
        state.drained = false;
        if state.auto_ready {
            notifier.ready();
        } else {
            state.pending = Some(notifier);
        }
    }

    fn play(&mut self) {
        let mut state = self.0.borrow_mut();
        state.playing = true;
        state.play_calls += 1;
    }

    fn pause(&mut self) {
        let mut state = self.0.borrow_mut();
        state.playing = false;
        state.pause_calls += 1;
    }

    fn position(&self) -> Duration {
        self.0.borrow().position
    }

    fn seek(&mut self, position: Duration) -> Result<(), String> {
        let mut state = self.0.borrow_mut();
        state.seeks.push(position);
        state.position = position;
        Ok(())
    }

    fn is_drained(&self) -> bool {
        self.0.borrow().drained
    }

    fn rewind(&mut self, position: Duration) -> Result<(), String> {
        let mut state = self.0.borrow_mut();
        state.rewinds.push(position);
        state.position = position;
        state.drained = false;
        Ok(())
    }
}
