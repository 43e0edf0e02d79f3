//! Recording SDK and audio doubles for tests

use std::cell::{Cell, RefCell};

use super::{AdSdk, AudioSink, EventKind, Handler, ListenerId, SdkEvent};

#[derive(Default)]
pub struct RecordingSdk {
    pub start_calls: Cell<u32>,
    pub install_calls: Cell<u32>,
    pub finish_calls: Cell<u32>,
    interactions: Cell<u32>,
    next_id: Cell<u32>,
    listeners: RefCell<Vec<(ListenerId, EventKind, Handler)>>,
}

impl RecordingSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SDK-owned interaction counter
    pub fn set_interactions(&self, count: u32) {
        self.interactions.set(count);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.borrow().iter().any(|(_, k, _)| *k == kind)
    }

    /// Deliver `event` to every matching listener, returning how many ran
    pub fn emit(&self, event: SdkEvent) -> usize {
        // Collect first: handlers may call back into the SDK
        let handlers: Vec<Handler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind())
            .map(|(_, _, handler)| handler.clone())
            .collect();

        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }
}

impl AdSdk for RecordingSdk {
    fn start(&self) {
        self.start_calls.set(self.start_calls.get() + 1);
    }

    fn install(&self) {
        self.install_calls.set(self.install_calls.get() + 1);
    }

    fn finish(&self) {
        self.finish_calls.set(self.finish_calls.get() + 1);
    }

    fn interactions(&self) -> u32 {
        self.interactions.get()
    }

    fn subscribe(&self, kind: EventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, kind, handler));
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _, _)| *lid != id);
        listeners.len() != before
    }
}

#[derive(Default)]
pub struct RecordingAudio {
    pub levels: RefCell<Vec<f32>>,
}

impl AudioSink for RecordingAudio {
    fn set_volume(&self, level: f32) {
        self.levels.borrow_mut().push(level);
    }
}
