//! Ad SDK collaborator
//!
//! The scene never reaches for a global SDK object. Whoever boots the ad
//! injects something implementing [`AdSdk`]; in the browser that is
//! [`web::WebSdk`], in tests a recording double.

use std::rc::Rc;

#[cfg(test)]
pub mod testing;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Events the SDK delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Interaction,
    Resize,
    Pause,
    Resume,
    Volume,
    Finish,
}

impl EventKind {
    /// Event name on the JS side
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Interaction => "interaction",
            EventKind::Resize => "resize",
            EventKind::Pause => "pause",
            EventKind::Resume => "resume",
            EventKind::Volume => "volume",
            EventKind::Finish => "finish",
        }
    }
}

/// Decoded event with payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SdkEvent {
    /// Running interaction count
    Interaction(u32),
    Resize { width: f32, height: f32 },
    Pause,
    Resume,
    /// Level in [0, 1] (not yet clamped)
    Volume(f32),
    Finish,
}

impl SdkEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SdkEvent::Interaction(_) => EventKind::Interaction,
            SdkEvent::Resize { .. } => EventKind::Resize,
            SdkEvent::Pause => EventKind::Pause,
            SdkEvent::Resume => EventKind::Resume,
            SdkEvent::Volume(_) => EventKind::Volume,
            SdkEvent::Finish => EventKind::Finish,
        }
    }

    /// Build an event from raw numeric callback arguments
    ///
    /// Returns `None` when a required payload is missing or malformed.
    pub fn decode(kind: EventKind, first: Option<f64>, second: Option<f64>) -> Option<Self> {
        match kind {
            EventKind::Interaction => {
                let count = first.filter(|n| n.is_finite() && *n >= 0.0)?;
                Some(SdkEvent::Interaction(count as u32))
            }
            EventKind::Resize => Some(SdkEvent::Resize {
                width: first? as f32,
                height: second? as f32,
            }),
            EventKind::Pause => Some(SdkEvent::Pause),
            EventKind::Resume => Some(SdkEvent::Resume),
            EventKind::Volume => Some(SdkEvent::Volume(first? as f32)),
            EventKind::Finish => Some(SdkEvent::Finish),
        }
    }
}

/// Handle returned by [`AdSdk::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Event callback; shared so a dispatcher can call it without holding a borrow
pub type Handler = Rc<dyn Fn(&SdkEvent)>;

/// The ad SDK as seen by the scene
///
/// All methods take `&self`: the SDK lives on the UI thread and may call
/// back into subscribers while one of these methods is running.
pub trait AdSdk {
    /// Prompt is ready
    fn start(&self);
    /// Send the player to the store
    fn install(&self);
    /// End the ad
    fn finish(&self);
    /// Interaction counter, owned by the SDK
    fn interactions(&self) -> u32;
    fn subscribe(&self, kind: EventKind, handler: Handler) -> ListenerId;
    /// Returns false if `id` was not subscribed
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

/// Host audio subsystem
pub trait AudioSink {
    /// Master volume, already clamped to [0, 1]
    fn set_volume(&self, level: f32);
}
