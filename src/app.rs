//! Playable ad: scene + SDK + audio
//!
//! Composition wrapper around the scene. It subscribes to the SDK when it
//! is built and unsubscribes on `destroy` or drop, whichever comes first.
//! Subscribed handlers only hold weak references, so a torn-down ad is
//! never kept alive (or called into) by the SDK.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use glam::Vec2;

use crate::config::PromptConfig;
use crate::consts::MAX_FRAME_DT;
use crate::scene::{Scene, ScenePhase, Viewport};
use crate::sdk::{AdSdk, AudioSink, EventKind, Handler, ListenerId, SdkEvent};

/// Everything the renderer and label overlay need for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    /// Button center, viewport pixels
    pub center: Vec2,
    /// Button half extent including the pulse, viewport pixels
    pub half_extent: Vec2,
    pub corner_radius: f32,
    /// Container scale times pulse
    pub scale: f32,
    pub phase: ScenePhase,
}

pub struct PlayableAd<S: AdSdk + 'static> {
    sdk: Rc<S>,
    audio: Rc<dyn AudioSink>,
    scene: Rc<RefCell<Scene>>,
    listeners: RefCell<Vec<ListenerId>>,
    started: Cell<bool>,
}

impl<S: AdSdk + 'static> PlayableAd<S> {
    /// Build the scene and subscribe to the SDK without signalling ready
    ///
    /// The page hooks up its pointer input next, then calls [`Self::ready`].
    pub fn new(
        sdk: Rc<S>,
        audio: Rc<dyn AudioSink>,
        config: &PromptConfig,
        viewport: Viewport,
    ) -> Self {
        let scene = Rc::new(RefCell::new(Scene::new(config, viewport)));
        let ad = Self {
            sdk,
            audio,
            scene,
            listeners: RefCell::new(Vec::new()),
            started: Cell::new(false),
        };

        ad.listen(
            EventKind::Interaction,
            interaction_handler(Rc::downgrade(&ad.sdk), config.finish_threshold),
        );
        for kind in [
            EventKind::Resize,
            EventKind::Pause,
            EventKind::Resume,
            EventKind::Finish,
        ] {
            ad.listen(kind, scene_handler(Rc::downgrade(&ad.scene)));
        }
        ad.listen(EventKind::Volume, volume_handler(Rc::downgrade(&ad.audio)));

        log::info!(
            "Install prompt wired ({}x{}, finish at {} interactions)",
            viewport.width,
            viewport.height,
            config.finish_threshold
        );

        ad
    }

    /// [`Self::new`] followed by [`Self::ready`], for hosts with no extra input to hook up
    pub fn start(
        sdk: Rc<S>,
        audio: Rc<dyn AudioSink>,
        config: &PromptConfig,
        viewport: Viewport,
    ) -> Self {
        let ad = Self::new(sdk, audio, config, viewport);
        ad.ready();
        ad
    }

    /// Signal SDK `start()`; only the first call after wiring does anything
    pub fn ready(&self) {
        if self.started.get() || self.is_destroyed() {
            return;
        }
        self.started.set(true);
        self.sdk.start();
        log::info!("Install prompt started");
    }

    pub fn is_started(&self) -> bool {
        self.started.get()
    }

    fn listen(&self, kind: EventKind, handler: Handler) {
        let id = self.sdk.subscribe(kind, handler);
        self.listeners.borrow_mut().push(id);
    }

    /// Pointer down at `point` (viewport pixels)
    ///
    /// Every tap on the button is one `install()`; returns whether it hit.
    pub fn pointer_down(&self, point: Vec2) -> bool {
        let hit = self.scene.borrow().hit(point);
        if hit {
            self.sdk.install();
        }
        hit
    }

    /// Is `point` over a live button; drives the hand cursor
    pub fn hover(&self, point: Vec2) -> bool {
        self.scene.borrow().hit(point)
    }

    pub fn resize(&self, width: f32, height: f32) {
        if !self.is_destroyed() {
            route(&self.scene, &SdkEvent::Resize { width, height });
        }
    }

    pub fn pause(&self) {
        if !self.is_destroyed() {
            route(&self.scene, &SdkEvent::Pause);
        }
    }

    pub fn resume(&self) {
        if !self.is_destroyed() {
            route(&self.scene, &SdkEvent::Resume);
        }
    }

    /// Forward a volume level to the host audio sink
    pub fn set_volume(&self, level: f32) {
        forward_volume(self.audio.as_ref(), level);
    }

    /// Advance the pulse; `dt` in seconds, clamped to one long frame
    pub fn update(&self, dt: f32) {
        self.scene.borrow_mut().update(dt.clamp(0.0, MAX_FRAME_DT));
    }

    pub fn phase(&self) -> ScenePhase {
        self.scene.borrow().phase()
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase() == ScenePhase::Destroyed
    }

    /// Snapshot for drawing
    pub fn frame(&self) -> Frame {
        let scene = self.scene.borrow();
        let prompt = scene.prompt();
        Frame {
            viewport: scene.viewport(),
            center: prompt.position(),
            half_extent: prompt.half_extent(),
            corner_radius: prompt.corner_radius(),
            scale: prompt.display_scale(),
            phase: scene.phase(),
        }
    }

    /// Unsubscribe everything and tear the scene down; safe to call twice
    pub fn destroy(&self) {
        let ids: Vec<ListenerId> = self.listeners.borrow_mut().drain(..).collect();
        for id in &ids {
            if !self.sdk.unsubscribe(*id) {
                log::warn!("Listener {:?} was already gone", id);
            }
        }

        let mut scene = self.scene.borrow_mut();
        if scene.phase() != ScenePhase::Destroyed {
            scene.destroy();
            log::info!("Install prompt destroyed ({} listeners removed)", ids.len());
        }
    }
}

impl<S: AdSdk + 'static> Drop for PlayableAd<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Apply a lifecycle event to the scene
fn route(scene: &RefCell<Scene>, event: &SdkEvent) {
    let mut scene = scene.borrow_mut();
    match *event {
        SdkEvent::Resize { width, height } => match scene.resize(width, height) {
            Ok(t) => log::debug!(
                "Prompt fitted at ({:.1}, {:.1}) scale {:.3}",
                t.position.x,
                t.position.y,
                t.scale
            ),
            Err(e) => log::warn!("Ignoring resize: {}", e),
        },
        SdkEvent::Pause => {
            scene.pause();
            log::info!("Prompt paused");
        }
        SdkEvent::Resume => {
            scene.resume();
            log::info!("Prompt resumed");
        }
        SdkEvent::Finish => {
            scene.finish();
            log::info!("Prompt finished");
        }
        SdkEvent::Interaction(_) | SdkEvent::Volume(_) => {}
    }
}

fn forward_volume(audio: &dyn AudioSink, level: f32) {
    if !level.is_finite() {
        log::warn!("Ignoring volume {}", level);
        return;
    }
    let level = level.clamp(0.0, 1.0);
    log::info!("Volume changed to: {}", level);
    audio.set_volume(level);
}

fn scene_handler(scene: Weak<RefCell<Scene>>) -> Handler {
    Rc::new(move |event: &SdkEvent| {
        if let Some(scene) = scene.upgrade() {
            route(&scene, event);
        }
    })
}

/// Reads the SDK-owned counter; never counts locally
fn interaction_handler<S: AdSdk + 'static>(sdk: Weak<S>, threshold: u32) -> Handler {
    Rc::new(move |event: &SdkEvent| {
        let SdkEvent::Interaction(count) = *event else {
            return;
        };
        let Some(sdk) = sdk.upgrade() else { return };

        log::info!("Interaction count: {}", count);
        if sdk.interactions() >= threshold {
            log::info!("Interaction threshold {} reached, finishing", threshold);
            sdk.finish();
        }
    })
}

fn volume_handler(audio: Weak<dyn AudioSink>) -> Handler {
    Rc::new(move |event: &SdkEvent| {
        if let (SdkEvent::Volume(level), Some(audio)) = (*event, audio.upgrade()) {
            forward_volume(audio.as_ref(), level);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::testing::{RecordingAudio, RecordingSdk};

    struct Harness {
        sdk: Rc<RecordingSdk>,
        audio: Rc<RecordingAudio>,
        ad: PlayableAd<RecordingSdk>,
    }

    fn harness() -> Harness {
        let sdk = Rc::new(RecordingSdk::new());
        let audio = Rc::new(RecordingAudio::default());
        let ad = PlayableAd::start(
            sdk.clone(),
            audio.clone(),
            &PromptConfig::default(),
            Viewport::new(320.0, 480.0).unwrap(),
        );
        Harness { sdk, audio, ad }
    }

    const CENTER: Vec2 = Vec2::new(160.0, 240.0);

    #[test]
    fn test_start_subscribes_then_signals_ready() {
        let h = harness();
        assert_eq!(h.sdk.start_calls.get(), 1);
        assert_eq!(h.sdk.listener_count(), 6);
        assert!(h.sdk.is_listening(EventKind::Interaction));
        assert!(h.sdk.is_listening(EventKind::Resize));
        assert_eq!(h.ad.phase(), ScenePhase::Running);
    }

    #[test]
    fn test_new_waits_for_ready() {
        let sdk = Rc::new(RecordingSdk::new());
        let ad = PlayableAd::new(
            sdk.clone(),
            Rc::new(RecordingAudio::default()),
            &PromptConfig::default(),
            Viewport::new(320.0, 480.0).unwrap(),
        );
        assert_eq!(sdk.listener_count(), 6);
        assert_eq!(sdk.start_calls.get(), 0);
        assert!(!ad.is_started());

        ad.ready();
        ad.ready();
        assert_eq!(sdk.start_calls.get(), 1);
        assert!(ad.is_started());
    }

    #[test]
    fn test_ready_after_destroy_does_not_start() {
        let sdk = Rc::new(RecordingSdk::new());
        let ad = PlayableAd::new(
            sdk.clone(),
            Rc::new(RecordingAudio::default()),
            &PromptConfig::default(),
            Viewport::new(320.0, 480.0).unwrap(),
        );
        ad.destroy();
        ad.ready();
        assert_eq!(sdk.start_calls.get(), 0);
    }

    #[test]
    fn test_hover_tracks_button_without_installing() {
        let h = harness();
        assert!(h.ad.hover(CENTER));
        assert!(!h.ad.hover(Vec2::new(2.0, 2.0)));
        h.sdk.emit(SdkEvent::Pause);
        assert!(!h.ad.hover(CENTER));
        assert_eq!(h.sdk.install_calls.get(), 0);
    }

    #[test]
    fn test_each_tap_installs_once() {
        let h = harness();
        for expected in 1..=3 {
            assert!(h.ad.pointer_down(CENTER));
            assert_eq!(h.sdk.install_calls.get(), expected);
        }
        // Off the button
        assert!(!h.ad.pointer_down(Vec2::new(2.0, 2.0)));
        assert_eq!(h.sdk.install_calls.get(), 3);
    }

    #[test]
    fn test_interaction_threshold() {
        let h = harness();
        h.sdk.set_interactions(9);
        h.sdk.emit(SdkEvent::Interaction(9));
        assert_eq!(h.sdk.finish_calls.get(), 0);

        h.sdk.set_interactions(10);
        h.sdk.emit(SdkEvent::Interaction(10));
        assert_eq!(h.sdk.finish_calls.get(), 1);
    }

    #[test]
    fn test_threshold_reads_sdk_counter_not_payload() {
        let h = harness();
        h.sdk.set_interactions(3);
        h.sdk.emit(SdkEvent::Interaction(50));
        assert_eq!(h.sdk.finish_calls.get(), 0);
    }

    #[test]
    fn test_custom_threshold() {
        let sdk = Rc::new(RecordingSdk::new());
        let config = PromptConfig {
            finish_threshold: 2,
            ..Default::default()
        };
        let _ad = PlayableAd::start(
            sdk.clone(),
            Rc::new(RecordingAudio::default()),
            &config,
            Viewport::new(320.0, 480.0).unwrap(),
        );
        sdk.set_interactions(2);
        sdk.emit(SdkEvent::Interaction(2));
        assert_eq!(sdk.finish_calls.get(), 1);
    }

    #[test]
    fn test_resize_event_refits() {
        let h = harness();
        h.sdk.emit(SdkEvent::Resize {
            width: 640.0,
            height: 960.0,
        });
        let frame = h.ad.frame();
        assert_eq!(frame.center, Vec2::new(320.0, 480.0));
        assert_eq!(frame.scale, 2.0);

        // Degenerate sizes are ignored
        h.sdk.emit(SdkEvent::Resize {
            width: 0.0,
            height: 0.0,
        });
        assert_eq!(h.ad.frame().center, Vec2::new(320.0, 480.0));
    }

    #[test]
    fn test_pause_resume_via_sdk() {
        let h = harness();
        h.ad.update(0.2);
        h.sdk.emit(SdkEvent::Pause);
        assert_eq!(h.ad.phase(), ScenePhase::Paused);

        let frozen = h.ad.frame();
        h.ad.update(0.05);
        assert_eq!(h.ad.frame(), frozen);
        assert!(!h.ad.pointer_down(CENTER));
        assert_eq!(h.sdk.install_calls.get(), 0);

        h.sdk.emit(SdkEvent::Resume);
        assert_eq!(h.ad.phase(), ScenePhase::Running);
        assert_eq!(h.ad.frame().center, frozen.center);
        assert!(h.ad.pointer_down(CENTER));
    }

    #[test]
    fn test_taps_still_install_after_finish() {
        let h = harness();
        h.sdk.set_interactions(10);
        h.sdk.emit(SdkEvent::Interaction(10));
        assert_eq!(h.sdk.finish_calls.get(), 1);

        h.sdk.emit(SdkEvent::Finish);
        assert_eq!(h.ad.phase(), ScenePhase::Finished);
        assert!(h.ad.pointer_down(CENTER));
        assert!(h.ad.pointer_down(CENTER));
        assert_eq!(h.sdk.install_calls.get(), 2);

        // Pulse keeps running
        let before = h.ad.frame().scale;
        h.ad.update(0.05);
        assert!(h.ad.frame().scale > before);
    }

    #[test]
    fn test_volume_is_clamped_and_forwarded() {
        let h = harness();
        h.sdk.emit(SdkEvent::Volume(0.25));
        h.sdk.emit(SdkEvent::Volume(3.0));
        h.sdk.emit(SdkEvent::Volume(f32::NAN));
        h.ad.set_volume(-1.0);
        assert_eq!(*h.audio.levels.borrow(), vec![0.25, 1.0, 0.0]);
    }

    #[test]
    fn test_update_clamps_long_frames() {
        let h = harness();
        // A 10s stall only advances one clamped step
        h.ad.update(10.0);
        let expected = 1.0 + 0.1 * crate::scene::Ease::SineInOut.apply(MAX_FRAME_DT / 0.8);
        assert!((h.ad.frame().scale - expected).abs() < 1e-4);
    }

    #[test]
    fn test_resize_after_destroy_has_no_effect() {
        let h = harness();
        let before = h.ad.frame();
        h.ad.destroy();

        assert_eq!(h.sdk.listener_count(), 0);
        let delivered = h.sdk.emit(SdkEvent::Resize {
            width: 1000.0,
            height: 1000.0,
        });
        assert_eq!(delivered, 0);
        h.ad.resize(1000.0, 1000.0);

        let after = h.ad.frame();
        assert_eq!(after.center, before.center);
        assert_eq!(after.phase, ScenePhase::Destroyed);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let h = harness();
        h.ad.destroy();
        h.ad.destroy();
        assert_eq!(h.sdk.listener_count(), 0);
        h.sdk.set_interactions(10);
        h.sdk.emit(SdkEvent::Interaction(10));
        assert_eq!(h.sdk.finish_calls.get(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let h = harness();
        let sdk = h.sdk.clone();
        drop(h);
        assert_eq!(sdk.listener_count(), 0);
        assert_eq!(
            sdk.emit(SdkEvent::Resize {
                width: 10.0,
                height: 10.0
            }),
            0
        );
    }
}
