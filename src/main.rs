//! Playable Install entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_ad {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{PageTransitionEvent, PointerEvent};

    use playable_install::audio::WebAudioSink;
    use playable_install::platform::{LabelOverlay, Page, teardown_on_pagehide};
    use playable_install::renderer::SdfRenderState;
    use playable_install::sdk::web::WebSdk;
    use playable_install::{Error, PlayableAd, PromptConfig, Result};

    /// Ad instance holding all page-side state
    struct App {
        ad: PlayableAd<WebSdk>,
        audio: Rc<WebAudioSink>,
        page: Page,
        render_state: SdfRenderState,
        label: LabelOverlay,
        last_time: f64,
    }

    impl App {
        /// Advance the pulse and draw
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            self.ad.update(dt);

            let (width, height) = self.page.sync_canvas_size();
            self.render_state.resize(width, height);

            let frame = self.ad.frame();
            let dpr = self.page.device_pixel_ratio() as f32;
            match self.render_state.render(&frame, dpr) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => self.render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
            self.label.apply(&frame);
        }
    }

    pub async fn run() -> Result<()> {
        log::info!("Playable Install starting...");

        let page = Page::locate()?;
        let config = PromptConfig::load();
        let palette = config.palette()?;

        let (width, height) = page.sync_canvas_size();
        let viewport = page.viewport()?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(page.canvas.clone()))
            .map_err(|e| Error::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = SdfRenderState::new(surface, &adapter, width, height, palette).await?;
        let label = LabelOverlay::new(&page.document, &config.label, &config.shadow)?;

        let sdk = Rc::new(WebSdk::from_global()?);
        let audio = Rc::new(WebAudioSink::new());
        let ad = PlayableAd::new(sdk, audio.clone(), &config, viewport);

        let app = Rc::new(RefCell::new(App {
            ad,
            audio,
            page,
            render_state,
            label,
            last_time: 0.0,
        }));

        setup_pointer_handler(app.clone());
        setup_hover_handler(app.clone());
        setup_teardown(app.clone());

        // Input is live; now the SDK may start counting
        app.borrow().ad.ready();

        request_animation_frame(app);

        log::info!("Playable Install running!");
        Ok(())
    }

    fn setup_pointer_handler(app: Rc<RefCell<App>>) {
        let canvas = app.borrow().page.canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let a = app.borrow();
            // Browsers only unlock audio inside a user gesture
            a.audio.resume();
            let point = a.page.pointer_position(&event);
            if a.ad.pointer_down(point) {
                a.audio.play_tap();
            }
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_hover_handler(app: Rc<RefCell<App>>) {
        let canvas = app.borrow().page.canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let a = app.borrow();
            let point = a.page.pointer_position(&event);
            a.page.set_hand_cursor(a.ad.hover(point));
        });
        let _ = canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Tear down when the page goes away so no SDK callback outlives the ad
    fn setup_teardown(app: Rc<RefCell<App>>) {
        let window = app.borrow().page.window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            if !teardown_on_pagehide(event.persisted()) {
                log::info!("Page entering back/forward cache, keeping ad alive");
                return;
            }
            let mut a = app.borrow_mut();
            a.ad.destroy();
            let frame = a.ad.frame();
            a.label.apply(&frame);
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if a.ad.is_destroyed() {
                log::info!("Frame loop stopped");
                return;
            }
            a.frame(time);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    if let Err(e) = wasm_ad::run().await {
        log::error!("Playable Install failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use playable_install::PromptConfig;
    use playable_install::scene::{Viewport, scale_fit};

    env_logger::init();
    log::info!("Playable Install (native) starting...");
    log::info!("Native mode has no ad surface - run with `trunk serve` for the web version");

    let config = PromptConfig::load();
    println!("\nScale-fit for common ad surfaces:");
    for (w, h) in [(320.0, 480.0), (360.0, 640.0), (768.0, 1024.0), (1920.0, 1080.0)] {
        match Viewport::new(w, h) {
            Ok(viewport) => {
                let t = scale_fit(viewport, config.design_size());
                println!(
                    "  {:>5}x{:<5} -> center ({:.1}, {:.1}) scale {:.3}",
                    w, h, t.position.x, t.position.y, t.scale
                );
            }
            Err(e) => log::error!("{}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
