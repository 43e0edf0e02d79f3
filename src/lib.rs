//! Playable Install - a single-screen playable ad
//!
//! Core modules:
//! - `scene`: Platform-free prompt logic (scale-fit, pulse tween, lifecycle)
//! - `sdk`: Ad SDK collaborator interface and its browser binding
//! - `app`: Composition of scene, SDK and audio sink
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser page glue (canvas, label overlay)

pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod sdk;

pub use app::{Frame, PlayableAd};
pub use config::{Palette, PromptConfig};
pub use error::{Error, Result};

/// Prompt constants
pub mod consts {
    /// Reference design size the button is authored against
    pub const DESIGN_WIDTH: f32 = 320.0;
    pub const DESIGN_HEIGHT: f32 = 480.0;

    /// SDK interaction count that ends the ad
    pub const FINISH_THRESHOLD: u32 = 10;

    /// Pulse animation: 1.0 -> 1.1 -> 1.0, 0.8s each way
    pub const PULSE_REST_SCALE: f32 = 1.0;
    pub const PULSE_PEAK_SCALE: f32 = 1.1;
    pub const PULSE_DURATION_SECS: f32 = 0.8;

    /// Button background in design units (a pill)
    pub const BUTTON_WIDTH: f32 = 220.0;
    pub const BUTTON_HEIGHT: f32 = 76.0;
    pub const BUTTON_CORNER_RADIUS: f32 = 38.0;

    /// Largest frame delta fed to the tween (tab switches produce huge gaps)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
