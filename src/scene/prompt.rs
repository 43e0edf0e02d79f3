//! The install prompt entity
//!
//! Two layers, like a container holding an animation container:
//! the outer `transform` is owned by scale-fit, the inner pulse multiplies
//! on top of it. Neither layer ever writes the other.

use glam::Vec2;

use super::layout::{Transform, Viewport, scale_fit};
use super::sdf::sd_round_box;
use super::tween::Tween;
use crate::config::PromptConfig;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct InstallPrompt {
    /// Container transform (viewport pixels)
    transform: Transform,
    /// Heartbeat on the inner layer
    pulse: Tween,
    /// Button background half extent in design units
    half_size: Vec2,
    corner_radius: f32,
}

impl InstallPrompt {
    /// Build the prompt centered and fitted to `viewport`
    pub fn new(config: &PromptConfig, viewport: Viewport) -> Self {
        let mut prompt = Self {
            transform: Transform::default(),
            pulse: Tween::pulse(
                PULSE_REST_SCALE,
                config.pulse.peak_scale,
                config.pulse.duration_secs,
            ),
            half_size: Vec2::new(BUTTON_WIDTH, BUTTON_HEIGHT) * 0.5,
            corner_radius: BUTTON_CORNER_RADIUS,
        };
        prompt.fit(viewport, config.design_size());
        prompt
    }

    /// Re-center and rescale for a new viewport; overrides, never accumulates
    pub fn fit(&mut self, viewport: Viewport, design: Vec2) -> Transform {
        self.transform = scale_fit(viewport, design);
        self.transform
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Container scale from scale-fit
    #[inline]
    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    /// Current pulse multiplier
    #[inline]
    pub fn pulse_scale(&self) -> f32 {
        self.pulse.value()
    }

    /// What is drawn: container scale times pulse
    #[inline]
    pub fn display_scale(&self) -> f32 {
        self.transform.scale * self.pulse.value()
    }

    pub fn pulse(&self) -> &Tween {
        &self.pulse
    }

    pub fn pulse_mut(&mut self) -> &mut Tween {
        &mut self.pulse
    }

    /// Button half extent in viewport pixels, as currently drawn
    pub fn half_extent(&self) -> Vec2 {
        self.half_size * self.display_scale()
    }

    /// Corner radius in viewport pixels, as currently drawn
    pub fn corner_radius(&self) -> f32 {
        self.corner_radius * self.display_scale()
    }

    /// Whether `point` (viewport pixels) lands on the button background
    pub fn contains(&self, point: Vec2) -> bool {
        let local = point - self.transform.position;
        sd_round_box(local, self.half_extent(), self.corner_radius()) <= 0.0
    }

    pub fn update(&mut self, dt: f32) {
        self.pulse.advance(dt);
    }
}
