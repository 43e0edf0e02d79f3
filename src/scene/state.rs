//! Scene state and lifecycle
//!
//! All prompt logic lives here. Nothing in this module talks to the SDK or
//! the page: callers translate host events into these methods and act on
//! the returned answers.

use glam::Vec2;

use super::layout::{Transform, Viewport};
use super::prompt::InstallPrompt;
use crate::config::PromptConfig;
use crate::error::Result;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    /// Pulsing and accepting taps
    Running,
    /// Host paused the ad; animation and input halted
    Paused,
    /// Host reported the ad finished; the prompt keeps pulsing and taking taps
    Finished,
    /// Torn down; every operation is a no-op
    Destroyed,
}

#[derive(Debug, Clone)]
pub struct Scene {
    phase: ScenePhase,
    /// Survives a pause so resume lands back in `Finished`
    finished: bool,
    prompt: InstallPrompt,
    design: Vec2,
    viewport: Viewport,
}

impl Scene {
    pub fn new(config: &PromptConfig, viewport: Viewport) -> Self {
        Self {
            phase: ScenePhase::Running,
            finished: false,
            prompt: InstallPrompt::new(config, viewport),
            design: config.design_size(),
            viewport,
        }
    }

    #[inline]
    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    #[inline]
    pub fn prompt(&self) -> &InstallPrompt {
        &self.prompt
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Taps count unless paused or torn down
    #[inline]
    pub fn is_interactive(&self) -> bool {
        matches!(self.phase, ScenePhase::Running | ScenePhase::Finished)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Scale-fit to a new viewport size
    ///
    /// Degenerate sizes are rejected and leave the current transform alone.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<Transform> {
        if self.phase == ScenePhase::Destroyed {
            return Ok(self.prompt.transform());
        }
        let viewport = Viewport::new(width, height)?;
        self.viewport = viewport;
        Ok(self.prompt.fit(viewport, self.design))
    }

    /// Does a tap at `point` hit the button
    pub fn hit(&self, point: Vec2) -> bool {
        self.is_interactive() && self.prompt.contains(point)
    }

    pub fn pause(&mut self) {
        if self.is_interactive() {
            self.prompt.pulse_mut().pause();
            self.phase = ScenePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == ScenePhase::Paused {
            self.prompt.pulse_mut().resume();
            self.phase = if self.finished {
                ScenePhase::Finished
            } else {
                ScenePhase::Running
            };
        }
    }

    /// Mark the ad finished; the button stays live so taps still install
    pub fn finish(&mut self) {
        if self.phase == ScenePhase::Destroyed {
            return;
        }
        self.finished = true;
        if self.phase == ScenePhase::Running {
            self.phase = ScenePhase::Finished;
        }
    }

    pub fn destroy(&mut self) {
        self.prompt.pulse_mut().stop();
        self.phase = ScenePhase::Destroyed;
    }

    /// Advance the animation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.is_interactive() {
            self.prompt.update(dt);
        }
    }
}
