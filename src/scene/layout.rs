//! Viewport fitting
//!
//! Maps the fixed reference design size onto whatever viewport the host
//! hands us, preserving aspect ratio.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Host viewport in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Validated viewport; both sides must be positive and finite
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(width) && ok(height) {
            Ok(Self { width, height })
        } else {
            Err(Error::InvalidViewport { width, height })
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }
}

/// Position and uniform scale of the prompt container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// Aspect-preserving fit of `design` into `viewport`
///
/// The smaller axis ratio wins so the design never overflows either side.
/// The result depends only on the inputs, so repeated calls never accumulate.
#[inline]
pub fn scale_fit(viewport: Viewport, design: Vec2) -> Transform {
    let scale_x = viewport.width / design.x;
    let scale_y = viewport.height / design.y;
    Transform {
        position: viewport.center(),
        scale: scale_x.min(scale_y),
    }
}
