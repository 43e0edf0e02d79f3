//! Browser page glue
//!
//! Handles the page side of the ad:
//! - Canvas lookup and backing-store sizing
//! - Pointer coordinates and the hand cursor over the button
//! - Page lifecycle (bfcache-aware teardown)
//! - The "Install" label overlay that rides on top of the canvas

use crate::app::Frame;
use crate::scene::ScenePhase;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{LabelOverlay, Page};

/// CSS transform placing the label at the button center at the button scale
///
/// The label element is absolutely positioned at the page origin with its own
/// center as the transform origin, so translate-then-scale matches the canvas.
pub fn label_transform(frame: &Frame) -> String {
    format!(
        "translate(-50%, -50%) translate({:.2}px, {:.2}px) scale({:.4})",
        frame.center.x, frame.center.y, frame.scale
    )
}

/// Whether the label should be shown for this frame
pub fn label_visible(frame: &Frame) -> bool {
    frame.phase != ScenePhase::Destroyed
}

/// CSS `cursor` for the canvas: a hand over the live button
pub fn cursor_for(over_button: bool) -> &'static str {
    if over_button { "pointer" } else { "default" }
}

/// Whether a `pagehide` should tear the ad down
///
/// A persisted page goes into the back/forward cache and may be shown
/// again, so it keeps its listeners and frame loop.
pub fn teardown_on_pagehide(persisted: bool) -> bool {
    !persisted
}

/// Backing-store size for a CSS size at a device pixel ratio
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let px = |v: f64| (v * dpr).round().max(0.0) as u32;
    (px(css_width), px(css_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Viewport;
    use glam::Vec2;

    fn frame(phase: ScenePhase) -> Frame {
        Frame {
            viewport: Viewport::new(640.0, 960.0).unwrap(),
            center: Vec2::new(320.0, 480.0),
            half_extent: Vec2::new(220.0, 76.0),
            corner_radius: 76.0,
            scale: 2.0,
            phase,
        }
    }

    #[test]
    fn test_label_transform() {
        assert_eq!(
            label_transform(&frame(ScenePhase::Running)),
            "translate(-50%, -50%) translate(320.00px, 480.00px) scale(2.0000)"
        );
    }

    #[test]
    fn test_label_hidden_after_teardown() {
        assert!(label_visible(&frame(ScenePhase::Paused)));
        assert!(label_visible(&frame(ScenePhase::Finished)));
        assert!(!label_visible(&frame(ScenePhase::Destroyed)));
    }

    #[test]
    fn test_cursor_follows_hit() {
        assert_eq!(cursor_for(true), "pointer");
        assert_eq!(cursor_for(false), "default");
    }

    #[test]
    fn test_bfcache_pagehide_keeps_ad() {
        assert!(teardown_on_pagehide(false));
        assert!(!teardown_on_pagehide(true));
    }

    #[test]
    fn test_backing_size() {
        assert_eq!(backing_size(320.0, 480.0, 1.0), (320, 480));
        assert_eq!(backing_size(320.0, 480.0, 2.0), (640, 960));
        assert_eq!(backing_size(100.5, 0.0, 1.5), (151, 0));
    }
}
