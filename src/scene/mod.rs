//! Install prompt scene
//!
//! All prompt behaviour lives here. This module must stay platform-free:
//! - No SDK or browser calls
//! - Time only enters through `update(dt)`
//! - Viewport changes only enter through `resize`

pub mod layout;
pub mod prompt;
pub mod sdf;
pub mod state;
pub mod tween;

pub use layout::{Transform, Viewport, scale_fit};
pub use prompt::InstallPrompt;
pub use sdf::sd_round_box;
pub use state::{Scene, ScenePhase};
pub use tween::{Ease, Repeat, Tween, TweenState};
