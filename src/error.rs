//! Crate error type
//!
//! Scene operations are fire-and-forget; errors only surface while setting
//! up the page (window, canvas, GPU, SDK binding), for degenerate viewports,
//! and for malformed configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, negative, or not finite.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A required page element or global is missing.
    #[error("missing {0}")]
    Missing(&'static str),

    /// The page's `sdk` global is absent or not an object.
    #[error("ad SDK global `sdk` is not available")]
    SdkUnavailable,

    #[error("failed to create surface: {0}")]
    Surface(String),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),

    #[error("failed to create device: {0}")]
    Device(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
