//! WebGPU presentation
//!
//! A single fullscreen pass; the fragment shader draws the background and
//! the button from a small uniform block filled from each [`crate::Frame`].

pub mod sdf_pipeline;

pub use sdf_pipeline::SdfRenderState;
