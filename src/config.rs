//! Prompt configuration
//!
//! Read once at startup from an inline JSON block in the hosting page.
//! Every field has a default, so an empty object (or no block at all) yields
//! the stock 320x480 install prompt.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::{Error, Result};

/// Pulse animation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Scale reached at the top of each pulse (rest scale is 1.0)
    pub peak_scale: f32,
    /// Seconds per direction
    pub duration_secs: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            peak_scale: consts::PULSE_PEAK_SCALE,
            duration_secs: consts::PULSE_DURATION_SECS,
        }
    }
}

/// Prompt configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    // === Layout ===
    /// Reference design width the button was authored against
    pub design_width: f32,
    /// Reference design height
    pub design_height: f32,

    // === SDK ===
    /// Interaction count at which the ad signals finish
    pub finish_threshold: u32,

    // === Animation ===
    pub pulse: PulseConfig,

    // === Look ===
    /// Button label text
    pub label: String,
    /// Clear colour behind the button
    pub background: String,
    /// Button gradient, top edge
    pub button_top: String,
    /// Button gradient, bottom edge
    pub button_bottom: String,
    /// Label glow colour
    pub shadow: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            design_width: consts::DESIGN_WIDTH,
            design_height: consts::DESIGN_HEIGHT,

            finish_threshold: consts::FINISH_THRESHOLD,

            pulse: PulseConfig::default(),

            label: "Install".to_string(),
            background: "#1c1c1c".to_string(),
            button_top: "#3ddc84".to_string(),
            button_bottom: "#1e9e57".to_string(),
            shadow: "#fffc6a".to_string(),
        }
    }
}

impl PromptConfig {
    /// Element id of the inline JSON block
    const ELEMENT_ID: &'static str = "prompt-config";

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reference design size
    pub fn design_size(&self) -> Vec2 {
        Vec2::new(self.design_width, self.design_height)
    }

    /// Reject values the scene cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.design_width > 0.0 && self.design_height > 0.0) {
            return Err(Error::Config(format!(
                "design size must be positive, got {}x{}",
                self.design_width, self.design_height
            )));
        }
        if !(self.pulse.duration_secs > 0.0) {
            return Err(Error::Config(format!(
                "pulse duration must be positive, got {}",
                self.pulse.duration_secs
            )));
        }
        for color in [
            &self.background,
            &self.button_top,
            &self.button_bottom,
            &self.shadow,
        ] {
            parse_hex_color(color)?;
        }
        Ok(())
    }

    /// Resolved colours for the renderer
    pub fn palette(&self) -> Result<Palette> {
        Ok(Palette {
            background: parse_hex_color(&self.background)?,
            button_top: parse_hex_color(&self.button_top)?,
            button_bottom: parse_hex_color(&self.button_bottom)?,
            glow: parse_hex_color(&self.shadow)?,
        })
    }

    /// Load from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded prompt config from #{}", Self::ELEMENT_ID);
                    return config;
                }
                Err(e) => log::warn!("Ignoring prompt config: {}", e),
            }
        }

        log::info!("Using default prompt config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No #{} on native, using defaults", Self::ELEMENT_ID);
        Self::default()
    }
}

/// Linear RGBA colours used by the shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub button_top: [f32; 4],
    pub button_bottom: [f32; 4],
    pub glow: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        // Defaults are known-good hex strings
        PromptConfig::default()
            .palette()
            .unwrap_or(Palette {
                background: [0.0, 0.0, 0.0, 1.0],
                button_top: [1.0; 4],
                button_bottom: [1.0; 4],
                glow: [1.0; 4],
            })
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` into linear RGBA
pub fn parse_hex_color(s: &str) -> Result<[f32; 4]> {
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| Error::Config(format!("colour `{s}` must start with #")))?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(Error::Config(format!("colour `{s}` must be #rrggbb or #rrggbbaa")));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| Error::Config(format!("colour `{s}` is not hex")))
    };

    let r = srgb_to_linear(channel(0)?);
    let g = srgb_to_linear(channel(2)?);
    let b = srgb_to_linear(channel(4)?);
    let a = if hex.len() == 8 {
        channel(6)? as f32 / 255.0
    } else {
        1.0
    };
    Ok([r, g, b, a])
}

/// The surface format is sRGB, so uniforms carry linear values
fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
