//! DOM access for the ad page

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, PointerEvent, Window};

use super::{backing_size, cursor_for, label_transform, label_visible};
use crate::app::Frame;
use crate::error::{Error, Result};
use crate::scene::Viewport;

/// Elements the ad renders into
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
}

impl Page {
    const CANVAS_ID: &'static str = "canvas";

    pub fn locate() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::Missing("window"))?;
        let document = window.document().ok_or(Error::Missing("document"))?;
        let canvas = document
            .get_element_by_id(Self::CANVAS_ID)
            .ok_or(Error::Missing("#canvas element"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::Missing("#canvas is not a canvas"))?;
        Ok(Self {
            window,
            document,
            canvas,
        })
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    /// Canvas size in CSS pixels
    pub fn viewport(&self) -> Result<Viewport> {
        Viewport::new(
            self.canvas.client_width() as f32,
            self.canvas.client_height() as f32,
        )
    }

    /// Match the backing store to the CSS size; returns the pixel size
    pub fn sync_canvas_size(&self) -> (u32, u32) {
        let (width, height) = backing_size(
            self.canvas.client_width() as f64,
            self.canvas.client_height() as f64,
            self.device_pixel_ratio(),
        );
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        (width, height)
    }

    /// Pointer position relative to the canvas, CSS pixels
    pub fn pointer_position(&self, event: &PointerEvent) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(
            (event.client_x() as f64 - rect.left()) as f32,
            (event.client_y() as f64 - rect.top()) as f32,
        )
    }

    /// Show the hand cursor while over the button
    pub fn set_hand_cursor(&self, over_button: bool) {
        let cursor = cursor_for(over_button);
        let style = self.canvas.style();
        if style.get_property_value("cursor").ok().as_deref() != Some(cursor) {
            let _ = style.set_property("cursor", cursor);
        }
    }
}

/// The DOM label ("Install" plus its glow) that follows the button
pub struct LabelOverlay {
    element: HtmlElement,
    last_transform: String,
}

impl LabelOverlay {
    const LABEL_ID: &'static str = "install-label";

    pub fn new(document: &Document, text: &str, glow: &str) -> Result<Self> {
        let element = document
            .get_element_by_id(Self::LABEL_ID)
            .ok_or(Error::Missing("#install-label element"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| Error::Missing("#install-label is not an HTML element"))?;

        element.set_text_content(Some(text));
        let style = element.style();
        let _ = style.set_property(
            "text-shadow",
            &format!("4px 4px 9px {glow}, -4px -4px 9px {glow}"),
        );

        Ok(Self {
            element,
            last_transform: String::new(),
        })
    }

    /// Move the label to match `frame`; skips the DOM write when unchanged
    pub fn apply(&mut self, frame: &Frame) {
        if !label_visible(frame) {
            let _ = self.element.set_attribute("class", "hidden");
            return;
        }

        let transform = label_transform(frame);
        if transform != self.last_transform {
            let _ = self.element.style().set_property("transform", &transform);
            self.last_transform = transform;
        }
    }
}
