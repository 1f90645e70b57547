use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::error::SkyError;
use crate::responsive::{Layout, Viewport};

/// The page elements the sky reads its layout from.
#[derive(Clone)]
pub struct Surface {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    hero_selector: String,
}

impl Surface {
    pub fn locate(canvas_id: &str, hero_selector: &str) -> Result<Self, SkyError> {
        let window = web_sys::window().ok_or(SkyError::NoWindow)?;
        let document = window.document().ok_or(SkyError::NoDocument)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SkyError::CanvasNotFound(canvas_id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SkyError::NotACanvas(canvas_id.to_owned()))?;
        Ok(Self {
            window,
            document,
            canvas,
            hero_selector: hero_selector.to_owned(),
        })
    }

    pub fn viewport(&self) -> Viewport {
        let fallback_width = || {
            self.document
                .document_element()
                .map(|el| el.client_width() as f64)
                .unwrap_or(0.0)
        };
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .filter(|w| *w > 0.0)
            .unwrap_or_else(fallback_width);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Viewport::new(width, height)
    }

    /// Width of the foreground region on screen, if the page has one.
    pub fn foreground_width(&self) -> Option<f64> {
        if self.hero_selector.is_empty() {
            return None;
        }
        self.document
            .query_selector(&self.hero_selector)
            .ok()
            .flatten()
            .map(|el| el.get_bounding_client_rect().width())
    }

    /// Measures the canvas's CSS box rather than its backing buffer.
    pub fn measure(&self) -> Layout {
        let rect = self.canvas.get_bounding_client_rect();
        Layout {
            viewport: self.viewport(),
            canvas_width: rect.width(),
            canvas_height: rect.height(),
            device_pixel_ratio: self.window.device_pixel_ratio(),
            foreground_width: self.foreground_width(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    pub fn is_complete(&self) -> bool {
        self.document.ready_state() == "complete"
    }
}
