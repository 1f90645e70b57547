use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use super::dom::Surface;
use super::events::Listener;
use super::render::SharedSky;
use crate::config::RenderConfig;
use crate::frame_loop::{CancelToken, LoopGuard};

/// Page-facing control over a mounted sky.
///
/// Page scripts bind it wherever they like (`window.skyRenderer = handle`).
/// Setters write straight through to the shader; nothing is range-checked.
/// The handle owns the background: freeing it (or letting it be collected)
/// stops the render loop and unregisters every listener, like `stop()`.
#[wasm_bindgen]
pub struct SkyHandle {
    sky: SharedSky,
    surface: Surface,
    // Declared before `guard`, so listeners go first on drop.
    listeners: Vec<Listener>,
    guard: LoopGuard,
}

impl SkyHandle {
    pub(super) fn new(
        sky: SharedSky,
        surface: Surface,
        token: CancelToken,
        listeners: Vec<Listener>,
    ) -> Self {
        Self {
            sky,
            surface,
            listeners,
            guard: LoopGuard::new(token),
        }
    }
}

#[wasm_bindgen]
impl SkyHandle {
    #[wasm_bindgen(js_name = updateCloudSpeed)]
    pub fn update_cloud_speed(&self, speed: f32) {
        self.sky.borrow_mut().set_cloud_speed(speed);
    }

    #[wasm_bindgen(js_name = updateCloudDensity)]
    pub fn update_cloud_density(&self, density: f32) {
        self.sky.borrow_mut().set_cloud_density(density);
    }

    #[wasm_bindgen(js_name = updateColorTint)]
    pub fn update_color_tint(&self, r: f32, g: f32, b: f32) {
        self.sky.borrow_mut().set_color_tint(r, g, b);
    }

    #[wasm_bindgen(js_name = updateParallaxStrength)]
    pub fn update_parallax_strength(&self, strength: f32) {
        self.sky.borrow_mut().set_parallax_strength(strength);
    }

    /// Re-measures the page, e.g. after the foreground content changed size.
    pub fn relayout(&self) {
        let layout = self.surface.measure();
        self.sky.borrow_mut().relayout(layout);
    }

    /// Snapshot of the current parameters as a plain object.
    pub fn config(&self) -> Result<Object, JsValue> {
        config_object(self.sky.borrow().config())
    }

    /// Seconds of animation time rendered so far.
    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 {
        self.sky.borrow().clock().elapsed()
    }

    /// Stops the render loop at its next frame and unregisters all listeners.
    pub fn stop(&mut self) {
        self.guard.cancel();
        self.listeners.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn stopped(&self) -> bool {
        self.guard.is_cancelled()
    }
}

fn config_object(cfg: &RenderConfig) -> Result<Object, JsValue> {
    let obj = Object::new();
    let set = |key: &str, value: JsValue| Reflect::set(&obj, &JsValue::from_str(key), &value);
    let floats = |values: &[f32]| {
        values
            .iter()
            .map(|v| JsValue::from_f64(*v as f64))
            .collect::<Array>()
    };

    set("cloudSpeed", cfg.cloud_speed.into())?;
    set("cloudDensity", cfg.cloud_density.into())?;
    set("cloudScale", cfg.cloud_scale.into())?;
    set("colorTint", floats(&cfg.color_tint[..]).into())?;
    set("parallaxStrength", cfg.parallax_strength.into())?;
    set("grainIntensity", cfg.grain_intensity.into())?;
    set("chromaticAberration", cfg.chromatic_aberration.into())?;
    set("clearRadius", cfg.clear_radius.into())?;
    set("clearFeather", cfg.clear_feather.into())?;
    set("clearStrength", cfg.clear_strength.into())?;
    set("clearEllipse", floats(&cfg.clear_ellipse[..]).into())?;
    set("sideClearWidth", cfg.side_clear_width.into())?;
    set("sideFeather", cfg.side_feather.into())?;
    set("sideClearStrength", cfg.side_clear_strength.into())?;
    Ok(obj)
}
