//! Host-side half of the sky: config, time, pointer and the uniform bridge.

use crate::backend::Backend;
use crate::clock::FrameClock;
use crate::config::RenderConfig;
use crate::pointer::PointerState;
use crate::responsive::{self, ClearingPreset, Layout, ViewportClass};
use crate::uniforms::{Uniform, UniformValue};

pub struct SkyRenderer<B: Backend> {
    backend: B,
    config: RenderConfig,
    clock: FrameClock,
    pointer: PointerState,
    layout: Layout,
    class: Option<ViewportClass>,
    had_foreground: Option<bool>,
}

impl<B: Backend> SkyRenderer<B> {
    /// Uploads every shader input, then sizes the surface and applies the
    /// responsive tuning for `layout`.
    pub fn new(backend: B, config: RenderConfig, layout: Layout) -> Self {
        let mut renderer = Self {
            backend,
            config,
            clock: FrameClock::default(),
            pointer: PointerState::default(),
            layout,
            class: None,
            had_foreground: None,
        };
        renderer.upload_all();
        renderer.relayout(layout);
        renderer
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Renders one frame: advance time, push time and pointer, draw.
    pub fn frame(&mut self) {
        let time = self.clock.advance();
        self.backend
            .set_uniform(Uniform::Time, UniformValue::Float(time as f32));
        self.backend
            .set_uniform(Uniform::Mouse, UniformValue::Vec2(self.pointer.as_array()));
        self.backend.draw();
    }

    /// Records the latest pointer position; the next frame picks it up.
    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64) {
        if let Some(pointer) = PointerState::from_client(client_x, client_y, self.layout.viewport) {
            self.pointer = pointer;
        }
    }

    /// Resize, side band and preset, in that order. Safe to repeat.
    pub fn relayout(&mut self, layout: Layout) {
        self.layout = layout;
        let (width, height) = layout.drawing_buffer_size();
        self.backend.resize(width, height);
        self.backend.set_uniform(
            Uniform::Resolution,
            UniformValue::Vec2([width as f32, height as f32]),
        );
        self.update_side_band(layout.viewport.width, layout.foreground_width);
        self.apply_responsive(layout.viewport.width);
    }

    /// Snaps the clearing parameters to the preset of the viewport class.
    pub fn apply_responsive(&mut self, viewport_width: f64) {
        let class = ViewportClass::classify(viewport_width);
        if self.class != Some(class) {
            log::debug!("sky preset -> {class:?} (viewport {viewport_width}px)");
            self.class = Some(class);
        }
        ClearingPreset::for_class(class).apply(&mut self.config);
        self.push(Uniform::ClearRadius, UniformValue::Float(self.config.clear_radius));
        self.push(Uniform::ClearStrength, UniformValue::Float(self.config.clear_strength));
        self.push(Uniform::ClearEllipse, UniformValue::Vec2(self.config.clear_ellipse));
        self.push(Uniform::CloudDensity, UniformValue::Float(self.config.cloud_density));
    }

    /// Re-sizes the clear band around the foreground region, if any.
    pub fn update_side_band(&mut self, viewport_width: f64, foreground_width: Option<f64>) {
        let has_foreground = foreground_width.is_some();
        if !has_foreground && self.had_foreground != Some(false) {
            log::debug!(
                "no foreground region; keeping side band at {}",
                self.config.side_clear_width
            );
        }
        self.had_foreground = Some(has_foreground);
        let band = responsive::side_band(
            viewport_width,
            foreground_width,
            self.config.side_clear_width,
        );
        band.apply(&mut self.config);
        self.push(Uniform::SideClearWidth, UniformValue::Float(band.width));
        self.push(Uniform::SideFeather, UniformValue::Float(band.feather));
    }

    pub fn set_cloud_speed(&mut self, speed: f32) {
        self.config.cloud_speed = speed;
        self.push(Uniform::CloudSpeed, UniformValue::Float(speed));
    }

    pub fn set_cloud_density(&mut self, density: f32) {
        self.config.cloud_density = density;
        self.push(Uniform::CloudDensity, UniformValue::Float(density));
    }

    pub fn set_color_tint(&mut self, r: f32, g: f32, b: f32) {
        self.config.color_tint = [r, g, b];
        self.push(Uniform::ColorTint, UniformValue::Vec3([r, g, b]));
    }

    pub fn set_parallax_strength(&mut self, strength: f32) {
        self.config.parallax_strength = strength;
        self.push(Uniform::ParallaxStrength, UniformValue::Float(strength));
    }

    fn upload_all(&mut self) {
        self.push(Uniform::Time, UniformValue::Float(self.clock.elapsed() as f32));
        self.push(Uniform::Mouse, UniformValue::Vec2(self.pointer.as_array()));
        for (uniform, value) in self.config.uniforms() {
            self.backend.set_uniform(uniform, value);
        }
    }

    fn push(&mut self, uniform: Uniform, value: UniformValue) {
        self.backend.set_uniform(uniform, value);
    }
}
