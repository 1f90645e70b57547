//! Viewport classification and the layout-driven parts of the config.

use crate::config::RenderConfig;

/// Viewports at or below this width (CSS px) use the mobile preset.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Drawing-buffer scale is capped here to bound fill cost on dense screens.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Upper bound of the side band as a fraction of the viewport width.
pub const SIDE_BAND_MAX: f64 = 0.9;

/// Narrow viewports keep the band at most this wide so side clouds stay visible.
pub const SIDE_BAND_MAX_MOBILE: f32 = 0.66;

const CUSHION_PX: f64 = 120.0;
const CUSHION_FRACTION: f64 = 0.07;
const OVERLAP_PX: f64 = 64.0;
const OVERLAP_FRACTION: f64 = 0.08;
const FEATHER_SCALE: f32 = 0.3;
const FEATHER_MIN: f32 = 0.06;
const FEATHER_MAX: f32 = 0.22;

/// Window size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Everything measured from the page that feeds a relayout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub viewport: Viewport,
    /// On-screen CSS box of the canvas.
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub device_pixel_ratio: f64,
    /// Width of the foreground content region, when the page has one.
    pub foreground_width: Option<f64>,
}

impl Layout {
    /// A layout whose canvas fills the viewport at 1:1 pixel ratio.
    pub fn fullscreen(width: f64, height: f64) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            canvas_width: width,
            canvas_height: height,
            device_pixel_ratio: 1.0,
            foreground_width: None,
        }
    }

    pub fn with_foreground(mut self, width: f64) -> Self {
        self.foreground_width = Some(width);
        self
    }

    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn pixel_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    /// Drawing-buffer size in device pixels, never smaller than 1×1.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        let scale = |css: f64| (css.max(0.0) * ratio).floor().max(1.0) as u32;
        (scale(self.canvas_width), scale(self.canvas_height))
    }

    pub fn class(&self) -> ViewportClass {
        ViewportClass::classify(self.viewport.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn classify(viewport_width: f64) -> Self {
        if viewport_width <= MOBILE_BREAKPOINT {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }
}

/// Clearing parameters switched wholesale at the breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearingPreset {
    pub clear_radius: f32,
    pub clear_strength: f32,
    pub clear_ellipse: [f32; 2],
    pub cloud_density: f32,
}

impl ClearingPreset {
    pub const DESKTOP: ClearingPreset = ClearingPreset {
        clear_radius: 0.33,
        clear_strength: 0.6,
        clear_ellipse: [1.6, 1.0],
        cloud_density: 0.6,
    };

    /// Smaller, weaker clearing and denser clouds so the sides fill in.
    pub const MOBILE: ClearingPreset = ClearingPreset {
        clear_radius: 0.22,
        clear_strength: 0.25,
        clear_ellipse: [1.2, 0.9],
        cloud_density: 0.7,
    };

    pub fn for_class(class: ViewportClass) -> Self {
        match class {
            ViewportClass::Mobile => Self::MOBILE,
            ViewportClass::Desktop => Self::DESKTOP,
        }
    }

    pub fn apply(&self, config: &mut RenderConfig) {
        config.clear_radius = self.clear_radius;
        config.clear_strength = self.clear_strength;
        config.clear_ellipse = self.clear_ellipse;
        config.cloud_density = self.cloud_density;
    }
}

/// Width and feather of the horizontal clear band, as viewport fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideBand {
    pub width: f32,
    pub feather: f32,
}

impl SideBand {
    pub fn apply(&self, config: &mut RenderConfig) {
        config.side_clear_width = self.width;
        config.side_feather = self.feather;
    }
}

/// Feather that scales with the band so the edge stays soft.
pub fn side_feather(width: f32) -> f32 {
    (width * FEATHER_SCALE).clamp(FEATHER_MIN, FEATHER_MAX)
}

/// Sizes the clear band around the foreground region.
///
/// The region is widened by a cushion and narrowed by a small overlap so
/// clouds may creep just past its edges. Without a region the previous width
/// is kept. Narrow viewports cap the band at [`SIDE_BAND_MAX_MOBILE`].
pub fn side_band(viewport_width: f64, foreground_width: Option<f64>, previous: f32) -> SideBand {
    let mut width = match foreground_width {
        Some(region) if viewport_width > 0.0 => {
            let cushion = CUSHION_PX.min(viewport_width * CUSHION_FRACTION);
            let overlap = OVERLAP_PX.min(region * OVERLAP_FRACTION);
            let desired =
                (viewport_width * SIDE_BAND_MAX).min((region - overlap).max(0.0) + cushion);
            (desired / viewport_width) as f32
        }
        _ => previous,
    };
    if ViewportClass::classify(viewport_width) == ViewportClass::Mobile {
        width = width.min(SIDE_BAND_MAX_MOBILE);
    }
    SideBand {
        width,
        feather: side_feather(width),
    }
}
