//! Tunable parameters of the sky shader.

use crate::uniforms::{Uniform, UniformValue};

/// Every knob the fragment shader reads, besides time, resolution and pointer.
///
/// Widths, radii and feathers are fractions of the viewport; strengths are
/// blend factors where 0 leaves clouds untouched and 1 removes them. Nothing
/// here is validated: whatever is written ends up in the shader as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub cloud_speed: f32,
    pub cloud_density: f32,
    pub cloud_scale: f32,
    pub color_tint: [f32; 3],
    pub parallax_strength: f32,
    pub grain_intensity: f32,
    pub chromatic_aberration: f32,

    // Soft elliptical clearing around the viewport centre.
    pub clear_radius: f32,
    pub clear_feather: f32,
    pub clear_strength: f32,
    pub clear_ellipse: [f32; 2],

    // Horizontal band kept clear for the foreground content.
    pub side_clear_width: f32,
    pub side_feather: f32,
    pub side_clear_strength: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cloud_speed: 0.3,
            cloud_density: 0.6,
            cloud_scale: 1.5,
            color_tint: [1.0, 1.0, 1.0],
            parallax_strength: 0.002,
            grain_intensity: 0.03,
            chromatic_aberration: 0.0015,
            clear_radius: 0.33,
            clear_feather: 0.22,
            clear_strength: 0.6,
            clear_ellipse: [1.6, 1.0],
            side_clear_width: 0.5,
            side_feather: 0.16,
            side_clear_strength: 0.92,
        }
    }
}

impl RenderConfig {
    /// Uniform values derived from the config, in declaration order.
    pub fn uniforms(&self) -> [(Uniform, UniformValue); 14] {
        use UniformValue::{Float, Vec2, Vec3};
        [
            (Uniform::CloudSpeed, Float(self.cloud_speed)),
            (Uniform::CloudDensity, Float(self.cloud_density)),
            (Uniform::CloudScale, Float(self.cloud_scale)),
            (Uniform::ColorTint, Vec3(self.color_tint)),
            (Uniform::ParallaxStrength, Float(self.parallax_strength)),
            (Uniform::GrainIntensity, Float(self.grain_intensity)),
            (Uniform::ChromaticAberration, Float(self.chromatic_aberration)),
            (Uniform::ClearRadius, Float(self.clear_radius)),
            (Uniform::ClearFeather, Float(self.clear_feather)),
            (Uniform::ClearStrength, Float(self.clear_strength)),
            (Uniform::ClearEllipse, Vec2(self.clear_ellipse)),
            (Uniform::SideClearWidth, Float(self.side_clear_width)),
            (Uniform::SideFeather, Float(self.side_feather)),
            (Uniform::SideClearStrength, Float(self.side_clear_strength)),
        ]
    }
}
