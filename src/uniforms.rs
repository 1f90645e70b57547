/// Shader inputs of the sky program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    Time,
    Resolution,
    Mouse,
    CloudSpeed,
    CloudDensity,
    CloudScale,
    ColorTint,
    ParallaxStrength,
    GrainIntensity,
    ChromaticAberration,
    ClearRadius,
    ClearFeather,
    ClearStrength,
    ClearEllipse,
    SideClearWidth,
    SideFeather,
    SideClearStrength,
}

impl Uniform {
    pub const ALL: [Uniform; 17] = [
        Uniform::Time,
        Uniform::Resolution,
        Uniform::Mouse,
        Uniform::CloudSpeed,
        Uniform::CloudDensity,
        Uniform::CloudScale,
        Uniform::ColorTint,
        Uniform::ParallaxStrength,
        Uniform::GrainIntensity,
        Uniform::ChromaticAberration,
        Uniform::ClearRadius,
        Uniform::ClearFeather,
        Uniform::ClearStrength,
        Uniform::ClearEllipse,
        Uniform::SideClearWidth,
        Uniform::SideFeather,
        Uniform::SideClearStrength,
    ];

    /// Name as declared in the GLSL source.
    pub fn name(self) -> &'static str {
        match self {
            Uniform::Time => "uTime",
            Uniform::Resolution => "uResolution",
            Uniform::Mouse => "uMouse",
            Uniform::CloudSpeed => "uCloudSpeed",
            Uniform::CloudDensity => "uCloudDensity",
            Uniform::CloudScale => "uCloudScale",
            Uniform::ColorTint => "uColorTint",
            Uniform::ParallaxStrength => "uParallaxStrength",
            Uniform::GrainIntensity => "uGrainIntensity",
            Uniform::ChromaticAberration => "uChromaticAberration",
            Uniform::ClearRadius => "uClearRadius",
            Uniform::ClearFeather => "uClearFeather",
            Uniform::ClearStrength => "uClearStrength",
            Uniform::ClearEllipse => "uClearEllipse",
            Uniform::SideClearWidth => "uSideClearWidth",
            Uniform::SideFeather => "uSideFeather",
            Uniform::SideClearStrength => "uSideClearStrength",
        }
    }

    /// GLSL type keyword.
    pub fn glsl_type(self) -> &'static str {
        match self {
            Uniform::Resolution | Uniform::Mouse | Uniform::ClearEllipse => "vec2",
            Uniform::ColorTint => "vec3",
            _ => "float",
        }
    }

    /// Dense index, usable as a slot in location tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
}
