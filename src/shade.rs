//! CPU mirror of the fragment shader in `crate::shader`.
//!
//! Each function matches the GLSL of the same role line for line, so the
//! pixel function can be checked on the host without a GPU.

use crate::config::RenderConfig;

const TOP_COLOR: [f32; 3] = [0.227, 0.502, 0.769];
const HORIZON_COLOR: [f32; 3] = [0.627, 0.784, 0.922];
const CLOUD_COLOR: f32 = 0.95;
const MAX_CLOUD_BLEND: f32 = 0.8;
const ABERRATION_BLEND: f32 = 0.3;
const VIGNETTE: f32 = 0.3;
const OCTAVES: usize = 6;

/// Per-frame inputs other than the config.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub time: f32,
    pub resolution: [f32; 2],
    pub pointer: [f32; 2],
    pub config: &'a RenderConfig,
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn mod289(x: f32) -> f32 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: f32) -> f32 {
    mod289((x * 34.0 + 1.0) * x)
}

/// 2D simplex noise in roughly [-1, 1].
pub fn simplex(v: [f32; 2]) -> f32 {
    const C: [f32; 4] = [
        0.211_324_87,
        0.366_025_4,
        -0.577_350_26,
        0.024_390_243,
    ];
    let skew = (v[0] + v[1]) * C[1];
    let i = [(v[0] + skew).floor(), (v[1] + skew).floor()];
    let unskew = (i[0] + i[1]) * C[0];
    let x0 = [v[0] - i[0] + unskew, v[1] - i[1] + unskew];
    let i1 = if x0[0] > x0[1] { [1.0, 0.0] } else { [0.0, 1.0] };
    let x1 = [x0[0] + C[0] - i1[0], x0[1] + C[0] - i1[1]];
    let x2 = [x0[0] + C[2], x0[1] + C[2]];
    let i = [mod289(i[0]), mod289(i[1])];

    let corners = [x0, x1, x2];
    let offsets = [[0.0, 0.0], i1, [1.0, 1.0]];
    let mut total = 0.0;
    for (x, o) in corners.iter().zip(offsets) {
        let p = permute(permute(i[1] + o[1]) + i[0] + o[0]);
        let mut m = (0.5 - (x[0] * x[0] + x[1] * x[1])).max(0.0);
        m *= m;
        m *= m;
        let gx = 2.0 * fract(p * C[3]) - 1.0;
        let h = gx.abs() - 0.5;
        let a0 = gx - (gx + 0.5).floor();
        m *= 1.792_842_9 - 0.853_734_7 * (a0 * a0 + h * h);
        total += m * (a0 * x[0] + h * x[1]);
    }
    130.0 * total
}

/// Six octaves of drifting simplex noise.
pub fn fbm(p: [f32; 2], time: f32, config: &RenderConfig) -> f32 {
    let offset = time * config.cloud_speed * 0.1;
    let mut f = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    for _ in 0..OCTAVES {
        let s = frequency * config.cloud_scale;
        f += amplitude * simplex([(p[0] + offset) * s, p[1] * s]);
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    f
}

pub fn sky_color(uv: [f32; 2]) -> [f32; 3] {
    let horizon = 1.0 - uv[1];
    let t = horizon * horizon;
    [0, 1, 2].map(|c| mix(TOP_COLOR[c], HORIZON_COLOR[c], t))
}

fn grain_hash(st: [f32; 2]) -> f32 {
    fract((st[0] * 12.9898 + st[1] * 78.233).sin() * 43_758.547)
}

/// Multiplier from the elliptical clearing around the centre; 1 = untouched.
pub fn central_clear_factor(uv: [f32; 2], config: &RenderConfig) -> f32 {
    let dx = (uv[0] - 0.5) / config.clear_ellipse[0];
    let dy = (uv[1] - 0.5) / config.clear_ellipse[1];
    let dist = (dx * dx + dy * dy).sqrt();
    let mask = smoothstep(config.clear_radius, config.clear_radius - config.clear_feather, dist);
    1.0 - mask * config.clear_strength
}

/// Multiplier from the horizontal clear band; 1 = untouched.
pub fn side_band_factor(uv: [f32; 2], config: &RenderConfig) -> f32 {
    let half = (config.side_clear_width * 0.5).clamp(0.0, 0.5);
    let side = smoothstep(half, half + config.side_feather, (uv[0] - 0.5).abs());
    mix(1.0, side, config.side_clear_strength)
}

/// Cloud coverage after both clearing masks.
pub fn coverage(uv: [f32; 2], frame: &FrameInputs<'_>) -> f32 {
    let cfg = frame.config;
    let t = frame.time;
    let [w, h] = frame.resolution;
    let min = w.min(h);
    let mut st = [uv[0] * w / min, uv[1] * h / min];
    st[0] += (frame.pointer[0] - 0.5) * cfg.parallax_strength;
    st[1] += (frame.pointer[1] - 0.5) * cfg.parallax_strength;

    let base = smoothstep(
        -cfg.cloud_density,
        cfg.cloud_density,
        fbm([st[0] * 2.0, st[1] * 2.0], t, cfg),
    );
    let layer1 = smoothstep(-0.3, 0.7, fbm([st[0] * 1.5 + t * 0.02, st[1] * 1.5], t, cfg)) * 0.8;
    let layer2 = smoothstep(-0.2, 0.5, fbm([st[0] * 3.0 + t * 0.015, st[1] * 3.0], t, cfg)) * 0.6;
    let clouds = base.max((layer1 * 0.7).max(layer2 * 0.5)).clamp(0.0, 1.0);

    clouds * central_clear_factor(uv, cfg) * side_band_factor(uv, cfg)
}

pub fn vignette(uv: [f32; 2]) -> f32 {
    let dx = uv[0] - 0.5;
    let dy = uv[1] - 0.5;
    1.0 - (dx * dx + dy * dy).sqrt() * VIGNETTE
}

/// Final colour of the pixel at `uv` (0..1, origin bottom-left).
pub fn shade(uv: [f32; 2], frame: &FrameInputs<'_>) -> [f32; 3] {
    let cfg = frame.config;
    let sky = sky_color(uv);
    let blend = coverage(uv, frame) * MAX_CLOUD_BLEND;
    let mut color = [0, 1, 2].map(|c| mix(sky[c], CLOUD_COLOR, blend) * cfg.color_tint[c]);

    let t = frame.time * 0.1;
    let grain = grain_hash([uv[0] + t, uv[1] + t]) * cfg.grain_intensity;
    for c in &mut color {
        *c += grain;
    }

    let off = [
        (uv[0] - 0.5) * cfg.chromatic_aberration,
        (uv[1] - 0.5) * cfg.chromatic_aberration,
    ];
    color[1] = mix(color[1], sky_color([uv[0] + off[0], uv[1] + off[1]])[1], ABERRATION_BLEND);
    color[2] = mix(color[2], sky_color([uv[0] - off[0], uv[1] - off[1]])[2], ABERRATION_BLEND);

    let v = vignette(uv);
    color.map(|c| c * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(config: &RenderConfig) -> FrameInputs<'_> {
        FrameInputs {
            time: 3.2,
            resolution: [1920.0, 1080.0],
            pointer: [0.5, 0.5],
            config,
        }
    }

    fn grid() -> impl Iterator<Item = [f32; 2]> {
        (0..=10).flat_map(|x| (0..=10).map(move |y| [x as f32 / 10.0, y as f32 / 10.0]))
    }

    #[test]
    fn gradient_runs_from_horizon_to_top() {
        assert_eq!(sky_color([0.5, 1.0]), TOP_COLOR);
        let bottom = sky_color([0.5, 0.0]);
        for c in 0..3 {
            assert!((bottom[c] - HORIZON_COLOR[c]).abs() < 1e-6);
        }
    }

    #[test]
    fn vignette_darkens_towards_corners() {
        assert_eq!(vignette([0.5, 0.5]), 1.0);
        let corner = vignette([0.0, 0.0]);
        assert!((corner - (1.0 - 0.5f32.sqrt() * 0.3)).abs() < 1e-6);
    }

    #[test]
    fn noise_is_bounded_and_deterministic() {
        for p in grid() {
            let q = [p[0] * 37.0 - 11.0, p[1] * 53.0 + 7.0];
            let n = simplex(q);
            assert!(n.abs() <= 1.1, "simplex({q:?}) = {n}");
            assert_eq!(n, simplex(q));
        }
    }

    #[test]
    fn coverage_stays_in_unit_range() {
        let cfg = RenderConfig::default();
        let f = frame(&cfg);
        for uv in grid() {
            let c = coverage(uv, &f);
            assert!((0.0..=1.0).contains(&c), "coverage {c} at {uv:?}");
        }
    }

    #[test]
    fn full_strength_masks_clear_the_centre() {
        let cfg = RenderConfig {
            clear_strength: 1.0,
            ..RenderConfig::default()
        };
        assert_eq!(central_clear_factor([0.5, 0.5], &cfg), 0.0);
        assert_eq!(coverage([0.5, 0.5], &frame(&cfg)), 0.0);

        let cfg = RenderConfig {
            side_clear_strength: 1.0,
            ..RenderConfig::default()
        };
        assert_eq!(side_band_factor([0.5, 0.3], &cfg), 0.0);
        assert_eq!(side_band_factor([0.0, 0.3], &cfg), 1.0);
    }

    #[test]
    fn zero_strength_masks_leave_clouds_alone() {
        let cfg = RenderConfig {
            clear_strength: 0.0,
            side_clear_strength: 0.0,
            ..RenderConfig::default()
        };
        for uv in grid() {
            assert_eq!(central_clear_factor(uv, &cfg), 1.0);
            assert_eq!(side_band_factor(uv, &cfg), 1.0);
        }
    }

    #[test]
    fn out_of_range_config_degrades_without_nan() {
        let cfg = RenderConfig {
            cloud_density: -4.0,
            cloud_scale: 40.0,
            clear_radius: 3.0,
            clear_feather: 3.0,
            clear_strength: 7.0,
            side_clear_width: -2.0,
            side_feather: 0.0,
            side_clear_strength: 2.0,
            grain_intensity: 5.0,
            chromatic_aberration: 10.0,
            ..RenderConfig::default()
        };
        let f = frame(&cfg);
        for uv in grid() {
            let c = shade(uv, &f);
            assert!(c.iter().all(|v| v.is_finite()), "{c:?} at {uv:?}");
        }
    }

    #[test]
    fn tint_scales_clean_pixels() {
        let base = RenderConfig {
            grain_intensity: 0.0,
            chromatic_aberration: 0.0,
            ..RenderConfig::default()
        };
        let tinted = RenderConfig {
            color_tint: [0.5, 1.0, 1.0],
            ..base
        };
        let uv = [0.5, 0.5];
        let a = shade(uv, &frame(&base));
        let b = shade(uv, &frame(&tinted));
        assert!((b[0] - a[0] * 0.5).abs() < 1e-5);
    }

    #[test]
    fn mirrored_formulas_appear_in_fragment_source() {
        use crate::shader::FRAGMENT_SRC;
        for line in [
            "vec3 topColor = vec3(0.227, 0.502, 0.769);",
            "vec3 horizonColor = vec3(0.627, 0.784, 0.922);",
            "mix(topColor, horizonColor, horizon * horizon)",
            "for (int i = 0; i < 6; i++)",
            "vec2 offset = vec2(time * uCloudSpeed * 0.1, 0.0);",
            "smoothstep(-uCloudDensity, uCloudDensity, fbm(st * 2.0, uTime))",
            "smoothstep(-0.3, 0.7, fbm(st * 1.5 + vec2(uTime * 0.02, 0.0), uTime)) * 0.8",
            "smoothstep(-0.2, 0.5, fbm(st * 3.0 + vec2(uTime * 0.015, 0.0), uTime)) * 0.6",
            "clamp(max(base, max(layer1 * 0.7, layer2 * 0.5)), 0.0, 1.0)",
            "smoothstep(uClearRadius, uClearRadius - uClearFeather, length(centered))",
            "coverage *= 1.0 - clearMask * uClearStrength;",
            "clamp(uSideClearWidth * 0.5, 0.0, 0.5)",
            "coverage *= mix(1.0, sideMask, uSideClearStrength);",
            "mix(sky, vec3(0.95), coverage * 0.8)",
            "grainHash(uv + uTime * 0.1) * uGrainIntensity",
            "fract(sin(dot(st, vec2(12.9898, 78.233))) * 43758.5453123)",
            "color.g = mix(color.g, skyColor(uv + aberration).g, 0.3);",
            "color.b = mix(color.b, skyColor(uv - aberration).b, 0.3);",
            "color *= 1.0 - length(uv - 0.5) * 0.3;",
        ] {
            assert!(FRAGMENT_SRC.contains(line), "fragment shader lost `{line}`");
        }
    }
}
