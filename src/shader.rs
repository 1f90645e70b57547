//! GLSL ES 3.00 sources for the sky program.
//!
//! The vertex stage draws a single full-viewport quad with an identity
//! projection. All the work happens in the fragment stage; `crate::shade`
//! mirrors it on the CPU.

/// Attribute carrying the quad corners in clip space.
pub const POSITION_ATTRIBUTE: &str = "aPosition";

/// Triangle-strip corners of the full-viewport quad.
pub const QUAD_VERTICES: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

pub const VERTEX_SRC: &str = r#"#version 300 es
in vec2 aPosition;
out vec2 vUv;

void main() {
  vUv = aPosition * 0.5 + 0.5;
  gl_Position = vec4(aPosition, 0.0, 1.0);
}
"#;

pub const FRAGMENT_SRC: &str = r#"#version 300 es
precision highp float;

uniform float uTime;
uniform vec2 uResolution;
uniform vec2 uMouse;
uniform float uCloudSpeed;
uniform float uCloudDensity;
uniform float uCloudScale;
uniform vec3 uColorTint;
uniform float uParallaxStrength;
uniform float uGrainIntensity;
uniform float uChromaticAberration;
uniform float uClearRadius;
uniform float uClearFeather;
uniform float uClearStrength;
uniform vec2 uClearEllipse;
uniform float uSideClearWidth;
uniform float uSideFeather;
uniform float uSideClearStrength;

in vec2 vUv;
out vec4 fragColor;

vec3 mod289(vec3 x) { return x - floor(x * (1.0 / 289.0)) * 289.0; }
vec2 mod289(vec2 x) { return x - floor(x * (1.0 / 289.0)) * 289.0; }
vec3 permute(vec3 x) { return mod289(((x * 34.0) + 1.0) * x); }

float snoise(vec2 v) {
  const vec4 C = vec4(0.211324865405187, 0.366025403784439, -0.577350269189626, 0.024390243902439);
  vec2 i = floor(v + dot(v, C.yy));
  vec2 x0 = v - i + dot(i, C.xx);
  vec2 i1 = (x0.x > x0.y) ? vec2(1.0, 0.0) : vec2(0.0, 1.0);
  vec4 x12 = x0.xyxy + C.xxzz;
  x12.xy -= i1;
  i = mod289(i);
  vec3 p = permute(permute(i.y + vec3(0.0, i1.y, 1.0)) + i.x + vec3(0.0, i1.x, 1.0));
  vec3 m = max(0.5 - vec3(dot(x0, x0), dot(x12.xy, x12.xy), dot(x12.zw, x12.zw)), 0.0);
  m = m * m;
  m = m * m;
  vec3 x = 2.0 * fract(p * C.www) - 1.0;
  vec3 h = abs(x) - 0.5;
  vec3 ox = floor(x + 0.5);
  vec3 a0 = x - ox;
  m *= 1.79284291400159 - 0.85373472095314 * (a0 * a0 + h * h);
  vec3 g;
  g.x = a0.x * x0.x + h.x * x0.y;
  g.yz = a0.yz * x12.xz + h.yz * x12.yw;
  return 130.0 * dot(m, g);
}

float fbm(vec2 p, float time) {
  float f = 0.0;
  float amplitude = 0.5;
  float frequency = 1.0;
  for (int i = 0; i < 6; i++) {
    vec2 offset = vec2(time * uCloudSpeed * 0.1, 0.0);
    f += amplitude * snoise((p + offset) * frequency * uCloudScale);
    amplitude *= 0.5;
    frequency *= 2.0;
  }
  return f;
}

float grainHash(vec2 st) {
  return fract(sin(dot(st, vec2(12.9898, 78.233))) * 43758.5453123);
}

vec3 skyColor(vec2 uv) {
  float horizon = 1.0 - uv.y;
  vec3 topColor = vec3(0.227, 0.502, 0.769);
  vec3 horizonColor = vec3(0.627, 0.784, 0.922);
  return mix(topColor, horizonColor, horizon * horizon);
}

void main() {
  vec2 uv = vUv;
  vec2 st = uv * uResolution / min(uResolution.x, uResolution.y);
  st += (uMouse - 0.5) * uParallaxStrength;

  vec3 sky = skyColor(uv);

  float base = smoothstep(-uCloudDensity, uCloudDensity, fbm(st * 2.0, uTime));
  float layer1 = smoothstep(-0.3, 0.7, fbm(st * 1.5 + vec2(uTime * 0.02, 0.0), uTime)) * 0.8;
  float layer2 = smoothstep(-0.2, 0.5, fbm(st * 3.0 + vec2(uTime * 0.015, 0.0), uTime)) * 0.6;
  float coverage = clamp(max(base, max(layer1 * 0.7, layer2 * 0.5)), 0.0, 1.0);

  vec2 centered = (uv - 0.5) / uClearEllipse;
  float clearMask = smoothstep(uClearRadius, uClearRadius - uClearFeather, length(centered));
  coverage *= 1.0 - clearMask * uClearStrength;

  float halfBand = clamp(uSideClearWidth * 0.5, 0.0, 0.5);
  float sideMask = smoothstep(halfBand, halfBand + uSideFeather, abs(uv.x - 0.5));
  coverage *= mix(1.0, sideMask, uSideClearStrength);

  vec3 color = mix(sky, vec3(0.95), coverage * 0.8);
  color *= uColorTint;
  color += grainHash(uv + uTime * 0.1) * uGrainIntensity;

  vec2 aberration = (uv - 0.5) * uChromaticAberration;
  color.g = mix(color.g, skyColor(uv + aberration).g, 0.3);
  color.b = mix(color.b, skyColor(uv - aberration).b, 0.3);

  color *= 1.0 - length(uv - 0.5) * 0.3;
  fragColor = vec4(color, 1.0);
}
"#;
