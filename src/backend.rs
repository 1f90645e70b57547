use crate::uniforms::{Uniform, UniformValue};

/// What the sky renderer needs from a graphics API.
///
/// The browser build implements this on WebGL2; tests record the calls.
pub trait Backend {
    /// Writes one shader input. Takes effect from the next `draw`.
    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue);

    /// Resizes the drawing buffer (device pixels) and the viewport with it.
    fn resize(&mut self, width: u32, height: u32);

    /// Draws the full-viewport quad once.
    fn draw(&mut self);
}
