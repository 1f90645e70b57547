use crate::responsive::Viewport;

/// Pointer position normalised to the viewport, y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl PointerState {
    /// Converts client coordinates (CSS px, origin top-left) into the
    /// shader's convention. Returns `None` for a degenerate viewport.
    pub fn from_client(client_x: f64, client_y: f64, viewport: Viewport) -> Option<Self> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return None;
        }
        Some(Self {
            x: (client_x / viewport.width) as f32,
            y: (1.0 - client_y / viewport.height) as f32,
        })
    }

    pub fn as_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}
