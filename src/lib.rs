//! Animated sky-with-clouds page background.
//!
//! The parameter model, responsive tuning, frame clock and run loop are plain
//! Rust and build on any target. The WebGL2 backend and the DOM glue only
//! compile for `wasm32`.

pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod pointer;
pub mod renderer;
pub mod responsive;
pub mod shade;
pub mod shader;
pub mod uniforms;

pub use config::RenderConfig;
pub use error::SkyError;
pub use renderer::SkyRenderer;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod dom;
    mod events;
    mod gl;
    mod handle;
    mod render;

    pub use handle::SkyHandle;

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
    }

    /// Mounts the sky on `#canvas_id`, sizing the clear band around
    /// `hero_selector` when that element exists.
    ///
    /// Returns `undefined` when the background cannot start; the reason is
    /// logged to the console and the page carries on without it.
    ///
    /// Keep the returned handle alive for as long as the background should
    /// run: dropping it (`free()` or garbage collection) tears the sky down.
    #[wasm_bindgen(js_name = mountSky)]
    pub fn mount_sky(canvas_id: &str, hero_selector: &str) -> Option<SkyHandle> {
        match render::mount(canvas_id, hero_selector) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("sky background disabled: {e}");
                None
            }
        }
    }
}
