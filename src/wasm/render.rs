use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, EventTarget, MouseEvent, TouchEvent, Window};

use super::dom::Surface;
use super::events::Listener;
use super::gl::GlBackend;
use super::handle::SkyHandle;
use crate::config::RenderConfig;
use crate::error::SkyError;
use crate::frame_loop::{CancelToken, FrameLoop, Tick};
use crate::renderer::SkyRenderer;

pub type SharedSky = Rc<RefCell<SkyRenderer<GlBackend>>>;

/// Builds the renderer on the canvas, wires input and layout events and
/// starts the animation-frame loop.
pub fn mount(canvas_id: &str, hero_selector: &str) -> Result<SkyHandle, SkyError> {
    let surface = Surface::locate(canvas_id, hero_selector)?;
    let backend = GlBackend::new(&surface.canvas)?;
    let layout = surface.measure();
    let sky: SharedSky = Rc::new(RefCell::new(SkyRenderer::new(
        backend,
        RenderConfig::default(),
        layout,
    )));
    log::info!(
        "sky mounted on #{canvas_id} ({}x{} css px, {:?})",
        layout.canvas_width,
        layout.canvas_height,
        layout.class()
    );

    let listeners = listen(&surface, &sky)?;
    let token = CancelToken::new();
    start_loop(&surface.window, FrameLoop::new(sky.clone(), token.clone()))?;
    Ok(SkyHandle::new(sky, surface, token, listeners))
}

fn listen(surface: &Surface, sky: &SharedSky) -> Result<Vec<Listener>, SkyError> {
    let mut listeners = Vec::with_capacity(5);

    let s = sky.clone();
    listeners.push(Listener::attach(&surface.window, "mousemove", move |e: Event| {
        if let Some(e) = e.dyn_ref::<MouseEvent>() {
            s.borrow_mut()
                .pointer_moved(e.client_x() as f64, e.client_y() as f64);
        }
    })?);

    let s = sky.clone();
    listeners.push(Listener::attach(&surface.window, "touchmove", move |e: Event| {
        let Some(touch) = e
            .dyn_ref::<TouchEvent>()
            .and_then(|e| e.touches().get(0))
        else {
            return;
        };
        s.borrow_mut()
            .pointer_moved(touch.client_x() as f64, touch.client_y() as f64);
    })?);

    listeners.push(relayout_on(&surface.window, surface, sky, "resize")?);

    // Layout settles after fonts and images; re-measure at both milestones
    // that are still ahead of us.
    if surface.is_loading() {
        listeners.push(relayout_on(&surface.document, surface, sky, "DOMContentLoaded")?);
    }
    if !surface.is_complete() {
        listeners.push(relayout_on(&surface.window, surface, sky, "load")?);
    }
    Ok(listeners)
}

fn relayout_on<T: AsRef<EventTarget>>(
    target: &T,
    surface: &Surface,
    sky: &SharedSky,
    event: &'static str,
) -> Result<Listener, SkyError> {
    let s = sky.clone();
    let measured = surface.clone();
    Listener::attach(target, event, move |_| {
        s.borrow_mut().relayout(measured.measure());
    })
}

/// Drives `frames` from `requestAnimationFrame` until it reports `Stop`.
fn start_loop(window: &Window, frames: FrameLoop<GlBackend>) -> Result<(), SkyError> {
    // The callback needs a handle to itself to schedule the next frame, so it
    // lives in a shared slot. Emptying the slot on `Stop` breaks the cycle.
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let win = window.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || match frames.tick() {
        Tick::Continue => {
            let scheduled = next
                .borrow()
                .as_ref()
                .map(|cb| win.request_animation_frame(cb.as_ref().unchecked_ref()));
            if let Some(Err(e)) = scheduled {
                log::error!("requestAnimationFrame failed: {:?}", e);
                frames.token().cancel();
                next.borrow_mut().take();
            }
        }
        Tick::Stop => {
            log::info!("sky render loop stopped");
            next.borrow_mut().take();
        }
    }) as Box<dyn FnMut()>));

    let first = slot.borrow();
    if let Some(cb) = first.as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}
