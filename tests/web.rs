#![cfg(target_arch = "wasm32")]

use js_sys::{Promise, Reflect};
use sky_wasm::wasm::{mount_sky, SkyHandle};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str, width: u32, height: u32) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    canvas
        .set_attribute("style", &format!("width:{width}px;height:{height}px;display:block"))
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn add_foreground(class: &str, width: u32) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document.create_element("section").unwrap();
    el.set_class_name(class);
    set_width(&el, width);
    document.body().unwrap().append_child(&el).unwrap();
    el
}

fn set_width(el: &web_sys::Element, width: u32) {
    el.set_attribute("style", &format!("width:{width}px;height:40px"))
        .unwrap();
}

fn side_clear_width(sky: &SkyHandle) -> f64 {
    let config = sky.config().unwrap();
    Reflect::get(&config, &JsValue::from_str("sideClearWidth"))
        .unwrap()
        .as_f64()
        .unwrap()
}

fn dispatch_resize() {
    let window = web_sys::window().unwrap();
    let event = web_sys::Event::new("resize").unwrap();
    window.dispatch_event(&event).unwrap();
}

/// Resolves after `ms` milliseconds, leaving room for animation frames.
async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn missing_canvas_does_not_throw() {
    assert!(mount_sky("no-such-canvas", ".hero").is_none());
}

#[wasm_bindgen_test]
fn non_canvas_element_is_rejected() {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    div.set_id("not-a-canvas");
    document.body().unwrap().append_child(&div).unwrap();
    assert!(mount_sky("not-a-canvas", ".hero").is_none());
}

#[wasm_bindgen_test]
fn mounts_without_foreground_region() {
    let canvas = add_canvas("sky-test", 1920, 1080);
    let rect = canvas.get_bounding_client_rect();
    assert!(rect.width() > 0.0 && rect.height() > 0.0);

    // Headless browsers without WebGL2 legitimately decline to mount.
    let Some(mut sky) = mount_sky("sky-test", ".no-such-hero") else {
        return;
    };
    let config = sky.config().unwrap();
    let width = Reflect::get(&config, &JsValue::from_str("sideClearWidth"))
        .unwrap()
        .as_f64()
        .unwrap();
    assert!((width - 0.5).abs() < 1e-6);

    sky.update_color_tint(0.5, 0.6, 0.7);
    let tint = Reflect::get(&sky.config().unwrap(), &JsValue::from_str("colorTint")).unwrap();
    let tint = js_sys::Array::from(&tint);
    assert!((tint.get(0).as_f64().unwrap() - 0.5).abs() < 1e-6);

    sky.stop();
    assert!(sky.stopped());
}

#[wasm_bindgen_test]
async fn stopped_sky_ignores_resize_and_stops_rendering() {
    add_canvas("sky-stop", 1280, 720);
    let hero = add_foreground("sky-stop-hero", 300);

    let Some(mut sky) = mount_sky("sky-stop", ".sky-stop-hero") else {
        return;
    };

    // Live: a wider foreground widens the band on the next resize.
    let before = side_clear_width(&sky);
    set_width(&hero, 600);
    dispatch_resize();
    let live = side_clear_width(&sky);
    assert!(live > before, "band did not follow the foreground: {before} -> {live}");

    sky.stop();
    let time = sky.time();
    set_width(&hero, 200);
    dispatch_resize();
    sleep(100).await;

    assert_eq!(side_clear_width(&sky), live);
    assert_eq!(sky.time(), time);
}

#[wasm_bindgen_test]
async fn dropped_handle_releases_the_sky() {
    add_canvas("sky-drop", 1280, 720);
    let hero = add_foreground("sky-drop-hero", 300);

    let Some(sky) = mount_sky("sky-drop", ".sky-drop-hero") else {
        return;
    };
    assert!(side_clear_width(&sky) > 0.0);
    let canvas = web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id("sky-drop")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    drop(sky);

    // With the listeners gone, a resize no longer touches the drawing buffer.
    let width = canvas.width();
    canvas
        .set_attribute("style", "width:640px;height:360px;display:block")
        .unwrap();
    set_width(&hero, 600);
    dispatch_resize();
    sleep(100).await;
    assert_eq!(canvas.width(), width);

    // A fresh mount on the same canvas starts its own clock.
    let Some(again) = mount_sky("sky-drop", ".sky-drop-hero") else {
        return;
    };
    assert_eq!(again.time(), 0.0);
}
