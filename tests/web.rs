#![cfg(target_arch = "wasm32")]

use portfolio_fx::web::{
    icon_for_tech, scroll_progress, AnchoredFieldHandle, ParticleFieldHandle, TypewriterHandle,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn canvas_in_container(width: u32, height: u32) -> web_sys::HtmlCanvasElement {
    let doc = document();
    let container = doc.create_element("div").unwrap();
    container
        .set_attribute("style", &format!("width: {}px; height: {}px;", width, height))
        .unwrap();
    let canvas = doc
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    container.append_child(&canvas).unwrap();
    doc.body().unwrap().append_child(&container).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn field_sizes_canvas_to_container() {
    let canvas = canvas_in_container(320, 200);
    let mut handle = ParticleFieldHandle::mount(canvas.clone(), true, None).unwrap();

    assert!(handle.is_mounted());
    assert_eq!(canvas.width(), 320);
    assert_eq!(canvas.height(), 200);
    assert!(handle.particle_count() > 0);
    assert_eq!(handle.listener_count(), 5);

    handle.unmount();
    assert!(!handle.is_mounted());
    assert_eq!(handle.listener_count(), 0);
}

#[wasm_bindgen_test]
fn decorative_field_skips_pointer_listeners() {
    let canvas = canvas_in_container(100, 100);
    let handle = ParticleFieldHandle::mount(canvas, false, None).unwrap();
    assert_eq!(handle.listener_count(), 1);
}

#[wasm_bindgen_test]
fn bad_config_is_reported() {
    let canvas = canvas_in_container(100, 100);
    let config = Some("[field]\npalette = []".into());
    assert!(ParticleFieldHandle::mount(canvas, true, config).is_err());
}

#[wasm_bindgen_test]
fn anchored_field_scales_canvas_by_pixel_ratio() {
    let canvas = canvas_in_container(300, 120);
    let ratio = web_sys::window().unwrap().device_pixel_ratio();
    let mut handle = AnchoredFieldHandle::mount(canvas.clone(), None).unwrap();

    assert_eq!(canvas.width(), (300.0 * ratio).round() as u32);
    assert_eq!(canvas.height(), (120.0 * ratio).round() as u32);
    assert!(handle.particle_count() > 0);
    assert_eq!(handle.listener_count(), 3);

    handle.unmount();
    assert_eq!(handle.listener_count(), 0);
}

#[wasm_bindgen_test]
fn typewriter_clears_timers_on_unmount() {
    let element = document().create_element("span").unwrap();
    let words = js_sys::Array::of2(&"design".into(), &"build".into());
    let mut handle = TypewriterHandle::mount(element, words, None).unwrap();

    assert_eq!(handle.pending_timers(), 1);
    assert_eq!(handle.text(), "");
    handle.unmount();
    assert_eq!(handle.pending_timers(), 0);
}

#[wasm_bindgen_test]
fn empty_word_list_is_rejected() {
    let element = document().create_element("span").unwrap();
    assert!(TypewriterHandle::mount(element, js_sys::Array::new(), None).is_err());
}

#[wasm_bindgen_test]
fn exported_helpers() {
    assert_eq!(icon_for_tech("TypeScript"), "terminal");
    assert_eq!(scroll_progress(0.0, 400.0, 800.0), 1.0);
}
