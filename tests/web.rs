#![cfg(target_arch = "wasm32")]

use festival_viz::config::TimelineBoundaries;
use festival_viz::overlay::OverlaySync;
use festival_viz::VizError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn layer() -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn errors_cross_the_js_boundary() {
    let js: JsValue = VizError::Shader("bad varying".into()).into();
    assert!(js.is_instance_of::<js_sys::Error>());

    let back = VizError::from(js);
    assert!(matches!(&back, VizError::Js(msg) if msg.contains("bad varying")));
}

#[wasm_bindgen_test]
fn overlay_css_is_accepted_by_the_browser() {
    let overlay = OverlaySync::new(TimelineBoundaries::default(), 8.0, 15);
    let state = overlay.compute(0.1, 900.0, true, 0.5);

    let el = layer();
    let style = el.style();
    let mut css = String::new();
    state.hero.write_transform_css(&mut css);
    style.set_property("transform", &css).unwrap();
    state.hero.write_opacity_css(&mut css);
    style.set_property("opacity", &css).unwrap();

    assert!(!style.get_property_value("transform").unwrap().is_empty());
    let opacity: f32 = style.get_property_value("opacity").unwrap().parse().unwrap();
    assert!((opacity - state.hero.opacity).abs() < 1e-3);
}

#[wasm_bindgen_test]
fn canvas_reports_a_size() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(320);
    canvas.set_height(180);
    document.body().unwrap().append_child(&canvas).unwrap();

    let rect = canvas.get_bounding_client_rect();
    assert!(rect.width() > 0.0 && rect.height() > 0.0);
}
