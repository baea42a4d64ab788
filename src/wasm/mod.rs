use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::config::SiteConfig;
use crate::error::{Result, VizError};

mod app;
mod dom;
mod render;
mod scroll;
mod textures;

/// `data-*` keys read from the canvas, in `DOMStringMap` spelling.
const DATASET_KEYS: &[&str] = &["seed", "logLevel", "pages", "autoScroll", "stats", "scroll"];

thread_local! {
    static HANDLE: RefCell<Option<app::AppHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if let Err(err) = mount() {
        // Logger may not be up yet if config parsing failed.
        web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
        dom::show_fallback(&err);
        return Err(err.into());
    }
    Ok(())
}

fn mount() -> Result<()> {
    let window = web_sys::window().ok_or(VizError::MissingGlobal("window"))?;
    let document = window.document().ok_or(VizError::MissingGlobal("document"))?;
    let canvas = document
        .get_element_by_id("c")
        .ok_or(VizError::MissingElement("c"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| VizError::MissingElement("c"))?;

    let mut config = SiteConfig::default();
    let dataset = canvas.dataset();
    let overrides: Vec<(&str, String)> = DATASET_KEYS
        .iter()
        .filter_map(|&key| dataset.get(key).map(|value| (key, value)))
        .collect();
    config.apply_overrides(overrides.iter().map(|(k, v)| (*k, v.as_str())))?;

    console_log::init_with_level(config.log_level).ok();
    log::info!("festival_viz starting: {config:?}");

    let handle = app::App::mount(window, document, canvas, config)?;
    HANDLE.with(|h| {
        if let Some(previous) = h.borrow_mut().replace(handle) {
            previous.teardown();
        }
    });
    Ok(())
}

/// Stop the animation loop and release every listener and callback.
#[wasm_bindgen]
pub fn unmount() {
    if let Some(handle) = HANDLE.with(|h| h.borrow_mut().take()) {
        handle.teardown();
        log::info!("festival_viz unmounted");
    }
}
