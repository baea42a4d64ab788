use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::error::{Result, VizError};
use crate::overlay::{write_opacity, LayerStyle, OverlayState};

/// Below this the loading veil is taken out of layout entirely.
const VEIL_HIDDEN: f32 = 0.01;

fn element(document: &Document, id: &'static str) -> Option<HtmlElement> {
    let el = document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok();
    if el.is_none() {
        log::warn!("#{id} is not an HTML element; overlay layer disabled");
    }
    el
}

/// The DOM layers stacked over the canvas. Missing layers are skipped, so a
/// page can opt out of any of them.
pub struct OverlayDom {
    hero: Option<HtmlElement>,
    background: Option<HtmlElement>,
    matte: Option<HtmlElement>,
    vignette: Option<HtmlElement>,
    loading: Option<HtmlElement>,
    caption: Option<HtmlElement>,
    captions: Vec<&'static str>,
    /// Last caption written, to avoid touching the text node every frame.
    shown_caption: Option<Option<usize>>,
    /// Scratch buffer for CSS values, reused across frames.
    css: String,
}

impl OverlayDom {
    pub fn bind(document: &Document, captions: Vec<&'static str>) -> Self {
        let dom = Self {
            hero: element(document, "hero"),
            background: element(document, "hero-bg"),
            matte: element(document, "matte"),
            vignette: element(document, "vignette"),
            loading: element(document, "loading"),
            caption: element(document, "caption"),
            captions,
            shown_caption: None,
            css: String::with_capacity(64),
        };
        log::debug!(
            "overlay layers bound: hero={} bg={} matte={} vignette={} loading={} caption={}",
            dom.hero.is_some(),
            dom.background.is_some(),
            dom.matte.is_some(),
            dom.vignette.is_some(),
            dom.loading.is_some(),
            dom.caption.is_some(),
        );
        dom
    }

    pub fn apply(&mut self, state: &OverlayState) -> Result<()> {
        let css = &mut self.css;
        if let Some(el) = &self.hero {
            apply_layer(el, &state.hero, css)?;
        }
        if let Some(el) = &self.background {
            apply_layer(el, &state.background, css)?;
        }
        if let Some(el) = &self.matte {
            set_opacity(el, state.matte_opacity, css)?;
        }
        if let Some(el) = &self.vignette {
            set_opacity(el, state.vignette_opacity, css)?;
        }
        if let Some(el) = &self.loading {
            set_opacity(el, state.loading_opacity, css)?;
            let display = if state.loading_opacity < VEIL_HIDDEN { "none" } else { "" };
            el.style().set_property("display", display)?;
        }
        if let Some(el) = &self.caption {
            if self.shown_caption != Some(state.caption) {
                let text = state
                    .caption
                    .and_then(|i| self.captions.get(i).copied())
                    .unwrap_or("");
                el.set_text_content(Some(text));
                set_opacity(el, if text.is_empty() { 0.0 } else { 1.0 }, css)?;
                self.shown_caption = Some(state.caption);
            }
        }
        Ok(())
    }
}

fn set_opacity(el: &HtmlElement, opacity: f32, css: &mut String) -> Result<()> {
    write_opacity(opacity, css);
    el.style().set_property("opacity", css)?;
    Ok(())
}

fn apply_layer(el: &HtmlElement, layer: &LayerStyle, css: &mut String) -> Result<()> {
    let style = el.style();
    layer.write_opacity_css(css);
    style.set_property("opacity", css)?;
    layer.write_transform_css(css);
    style.set_property("transform", css)?;
    style.set_property(
        "pointer-events",
        if layer.pointer_events { "auto" } else { "none" },
    )?;
    style.set_property("display", if layer.displayed { "" } else { "none" })?;
    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Replace the page body with an error message and a reload button.
pub fn show_fallback(err: &VizError) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    body.set_inner_html(&format!(
        "<div class=\"fallback\" role=\"alert\">\
           <h1>Something went wrong</h1>\
           <p>{}</p>\
           <button type=\"button\" onclick=\"location.reload()\">Reload page</button>\
         </div>",
        escape_html(&err.to_string())
    ));
}
