use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement,
    WebGl2RenderingContext as GL, WebGlTexture,
};

use crate::content::{ImageData, ABOUT_BODY, ABOUT_CTA, ABOUT_TITLE};
use crate::curves::about::{BODY_Y, CTA_Y, TITLE_Y};
use crate::error::{Result, VizError};

type Slots = Rc<RefCell<Vec<Option<WebGlTexture>>>>;

const ABOUT_CANVAS_W: u32 = 1400;
const ABOUT_CANVAS_H: u32 = 900;

/// Image textures, filled in asynchronously as each image decodes.
pub struct TextureSet {
    gl: GL,
    tunnel: Slots,
    gallery: Slots,
    about: Option<WebGlTexture>,
    /// Tunnel and gallery images that have either loaded or failed.
    tunnel_settled: Rc<Cell<usize>>,
    gallery_settled: Rc<Cell<usize>>,
    total: usize,
    images: Vec<HtmlImageElement>,
    callbacks: Vec<Closure<dyn FnMut()>>,
}

impl TextureSet {
    pub fn load(
        gl: &GL,
        document: &Document,
        tunnel: &[ImageData],
        gallery: &[ImageData],
    ) -> Result<Self> {
        let mut set = Self {
            gl: gl.clone(),
            tunnel: Rc::new(RefCell::new(vec![None; tunnel.len()])),
            gallery: Rc::new(RefCell::new(vec![None; gallery.len()])),
            about: None,
            tunnel_settled: Rc::new(Cell::new(0)),
            gallery_settled: Rc::new(Cell::new(0)),
            total: tunnel.len() + gallery.len(),
            images: Vec::with_capacity(tunnel.len() + gallery.len()),
            callbacks: Vec::with_capacity(2 * (tunnel.len() + gallery.len())),
        };

        let (tunnel_slots, tunnel_settled) = (set.tunnel.clone(), set.tunnel_settled.clone());
        for (i, image) in tunnel.iter().enumerate() {
            set.request(image, tunnel_slots.clone(), tunnel_settled.clone(), i)?;
        }
        let (gallery_slots, gallery_settled) = (set.gallery.clone(), set.gallery_settled.clone());
        for (i, image) in gallery.iter().enumerate() {
            set.request(image, gallery_slots.clone(), gallery_settled.clone(), i)?;
        }

        set.about = match about_texture(gl, document) {
            Ok(tex) => Some(tex),
            Err(err) => {
                log::warn!("about panel text unavailable: {err}");
                None
            }
        };

        log::info!("requested {} images", set.total);
        Ok(set)
    }

    fn request(
        &mut self,
        image: &ImageData,
        slots: Slots,
        settled: Rc<Cell<usize>>,
        index: usize,
    ) -> Result<()> {
        let img = HtmlImageElement::new()?;
        img.set_cross_origin(Some("anonymous"));

        let onload = {
            let gl = self.gl.clone();
            let img = img.clone();
            let settled = settled.clone();
            let url = image.url;
            Closure::wrap(Box::new(move || {
                settled.set(settled.get() + 1);
                match upload_image(&gl, &img) {
                    Ok(tex) => {
                        if let Some(slot) = slots.borrow_mut().get_mut(index) {
                            *slot = Some(tex);
                        }
                        log::debug!("texture ready: {url}");
                    }
                    Err(err) => log::warn!("texture upload failed for {url}: {err}"),
                }
            }) as Box<dyn FnMut()>)
        };
        let onerror = {
            let url = image.url;
            Closure::wrap(Box::new(move || {
                settled.set(settled.get() + 1);
                log::warn!("image failed to load: {url}");
            }) as Box<dyn FnMut()>)
        };

        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        img.set_src(image.url);

        self.images.push(img);
        self.callbacks.push(onload);
        self.callbacks.push(onerror);
        Ok(())
    }

    /// Share of images that have either loaded or failed.
    pub fn loaded_fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        let settled = self.tunnel_settled.get() + self.gallery_settled.get();
        settled.min(self.total) as f32 / self.total as f32
    }

    pub fn tunnel_ready(&self) -> bool {
        self.tunnel.borrow().iter().any(Option::is_some)
    }

    /// Every tunnel image has settled and none produced a texture.
    pub fn tunnel_failed(&self) -> bool {
        let slots = self.tunnel.borrow();
        self.tunnel_settled.get() >= slots.len() && !slots.iter().any(Option::is_some)
    }

    /// Texture for a tunnel slot, or the first loaded one while that slot's
    /// image is still in flight.
    pub fn tunnel(&self, index: usize) -> Option<WebGlTexture> {
        let slots = self.tunnel.borrow();
        slots
            .get(index)
            .and_then(Option::clone)
            .or_else(|| slots.iter().flatten().next().cloned())
    }

    pub fn gallery(&self, index: usize) -> Option<WebGlTexture> {
        self.gallery.borrow().get(index).and_then(Option::clone)
    }

    pub fn about(&self) -> Option<&WebGlTexture> {
        self.about.as_ref()
    }

    /// Detach pending callbacks and free GPU memory.
    pub fn release(&mut self) {
        for img in &self.images {
            img.set_onload(None);
            img.set_onerror(None);
        }
        self.images.clear();
        self.callbacks.clear();

        for slots in [&self.tunnel, &self.gallery] {
            for tex in slots.borrow_mut().drain(..).flatten() {
                self.gl.delete_texture(Some(&tex));
            }
        }
        if let Some(tex) = self.about.take() {
            self.gl.delete_texture(Some(&tex));
        }
    }
}

fn new_texture(gl: &GL) -> Result<WebGlTexture> {
    let tex = gl
        .create_texture()
        .ok_or_else(|| VizError::Js("failed to create texture".into()))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&tex));
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
    Ok(tex)
}

fn upload_image(gl: &GL, img: &HtmlImageElement) -> Result<WebGlTexture> {
    let tex = new_texture(gl)?;
    gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        img,
    )?;
    gl.generate_mipmap(GL::TEXTURE_2D);
    gl.tex_parameteri(
        GL::TEXTURE_2D,
        GL::TEXTURE_MIN_FILTER,
        GL::LINEAR_MIPMAP_LINEAR as i32,
    );
    Ok(tex)
}

/// Rasterize the about copy into an offscreen 2D canvas and upload it.
fn about_texture(gl: &GL, document: &Document) -> Result<WebGlTexture> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| VizError::Js("offscreen canvas is not a canvas".into()))?;
    canvas.set_width(ABOUT_CANVAS_W);
    canvas.set_height(ABOUT_CANVAS_H);
    let ctx = canvas
        .get_context("2d")?
        .ok_or(VizError::MissingGlobal("CanvasRenderingContext2d"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| VizError::MissingGlobal("CanvasRenderingContext2d"))?;

    // One panel unit is 100px. The divider is drawn as geometry.
    let cx = ABOUT_CANVAS_W as f64 / 2.0;
    let row = |y: f64| ABOUT_CANVAS_H as f64 / 2.0 - y * 100.0;
    ctx.clear_rect(0.0, 0.0, ABOUT_CANVAS_W as f64, ABOUT_CANVAS_H as f64);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("bold 120px sans-serif");
    ctx.fill_text(ABOUT_TITLE, cx, row(TITLE_Y as f64))?;

    ctx.set_fill_style_str("#d4d4d8");
    ctx.set_font("40px sans-serif");
    let first = row(BODY_Y as f64) - (ABOUT_BODY.len() as f64 - 1.0) * 32.0;
    for (i, line) in ABOUT_BODY.iter().enumerate() {
        ctx.fill_text(line, cx, first + i as f64 * 64.0)?;
    }

    ctx.set_fill_style_str("#3b82f6");
    ctx.set_font("bold 32px sans-serif");
    ctx.fill_text(ABOUT_CTA, cx, row(CTA_Y as f64))?;

    let tex = new_texture(gl)?;
    gl.tex_image_2d_with_u32_and_u32_and_html_canvas_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        &canvas,
    )?;
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    Ok(tex)
}
