use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, HtmlCanvasElement, HtmlElement, WheelEvent, Window};

use crate::autoscroll::AutoScroll;
use crate::composer::SceneComposer;
use crate::config::{GalleryConfig, SiteConfig, TimelineBoundaries, TunnelConfig};
use crate::content::{GALLERY_IMAGES, TUNNEL_IMAGES};
use crate::error::{Result, VizError};
use crate::overlay::OverlaySync;
use crate::progress::ProgressSource;
use crate::scene::SceneGraph;
use crate::stats::FrameStats;
use crate::timeline::Timeline;

use super::dom::{self, OverlayDom};
use super::render::Renderer;
use super::scroll::{viewport_height, viewport_width, ScrollInput};
use super::textures::TextureSet;

/// Longest frame step fed to the simulation, in seconds. Keeps a tab that
/// was in the background from teleporting the tunnel.
const MAX_DT: f64 = 0.1;
const MAX_PIXEL_RATIO: f64 = 2.0;
const STATS_WINDOW: usize = 120;

pub struct App {
    window: Window,
    canvas: HtmlCanvasElement,
    pages: f32,
    renderer: Renderer,
    textures: TextureSet,
    composer: SceneComposer,
    graph: SceneGraph,
    overlay: OverlaySync,
    overlay_dom: OverlayDom,
    scroll: ScrollInput,
    auto_scroll: Option<AutoScroll>,
    stats: Option<FrameStats>,
    last_ts: Option<f64>,
    tiles_attached: bool,
    tunnel_warned: bool,
}

impl App {
    /// Build the scene, start loading assets, and kick off the frame loop.
    pub fn mount(
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        config: SiteConfig,
    ) -> Result<AppHandle> {
        let bounds = TimelineBoundaries::default();
        let timeline = Timeline::new(bounds)?;
        let tunnel_cfg = TunnelConfig::default();
        let gallery_cfg = GalleryConfig::default();

        let composer = SceneComposer::new(
            timeline,
            tunnel_cfg,
            gallery_cfg,
            TUNNEL_IMAGES.len(),
            GALLERY_IMAGES.len(),
            config.seed,
        );
        let renderer = Renderer::new(&canvas, &gallery_cfg, composer.panels())?;
        let textures = TextureSet::load(renderer.gl(), &document, TUNNEL_IMAGES, GALLERY_IMAGES)?;

        let mut graph = SceneGraph::new(
            tunnel_cfg.tile_count,
            tunnel_cfg.ribbon_count,
            GALLERY_IMAGES.len(),
            tunnel_cfg.base_fov,
        );
        graph.attach_static();

        let viewport_h = viewport_height(&window);
        let scroll = if config.virtual_scroll {
            if let Some(body) = document.body() {
                body.style().set_property("overflow", "hidden")?;
            }
            ScrollInput::virtual_for(viewport_h, config.pages)
        } else {
            match document
                .get_element_by_id("scroll-space")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                Some(space) => space
                    .style()
                    .set_property("height", &format!("{}vh", config.pages * 100.0))?,
                None => log::warn!("#scroll-space missing; page height left to the stylesheet"),
            }
            ScrollInput::native(window.clone(), document.clone())
        };

        let app = App {
            canvas,
            pages: config.pages,
            renderer,
            textures,
            composer,
            graph,
            overlay: OverlaySync::new(bounds, config.pages, TUNNEL_IMAGES.len()),
            overlay_dom: OverlayDom::bind(&document, TUNNEL_IMAGES.iter().map(|i| i.title).collect()),
            scroll,
            auto_scroll: config.auto_scroll.then(|| AutoScroll::new(&bounds)),
            stats: config.stats.then(|| FrameStats::new(STATS_WINDOW)),
            last_ts: None,
            tiles_attached: false,
            tunnel_warned: false,
            window: window.clone(),
        };

        AppHandle::start(window, app, config.virtual_scroll)
    }

    fn frame(&mut self, ts_ms: f64) -> Result<()> {
        let dt = match self.last_ts {
            Some(last) => ((ts_ms - last) / 1000.0).clamp(0.0, MAX_DT) as f32,
            None => 0.0,
        };
        if let (Some(stats), Some(last)) = (self.stats.as_mut(), self.last_ts) {
            let before = stats.frames();
            stats.record(ts_ms - last);
            if stats.frames() != before && stats.frames() % STATS_WINDOW as u64 == 0 {
                let report = stats.report();
                log::info!(
                    "fps {:.1} (avg {:.1}), frame {:.2} ms, dropped {:.1}%",
                    report.fps,
                    report.avg_fps,
                    report.frame_time_ms,
                    report.dropped_pct
                );
            }
        }
        self.last_ts = Some(ts_ms);

        // One sample per frame; scene and overlays both read it.
        let mut progress = self.scroll.sample(dt);
        if let Some(auto) = self.auto_scroll.as_mut() {
            if let Some(next) = auto.update(progress, ts_ms / 1000.0) {
                self.scroll.scroll_to(next);
                progress = next;
            }
        }

        self.attach_loaded();
        self.composer.compose(progress, dt, &mut self.graph);

        let (width, height) = self.fit_canvas();
        self.renderer.draw(&self.graph, &self.textures, width, height);

        let state = self.overlay.compute(
            progress.get(),
            viewport_height(&self.window) as f32,
            self.scroll.moves_overlays(),
            self.textures.loaded_fraction(),
        );
        self.overlay_dom.apply(&state)
    }

    /// Attach graph slots whose textures have arrived since the last frame.
    fn attach_loaded(&mut self) {
        if !self.tiles_attached && self.textures.tunnel_ready() {
            for i in 0..self.graph.tiles.len() {
                self.graph.attach_tile(i);
            }
            self.tiles_attached = true;
            log::info!("tunnel tiles attached ({})", self.graph.attached_tiles());
        } else if !self.tiles_attached && !self.tunnel_warned && self.textures.tunnel_failed() {
            self.tunnel_warned = true;
            log::warn!("no tunnel image could be loaded; the tunnel shows ribbons only");
        }
        for i in 0..self.graph.panels.len() {
            if self.graph.panels[i].is_none() && self.textures.gallery(i).is_some() {
                self.graph.attach_panel(i, i);
                log::debug!("gallery panel {i} attached");
            }
        }
    }

    /// Match the drawing buffer to the canvas' CSS size.
    fn fit_canvas(&self) -> (u32, u32) {
        let dpr = self.window.device_pixel_ratio().clamp(1.0, MAX_PIXEL_RATIO);
        let mut css_w = self.canvas.client_width() as f64;
        let mut css_h = self.canvas.client_height() as f64;
        if css_w <= 0.0 || css_h <= 0.0 {
            css_w = viewport_width(&self.window);
            css_h = viewport_height(&self.window);
        }
        let width = (css_w * dpr).round().max(1.0) as u32;
        let height = (css_h * dpr).round().max(1.0) as u32;
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        (width, height)
    }

    fn on_resize(&mut self) {
        let (width, height) = self.fit_canvas();
        self.scroll.resize(viewport_height(&self.window), self.pages);
        log::debug!("resized drawing buffer to {width}x{height}");
    }

    fn on_wheel(&mut self, event: &WheelEvent) {
        if let Some(auto) = self.auto_scroll.as_mut() {
            auto.cancel();
        }
        self.scroll.wheel(
            event.delta_y(),
            event.delta_mode(),
            viewport_height(&self.window),
        );
    }

    fn shutdown(&mut self) {
        if let Some(auto) = self.auto_scroll.as_mut() {
            auto.cancel();
        }
        self.textures.release();
        self.renderer.release();
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Owns the running loop and every registered JS callback.
pub struct AppHandle {
    window: Window,
    app: Rc<RefCell<App>>,
    raf_id: Rc<Cell<Option<i32>>>,
    frame_cb: FrameCallback,
    resize_cb: Closure<dyn FnMut()>,
    wheel_cb: Closure<dyn FnMut(WheelEvent)>,
}

fn request_frame(window: &Window, cb: &Closure<dyn FnMut(f64)>) -> Result<i32> {
    Ok(window.request_animation_frame(cb.as_ref().unchecked_ref())?)
}

impl AppHandle {
    fn start(window: Window, app: App, virtual_scroll: bool) -> Result<Self> {
        let app = Rc::new(RefCell::new(app));
        let raf_id = Rc::new(Cell::new(None));

        let resize_cb = {
            let app = app.clone();
            Closure::wrap(Box::new(move || {
                if let Ok(mut app) = app.try_borrow_mut() {
                    app.on_resize();
                }
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

        let wheel_cb = {
            let app = app.clone();
            Closure::wrap(Box::new(move |event: WheelEvent| {
                if virtual_scroll {
                    event.prevent_default();
                }
                if let Ok(mut app) = app.try_borrow_mut() {
                    app.on_wheel(&event);
                }
            }) as Box<dyn FnMut(WheelEvent)>)
        };
        let options = AddEventListenerOptions::new();
        // Only the virtual container needs to swallow wheel events.
        options.set_passive(!virtual_scroll);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel_cb.as_ref().unchecked_ref(),
            &options,
        )?;

        // `f` holds the frame closure so it can re-request itself; `g` is
        // the handle used to start the loop and to drop it on teardown.
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        {
            let app = app.clone();
            let raf_id = raf_id.clone();
            let window = window.clone();
            *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
                raf_id.set(None);
                let result = app.borrow_mut().frame(ts);
                if let Err(err) = result {
                    log::error!("frame failed, stopping render loop: {err}");
                    dom::show_fallback(&err);
                    return;
                }
                if let Some(cb) = f.borrow().as_ref() {
                    match request_frame(&window, cb) {
                        Ok(id) => raf_id.set(Some(id)),
                        Err(err) => log::error!("requestAnimationFrame failed: {err}"),
                    }
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let first = g
            .borrow()
            .as_ref()
            .map(|cb| request_frame(&window, cb))
            .ok_or_else(|| VizError::Js("frame callback missing".into()))??;
        raf_id.set(Some(first));
        log::info!("render loop started");

        Ok(Self {
            window,
            app,
            raf_id,
            frame_cb: g,
            resize_cb,
            wheel_cb,
        })
    }

    /// Cancel the pending frame, unhook listeners, and free GPU resources.
    pub fn teardown(self) {
        if let Some(id) = self.raf_id.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {}", VizError::from(err));
            }
        }
        // Breaks the closure's self-reference so it can be dropped.
        self.frame_cb.borrow_mut().take();

        let listeners: [(&str, &JsValue); 2] = [
            ("resize", self.resize_cb.as_ref()),
            ("wheel", self.wheel_cb.as_ref()),
        ];
        for (kind, cb) in listeners {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback(kind, cb.unchecked_ref())
            {
                log::warn!("failed to remove {kind} listener: {}", VizError::from(err));
            }
        }

        match self.app.try_borrow_mut() {
            Ok(mut app) => app.shutdown(),
            Err(_) => log::warn!("teardown during a frame; GPU resources left to the context"),
        }
    }
}
