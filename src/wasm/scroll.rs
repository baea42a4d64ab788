use web_sys::{Document, Window};

use crate::progress::{ProgressSource, ScrollProgress, VirtualScroll};

/// Seconds the virtual container takes to settle on a wheel target.
const VIRTUAL_DAMPING: f32 = 1.2;
/// Pixels per wheel "line" when the browser reports line deltas.
const LINE_HEIGHT_PX: f64 = 16.0;

/// Reads progress straight off the document scrollbar.
pub struct NativeScroll {
    window: Window,
    document: Document,
}

impl NativeScroll {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn max_offset(&self) -> f64 {
        let scroll_height = self
            .document
            .document_element()
            .map(|el| el.scroll_height() as f64)
            .unwrap_or(0.0);
        scroll_height - viewport_height(&self.window)
    }
}

impl ProgressSource for NativeScroll {
    fn sample(&mut self, _dt: f32) -> ScrollProgress {
        let offset = self.window.scroll_y().unwrap_or(0.0);
        ScrollProgress::from_offset(offset, self.max_offset())
    }

    fn scroll_to(&mut self, progress: ScrollProgress) {
        let y = progress.get() as f64 * self.max_offset().max(0.0);
        self.window.scroll_to_with_x_and_y(0.0, y);
    }
}

pub enum ScrollInput {
    Native(NativeScroll),
    Virtual(VirtualScroll),
}

impl ScrollInput {
    pub fn native(window: Window, document: Document) -> Self {
        ScrollInput::Native(NativeScroll::new(window, document))
    }

    pub fn virtual_for(viewport_h: f64, pages: f32) -> Self {
        ScrollInput::Virtual(VirtualScroll::new(
            scroll_extent(viewport_h, pages),
            VIRTUAL_DAMPING,
        ))
    }

    /// Feed a wheel event. Native scrolling ignores it; the browser already
    /// moves the page.
    pub fn wheel(&mut self, delta_y: f64, delta_mode: u32, viewport_h: f64) {
        if let ScrollInput::Virtual(v) = self {
            let px = match delta_mode {
                web_sys::WheelEvent::DOM_DELTA_LINE => delta_y * LINE_HEIGHT_PX,
                web_sys::WheelEvent::DOM_DELTA_PAGE => delta_y * viewport_h,
                _ => delta_y,
            };
            v.scroll_by(px as f32);
        }
    }

    pub fn resize(&mut self, viewport_h: f64, pages: f32) {
        if let ScrollInput::Virtual(v) = self {
            v.set_extent(scroll_extent(viewport_h, pages));
        }
    }
}

impl ProgressSource for ScrollInput {
    fn sample(&mut self, dt: f32) -> ScrollProgress {
        match self {
            ScrollInput::Native(n) => n.sample(dt),
            ScrollInput::Virtual(v) => v.sample(dt),
        }
    }

    fn scroll_to(&mut self, progress: ScrollProgress) {
        match self {
            ScrollInput::Native(n) => n.scroll_to(progress),
            ScrollInput::Virtual(v) => v.scroll_to(progress),
        }
    }

    fn moves_overlays(&self) -> bool {
        match self {
            ScrollInput::Native(n) => n.moves_overlays(),
            ScrollInput::Virtual(v) => v.moves_overlays(),
        }
    }
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

/// Scrollable distance of `pages` viewports of content.
fn scroll_extent(viewport_h: f64, pages: f32) -> f32 {
    (viewport_h * (pages as f64 - 1.0)).max(1.0) as f32
}
