use anyhow::{anyhow, Result};
use folio_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window() -> Result<web::Window> {
    web::window().ok_or_else(|| anyhow!("no window"))
}

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn element_by_id(id: &str) -> Result<web::Element> {
    let document = window_document().ok_or_else(|| anyhow!("no document"))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{}", id))
}

pub fn canvas_by_id(id: &str) -> Result<web::HtmlCanvasElement> {
    element_by_id(id)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("#{} is not a canvas: {:?}", id, e))
}

/// 2D context for `canvas`, or `None` when the browser cannot provide one.
pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    match canvas.get_context("2d") {
        Ok(Some(ctx)) => ctx.dyn_into::<web::CanvasRenderingContext2d>().ok(),
        Ok(None) => None,
        Err(e) => {
            log::warn!("getContext('2d') failed: {:?}", e);
            None
        }
    }
}

/// Current `innerWidth` x `innerHeight` in CSS pixels.
pub fn viewport_size(window: &web::Window) -> Result<Viewport> {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Ok(Viewport::new(w, h)?)
}

/// Match the canvas backing store to the viewport, one pixel per CSS pixel.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width().max(1.0) as u32);
    canvas.set_height(viewport.height().max(1.0) as u32);
}

pub fn has_fine_pointer(window: &web::Window) -> bool {
    match window.match_media(crate::constants::FINE_POINTER_QUERY) {
        Ok(Some(mql)) => mql.matches(),
        _ => false,
    }
}
