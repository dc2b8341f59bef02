use crate::canvas::CanvasSurface;
use crate::constants::TRAIL_CANVAS_STYLE;
use crate::dom;
use crate::frame::AnimationLoop;
use crate::listeners::{client_position, Listener};
use anyhow::Result;
use folio_core::{Animation, CursorTrail as TrailSim, TrailConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Fading sparks following the pointer, drawn above page content.
#[wasm_bindgen]
pub struct CursorTrail {
    mounted: Option<Mounted>,
}

struct Mounted {
    animation: AnimationLoop,
    _pointer: Listener,
    _resize: Listener,
    trail: Rc<RefCell<TrailSim>>,
}

#[wasm_bindgen]
impl CursorTrail {
    /// Mount on `#canvas_id`. Touch-only devices and canvases without a 2D
    /// context get an inert handle.
    pub fn mount(canvas_id: &str) -> Result<CursorTrail, JsValue> {
        Self::try_mount(canvas_id).map_err(crate::to_js)
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.mounted.is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn population(&self) -> usize {
        self.mounted
            .as_ref()
            .map(|m| m.trail.borrow().len())
            .unwrap_or(0)
    }

    pub fn unmount(&mut self) {
        if let Some(m) = self.mounted.take() {
            m.animation.stop();
            log::info!("[trail] unmounted");
        }
    }
}

impl CursorTrail {
    fn try_mount(canvas_id: &str) -> Result<Self> {
        let window = dom::window()?;
        if !dom::has_fine_pointer(&window) {
            log::info!("[trail] no fine pointer; trail disabled");
            return Ok(Self { mounted: None });
        }
        let canvas = dom::canvas_by_id(canvas_id)?;
        let Some(ctx) = dom::context_2d(&canvas) else {
            log::warn!("[trail] no 2D context on #{}; staying inert", canvas_id);
            return Ok(Self { mounted: None });
        };
        _ = canvas.set_attribute("style", TRAIL_CANVAS_STYLE);
        dom::sync_canvas_to_viewport(&canvas, dom::viewport_size(&window)?);

        let trail = Rc::new(RefCell::new(TrailSim::new(
            true,
            TrailConfig::default(),
            rand::random(),
        )));

        let trail_pointer = trail.clone();
        let on_pointer = Listener::on_window("pointermove", move |ev| {
            if let Some(pos) = client_position(&ev) {
                trail_pointer.borrow_mut().spawn_at(pos);
            }
        })?;
        // Resized with the viewport, or clear_rect would miss sparks.
        let canvas_resize = canvas.clone();
        let on_resize = Listener::on_window("resize", move |_| {
            if let Some(Ok(vp)) = web_sys::window().map(|w| dom::viewport_size(&w)) {
                dom::sync_canvas_to_viewport(&canvas_resize, vp);
            }
        })?;

        let animation = AnimationLoop::start(
            "trail",
            Animation::new(trail.clone(), CanvasSurface::new(canvas, ctx)),
        )?;
        log::info!("[trail] mounted on #{}", canvas_id);

        Ok(Self {
            mounted: Some(Mounted {
                animation,
                _pointer: on_pointer,
                _resize: on_resize,
                trail,
            }),
        })
    }
}
