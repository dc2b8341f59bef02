use crate::canvas::CanvasSurface;
use crate::constants::NETWORK_CANVAS_STYLE;
use crate::dom;
use crate::frame::AnimationLoop;
use crate::listeners::{client_position, Listener};
use anyhow::Result;
use folio_core::{Animation, FieldConfig, ParticleField, Theme};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Ambient particle field drawn on a full-viewport background canvas.
#[wasm_bindgen]
pub struct ParticleNetwork {
    mounted: Option<Mounted>,
}

// Drop order matters: the loop stops before the listeners detach.
struct Mounted {
    animation: AnimationLoop,
    _listeners: Vec<Listener>,
    field: Rc<RefCell<ParticleField>>,
}

#[wasm_bindgen]
impl ParticleNetwork {
    /// Mount on `#canvas_id`. Without a 2D context the handle is inert.
    pub fn mount(canvas_id: &str, dark: bool) -> Result<ParticleNetwork, JsValue> {
        Self::try_mount(canvas_id, Theme::from_dark_flag(dark)).map_err(crate::to_js)
    }

    /// Like `mount`, taking `"light"` or `"dark"`.
    #[wasm_bindgen(js_name = mountWithTheme)]
    pub fn mount_with_theme(canvas_id: &str, theme: &str) -> Result<ParticleNetwork, JsValue> {
        let theme: Theme = theme.parse().map_err(|e| crate::to_js(anyhow::Error::from(e)))?;
        Self::try_mount(canvas_id, theme).map_err(crate::to_js)
    }

    /// Apply the page theme; rebuilds the field only when it changes.
    #[wasm_bindgen(js_name = setDark)]
    pub fn set_dark(&self, dark: bool) {
        if let Some(m) = &self.mounted {
            if m.field.borrow_mut().set_theme(Theme::from_dark_flag(dark)) {
                log::info!("[network] theme -> {}", if dark { "dark" } else { "light" });
            }
        }
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.mounted.is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn population(&self) -> usize {
        self.mounted
            .as_ref()
            .map(|m| m.field.borrow().len())
            .unwrap_or(0)
    }

    /// Stop the frame loop and detach every listener.
    pub fn unmount(&mut self) {
        if let Some(m) = self.mounted.take() {
            m.animation.stop();
            log::info!("[network] unmounted");
        }
    }
}

impl ParticleNetwork {
    fn try_mount(canvas_id: &str, theme: Theme) -> Result<Self> {
        let window = dom::window()?;
        let canvas = dom::canvas_by_id(canvas_id)?;
        let Some(ctx) = dom::context_2d(&canvas) else {
            log::warn!("[network] no 2D context on #{}; staying inert", canvas_id);
            return Ok(Self { mounted: None });
        };
        _ = canvas.set_attribute("style", NETWORK_CANVAS_STYLE);

        let viewport = dom::viewport_size(&window)?;
        dom::sync_canvas_to_viewport(&canvas, viewport);
        let field = Rc::new(RefCell::new(ParticleField::new(
            viewport,
            theme,
            FieldConfig::default(),
            rand::random(),
        )));

        let field_resize = field.clone();
        let canvas_resize = canvas.clone();
        let on_resize = Listener::on_window("resize", move |_| {
            let Some(w) = web_sys::window() else { return };
            match dom::viewport_size(&w) {
                Ok(vp) => {
                    dom::sync_canvas_to_viewport(&canvas_resize, vp);
                    field_resize.borrow_mut().resize(vp);
                }
                Err(e) => log::warn!("[network] resize ignored: {:#}", e),
            }
        })?;

        let field_pointer = field.clone();
        let on_pointer = Listener::on_window("pointermove", move |ev| {
            if let Some(pos) = client_position(&ev) {
                field_pointer.borrow_mut().set_pointer(pos);
            }
        })?;

        let animation = AnimationLoop::start(
            "network",
            Animation::new(field.clone(), CanvasSurface::new(canvas, ctx)),
        )?;
        log::info!(
            "[network] mounted on #{} with {} particles ({:?})",
            canvas_id,
            field.borrow().len(),
            theme
        );

        Ok(Self {
            mounted: Some(Mounted {
                animation,
                _listeners: vec![on_resize, on_pointer],
                field,
            }),
        })
    }
}
