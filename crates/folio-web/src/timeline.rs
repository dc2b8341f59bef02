use crate::dom;
use crate::listeners::Listener;
use anyhow::{anyhow, Result};
use folio_core::{TimelineConfig, TimelinePath, TimelineReveal};
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Scroll-revealed SVG path through the experience section's milestone markers.
#[wasm_bindgen]
pub struct ExperienceTimeline {
    mounted: Option<Mounted>,
}

struct Mounted {
    _settle: SettleTimer,
    _listeners: Vec<Listener>,
    state: Rc<RefCell<TimelineState>>,
}

struct TimelineState {
    container: web::Element,
    path_el: web::SvgPathElement,
    marker_selector: String,
    reveal: TimelineReveal,
}

impl TimelineState {
    /// Marker centers relative to the container's top-left corner.
    fn anchors(&self) -> Vec<DVec2> {
        let origin = self.container.get_bounding_client_rect();
        let Ok(markers) = self.container.query_selector_all(&self.marker_selector) else {
            return Vec::new();
        };
        (0..markers.length())
            .filter_map(|i| markers.get(i))
            .filter_map(|node| node.dyn_into::<web::Element>().ok())
            .map(|el| {
                let r = el.get_bounding_client_rect();
                DVec2::new(
                    r.left() + r.width() * 0.5 - origin.left(),
                    r.top() + r.height() * 0.5 - origin.top(),
                )
            })
            .collect()
    }

    /// Rebuild the path from live marker positions and re-measure it.
    fn rebuild(&mut self) {
        let anchors = self.anchors();
        let Some(path) = TimelinePath::through(&anchors) else {
            log::debug!("[timeline] {} anchor(s); no path", anchors.len());
            _ = self.path_el.remove_attribute("d");
            self.reveal.set_total_length(0.0);
            return;
        };
        _ = self.path_el.set_attribute("d", &path.to_svg_path_data());
        let measured = self.path_el.get_total_length() as f64;
        let length = if measured > 0.0 {
            measured
        } else {
            path.approximate_length()
        };
        self.reveal.set_total_length(length);
        _ = self
            .path_el
            .set_attribute("stroke-dasharray", &format!("{}", length));
        self.apply_offset(self.reveal.current_offset());
        log::debug!(
            "[timeline] path through {} anchors, length {:.1}",
            anchors.len(),
            length
        );
    }

    fn on_scroll(&mut self) {
        let Some(window) = web::window() else { return };
        let viewport_height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let rect = self.container.get_bounding_client_rect();
        let offset = self
            .reveal
            .on_scroll(viewport_height, rect.top(), rect.height());
        self.apply_offset(offset);
    }

    fn apply_offset(&self, offset: f64) {
        _ = self
            .path_el
            .set_attribute("stroke-dashoffset", &format!("{}", offset));
    }
}

/// One-shot timeout cleared on drop.
struct SettleTimer {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl SettleTimer {
    fn schedule(delay_ms: i32, callback: impl FnMut() + 'static) -> Result<Self> {
        let window = dom::window()?;
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref::<js_sys::Function>(),
                delay_ms,
            )
            .map_err(|e| anyhow!("setTimeout failed: {:?}", e))?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for SettleTimer {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.id);
        }
    }
}

#[wasm_bindgen]
impl ExperienceTimeline {
    /// Mount on `#container_id`, drawing into the `<path id=path_id>` and
    /// threading it through every element matching `marker_selector`.
    pub fn mount(
        container_id: &str,
        path_id: &str,
        marker_selector: &str,
    ) -> Result<ExperienceTimeline, JsValue> {
        Self::try_mount(container_id, path_id, marker_selector).map_err(crate::to_js)
    }

    /// Re-read marker positions, e.g. after the section content changed.
    pub fn refresh(&self) {
        if let Some(m) = &self.mounted {
            let mut state = m.state.borrow_mut();
            state.rebuild();
            state.on_scroll();
        }
    }

    /// Current reveal fraction in [0, 1].
    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f64 {
        self.mounted
            .as_ref()
            .map(|m| m.state.borrow().reveal.progress())
            .unwrap_or(0.0)
    }

    pub fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            log::info!("[timeline] unmounted");
        }
    }
}

impl ExperienceTimeline {
    fn try_mount(container_id: &str, path_id: &str, marker_selector: &str) -> Result<Self> {
        let container = dom::element_by_id(container_id)?;
        let path_el = dom::element_by_id(path_id)?
            .dyn_into::<web::SvgPathElement>()
            .map_err(|e| anyhow!("#{} is not an SVG path: {:?}", path_id, e))?;
        let config = TimelineConfig::default();
        let state = Rc::new(RefCell::new(TimelineState {
            container,
            path_el,
            marker_selector: marker_selector.to_string(),
            reveal: TimelineReveal::new(config),
        }));

        // Fonts and layout need a moment before marker positions are final.
        let state_settle = state.clone();
        let settle = SettleTimer::schedule(config.settle_delay_ms, move || {
            let mut s = state_settle.borrow_mut();
            s.rebuild();
            s.on_scroll();
        })?;

        let state_resize = state.clone();
        let on_resize = Listener::on_window("resize", move |_| {
            let mut s = state_resize.borrow_mut();
            s.rebuild();
            s.on_scroll();
        })?;

        let state_scroll = state.clone();
        let on_scroll = Listener::on_window("scroll", move |_| {
            state_scroll.borrow_mut().on_scroll();
        })?;

        log::info!(
            "[timeline] mounted on #{} (markers: {})",
            container_id,
            marker_selector
        );
        Ok(Self {
            mounted: Some(Mounted {
                _settle: settle,
                _listeners: vec![on_resize, on_scroll],
                state,
            }),
        })
    }
}
