use anyhow::{anyhow, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// An event listener that detaches itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(
                event,
                callback.as_ref().unchecked_ref::<js_sys::Function>(),
            )
            .map_err(|e| anyhow!("addEventListener({}) failed: {:?}", event, e))?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Listen for `event` on the window.
    pub fn on_window(
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self> {
        let window = crate::dom::window()?;
        Self::attach(window.as_ref(), event, handler)
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref::<js_sys::Function>(),
        );
    }
}

/// Client coordinates of a mouse/pointer event.
#[inline]
pub fn client_position(ev: &web::Event) -> Option<glam::DVec2> {
    ev.dyn_ref::<web::MouseEvent>()
        .map(|m| glam::DVec2::new(m.client_x() as f64, m.client_y() as f64))
}
