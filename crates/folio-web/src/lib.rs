#![cfg(target_arch = "wasm32")]
//! Browser bindings for the folio effects.
//!
//! Each effect is a `#[wasm_bindgen]` handle with an explicit lifecycle:
//! `mount` acquires the DOM nodes, registers listeners and starts its frame
//! loop; `unmount` (or dropping/`free()`-ing the handle) cancels the pending
//! frame and detaches every listener.

use wasm_bindgen::prelude::*;

mod canvas;
mod constants;
mod dom;
mod frame;
mod listeners;
mod network;
mod timeline;
mod trail;

pub use network::ParticleNetwork;
pub use timeline::ExperienceTimeline;
pub use trail::CursorTrail;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // The logger accepts everything; the facade's max level does the filtering.
    console_log::init_with_level(log::Level::Trace).ok();
    log::set_max_level(log::LevelFilter::Info);
    log::info!("folio-web starting");
    Ok(())
}

/// Raise the console log level, e.g. `setLogLevel("debug")` for frame stats.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level: log::LevelFilter = level
        .parse()
        .map_err(|_| JsValue::from_str(&format!("unknown log level {:?}", level)))?;
    log::set_max_level(level);
    Ok(())
}

pub(crate) fn to_js(e: anyhow::Error) -> JsValue {
    log::error!("{:#}", e);
    JsValue::from_str(&format!("{:#}", e))
}
