use anyhow::{anyhow, Result};
use folio_core::constants::FPS_LOG_INTERVAL_FRAMES;
use folio_core::{FrameTask, LoopHandle};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `FrameTask` driven by requestAnimationFrame until stopped or dropped.
pub struct AnimationLoop {
    name: &'static str,
    handle: LoopHandle,
    pending: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
}

impl AnimationLoop {
    pub fn start<T: FrameTask + 'static>(name: &'static str, mut task: T) -> Result<Self> {
        let window = crate::dom::window()?;
        let handle = LoopHandle::new();
        handle.start();
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: TickSlot = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let handle_tick = handle.clone();
        let pending_tick = pending.clone();
        let mut window_start = Instant::now();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if !handle_tick.is_running() {
                return;
            }
            task.frame();
            handle_tick.record_frame();

            let frames = handle_tick.frames();
            if frames % FPS_LOG_INTERVAL_FRAMES == 0 {
                let secs = window_start.elapsed().as_secs_f64();
                if secs > 0.0 {
                    log::debug!(
                        "[{}] {:.1} fps over last {} frames",
                        name,
                        FPS_LOG_INTERVAL_FRAMES as f64 / secs,
                        FPS_LOG_INTERVAL_FRAMES
                    );
                }
                window_start = Instant::now();
            }

            if let Some(w) = web::window() {
                if let Some(cb) = tick_clone.borrow().as_ref() {
                    let next = w.request_animation_frame(cb.as_ref().unchecked_ref::<js_sys::Function>());
                    if let Ok(id) = next {
                        pending_tick.set(Some(id));
                    }
                }
            }
        }) as Box<dyn FnMut()>));

        let first = match tick.borrow().as_ref() {
            Some(cb) => window
                .request_animation_frame(cb.as_ref().unchecked_ref::<js_sys::Function>())
                .map_err(|e| anyhow!("requestAnimationFrame failed: {:?}", e))?,
            None => return Err(anyhow!("frame callback missing")),
        };
        pending.set(Some(first));
        log::debug!("[{}] animation loop started", name);

        Ok(Self {
            name,
            handle,
            pending,
            tick,
        })
    }

    /// Cancel the pending frame and release the callback. Idempotent.
    pub fn stop(&self) {
        if !self.handle.is_running() && self.tick.borrow().is_none() {
            return;
        }
        self.handle.stop();
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // Breaks the closure -> slot -> closure cycle.
        self.tick.borrow_mut().take();
        log::debug!(
            "[{}] animation loop stopped after {} frames",
            self.name,
            self.handle.frames()
        );
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
