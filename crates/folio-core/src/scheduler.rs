//! Cancellable repeating-frame tasks.
//!
//! A `LoopHandle` is the start/stop switch shared between whoever drives
//! frames (requestAnimationFrame on the web, `ManualLoop` in tests) and
//! whoever owns the component. Stopping is terminal: a stopped loop never
//! runs another frame.

use crate::surface::Surface;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
    state: Rc<Cell<LoopState>>,
    frames: Rc<Cell<u64>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle -> Running. Returns false if the loop was already stopped.
    pub fn start(&self) -> bool {
        match self.state.get() {
            LoopState::Stopped => false,
            _ => {
                self.state.set(LoopState::Running);
                true
            }
        }
    }

    pub fn stop(&self) {
        self.state.set(LoopState::Stopped);
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.get() == LoopState::Running
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }

    #[inline]
    pub fn record_frame(&self) {
        self.frames.set(self.frames.get() + 1);
    }
}

/// Work done once per display frame.
pub trait FrameTask {
    fn frame(&mut self);
}

impl<F: FnMut()> FrameTask for F {
    fn frame(&mut self) {
        self()
    }
}

/// A simulation that advances and renders one frame at a time.
pub trait Simulation {
    fn step(&mut self, surface: &mut dyn Surface);
    fn population(&self) -> usize;
}

/// Binds a shared simulation to the surface it draws on. The simulation is
/// shared so input listeners can mutate it between frames.
pub struct Animation<Sim, S> {
    pub sim: Rc<RefCell<Sim>>,
    pub surface: S,
}

impl<Sim: Simulation, S: Surface> Animation<Sim, S> {
    pub fn new(sim: Rc<RefCell<Sim>>, surface: S) -> Self {
        Self { sim, surface }
    }
}

impl<Sim: Simulation, S: Surface> FrameTask for Animation<Sim, S> {
    fn frame(&mut self) {
        self.sim.borrow_mut().step(&mut self.surface);
    }
}

/// Drives a task by hand, one frame per `step`.
pub struct ManualLoop<T> {
    task: T,
    handle: LoopHandle,
}

impl<T: FrameTask> ManualLoop<T> {
    pub fn new(task: T) -> Self {
        let handle = LoopHandle::new();
        handle.start();
        Self { task, handle }
    }

    #[inline]
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    #[inline]
    pub fn task(&self) -> &T {
        &self.task
    }

    #[inline]
    pub fn task_mut(&mut self) -> &mut T {
        &mut self.task
    }

    /// Run one frame if the loop is still running.
    pub fn step(&mut self) -> bool {
        if !self.handle.is_running() {
            return false;
        }
        self.task.frame();
        self.handle.record_frame();
        true
    }

    /// Run up to `n` frames, stopping early if the handle is stopped.
    pub fn run(&mut self, n: usize) -> usize {
        let mut ran = 0;
        while ran < n && self.step() {
            ran += 1;
        }
        ran
    }
}
