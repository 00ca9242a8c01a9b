//! Simple event bus for decoupled communication between the engine and
//! the renderer.
//!
//! The bus is single-threaded (WASM constraint) and uses interior mutability
//! via RefCell. Events are buffered and drained by the renderer on each frame.
//! The tick callback holds a clone, so it can publish without touching the
//! engine.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use term_types::event::EngineEvent;

/// Shared event bus, cheap to clone.
#[derive(Clone, Debug)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<EngineEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Queue `event`. A `Tick` replaces a `Tick` still waiting at the back
    /// of the queue, so a run of undrained ticks collapses to the latest.
    pub fn emit(&self, event: EngineEvent) {
        let mut queue = self.inner.borrow_mut();
        if let (EngineEvent::Tick { .. }, Some(EngineEvent::Tick { .. })) = (&event, queue.back()) {
            queue.pop_back();
        }
        queue.push_back(event);
    }

    /// Drain all pending events. Called by the renderer.
    pub fn drain(&self) -> Vec<EngineEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
