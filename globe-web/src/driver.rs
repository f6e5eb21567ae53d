/// `requestAnimationFrame` frame driver
use std::cell::RefCell;
use std::rc::Rc;

use globe_core::{FrameDriver, FrameSink, GlobeError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Calls the sink on every animation frame for the life of the page
pub struct AnimationFrameLoop {
    window: Window,
}

impl AnimationFrameLoop {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameDriver for AnimationFrameLoop {
    fn start(&mut self, sink: Rc<RefCell<dyn FrameSink>>) -> Result<(), GlobeError> {
        // The callback re-requests itself, so it owns a handle to its own
        // slot. The resulting cycle keeps the loop alive until unload.
        let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let next = slot.clone();
        let window = self.window.clone();

        *slot.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            if let Some(callback) = next.borrow().as_ref() {
                if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    log::warn!("Animation frame request failed: {:?}", e);
                }
            }
            sink.borrow_mut().on_frame(timestamp);
        }));

        let first = slot.borrow();
        if let Some(callback) = first.as_ref() {
            self.window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(|e| GlobeError::Dom(format!("{:?}", e)))?;
        }
        Ok(())
    }
}
