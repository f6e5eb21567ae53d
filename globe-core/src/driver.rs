/// Frame scheduling abstraction
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::GlobeError;

/// Something redrawn once per animation frame
pub trait FrameSink {
    fn on_frame(&mut self, timestamp_ms: f64);
}

/// Host-provided ticking source.
///
/// Once started a driver keeps calling the sink until the page goes away;
/// there is no stop operation.
pub trait FrameDriver {
    fn start(&mut self, sink: Rc<RefCell<dyn FrameSink>>) -> Result<(), GlobeError>;
}

/// Deterministic driver that only advances when stepped
pub struct ManualDriver {
    frame_interval_ms: f64,
    now_ms: f64,
    frames: u64,
    sink: Option<Rc<RefCell<dyn FrameSink>>>,
}

impl ManualDriver {
    pub fn new(frame_interval_ms: f64) -> Self {
        Self {
            frame_interval_ms,
            now_ms: 0.0,
            frames: 0,
            sink: None,
        }
    }

    /// Deliver `count` frames to the started sink
    pub fn step(&mut self, count: u32) {
        let Some(sink) = &self.sink else {
            return;
        };
        for _ in 0..count {
            self.now_ms += self.frame_interval_ms;
            self.frames += 1;
            sink.borrow_mut().on_frame(self.now_ms);
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

impl Default for ManualDriver {
    fn default() -> Self {
        Self::new(1000.0 / 60.0)
    }
}

impl FrameDriver for ManualDriver {
    fn start(&mut self, sink: Rc<RefCell<dyn FrameSink>>) -> Result<(), GlobeError> {
        self.sink = Some(sink);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        stamps: Vec<f64>,
    }

    impl FrameSink for Recorder {
        fn on_frame(&mut self, timestamp_ms: f64) {
            self.stamps.push(timestamp_ms);
        }
    }

    #[test]
    fn test_step_before_start_is_noop() {
        let mut driver = ManualDriver::default();
        driver.step(5);
        assert_eq!(driver.frames(), 0);
    }

    #[test]
    fn test_manual_driver_ticks_in_order() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut driver = ManualDriver::new(10.0);
        driver.start(recorder.clone()).unwrap();

        driver.step(3);
        assert_eq!(recorder.borrow().stamps, vec![10.0, 20.0, 30.0]);
        assert_eq!(driver.frames(), 3);
        assert_eq!(driver.now_ms(), 30.0);
    }
}
