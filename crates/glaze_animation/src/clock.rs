//! Run clock and frame registration
//!
//! The [`Clock`] turns host frame timestamps (milliseconds) into scaled
//! elapsed run time. Frames come from a [`FrameSource`], the host's
//! "request animation frame" capability: the clock keeps at most one pending
//! registration and ignores frames delivered without one.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashSet;

/// Handle of one pending frame registration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Host capability that schedules the next frame tick
pub trait FrameSource {
    /// Register interest in the next frame
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a registration that has not been delivered yet
    fn cancel_frame(&mut self, token: FrameToken);

    /// Called when the frame for `token` is being processed
    fn frame_delivered(&mut self, _token: FrameToken) {}
}

#[derive(Debug, Default)]
struct ManualFramesInner {
    next_token: u64,
    pending: FxHashSet<FrameToken>,
    requested: usize,
    cancelled: usize,
}

/// Frame source for headless hosts and tests.
///
/// Clones share state, so a test can keep one handle and give another to
/// the orchestrator.
#[derive(Clone, Debug, Default)]
pub struct ManualFrames {
    inner: Rc<RefCell<ManualFramesInner>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations not yet delivered or cancelled
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.inner.borrow().pending.contains(&token)
    }

    /// Total registrations ever requested
    pub fn requested_count(&self) -> usize {
        self.inner.borrow().requested
    }

    /// Total registrations cancelled before delivery
    pub fn cancelled_count(&self) -> usize {
        self.inner.borrow().cancelled
    }
}

impl FrameSource for ManualFrames {
    fn request_frame(&mut self) -> FrameToken {
        let mut inner = self.inner.borrow_mut();
        let token = FrameToken(inner.next_token);
        inner.next_token += 1;
        inner.requested += 1;
        inner.pending.insert(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let mut inner = self.inner.borrow_mut();
        if inner.pending.remove(&token) {
            inner.cancelled += 1;
        }
    }

    fn frame_delivered(&mut self, token: FrameToken) {
        self.inner.borrow_mut().pending.remove(&token);
    }
}

/// Converts frame timestamps into scaled elapsed time.
///
/// `elapsed = base + (timestamp - origin) * speed`, where `base` is the time
/// accumulated before the current segment. A segment starts on `start`,
/// `resume` and `seek`; its origin is the first timestamp delivered after.
/// A speed change splits the segment at the last delivered timestamp so
/// elapsed time stays continuous.
pub struct Clock {
    source: Box<dyn FrameSource>,
    frame: Option<FrameToken>,
    origin: Option<f64>,
    last_timestamp: Option<f64>,
    base: f64,
    elapsed: f64,
    speed: f64,
    running: bool,
}

impl Clock {
    pub fn new(source: Box<dyn FrameSource>, speed: f64) -> Self {
        Self {
            source,
            frame: None,
            origin: None,
            last_timestamp: None,
            base: 0.0,
            elapsed: 0.0,
            speed,
            running: false,
        }
    }

    /// Begin a new run from zero, anchored at the next delivered frame
    pub fn start(&mut self) {
        self.base = 0.0;
        self.elapsed = 0.0;
        self.origin = None;
        self.last_timestamp = None;
        self.running = true;
        self.request_frame();
    }

    /// Begin a new run from zero, anchored at `timestamp`
    pub fn restart_at(&mut self, timestamp: f64) {
        self.start();
        self.origin = Some(timestamp);
    }

    /// Scaled elapsed time at `timestamp`
    pub fn tick(&mut self, timestamp: f64) -> f64 {
        if !self.running {
            return self.elapsed;
        }
        let origin = *self.origin.get_or_insert(timestamp);
        self.last_timestamp = Some(timestamp);
        self.elapsed = self.base + (timestamp - origin).max(0.0) * self.speed;
        self.elapsed
    }

    /// Freeze advancement, keeping the accumulated elapsed time
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.base = self.elapsed;
        self.origin = None;
        self.running = false;
        self.cancel();
    }

    /// Continue from the preserved elapsed time
    pub fn resume(&mut self) {
        if self.running {
            return;
        }
        self.base = self.elapsed;
        self.origin = None;
        self.running = true;
        self.request_frame();
    }

    /// Jump to `elapsed` and re-anchor at the next delivered frame
    pub fn seek(&mut self, elapsed: f64) {
        self.base = elapsed;
        self.elapsed = elapsed;
        self.origin = None;
    }

    /// Change the multiplier; applies from the next tick on
    pub fn set_speed(&mut self, speed: f64) {
        if speed == self.speed {
            return;
        }
        if let (true, Some(_), Some(last)) = (self.running, self.origin, self.last_timestamp) {
            self.base = self.elapsed;
            self.origin = Some(last);
        }
        self.speed = speed;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a frame registration is outstanding
    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// Register for the next frame unless a registration is outstanding
    pub fn request_frame(&mut self) {
        if self.frame.is_none() {
            self.frame = Some(self.source.request_frame());
        }
    }

    /// Consume the pending registration for the frame being processed.
    ///
    /// Returns `false` when no frame was registered; the tick must be ignored.
    pub fn take_frame(&mut self) -> bool {
        match self.frame.take() {
            Some(token) => {
                self.source.frame_delivered(token);
                true
            }
            None => false,
        }
    }

    /// Deregister the pending frame. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(token) = self.frame.take() {
            self.source.cancel_frame(token);
        }
    }

    /// Cancel and rewind to zero
    pub fn reset(&mut self) {
        self.cancel();
        self.running = false;
        self.base = 0.0;
        self.elapsed = 0.0;
        self.origin = None;
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("frame", &self.frame)
            .field("origin", &self.origin)
            .field("last_timestamp", &self.last_timestamp)
            .field("base", &self.base)
            .field("elapsed", &self.elapsed)
            .field("speed", &self.speed)
            .field("running", &self.running)
            .finish()
    }
}
