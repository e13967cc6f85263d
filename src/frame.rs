use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Something that can be asked to run one more frame.
///
/// The engine never publishes inline; it asks the host for a frame and
/// publishes when the host calls [`InkEngine::on_frame`](crate::InkEngine::on_frame).
pub trait FrameScheduler: Send {
    fn request_frame(&self);
}

impl FrameScheduler for egui::Context {
    fn request_frame(&self) {
        self.request_repaint();
    }
}

/// Scheduler for hosts that drive frames themselves. Never requests anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFrames;

impl FrameScheduler for NoFrames {
    fn request_frame(&self) {}
}

/// Counts frame requests. Clones share the same counter, so a host (or a
/// test) can keep a handle after giving one to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualFrames {
    requested: Arc<AtomicUsize>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of frames requested so far
    pub fn requests(&self) -> usize {
        self.requested.load(Ordering::SeqCst)
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self) {
        self.requested.fetch_add(1, Ordering::SeqCst);
    }
}

/// Dirty flag in front of a [`FrameScheduler`]: at most one request is
/// outstanding until the next frame is taken.
pub struct FrameCoalescer {
    pending: bool,
    scheduler: Box<dyn FrameScheduler>,
}

impl std::fmt::Debug for FrameCoalescer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCoalescer")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Default for FrameCoalescer {
    fn default() -> Self {
        Self::new(Box::new(NoFrames))
    }
}

impl FrameCoalescer {
    pub fn new(scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            pending: false,
            scheduler,
        }
    }

    /// Note a change. Returns true if this call requested a new frame.
    pub fn mark_dirty(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.scheduler.request_frame();
        true
    }

    /// Consume the pending flag at a frame boundary.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
