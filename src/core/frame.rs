use std::cell::Cell;
use std::rc::Rc;

/// Cloneable handle used to coalesce redraw requests.
///
/// Interaction handlers and data updates set the pending flag; the chart's
/// `tick` swaps it back to false and runs a single resolve-and-render pass,
/// so any number of events between ticks collapse into one frame. All
/// mutation happens on one thread; the handle is `Rc<Cell<_>>` and `!Send`.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: Rc<Cell<bool>>,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_frame(&self) {
        self.pending.set(true);
    }

    /// Returns whether a frame was pending and clears the flag.
    #[must_use]
    pub fn take_pending(&self) -> bool {
        self.pending.replace(false)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}
