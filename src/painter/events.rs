//! Progress notifications and cooperative cancellation

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Stage the painter is in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaintPhase {
    /// Canvases are being set up
    Preparing,
    /// The gradient field of a generation is being built
    Blurring,
    /// Strokes are being placed
    Tracing,
    /// Occupancy boundaries and skeletons are being exported
    Shapes,
    /// The run stopped on request
    Cancelled,
}

impl Display for PaintPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Preparing => "preparing",
            Self::Blurring => "blurring",
            Self::Tracing => "tracing",
            Self::Shapes => "shapes",
            Self::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Receiver of painter progress notifications
///
/// Both methods default to doing nothing.
pub trait PaintObserver {
    /// A generation is starting
    fn on_generation(&mut self, _generation: usize) {}

    /// The phase changed during `generation`
    fn on_status(&mut self, _phase: PaintPhase, _generation: usize) {}
}

/// Observer ignoring every notification
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl PaintObserver for NoopObserver {}

/// Shared stop flag checked once before each placement
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every clone observes it
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
