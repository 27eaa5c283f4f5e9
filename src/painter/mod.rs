//! Generation scheduling, compositing and run bookkeeping
//!
//! This module contains:
//! - Per-generation profile derivation
//! - Reconstruction error scoring and compositing
//! - The pull-based painter state machine
//! - Progress notifications and cancellation
//! - Region-occupancy tracking

/// Candidate scoring and compositing onto the render
pub mod compositing;
/// Observer notifications and cancellation tokens
pub mod events;
/// Per-stroke pixel ownership
pub mod occupancy;
/// Generation parameter profiles
pub mod profile;
/// Painter state machine
pub mod scheduler;

pub use events::{CancellationToken, NoopObserver, PaintObserver, PaintPhase};
pub use occupancy::OccupancyTracker;
pub use profile::{GenerationProfile, derive_profiles};
pub use scheduler::{Frame, Frames, PaintStep, Painter, PlacementOutcome};
