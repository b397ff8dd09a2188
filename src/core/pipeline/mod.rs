//! The seven-stage pipeline: latches, stage functions, and trace rendering.

/// The shared latch shape and the `Stage` enum that indexes it.
pub mod latch;

/// One function per pipeline stage.
pub mod stages;

/// Per-cycle trace rendering, shared by `display` mode and the final dump.
pub mod trace;

pub use latch::{Latch, Stage};
