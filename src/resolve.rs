//! Per-frame guideline resolution and the state it carries between frames.

/// The resolution pass.
pub mod engine;
/// First-reached frames and the idle/default overlay store.
pub mod state;
