//! Coordinate mapping and renderer-agnostic draw descriptors.

/// Guideline draw descriptors.
pub mod descriptor;
/// Normalized to container pixel mapping.
pub mod mapper;
/// Per-frame skeleton overlay.
pub mod skeleton;
