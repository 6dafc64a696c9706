//! Report documents: the JSON model, category tags and problem helpers.

/// Guideline category tags and their gating policy.
pub mod category;
/// Serde model of the report document.
pub mod model;
/// Problem ranking and per-step outcomes.
pub mod problem;
