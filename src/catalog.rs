/// Per-category, step-ordered index over report guidelines.
pub mod index;
