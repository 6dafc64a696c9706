/// Convenience result type used across the overlay engine.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Top-level error taxonomy used by boundary APIs.
///
/// The per-frame resolution path never produces these: missing data and unresolved
/// references degrade to an empty overlay instead.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// Invalid report data (steps, colors, coordinates, frame rate).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid inputs handed to resolution or coordinate mapping.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Errors when serializing or deserializing report documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    /// Build a [`OverlayError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`OverlayError::Resolution`] value.
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Build a [`OverlayError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
