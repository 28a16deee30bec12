use thiserror::Error;

/// Failure to measure the rendering surface.
///
/// The controller never propagates this to its host: it logs it and renders the full text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasureError {
    #[error("measurement unavailable: {reason}")]
    Unavailable { reason: String },
}

impl MeasureError {
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AnchorError {
    #[error("invalid anchor pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
