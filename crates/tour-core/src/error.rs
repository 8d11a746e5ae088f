use thiserror::Error;

/// Failure to turn a raw document into a [`crate::Tour`].
#[derive(Debug, Error)]
pub enum TourError {
    #[error("malformed tour document: {0}")]
    Malformed(String),
    #[error("malformed tour document: {0}")]
    Json(#[from] serde_json::Error),
}

impl TourError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Reasons gyro control could not be turned on. Both are shown to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GyroError {
    #[error("Gyro is not available in this browser.")]
    CapabilityUnavailable,
    #[error("Motion access denied.")]
    PermissionDenied,
}
