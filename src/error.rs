use thiserror::Error;

/// Failures surfaced while setting a lightbox up. Event handling never fails.
#[derive(Debug, Error)]
pub enum LightboxError {
    #[error("invalid lightbox options: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("selector `{selector}` could not be evaluated: {reason}")]
    Selector { selector: String, reason: String },
    #[error("could not bind `{event}` listener: {reason}")]
    Listener { event: &'static str, reason: String },
    #[error("no document available to attach to")]
    NoDocument,
}
