use thiserror::Error;
use tower::BoxError;

/// Raised synchronously while building or registering a strategy.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("accessTokenKeyName must be a non-empty string")]
    MissingKeyName,

    #[error("validateFunc is required")]
    MissingValidateFunc,

    #[error("strategy name must be a non-empty string")]
    MissingName,

    #[error("unknown authentication scheme: {0}")]
    UnknownScheme(String),

    #[error("authentication strategy {0} already defined")]
    DuplicateStrategy(String),

    #[error("unknown authentication strategy: {0}")]
    UnknownStrategy(String),

    #[error("route auth must name at least one strategy")]
    NoStrategies,
}

/// Per-request failures that are not a plain "unauthenticated".
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("validation callback failed in strategy {strategy}: {source}")]
    Callback {
        strategy: String,
        #[source]
        source: BoxError,
    },

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload too large or unreadable")]
    Read,

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
