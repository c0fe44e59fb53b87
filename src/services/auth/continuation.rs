//! One-shot result handle given to validation callbacks.
//!
//! `Continuation` is consumed by every resolving method, so a callback can
//! resolve it at most once. `Outcome` can only be built by a `Continuation`,
//! so a callback returning `Ok(outcome)` resolved it exactly once.
use super::request::{Credentials, RequestAuth};

#[derive(Debug)]
#[must_use = "a continuation must be resolved with succeed/proceed/fail"]
pub struct Continuation {
    _private: (),
}

#[derive(Debug, PartialEq)]
#[must_use]
pub struct Outcome(Resolution);

#[derive(Debug, PartialEq)]
enum Resolution {
    Continued(Option<Credentials>),
    Failed,
}

impl Continuation {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }

    /// Authentication succeeds. `Some` credentials replace whatever the
    /// callback wrote on the request; `None` keeps it.
    pub fn succeed(self, credentials: Option<Credentials>) -> Outcome {
        Outcome(Resolution::Continued(credentials))
    }

    pub fn continue_with(self, credentials: impl Into<Credentials>) -> Outcome {
        self.succeed(Some(credentials.into()))
    }

    /// Succeed with the credentials already set on `request.auth`.
    pub fn proceed(self) -> Outcome {
        self.succeed(None)
    }

    pub fn fail(self) -> Outcome {
        Outcome(Resolution::Failed)
    }
}

impl Outcome {
    pub fn is_continued(&self) -> bool {
        matches!(self.0, Resolution::Continued(_))
    }

    /// Apply the outcome to the request auth context.
    ///
    /// Returns `true` when the request is authenticated.
    pub(crate) fn resolve(self, auth: &mut RequestAuth) -> bool {
        match self.0 {
            Resolution::Continued(credentials) => {
                if let Some(credentials) = credentials {
                    set_credentials(auth, credentials);
                }
                true
            }
            Resolution::Failed => false,
        }
    }
}

fn set_credentials(auth: &mut RequestAuth, credentials: Credentials) {
    auth.credentials = Some(credentials);
}
