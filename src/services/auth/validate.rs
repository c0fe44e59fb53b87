//! Caller-supplied validation step.
use std::{future::Future, pin::Pin};

use async_trait::async_trait;
use serde_json::Value;
use tower::BoxError;

use super::continuation::{Continuation, Outcome};
use super::request::AuthRequest;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Decides whether an extracted access token is valid.
///
/// Called at most once per request. The callback must resolve `reply` and
/// return the resulting `Outcome`; an `Err` is a server error, not a failed
/// authentication.
#[async_trait]
pub trait ValidateFunc: Send + Sync + 'static {
    async fn validate(
        &self,
        payload: Option<&Value>,
        access_token: &str,
        reply: Continuation,
        request: &mut AuthRequest,
    ) -> Result<Outcome, BoxError>;
}

// Closures:
//
// |payload, token, reply, request| Box::pin(async move { Ok(reply.continue_with(token)) })
#[async_trait]
impl<F> ValidateFunc for F
where
    F: for<'a> Fn(
            Option<&'a Value>,
            &'a str,
            Continuation,
            &'a mut AuthRequest,
        ) -> BoxFuture<'a, Result<Outcome, BoxError>>
        + Send
        + Sync
        + 'static,
{
    async fn validate(
        &self,
        payload: Option<&Value>,
        access_token: &str,
        reply: Continuation,
        request: &mut AuthRequest,
    ) -> Result<Outcome, BoxError> {
        (self)(payload, access_token, reply, request).await
    }
}
