//! Route-level auth declaration and the per-request evaluation that the
//! middleware runs.
use axum::{body::Body, http::Request};

use super::error::AuthError;
use super::payload::{self, DEFAULT_PAYLOAD_LIMIT};
use super::request::{AuthRequest, RequestAuth};
use super::strategy::{AccessTokenStrategy, Decision, Reason};
use crate::api::v1::extractors::AuthCtx;

/// How a route treats requests no strategy authenticated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// 401 unless a strategy authenticates.
    #[default]
    Required,
    /// A missing token is fine; a rejected token is a 401.
    Optional,
    /// Always proceed, authenticated or not.
    Try,
}

/// What a route asks for. Resolved against the registry into a `RouteAuth`.
#[derive(Debug, Clone)]
pub struct RouteAuthSpec {
    pub(crate) strategies: Vec<String>,
    pub(crate) payload: bool,
    pub(crate) mode: AuthMode,
    pub(crate) payload_limit: usize,
}

impl RouteAuthSpec {
    pub fn new(strategy: impl Into<String>) -> Self {
        Self::strategies([strategy])
    }

    pub fn strategies<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strategies: names.into_iter().map(Into::into).collect(),
            payload: false,
            mode: AuthMode::default(),
            payload_limit: DEFAULT_PAYLOAD_LIMIT,
        }
    }

    /// Route-level switch for body extraction.
    pub fn payload(mut self, enabled: bool) -> Self {
        self.payload = enabled;
        self
    }

    pub fn mode(mut self, mode: AuthMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn payload_limit(mut self, bytes: usize) -> Self {
        self.payload_limit = bytes;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RouteAuth {
    strategies: Vec<AccessTokenStrategy>,
    payload: bool,
    mode: AuthMode,
    payload_limit: usize,
}

impl RouteAuth {
    pub(crate) fn new(strategies: Vec<AccessTokenStrategy>, spec: &RouteAuthSpec) -> Self {
        Self {
            strategies,
            payload: spec.payload,
            mode: spec.mode,
            payload_limit: spec.payload_limit,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Run the route's strategies in order against `req`.
    ///
    /// The first authenticated result wins and its `AuthCtx` is inserted into
    /// the request extensions. Callback errors abort immediately.
    pub async fn authenticate(&self, req: Request<Body>) -> Result<Request<Body>, AuthError> {
        let (parts, body) = req.into_parts();

        let wants_payload = self
            .strategies
            .iter()
            .any(|s| s.payload_enabled(self.payload));

        let (body, payload) = if wants_payload {
            payload::read_payload(&parts.headers, body, self.payload_limit).await?
        } else {
            (body, None)
        };

        let mut request = AuthRequest::new(parts);
        let mut rejected = false;

        for strategy in &self.strategies {
            match strategy
                .authenticate(payload.as_ref(), &mut request, self.payload)
                .await?
            {
                Decision::Authenticated(ctx) => {
                    tracing::debug!(strategy = %ctx.strategy, "request authenticated");
                    return Ok(rebuild(request, body, Some(ctx)));
                }
                Decision::Unauthenticated(reason) => {
                    rejected |= reason == Reason::Rejected;
                    // Credentials written by a rejecting callback must not leak
                    // into the next strategy.
                    request.auth = RequestAuth::default();
                }
            }
        }

        match self.mode {
            AuthMode::Required => Err(AuthError::Unauthorized),
            AuthMode::Optional if rejected => Err(AuthError::Unauthorized),
            AuthMode::Optional | AuthMode::Try => Ok(rebuild(request, body, None)),
        }
    }
}

fn rebuild(request: AuthRequest, body: Body, ctx: Option<AuthCtx>) -> Request<Body> {
    let (mut parts, _) = request.into_parts();
    if let Some(ctx) = ctx {
        parts.extensions.insert(ctx);
    }
    Request::from_parts(parts, body)
}
