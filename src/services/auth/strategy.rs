//! The `access-token` strategy: find the token, hand it to the callback,
//! apply whatever the callback decided.
use std::{fmt, sync::Arc};

use serde_json::Value;
use tower::BoxError;

use super::continuation::{Continuation, Outcome};
use super::error::{AuthError, RegistrationError};
use super::request::AuthRequest;
use super::validate::{BoxFuture, ValidateFunc};
use crate::api::v1::extractors::AuthCtx;

/// Immutable once built. Shared by reference across every request.
pub struct StrategyConfig {
    access_token_key_name: String,
    profile_url: String,
    payload: bool,
    validate_func: Arc<dyn ValidateFunc>,
}

impl StrategyConfig {
    pub fn builder() -> StrategyConfigBuilder {
        StrategyConfigBuilder::default()
    }

    pub fn access_token_key_name(&self) -> &str {
        &self.access_token_key_name
    }

    /// Kept for consumers; not used when authenticating.
    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }

    /// Registration-level switch for body extraction.
    pub fn payload(&self) -> bool {
        self.payload
    }
}

impl fmt::Debug for StrategyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyConfig")
            .field("access_token_key_name", &self.access_token_key_name)
            .field("profile_url", &self.profile_url)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct StrategyConfigBuilder {
    access_token_key_name: Option<String>,
    profile_url: String,
    payload: bool,
    validate_func: Option<Arc<dyn ValidateFunc>>,
}

impl StrategyConfigBuilder {
    pub fn access_token_key_name(mut self, name: impl Into<String>) -> Self {
        self.access_token_key_name = Some(name.into());
        self
    }

    pub fn profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = url.into();
        self
    }

    pub fn payload(mut self, enabled: bool) -> Self {
        self.payload = enabled;
        self
    }

    /// Closure form of the validation callback.
    pub fn validate_func<F>(self, f: F) -> Self
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
        self.validator(f)
    }

    pub fn validator(mut self, v: impl ValidateFunc) -> Self {
        self.validate_func = Some(Arc::new(v));
        self
    }

    pub fn build(self) -> Result<StrategyConfig, RegistrationError> {
        let access_token_key_name = self
            .access_token_key_name
            .filter(|k| !k.is_empty())
            .ok_or(RegistrationError::MissingKeyName)?;
        let validate_func = self
            .validate_func
            .ok_or(RegistrationError::MissingValidateFunc)?;

        Ok(StrategyConfig {
            access_token_key_name,
            profile_url: self.profile_url,
            payload: self.payload,
            validate_func,
        })
    }
}

/// Why a strategy left the request unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    MissingToken,
    Rejected,
}

#[derive(Debug)]
pub enum Decision {
    Authenticated(AuthCtx),
    Unauthenticated(Reason),
}

#[derive(Debug, Clone)]
pub struct AccessTokenStrategy {
    name: String,
    config: Arc<StrategyConfig>,
}

impl AccessTokenStrategy {
    pub fn new(name: impl Into<String>, config: StrategyConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Body extraction needs both the strategy flag and the route flag.
    pub fn payload_enabled(&self, route_payload: bool) -> bool {
        self.config.payload && route_payload
    }

    /// Look up the token under the configured key name.
    ///
    /// When body extraction is enabled a string in the payload wins over the
    /// query string. Empty values count as absent.
    pub fn extract_token(
        &self,
        payload: Option<&Value>,
        request: &AuthRequest,
        route_payload: bool,
    ) -> Option<String> {
        let key = self.config.access_token_key_name.as_str();

        let from_payload = self
            .payload_enabled(route_payload)
            .then(|| payload.and_then(|p| p.get(key)).and_then(Value::as_str))
            .flatten()
            .filter(|t| !t.is_empty());

        from_payload
            .or_else(|| request.query_param(key).filter(|t| !t.is_empty()))
            .map(str::to_owned)
    }

    pub async fn authenticate(
        &self,
        payload: Option<&Value>,
        request: &mut AuthRequest,
        route_payload: bool,
    ) -> Result<Decision, AuthError> {
        let Some(token) = self.extract_token(payload, request, route_payload) else {
            tracing::debug!(strategy = %self.name, "access token missing");
            return Ok(Decision::Unauthenticated(Reason::MissingToken));
        };

        let payload = payload.filter(|_| self.payload_enabled(route_payload));

        let outcome = self
            .config
            .validate_func
            .validate(payload, &token, Continuation::new(), request)
            .await
            .map_err(|source| AuthError::Callback {
                strategy: self.name.clone(),
                source,
            })?;

        if !outcome.resolve(&mut request.auth) {
            tracing::debug!(strategy = %self.name, "access token rejected");
            return Ok(Decision::Unauthenticated(Reason::Rejected));
        }

        Ok(Decision::Authenticated(AuthCtx::new(
            self.name.clone(),
            request.auth.credentials.clone(),
        )))
    }
}
