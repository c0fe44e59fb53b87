/// Factory: build the `AuthRegistry` from application `Config`.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tower::BoxError;

use crate::config::Config;
use crate::services::auth::{
    AuthRegistry, AuthRequest, Continuation, Outcome, RegistrationError, SCHEME, StrategyConfig,
    ValidateFunc,
};

/// Name the server registers its strategy under.
pub const STRATEGY_NAME: &str = "access-token";

/// Validates tokens against a fixed token table.
#[derive(Debug, Clone)]
pub struct StaticTokenValidator {
    tokens: Arc<HashMap<String, String>>,
}

impl StaticTokenValidator {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self {
            tokens: Arc::new(tokens),
        }
    }
}

#[async_trait]
impl ValidateFunc for StaticTokenValidator {
    async fn validate(
        &self,
        _payload: Option<&Value>,
        access_token: &str,
        reply: Continuation,
        _request: &mut AuthRequest,
    ) -> Result<Outcome, BoxError> {
        match self.tokens.get(access_token) {
            Some(name) => Ok(reply.continue_with(json!({ "name": name }))),
            None => {
                tracing::warn!("unknown access token");
                Ok(reply.fail())
            }
        }
    }
}

pub fn build_auth_registry(config: &Config) -> Result<Arc<AuthRegistry>, RegistrationError> {
    let strategy = StrategyConfig::builder()
        .access_token_key_name(config.access_token_key_name.clone())
        .profile_url(config.access_token_profile_url.clone())
        .payload(config.access_token_payload)
        .validator(StaticTokenValidator::new(config.access_tokens.clone()))
        .build()?;

    let mut registry = AuthRegistry::new();
    registry.register_strategy(STRATEGY_NAME, SCHEME, strategy)?;

    Ok(Arc::new(registry))
}
