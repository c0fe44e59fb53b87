//! Named strategy registration.
use std::collections::HashMap;

use super::error::RegistrationError;
use super::route::{RouteAuth, RouteAuthSpec};
use super::strategy::{AccessTokenStrategy, StrategyConfig};

/// Scheme name of the only scheme this crate implements.
pub const SCHEME: &str = "access-token";

#[derive(Debug, Default)]
pub struct AuthRegistry {
    strategies: HashMap<String, AccessTokenStrategy>,
}

impl AuthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_strategy(
        &mut self,
        name: impl Into<String>,
        scheme: &str,
        config: StrategyConfig,
    ) -> Result<(), RegistrationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        if scheme != SCHEME {
            return Err(RegistrationError::UnknownScheme(scheme.to_string()));
        }
        if self.strategies.contains_key(&name) {
            return Err(RegistrationError::DuplicateStrategy(name));
        }

        tracing::info!(
            strategy = %name,
            key = %config.access_token_key_name(),
            profile_url = %config.profile_url(),
            payload = config.payload(),
            "registered auth strategy"
        );

        let strategy = AccessTokenStrategy::new(name.clone(), config);
        self.strategies.insert(name, strategy);
        Ok(())
    }

    pub fn strategy(&self, name: &str) -> Option<&AccessTokenStrategy> {
        self.strategies.get(name)
    }

    /// Resolve a route declaration against the registered strategies.
    pub fn route(&self, spec: RouteAuthSpec) -> Result<RouteAuth, RegistrationError> {
        if spec.strategies.is_empty() {
            return Err(RegistrationError::NoStrategies);
        }

        let strategies = spec
            .strategies
            .iter()
            .map(|name| {
                self.strategy(name)
                    .cloned()
                    .ok_or_else(|| RegistrationError::UnknownStrategy(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteAuth::new(strategies, &spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::AuthMode;

    fn config() -> StrategyConfig {
        StrategyConfig::builder()
            .access_token_key_name("fishface")
            .profile_url("http://www.google.co.uk/?access_token=")
            .validate_func(|_p, token, reply, _r| {
                Box::pin(async move { Ok(reply.continue_with(token)) })
            })
            .build()
            .unwrap()
    }

    #[test]
    fn registers_and_looks_up() {
        let mut registry = AuthRegistry::new();
        registry
            .register_strategy("access-token", SCHEME, config())
            .unwrap();

        let strategy = registry.strategy("access-token").unwrap();
        assert_eq!(strategy.name(), "access-token");
        assert_eq!(strategy.config().access_token_key_name(), "fishface");
    }

    #[test]
    fn rejects_unknown_scheme() {
        let mut registry = AuthRegistry::new();
        let err = registry
            .register_strategy("access-token", "bearer", config())
            .unwrap_err();
        assert!(matches!(err, RegistrationError::UnknownScheme(s) if s == "bearer"));
    }

    #[test]
    fn rejects_duplicate_and_empty_names() {
        let mut registry = AuthRegistry::new();
        registry.register_strategy("a", SCHEME, config()).unwrap();

        assert!(matches!(
            registry.register_strategy("a", SCHEME, config()),
            Err(RegistrationError::DuplicateStrategy(_))
        ));
        assert!(matches!(
            registry.register_strategy("", SCHEME, config()),
            Err(RegistrationError::MissingName)
        ));
    }

    #[test]
    fn route_resolution() {
        let mut registry = AuthRegistry::new();
        registry.register_strategy("a", SCHEME, config()).unwrap();

        let route = registry
            .route(RouteAuthSpec::new("a").mode(AuthMode::Try))
            .unwrap();
        assert_eq!(route.mode(), AuthMode::Try);

        assert!(matches!(
            registry.route(RouteAuthSpec::new("missing")),
            Err(RegistrationError::UnknownStrategy(s)) if s == "missing"
        ));
        assert!(matches!(
            registry.route(RouteAuthSpec::strategies(Vec::<String>::new())),
            Err(RegistrationError::NoStrategies)
        ));
    }
}
