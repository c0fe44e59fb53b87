pub mod continuation;
pub mod error;
pub mod factory;
pub mod payload;
pub mod registry;
pub mod request;
pub mod route;
pub mod strategy;
pub mod validate;

pub use continuation::{Continuation, Outcome};
pub use error::{AuthError, PayloadError, RegistrationError};
pub use factory::build_auth_registry;
pub use registry::{AuthRegistry, SCHEME};
pub use request::{AuthRequest, Credentials, RequestAuth};
pub use route::{AuthMode, RouteAuth, RouteAuthSpec};
pub use strategy::{AccessTokenStrategy, Decision, Reason, StrategyConfig, StrategyConfigBuilder};
pub use validate::{BoxFuture, ValidateFunc};
