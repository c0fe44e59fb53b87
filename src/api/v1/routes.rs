/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は public、/me は access-token strategy 配下
 * - auth は route group 単位で middleware::auth::access::apply
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    health::health,
    me::{get_me, post_me},
};
use crate::error::AppError;
use crate::middleware::auth::access;
use crate::services::auth::{RouteAuthSpec, factory::STRATEGY_NAME};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Result<Router<AppState>, AppError> {
    let query_auth = state.auth.route(RouteAuthSpec::new(STRATEGY_NAME))?;
    let payload_auth = state.auth.route(
        RouteAuthSpec::new(STRATEGY_NAME)
            .payload(true)
            .payload_limit(state.payload_limit),
    )?;

    let me_query = access::apply(
        Router::<AppState>::new().route("/me", get(get_me)),
        query_auth,
    );
    let me_payload = access::apply(
        Router::<AppState>::new().route("/me", post(post_me)),
        payload_auth,
    );

    Ok(Router::new()
        .route("/health", get(health))
        .merge(me_query)
        .merge(me_payload))
}
