//! access-token strategy を route group に掛ける middleware
//!
//! - token 抽出 → validateFunc 呼び出し → AuthCtx を extensions に入れる
//! - 評価そのものは `services::auth::RouteAuth` 側。ここは axum との配線のみ

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::RouteAuth;

/// route group に認証を掛ける。
///
/// 例：
/// ```ignore
/// let route = registry.route(RouteAuthSpec::new("access-token").payload(true))?;
/// let me = middleware::auth::access::apply(me, route);
/// ```
///
/// `route_layer` なので、マッチしない path は 401 ではなく 404 のまま。
pub fn apply<S>(router: Router<S>, route: RouteAuth) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(route, access_middleware))
}

async fn access_middleware(
    State(route): State<RouteAuth>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let req = route.authenticate(req).await.map_err(|err| {
        tracing::warn!(error = %err, "access token authentication failed");
        AppError::from(err)
    })?;

    Ok(next.run(req).await)
}
