/*
 * Responsibility
 * - GET /me  : query string の token で認証
 * - POST /me : body (payload) の token で認証 (JSON / urlencoded form)
 * - 認証結果 (strategy / credentials) をそのまま返す
 */
use axum::{Json, body::Bytes, http::HeaderMap};
use serde::Serialize;
use serde_json::Value;

use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::services::auth::{AuthError, Credentials, payload::parse_payload};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub strategy: String,
    pub credentials: Option<Credentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

pub async fn get_me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse {
        strategy: ctx.strategy,
        credentials: ctx.credentials,
        payload: None,
    })
}

// Parsed the same way the strategy parsed it, so form bodies work too.
pub async fn post_me(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MeResponse>, AppError> {
    let payload = parse_payload(&headers, &body).map_err(AuthError::from)?;

    Ok(Json(MeResponse {
        strategy: ctx.strategy,
        credentials: ctx.credentials,
        payload,
    }))
}
