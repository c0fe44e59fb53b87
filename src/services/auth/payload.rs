//! Buffer and parse the request body for payload-enabled routes.
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, header},
};
use serde_json::{Map, Value};

use super::error::PayloadError;

pub const DEFAULT_PAYLOAD_LIMIT: usize = 1024 * 1024;

/// Read the body (bounded by `limit`) and parse it.
///
/// Returns a fresh body carrying the same bytes so handlers can extract it
/// again.
pub async fn read_payload(
    headers: &HeaderMap,
    body: Body,
    limit: usize,
) -> Result<(Body, Option<Value>), PayloadError> {
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|err| {
        tracing::debug!(error = %err, "payload read failed");
        PayloadError::Read
    })?;

    let payload = parse_payload(headers, &bytes)?;
    Ok((Body::from(bytes), payload))
}

/// Parse an already buffered body by content type. `None` for an empty body or
/// a content type other than JSON / urlencoded form.
pub fn parse_payload(headers: &HeaderMap, bytes: &Bytes) -> Result<Option<Value>, PayloadError> {
    if bytes.is_empty() {
        return Ok(None);
    }

    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase());

    match mime.as_deref() {
        // No content type: treat as JSON.
        None | Some("application/json") => Ok(Some(serde_json::from_slice(bytes)?)),
        Some(m) if m.ends_with("+json") => Ok(Some(serde_json::from_slice(bytes)?)),
        Some("application/x-www-form-urlencoded") => {
            let fields: Map<String, Value> = url::form_urlencoded::parse(bytes)
                .into_owned()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            Ok(Some(Value::Object(fields)))
        }
        Some(_) => Ok(None),
    }
}
