//! Request view handed to validation callbacks.
//!
//! The strategy never hands out the raw `Request<Body>`: the body may already
//! have been consumed for payload extraction. Callbacks see the request head
//! plus the mutable auth context that survives into the handler.
use std::collections::HashMap;

use axum::http::{HeaderMap, Method, Uri, request::Parts};
use serde_json::Value;

/// Credentials attached to an authenticated request. Any JSON shape.
pub type Credentials = Value;

/// Mutable auth context of a single request.
///
/// Callbacks may write `credentials` directly and then resolve the
/// continuation without arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestAuth {
    pub credentials: Option<Credentials>,
}

#[derive(Debug)]
pub struct AuthRequest {
    parts: Parts,
    query: HashMap<String, String>,
    pub auth: RequestAuth,
}

impl AuthRequest {
    pub fn new(parts: Parts) -> Self {
        let query = parse_query(parts.uri.query());
        Self {
            parts,
            query,
            auth: RequestAuth::default(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Decoded query parameters. Repeated keys keep the last value.
    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Hand the request head back to the router.
    pub fn into_parts(self) -> (Parts, RequestAuth) {
        (self.parts, self.auth)
    }
}

fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    raw.map(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect()
    })
    .unwrap_or_default()
}
