//! `access-token` authentication strategy for axum.
//!
//! Pulls an opaque access token out of the query string (or, when enabled,
//! the request body), hands it to a caller-supplied validation callback and
//! attaches the credentials the callback returns to the request.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
