/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::access (strategy), http (transport 共通)
 */
pub mod auth;
pub mod http;
