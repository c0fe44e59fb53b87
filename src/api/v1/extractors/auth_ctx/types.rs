/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware (strategy) が request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - Token の抽出や validateFunc の呼び出しは services/auth 側の責務
 */
use serde::Serialize;

use crate::services::auth::Credentials;

/// Auth context of an authenticated request.
///
/// - `strategy` is the registered strategy name that authenticated the request
/// - `credentials` is exactly what the validation callback supplied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthCtx {
    pub strategy: String,
    pub credentials: Option<Credentials>,
}

impl AuthCtx {
    pub fn new(strategy: impl Into<String>, credentials: Option<Credentials>) -> Self {
        Self {
            strategy: strategy.into(),
            credentials,
        }
    }
}
