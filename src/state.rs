/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: 登録済み strategy (起動後は read-only)
 * - Clone 前提で持つ (内部は Arc/Copy)
 */
use std::sync::Arc;

use crate::services::auth::AuthRegistry;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthRegistry>,
    pub payload_limit: usize,
}

impl AppState {
    pub fn new(auth: Arc<AuthRegistry>, payload_limit: usize) -> Self {
        Self {
            auth,
            payload_limit,
        }
    }
}
