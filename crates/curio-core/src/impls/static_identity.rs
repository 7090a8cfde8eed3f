//! StaticTokenIdentity - 設定で与えたトークン表による IdentityProvider

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::UserId;
use crate::ports::IdentityProvider;

#[derive(Debug, Default, Clone)]
pub struct StaticTokenIdentity {
    tokens: HashMap<String, UserId>,
}

impl StaticTokenIdentity {
    pub fn new(tokens: impl IntoIterator<Item = (String, UserId)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentity {
    async fn current_user(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token.trim()).cloned()
    }
}
