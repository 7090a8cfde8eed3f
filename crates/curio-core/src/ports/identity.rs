//! IdentityProvider port - リクエストの資格情報から呼び出し元を特定する
//!
//! 登録・ログイン・OTP はこのクレートの外側にあり、
//! ここでは「トークン → UserId」だけを扱います。

use async_trait::async_trait;

use crate::domain::UserId;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 有効なトークンなら呼び出し元の UserId、そうでなければ None
    async fn current_user(&self, token: &str) -> Option<UserId>;
}
