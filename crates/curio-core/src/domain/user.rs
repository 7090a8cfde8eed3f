//! User - 参照解決（populate）用のユーザー表現

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// UserProfile は Directory が保持するユーザー情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
}

/// UserProjection はレスポンスに載せる縮約ビュー（id + email のみ）
///
/// Directory が知らないユーザーは `email: None` になります。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProjection {
    pub id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProjection {
    pub fn unknown(id: UserId) -> Self {
        Self { id, email: None }
    }
}

impl From<UserProfile> for UserProjection {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: Some(profile.email),
        }
    }
}
