//! InMemoryUserDirectory - 開発用のユーザーディレクトリ

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{UserId, UserProfile, UserProjection};
use crate::ports::{DirectoryError, UserDirectory};

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, UserProfile>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let users = profiles
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }

    /// 同じ id があれば上書き
    pub async fn upsert(&self, profile: UserProfile) {
        self.users.write().await.insert(profile.id.clone(), profile);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn resolve(&self, ids: &[UserId]) -> Result<Vec<UserProjection>, DirectoryError> {
        let users = self.users.read().await;
        Ok(ids
            .iter()
            .map(|id| match users.get(id) {
                Some(profile) => UserProjection::from(profile.clone()),
                None => UserProjection::unknown(id.clone()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(raw: &str) -> UserId {
        UserId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn resolve_preserves_order_and_marks_unknown() {
        let directory = InMemoryUserDirectory::with_profiles([UserProfile {
            id: uid("u1"),
            email: "u1@example.com".into(),
        }]);

        let resolved = directory
            .resolve(&[uid("ghost"), uid("u1"), uid("u1")])
            .await
            .unwrap();

        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0], UserProjection::unknown(uid("ghost")));
        assert_eq!(resolved[1].email.as_deref(), Some("u1@example.com"));
        assert_eq!(resolved[1], resolved[2]);
    }

    #[tokio::test]
    async fn upsert_replaces_email() {
        let directory = InMemoryUserDirectory::new();
        directory
            .upsert(UserProfile {
                id: uid("u1"),
                email: "old@example.com".into(),
            })
            .await;
        directory
            .upsert(UserProfile {
                id: uid("u1"),
                email: "new@example.com".into(),
            })
            .await;

        let resolved = directory.resolve(&[uid("u1")]).await.unwrap();
        assert_eq!(resolved[0].email.as_deref(), Some("new@example.com"));
    }
}
