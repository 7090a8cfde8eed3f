//! UserDirectory port - UserId を表示用の UserProjection に解決する

use async_trait::async_trait;

use crate::domain::{ArtifactError, UserId, UserProjection};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for ArtifactError {
    fn from(err: DirectoryError) -> Self {
        ArtifactError::Persistence(err.to_string())
    }
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// 入力と同じ順序・同じ長さで返す。未知のユーザーは email なし
    async fn resolve(&self, ids: &[UserId]) -> Result<Vec<UserProjection>, DirectoryError>;
}
