//! Errors - エラー型と分類
//!
//! ArtifactError はサービスが呼び出し側に返すエラーです。
//! 通知の失敗（NotificationError）はここには現れません。

use super::ids::ArtifactId;

/// ErrorKind は呼び出し側での扱いを決める分類
///
/// - Validation: 入力不正（400）
/// - NotFound: 対象の Artifact がない（404）
/// - Persistence: ストア障害（500、詳細はログのみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Persistence,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("{0}")]
    Validation(String),

    #[error("artifact not found: {0}")]
    NotFound(ArtifactId),

    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl ArtifactError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArtifactError::Validation(_) => ErrorKind::Validation,
            ArtifactError::NotFound(_) => ErrorKind::NotFound,
            ArtifactError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
