//! NotificationSink port - Artifact 作成の外部通知
//!
//! 1 回だけ試行し、リトライもキューもありません。
//! 失敗は app::Notifier がログに残して捨てます。

use async_trait::async_trait;

use crate::domain::ArtifactCreated;

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("receiver responded with status {status}")]
    Rejected { status: u16 },
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, event: &ArtifactCreated) -> Result<(), NotificationError>;
}
