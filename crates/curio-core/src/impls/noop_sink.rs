//! NoopNotificationSink - 通知先が設定されていないときの Sink

use async_trait::async_trait;

use crate::domain::ArtifactCreated;
use crate::ports::{NotificationError, NotificationSink};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotificationSink;

#[async_trait]
impl NotificationSink for NoopNotificationSink {
    async fn notify(&self, event: &ArtifactCreated) -> Result<(), NotificationError> {
        tracing::debug!(artifact_id = %event.id, "no webhook configured; skipping notification");
        Ok(())
    }
}
