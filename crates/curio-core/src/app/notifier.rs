//! Notifier - NotificationSink を呼び出し側から切り離して実行する
//!
//! # フロー
//! 1. dispatch() は tokio::spawn してすぐ戻る
//! 2. 別タスクで NotificationSink::notify() を 1 回だけ呼ぶ
//! 3. 結果はログに残すだけ（エラーは外に出さない）

use std::sync::Arc;

use crate::domain::ArtifactCreated;
use crate::ports::NotificationSink;

#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// tokio ランタイム上で呼ぶこと
    pub fn dispatch(&self, event: ArtifactCreated) {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            match sink.notify(&event).await {
                Ok(()) => tracing::info!(artifact_id = %event.id, "webhook sent"),
                Err(err) => {
                    tracing::warn!(artifact_id = %event.id, error = %err, "webhook failed")
                }
            }
        });
    }
}
