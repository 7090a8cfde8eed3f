//! WebhookSink - Artifact 作成を HTTP POST で外部に通知する
//!
//! 1 リクエストだけ送り、タイムアウトで上限を切ります。
//! 2xx 以外は Rejected、接続失敗やタイムアウトは Transport。

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ArtifactCreated;
use crate::ports::{NotificationError, NotificationSink};

#[derive(Debug, thiserror::Error)]
pub enum WebhookSetupError {
    #[error("invalid webhook url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

pub struct WebhookSink {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl WebhookSink {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, WebhookSetupError> {
        let url = reqwest::Url::parse(url).map_err(|err| WebhookSetupError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn notify(&self, event: &ArtifactCreated) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(event)
            .send()
            .await
            .map_err(|err| NotificationError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
