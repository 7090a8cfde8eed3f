use std::sync::Arc;

use anyhow::{Context, Result};
use curio_core::app::{AppBuilder, ArtifactService};
use curio_core::impls::{
    InMemoryArtifactStore, InMemoryUserDirectory, NoopNotificationSink, StaticTokenIdentity,
    WebhookSink,
};
use curio_core::ports::{IdentityProvider, NotificationSink};

use super::rate_limit::{RateLimitConfig, RateLimiter};
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ArtifactService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(
        service: Arc<ArtifactService>,
        identity: Arc<dyn IdentityProvider>,
        rate_limit: RateLimitConfig,
    ) -> Self {
        Self {
            service,
            identity,
            limiter: Arc::new(RateLimiter::new(rate_limit)),
        }
    }

    /// Wires an in-memory store with the users and webhook from config.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let sink: Arc<dyn NotificationSink> = match &config.webhook {
            Some(webhook) => {
                tracing::info!(url = %webhook.url, timeout_ms = webhook.timeout.as_millis() as u64, "webhook enabled");
                Arc::new(
                    WebhookSink::new(&webhook.url, webhook.timeout)
                        .context("failed to set up webhook sink")?,
                )
            }
            None => Arc::new(NoopNotificationSink),
        };

        let directory = InMemoryUserDirectory::with_profiles(
            config.users.iter().map(|user| user.profile.clone()),
        );
        let identity = StaticTokenIdentity::new(config.users.iter().map(|user| {
            (user.token.clone(), user.profile.id.clone())
        }));

        let app = AppBuilder::new()
            .store(Arc::new(InMemoryArtifactStore::default()))
            .user_directory(Arc::new(directory))
            .notification_sink(sink)
            .build()?;

        Ok(Self::new(
            Arc::new(app.into_service()),
            Arc::new(identity),
            config.rate_limit,
        ))
    }
}
