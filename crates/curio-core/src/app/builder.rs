//! AppBuilder - ports のワイヤリング
//!
//! # 既定値
//! - Clock: SystemClock
//! - IdGenerator: UlidGenerator（上の Clock を使う）
//! - NotificationSink: NoopNotificationSink
//!
//! ArtifactStore と UserDirectory は必須で、無ければ build() が失敗します（Fail-fast）。

use std::sync::Arc;

use crate::app::{ArtifactService, Notifier};
use crate::impls::NoopNotificationSink;
use crate::ports::{
    ArtifactStore, Clock, IdGenerator, NotificationSink, SystemClock, UlidGenerator, UserDirectory,
};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .store(Arc::new(InMemoryArtifactStore::default()))
///     .user_directory(Arc::new(InMemoryUserDirectory::new()))
///     .notification_sink(Arc::new(webhook))
///     .build()?;
/// ```
#[derive(Default)]
pub struct AppBuilder {
    store: Option<Arc<dyn ArtifactStore>>,
    users: Option<Arc<dyn UserDirectory>>,
    sink: Option<Arc<dyn NotificationSink>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing port: {0}. It must be provided before build().")]
    MissingPort(&'static str),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn user_directory(mut self, users: Arc<dyn UserDirectory>) -> Self {
        self.users = Some(users);
        self
    }

    pub fn notification_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let store = self.store.ok_or(BuildError::MissingPort("artifact_store"))?;
        let users = self.users.ok_or(BuildError::MissingPort("user_directory"))?;
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(clock.clone())) as Arc<dyn IdGenerator>);
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(NoopNotificationSink) as Arc<dyn NotificationSink>);

        Ok(App {
            service: ArtifactService::new(store, users, ids, clock, Notifier::new(sink)),
        })
    }
}

/// App は組み立て済みのアプリケーション
pub struct App {
    service: ArtifactService,
}

impl App {
    pub fn service(&self) -> &ArtifactService {
        &self.service
    }

    pub fn into_service(self) -> ArtifactService {
        self.service
    }
}
