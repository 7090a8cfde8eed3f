//! curio-core
//!
//! Artifact（コンテンツ）とそのいいね・コメントを扱うコア。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, artifact, user, views, events, errors）
//! - **ports**: 抽象化レイヤー（ArtifactStore, UserDirectory, IdentityProvider, NotificationSink, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（AppBuilder, ArtifactService, Notifier）
//! - **impls**: 実装（InMemoryArtifactStore, WebhookSink など）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
