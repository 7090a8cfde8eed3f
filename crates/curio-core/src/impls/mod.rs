//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryArtifactStore**: 開発・テスト用の正本
//! - **InMemoryUserDirectory**: populate 用のユーザー情報
//! - **StaticTokenIdentity**: トークン表による呼び出し元解決
//! - **WebhookSink**: HTTP POST による作成通知
//! - **NoopNotificationSink**: 通知先がないときの既定

pub mod inmem_store;
pub mod inmem_users;
pub mod noop_sink;
pub mod static_identity;
pub mod webhook;

pub use self::inmem_store::InMemoryArtifactStore;
pub use self::inmem_users::InMemoryUserDirectory;
pub use self::noop_sink::NoopNotificationSink;
pub use self::static_identity::StaticTokenIdentity;
pub use self::webhook::{WebhookSetupError, WebhookSink};
