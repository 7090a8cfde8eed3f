//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」です。
//! 各 trait は外部システム（ドキュメントストア、ユーザー DB、Webhook 受信側など）
//! へのインターフェースで、実装は impls に置きます。

pub mod artifact_store;
pub mod clock;
pub mod id_generator;
pub mod identity;
pub mod notification_sink;
pub mod user_directory;

pub use self::artifact_store::{ArtifactMutation, ArtifactStore, StoreError};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::identity::IdentityProvider;
pub use self::notification_sink::{NotificationError, NotificationSink};
pub use self::user_directory::{DirectoryError, UserDirectory};
