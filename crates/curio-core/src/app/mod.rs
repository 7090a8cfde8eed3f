//! App - アプリケーション層
//!
//! ports を組み合わせてユースケースを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: ports のワイヤリング
//! - **ArtifactService**: create / list / toggle_like / add_comment / get_likes / get_comments
//! - **Notifier**: 作成通知を呼び出し側から切り離して送る

pub mod builder;
pub mod notifier;
pub mod service;

pub use self::builder::{App, AppBuilder, BuildError};
pub use self::notifier::Notifier;
pub use self::service::{ArtifactService, NewArtifact};
