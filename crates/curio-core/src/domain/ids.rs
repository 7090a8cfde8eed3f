//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID + ジェネリック実装
//! Artifact / Comment の ID は ULID を使い、`Id<T>` の Phantom type で型を分けます。
//! Display / JSON では `artifact-01H...` のようにプレフィックス付きの文字列になります。
//!
//! # UserId
//! ユーザー ID は外部の Identity Provider が発行するので ULID ではありません。
//! 表現が揺れる（生の文字列 / `{"_id": ...}` のようなラップされたオブジェクト）ため、
//! 境界で正規化してから比較します。

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
pub trait IdMarker: Send + Sync + 'static {
    /// Display で使うプレフィックス（例: "artifact-", "comment-"）
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は PhantomData なので実行時のサイズは Ulid と同じです。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    /// ULID から Id を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// ParseIdError は ID 文字列のパース失敗
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {0:?}")]
pub struct ParseIdError(pub String);

/// プレフィックス付き（`artifact-...`）と素の ULID の両方を受け付ける
impl<T: IdMarker> FromStr for Id<T> {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw = trimmed.strip_prefix(T::prefix()).unwrap_or(trimmed);
        Ulid::from_string(raw)
            .map(Self::from_ulid)
            .map_err(|_| ParseIdError(s.to_string()))
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Artifact のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactMarker {}

impl IdMarker for ArtifactMarker {
    fn prefix() -> &'static str {
        "artifact-"
    }
}

/// Comment のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommentMarker {}

impl IdMarker for CommentMarker {
    fn prefix() -> &'static str {
        "comment-"
    }
}

/// Identifier of an Artifact (one content item).
pub type ArtifactId = Id<ArtifactMarker>;

/// Identifier of a Comment (unique within its artifact).
pub type CommentId = Id<CommentMarker>;

// ========================================
// UserId
// ========================================

/// UserId は外部の Identity Provider が発行するユーザー識別子
///
/// 生成時に前後の空白を落とし、空文字は拒否します。
/// 比較は常に正規化後の値で行うので、表現の違いに左右されません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// 正規化して UserId を作る。空なら None
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// ワイヤ上で見かける UserId の表現
#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserRef {
    Plain(String),
    Wrapped {
        #[serde(alias = "_id", alias = "$oid")]
        id: String,
    },
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match RawUserRef::deserialize(deserializer)? {
            RawUserRef::Plain(s) => s,
            RawUserRef::Wrapped { id } => id,
        };
        UserId::parse(&raw).ok_or_else(|| de::Error::custom("user id must not be empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn ids_are_distinct_types() {
        let ulid = Ulid::new();

        let artifact = ArtifactId::from_ulid(ulid);
        let comment = CommentId::from_ulid(ulid);

        assert_eq!(artifact.as_ulid(), comment.as_ulid());
        assert!(artifact.to_string().starts_with("artifact-"));
        assert!(comment.to_string().starts_with("comment-"));

        // let _: ArtifactId = comment; // <- does not compile
    }

    #[test]
    fn artifact_id_parses_with_or_without_prefix() {
        let id = ArtifactId::from_ulid(Ulid::new());

        let prefixed: ArtifactId = id.to_string().parse().unwrap();
        let bare: ArtifactId = id.as_ulid().to_string().parse().unwrap();

        assert_eq!(prefixed, id);
        assert_eq!(bare, id);
    }

    #[rstest]
    #[case::empty("")]
    #[case::garbage("not-an-id")]
    #[case::wrong_prefix_only("artifact-")]
    fn artifact_id_rejects_malformed_input(#[case] raw: &str) {
        assert!(raw.parse::<ArtifactId>().is_err());
    }

    #[test]
    fn artifact_id_serializes_as_prefixed_string() {
        let id = ArtifactId::from_ulid(Ulid::new());
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));

        let back: ArtifactId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }

    #[rstest]
    #[case::plain(serde_json::json!("65f1c0ffee"))]
    #[case::padded(serde_json::json!("  65f1c0ffee "))]
    #[case::mongo_id(serde_json::json!({ "_id": "65f1c0ffee" }))]
    #[case::wrapped_id(serde_json::json!({ "id": "65f1c0ffee" }))]
    #[case::extended_json(serde_json::json!({ "$oid": "65f1c0ffee" }))]
    fn user_id_representations_normalize_to_same_value(#[case] raw: serde_json::Value) {
        let id: UserId = serde_json::from_value(raw).unwrap();
        assert_eq!(id, UserId::parse("65f1c0ffee").unwrap());
    }

    #[test]
    fn user_id_rejects_blank() {
        assert!(UserId::parse("   ").is_none());
        assert!(serde_json::from_value::<UserId>(serde_json::json!("")).is_err());
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;
        assert_eq!(size_of::<ArtifactId>(), size_of::<Ulid>());
        assert_eq!(size_of::<CommentId>(), size_of::<Ulid>());
    }
}
