//! Artifact - コンテンツ本体と埋め込みコレクション（likes, comments）
//!
//! likes と comments は Artifact ドキュメントに埋め込まれ、
//! 親と一緒に 1 回の書き込みで保存されます。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ArtifactError;
use super::ids::{ArtifactId, CommentId, UserId};

/// LikeSet は「いいね」したユーザーの集合
///
/// 同じユーザーは高々 1 回しか含まれません。
/// 順序は「いいね」した順（レスポンスを安定させるため）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikeSet(Vec<UserId>);

impl LikeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.0.contains(user)
    }

    /// 含まれていれば外し、なければ追加する。戻り値は操作後に含まれているか
    pub fn toggle(&mut self, user: &UserId) -> bool {
        if let Some(pos) = self.0.iter().position(|u| u == user) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(user.clone());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }
}

/// Comment は Artifact に埋め込まれたコメント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// コメント本文を正規化する
///
/// 前後の空白を落とし、空になったら None。
pub fn normalize_comment_text(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// normalize_comment_text の検証版。空なら Validation
pub fn validate_comment_text(raw: Option<&str>) -> Result<String, ArtifactError> {
    normalize_comment_text(raw)
        .ok_or_else(|| ArtifactError::Validation("comment text required".into()))
}

/// ArtifactDraft は insert 前の Artifact（ID とタイムスタンプは store が付与）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_by: UserId,
}

/// Artifact はユーザーが所有するコンテンツ
///
/// # 不変条件
/// - `created_by` は作成後に変わらない
/// - `likes` に同じユーザーは 1 回まで
/// - `comments` は追記のみ（削除・並べ替えなし）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: ArtifactId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_by: UserId,
    pub likes: LikeSet,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 更新のたびに進むリビジョン（store が管理）
    #[serde(skip)]
    pub version: u64,
}

impl Artifact {
    /// draft に ID と作成時刻を与えて Artifact にする
    pub fn from_draft(id: ArtifactId, draft: ArtifactDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            created_by: draft.created_by,
            likes: LikeSet::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    pub fn toggle_like(&mut self, user: &UserId) -> bool {
        self.likes.toggle(user)
    }

    pub fn total_likes(&self) -> usize {
        self.likes.len()
    }

    pub fn append_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use ulid::Ulid;

    fn user(raw: &str) -> UserId {
        UserId::parse(raw).unwrap()
    }

    fn artifact() -> Artifact {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let draft = ArtifactDraft {
            title: Some("T".into()),
            description: None,
            created_by: user("u1"),
        };
        Artifact::from_draft(ArtifactId::from_ulid(Ulid::new()), draft, now)
    }

    #[test]
    fn new_artifact_has_empty_collections() {
        let a = artifact();
        assert!(a.likes.is_empty());
        assert!(a.comments.is_empty());
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(a.version, 0);
    }

    #[test]
    fn toggle_like_flips_membership() {
        let mut a = artifact();
        let u2 = user("u2");

        assert!(a.toggle_like(&u2));
        assert_eq!(a.total_likes(), 1);

        assert!(!a.toggle_like(&u2));
        assert_eq!(a.total_likes(), 0);
    }

    #[test]
    fn likes_never_hold_duplicates() {
        let mut likes = LikeSet::new();
        let u = user("u1");
        likes.toggle(&u);
        likes.toggle(&user(" u1 "));
        likes.toggle(&u);

        assert_eq!(likes.len(), 1);
        assert!(likes.contains(&u));
    }

    #[test]
    fn likes_keep_like_order() {
        let mut likes = LikeSet::new();
        for raw in ["c", "a", "b"] {
            likes.toggle(&user(raw));
        }
        let order: Vec<&str> = likes.iter().map(UserId::as_str).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[rstest]
    #[case::missing(None, None)]
    #[case::empty(Some(""), None)]
    #[case::blank(Some("   "), None)]
    #[case::tabs(Some("\t\n"), None)]
    #[case::trimmed(Some("  hello "), Some("hello"))]
    #[case::inner_space(Some("a b"), Some("a b"))]
    fn comment_text_normalization(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(normalize_comment_text(raw).as_deref(), expected);
    }

    #[test]
    fn artifact_json_uses_camel_case_and_hides_version() {
        let a = artifact();
        let json = serde_json::to_value(&a).unwrap();

        assert_eq!(json["createdBy"], "u1");
        assert_eq!(json["likes"], serde_json::json!([]));
        assert_eq!(json["comments"], serde_json::json!([]));
        assert!(json.get("createdAt").is_some());
        assert!(json.get("version").is_none());
    }
}
