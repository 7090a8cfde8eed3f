//! Views - サービスが返す読み取り用の型
//!
//! 参照（createdBy, userId）は UserProjection に解決済みです。

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::artifact::Comment;
use super::ids::{ArtifactId, CommentId, UserId};
use super::user::UserProjection;

/// 一覧用の Artifact（createdBy を解決済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactView {
    pub id: ArtifactId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_by: UserProjection,
    pub likes: Vec<UserId>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// コメント投稿者を解決済みのコメント
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: CommentId,
    pub user_id: UserProjection,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// toggle_like の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub liked: bool,
    pub total_likes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesView {
    pub total_likes: usize,
    pub users: Vec<UserProjection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsView {
    pub total_comments: usize,
    pub comments: Vec<CommentView>,
}
