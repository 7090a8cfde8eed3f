//! ArtifactService - Artifact の作成・一覧・いいね・コメント
//!
//! # 書き込みの流れ（toggle_like / add_comment）
//! 1. 変更を ArtifactMutation として組み立てる
//! 2. ArtifactStore::update() が他の書き込みと直列に適用する
//! 3. 適用後のドキュメントから結果を作る
//!
//! 同じ Artifact への同時書き込みでも「いいね」やコメントは失われず、
//! 競合がエラーとして呼び出し側に出ることもありません。

use std::sync::Arc;

use crate::app::Notifier;
use crate::domain::{
    Artifact, ArtifactCreated, ArtifactDraft, ArtifactError, ArtifactId, ArtifactView, Comment,
    CommentView, CommentsView, LikeToggle, LikesView, UserId, validate_comment_text,
};
use crate::ports::{ArtifactStore, Clock, IdGenerator, UserDirectory};

/// create_artifact の入力
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewArtifact {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub struct ArtifactService {
    store: Arc<dyn ArtifactStore>,
    users: Arc<dyn UserDirectory>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    notifier: Notifier,
}

impl ArtifactService {
    pub(crate) fn new(
        store: Arc<dyn ArtifactStore>,
        users: Arc<dyn UserDirectory>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        notifier: Notifier,
    ) -> Self {
        Self {
            store,
            users,
            ids,
            clock,
            notifier,
        }
    }

    /// Artifact を作成し、作成通知をバックグラウンドで送る
    ///
    /// 通知の成否は戻り値に影響しません。
    pub async fn create_artifact(
        &self,
        caller: &UserId,
        input: NewArtifact,
    ) -> Result<Artifact, ArtifactError> {
        let draft = ArtifactDraft {
            title: input.title,
            description: input.description,
            created_by: caller.clone(),
        };
        let artifact = self.store.insert(draft).await?;
        tracing::info!(artifact_id = %artifact.id, user_id = %caller, "artifact created");

        self.notifier.dispatch(ArtifactCreated::from(&artifact));
        Ok(artifact)
    }

    /// 全 Artifact（createdBy 解決済み）
    pub async fn list_artifacts(&self) -> Result<Vec<ArtifactView>, ArtifactError> {
        let artifacts = self.store.list_all().await?;
        let owners: Vec<UserId> = artifacts.iter().map(|a| a.created_by.clone()).collect();
        let owners = self.users.resolve(&owners).await?;

        Ok(artifacts
            .into_iter()
            .zip(owners)
            .map(|(artifact, owner)| ArtifactView {
                id: artifact.id,
                title: artifact.title,
                description: artifact.description,
                created_by: owner,
                likes: artifact.likes.iter().cloned().collect(),
                comments: artifact.comments,
                created_at: artifact.created_at,
                updated_at: artifact.updated_at,
            })
            .collect())
    }

    /// 呼び出し元の「いいね」を付け外しする
    ///
    /// 2 回呼ぶと元の状態に戻る（冪等ではない）。
    pub async fn toggle_like(
        &self,
        caller: &UserId,
        id: ArtifactId,
    ) -> Result<LikeToggle, ArtifactError> {
        let user = caller.clone();
        let artifact = self
            .store
            .update(
                id,
                Box::new(move |artifact: &mut Artifact| {
                    artifact.toggle_like(&user);
                }),
            )
            .await?;
        let liked = artifact.likes.contains(caller);
        tracing::info!(artifact_id = %id, user_id = %caller, liked, "like toggled");

        Ok(LikeToggle {
            liked,
            total_likes: artifact.total_likes(),
        })
    }

    pub async fn get_likes(&self, id: ArtifactId) -> Result<LikesView, ArtifactError> {
        let artifact = self.store.find_by_id(id).await?;
        let likers: Vec<UserId> = artifact.likes.iter().cloned().collect();
        let users = self.users.resolve(&likers).await?;

        Ok(LikesView {
            total_likes: users.len(),
            users,
        })
    }

    /// コメントを追加し、投稿者解決済みの全コメントを返す
    ///
    /// 本文の検証は store に触る前に行うので、本文が不正なら
    /// Artifact の有無に関係なく Validation になる。
    pub async fn add_comment(
        &self,
        caller: &UserId,
        id: ArtifactId,
        text: Option<&str>,
    ) -> Result<Vec<CommentView>, ArtifactError> {
        let text = validate_comment_text(text)?;

        let now = self.clock.now();
        let comment = Comment {
            id: self.ids.generate_comment_id(),
            user_id: caller.clone(),
            text,
            created_at: now,
            updated_at: now,
        };
        let comment_id = comment.id;
        let artifact = self
            .store
            .update(
                id,
                Box::new(move |artifact: &mut Artifact| artifact.append_comment(comment)),
            )
            .await?;
        tracing::info!(artifact_id = %id, user_id = %caller, %comment_id, "comment added");

        self.resolve_comments(artifact.comments).await
    }

    pub async fn get_comments(&self, id: ArtifactId) -> Result<CommentsView, ArtifactError> {
        let artifact = self.store.find_by_id(id).await?;
        let comments = self.resolve_comments(artifact.comments).await?;

        Ok(CommentsView {
            total_comments: comments.len(),
            comments,
        })
    }

    async fn resolve_comments(
        &self,
        comments: Vec<Comment>,
    ) -> Result<Vec<CommentView>, ArtifactError> {
        let authors: Vec<UserId> = comments.iter().map(|c| c.user_id.clone()).collect();
        let authors = self.users.resolve(&authors).await?;

        Ok(comments
            .into_iter()
            .zip(authors)
            .map(|(comment, author)| CommentView {
                id: comment.id,
                user_id: author,
                text: comment.text,
                created_at: comment.created_at,
                updated_at: comment.updated_at,
            })
            .collect())
    }
}
