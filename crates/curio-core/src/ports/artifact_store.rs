//! ArtifactStore port - Artifact ドキュメントの永続化
//!
//! likes / comments は埋め込みなので、変更は 1 ドキュメントへの
//! アトミックな更新になります（ドキュメントストアの `$addToSet` / `$pull` / `$push` 相当）。
//! 読んでから書き戻すのではなく、変更そのものを store に渡します。
//!
//! # 実装
//! - InMemoryArtifactStore（impls::inmem_store）

use async_trait::async_trait;

use crate::domain::{Artifact, ArtifactDraft, ArtifactError, ArtifactId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("artifact not found: {0}")]
    NotFound(ArtifactId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for ArtifactError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ArtifactError::NotFound(id),
            other => ArtifactError::Persistence(other.to_string()),
        }
    }
}

/// update に渡す変更。store のロック内で 1 回だけ呼ばれる
pub type ArtifactMutation<'a> = Box<dyn FnOnce(&mut Artifact) + Send + 'a>;

/// ArtifactStore は Artifact の正本（source of truth）
///
/// # 設計原則
/// - ID とタイムスタンプは store が付与する
/// - update は他の書き込みと直列化され、version と updated_at を進める
/// - list_all は挿入順
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn insert(&self, draft: ArtifactDraft) -> Result<Artifact, StoreError>;

    async fn find_by_id(&self, id: ArtifactId) -> Result<Artifact, StoreError>;

    async fn list_all(&self) -> Result<Vec<Artifact>, StoreError>;

    /// 変更を適用し、適用後のドキュメントを返す
    async fn update<'a>(
        &self,
        id: ArtifactId,
        mutate: ArtifactMutation<'a>,
    ) -> Result<Artifact, StoreError>;
}
