//! Events - ドメインイベント
//!
//! NotificationSink に渡す最小のペイロードだけを定義します。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::artifact::Artifact;
use super::ids::ArtifactId;

/// ArtifactCreated は Artifact 作成後に外部へ通知する内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactCreated {
    pub id: ArtifactId,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Artifact> for ArtifactCreated {
    fn from(artifact: &Artifact) -> Self {
        Self {
            id: artifact.id,
            title: artifact.title.clone(),
            created_at: artifact.created_at,
        }
    }
}
