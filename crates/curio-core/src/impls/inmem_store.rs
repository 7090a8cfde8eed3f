//! InMemoryArtifactStore - 開発・テスト用の ArtifactStore
//!
//! # 実装詳細
//! - HashMap<ArtifactId, Artifact> + 挿入順の Vec<ArtifactId>
//! - tokio::sync::Mutex で排他（ロックは 1 回の store 呼び出しの間だけ）
//! - update はロックを握ったまま変更を適用する（同じ Artifact への書き込みは直列）

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Artifact, ArtifactDraft, ArtifactId};
use crate::ports::{
    ArtifactMutation, ArtifactStore, Clock, IdGenerator, StoreError, SystemClock, UlidGenerator,
};

#[derive(Default)]
struct InMemoryStoreState {
    records: HashMap<ArtifactId, Artifact>,
    order: Vec<ArtifactId>,
}

pub struct InMemoryArtifactStore {
    state: Arc<Mutex<InMemoryStoreState>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl InMemoryArtifactStore {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryStoreState::default())),
            ids,
            clock,
        }
    }

    /// SystemClock + UlidGenerator で作成
    pub fn with_system_clock() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let ids = Arc::new(UlidGenerator::new(clock.clone()));
        Self::new(ids, clock)
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryArtifactStore {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn insert(&self, draft: ArtifactDraft) -> Result<Artifact, StoreError> {
        let artifact = Artifact::from_draft(self.ids.generate_artifact_id(), draft, self.clock.now());

        let mut state = self.state.lock().await;
        state.order.push(artifact.id);
        state.records.insert(artifact.id, artifact.clone());
        Ok(artifact)
    }

    async fn find_by_id(&self, id: ArtifactId) -> Result<Artifact, StoreError> {
        let state = self.state.lock().await;
        state
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list_all(&self) -> Result<Vec<Artifact>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.records.get(id).cloned())
            .collect())
    }

    async fn update<'a>(
        &self,
        id: ArtifactId,
        mutate: ArtifactMutation<'a>,
    ) -> Result<Artifact, StoreError> {
        let mut state = self.state.lock().await;
        let current = state.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        mutate(current);
        current.version += 1;
        current.updated_at = self.clock.now();
        Ok(current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;
    use ulid::Ulid;

    fn store_with_clock() -> (InMemoryArtifactStore, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        ));
        let ids = Arc::new(UlidGenerator::new(clock.clone()));
        (InMemoryArtifactStore::new(ids, clock.clone()), clock)
    }

    fn draft(title: &str) -> ArtifactDraft {
        ArtifactDraft {
            title: Some(title.to_string()),
            description: None,
            created_by: UserId::parse("u1").unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let (store, clock) = store_with_clock();

        let stored = store.insert(draft("T")).await.unwrap();

        assert_eq!(stored.created_at, clock.now());
        assert_eq!(stored.updated_at, clock.now());
        assert_eq!(stored.version, 0);
        assert_eq!(store.find_by_id(stored.id).await.unwrap(), stored);
    }

    #[tokio::test]
    async fn find_missing_is_not_found() {
        let (store, _) = store_with_clock();
        let id = ArtifactId::from_ulid(Ulid::new());

        assert_eq!(store.find_by_id(id).await, Err(StoreError::NotFound(id)));
    }

    #[tokio::test]
    async fn list_all_keeps_insertion_order() {
        let (store, _) = store_with_clock();
        for title in ["a", "b", "c"] {
            store.insert(draft(title)).await.unwrap();
        }

        let titles: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn update_bumps_version_and_updated_at() {
        let (store, clock) = store_with_clock();
        let artifact = store.insert(draft("T")).await.unwrap();
        let created_at = artifact.created_at;
        let u2 = UserId::parse("u2").unwrap();

        clock.advance(Duration::from_secs(5));
        let updated = store
            .update(
                artifact.id,
                Box::new(|a: &mut Artifact| {
                    a.toggle_like(&u2);
                }),
            )
            .await
            .unwrap();

        assert_eq!(updated.version, 1);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.updated_at, created_at + chrono::Duration::seconds(5));
        assert_eq!(store.find_by_id(artifact.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_unknown_record_is_not_found() {
        let (store, _) = store_with_clock();
        let id = ArtifactId::from_ulid(Ulid::new());
        let called = std::sync::atomic::AtomicBool::new(false);

        let result = store
            .update(
                id,
                Box::new(|_: &mut Artifact| {
                    called.store(true, std::sync::atomic::Ordering::SeqCst);
                }),
            )
            .await;

        assert_eq!(result, Err(StoreError::NotFound(id)));
        assert!(!called.load(std::sync::atomic::Ordering::SeqCst));
        assert!(store.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_are_serialized() {
        let (store, _) = store_with_clock();
        let store = Arc::new(store);
        let id = store.insert(draft("T")).await.unwrap().id;

        let handles: Vec<_> = (0..32)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let user = UserId::parse(&format!("user-{n}")).unwrap();
                    store
                        .update(
                            id,
                            Box::new(move |a: &mut Artifact| {
                                a.toggle_like(&user);
                            }),
                        )
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.find_by_id(id).await.unwrap();
        assert_eq!(stored.total_likes(), 32);
        assert_eq!(stored.version, 32);
    }
}
