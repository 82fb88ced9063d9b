//! In-memory store implementations for tests
//!
//! Implement the same contracts as the Postgres stores: insertion order is
//! the latest-lookup order, reconciliation is one bulk pass over matching
//! records.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use autograde_core::domain::deliverable::Deliverable;
use autograde_core::domain::result::ResultRecord;
use autograde_core::domain::user::UserProfile;
use autograde_core::error::{CoreError, Result};

use crate::repository::{DeliverableCatalog, ResultStore, UserDirectory};

#[derive(Default)]
pub struct InMemoryResultStore {
    records: RwLock<Vec<ResultRecord>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<ResultRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn insert(&self, record: &ResultRecord) -> Result<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn get_latest(
        &self,
        team: &str,
        commit: &str,
        deliverable: &str,
        org: &str,
    ) -> Result<ResultRecord> {
        self.records
            .read()
            .await
            .iter()
            .rev()
            .find(|r| {
                r.team == team && r.commit == commit && r.deliverable == deliverable && r.org == org
            })
            .cloned()
            .ok_or_else(|| {
                CoreError::NotFound(format!(
                    "no result for {}, {}, {}, {}",
                    org, team, commit, deliverable
                ))
            })
    }

    async fn reconcile_grade_request(&self, commit_url: &str, requestor: &str) -> Result<u64> {
        let now = chrono::Utc::now();
        let mut records = self.records.write().await;
        let mut modified = 0;
        for record in records.iter_mut().filter(|r| r.commit_url == commit_url) {
            record.grade_requested = true;
            record.grade_requested_at = Some(now);
            record.requestor = Some(requestor.to_string());
            modified += 1;
        }
        Ok(modified)
    }
}

#[derive(Default)]
pub struct InMemoryDeliverableCatalog {
    deliverables: RwLock<HashMap<String, Deliverable>>,
}

impl InMemoryDeliverableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, deliverable: Deliverable) {
        self.deliverables
            .write()
            .await
            .insert(deliverable.label.clone(), deliverable);
    }
}

#[async_trait]
impl DeliverableCatalog for InMemoryDeliverableCatalog {
    async fn get(&self, label: &str) -> Result<Deliverable> {
        self.deliverables
            .read()
            .await
            .get(label)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("deliverable '{}' not found", label)))
    }
}

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, user: UserProfile) {
        self.users.write().await.insert(user.username.clone(), user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get(&self, username: &str) -> Result<Option<UserProfile>> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(suffix: u32, url: &str) -> ResultRecord {
        ResultRecord::new(
            "team10",
            "1a2b3c4d5e6f7a8b9c0d1a2b3c4d5e6f7a8b9c0d",
            url,
            "d1",
            "CS310",
            serde_json::json!({ "score": suffix }),
        )
    }

    #[tokio::test]
    async fn test_insert_then_get_latest() {
        let store = InMemoryResultStore::new();
        store.insert(&record(1, "https://x/c/1")).await.unwrap();
        store.insert(&record(2, "https://x/c/1")).await.unwrap();

        let latest = store
            .get_latest(
                "team10",
                "1a2b3c4d5e6f7a8b9c0d1a2b3c4d5e6f7a8b9c0d",
                "d1",
                "CS310",
            )
            .await
            .unwrap();
        assert_eq!(latest.report, serde_json::json!({ "score": 2 }));
    }

    #[tokio::test]
    async fn test_get_latest_not_found() {
        let store = InMemoryResultStore::new();
        store.insert(&record(1, "https://x/c/1")).await.unwrap();

        let err = store
            .get_latest("other-team", "1a2b3c4d5e6f7a8b9c0d1a2b3c4d5e6f7a8b9c0d", "d1", "CS310")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let store = InMemoryResultStore::new();
        store.insert(&record(1, "https://x/c/1")).await.unwrap();
        store.insert(&record(2, "https://x/c/1")).await.unwrap();
        store.insert(&record(3, "https://x/c/1")).await.unwrap();
        store.insert(&record(4, "https://x/c/other")).await.unwrap();

        let first = store
            .reconcile_grade_request("https://x/c/1", "alice")
            .await
            .unwrap();
        assert_eq!(first, 3);

        // Re-running re-sets the same fields and reports the same count
        let second = store
            .reconcile_grade_request("https://x/c/1", "alice")
            .await
            .unwrap();
        assert_eq!(second, 3);

        let flagged: Vec<_> = store
            .all()
            .await
            .into_iter()
            .filter(|r| r.grade_requested)
            .collect();
        assert_eq!(flagged.len(), 3);
        assert!(flagged.iter().all(|r| r.requestor.as_deref() == Some("alice")));
    }

    #[tokio::test]
    async fn test_reconcile_zero_matches_is_benign() {
        let store = InMemoryResultStore::new();
        let modified = store
            .reconcile_grade_request("https://x/c/none", "alice")
            .await
            .unwrap();
        assert_eq!(modified, 0);
    }
}
