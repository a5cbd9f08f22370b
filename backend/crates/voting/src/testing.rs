//! In-memory repositories for tests
//!
//! One lock guards features, votes and known users, so each call is atomic
//! the way a single SQL statement is. The `UNIQUE(user_id, feature_id)` and
//! foreign-key rules of the schema are enforced on insert, and deleting a
//! feature cascades to its votes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use kernel::id::{FeatureId, UserId, VoteId};
use kernel::store::{StoreError, StoreResult};

use crate::domain::entities::{Feature, FeatureChanges, NewFeature, Vote, Voter};
use crate::domain::repository::{FeatureRepository, VoteRepository};
use crate::domain::services;

#[derive(Debug, Clone)]
struct StoredFeature {
    id: FeatureId,
    title: String,
    description: String,
    created_by: UserId,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, String>,
    features: Vec<StoredFeature>,
    votes: Vec<Vote>,
    next_feature_id: i64,
    next_vote_id: i64,
    stall: Option<Duration>,
    stale_vote_reads: bool,
}

impl Inner {
    fn count(&self, feature_id: FeatureId) -> i64 {
        self.votes
            .iter()
            .filter(|v| v.feature_id == feature_id)
            .count() as i64
    }

    fn with_votes(&self, stored: &StoredFeature) -> Feature {
        Feature {
            id: stored.id,
            title: stored.title.clone(),
            description: stored.description.clone(),
            created_by: stored.created_by,
            created_by_username: self.users.get(&stored.created_by).cloned(),
            vote_count: self.count(stored.id),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

/// Shared, cloneable in-memory feature store and vote ledger
#[derive(Clone, Default)]
pub struct InMemoryVotingRepository {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryVotingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a user id known, as if its `users` row existed
    pub fn add_user(&self, user_id: UserId, user_name: impl Into<String>) {
        self.lock().users.insert(user_id, user_name.into());
    }

    /// Delay every subsequent call, to exercise bounded waits
    pub fn stall_for(&self, delay: Duration) {
        self.lock().stall = Some(delay);
    }

    /// Make `has_voted` always answer `false`, as a read taken before a
    /// concurrent insert committed would. Inserts still enforce uniqueness.
    pub fn serve_stale_vote_reads(&self) {
        self.lock().stale_vote_reads = true;
    }

    /// Number of stored vote rows, across all features
    pub fn vote_rows(&self) -> usize {
        self.lock().votes.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means another test thread panicked
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn maybe_stall(&self) {
        let stall = self.lock().stall;
        if let Some(delay) = stall {
            tokio::time::sleep(delay).await;
        }
    }
}

impl FeatureRepository for InMemoryVotingRepository {
    async fn list_with_votes(&self) -> StoreResult<Vec<Feature>> {
        self.maybe_stall().await;
        let inner = self.lock();
        let mut features: Vec<Feature> =
            inner.features.iter().map(|f| inner.with_votes(f)).collect();
        services::rank(&mut features);
        Ok(features)
    }

    async fn find_with_votes(&self, id: FeatureId) -> StoreResult<Option<Feature>> {
        self.maybe_stall().await;
        let inner = self.lock();
        Ok(inner
            .features
            .iter()
            .find(|f| f.id == id)
            .map(|f| inner.with_votes(f)))
    }

    async fn find_owner(&self, id: FeatureId) -> StoreResult<Option<UserId>> {
        self.maybe_stall().await;
        Ok(self
            .lock()
            .features
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.created_by))
    }

    async fn create(&self, feature: &NewFeature) -> StoreResult<Feature> {
        self.maybe_stall().await;
        let mut inner = self.lock();

        if !inner.users.contains_key(&feature.created_by) {
            return Err(StoreError::foreign_key("features_created_by_fkey"));
        }

        inner.next_feature_id += 1;
        let now = Utc::now();
        let stored = StoredFeature {
            id: FeatureId::from_i64(inner.next_feature_id),
            title: feature.title.as_str().to_string(),
            description: feature.description.as_str().to_string(),
            created_by: feature.created_by,
            created_at: now,
            updated_at: now,
        };
        let created = inner.with_votes(&stored);
        inner.features.push(stored);
        Ok(created)
    }

    async fn update(
        &self,
        id: FeatureId,
        changes: &FeatureChanges,
    ) -> StoreResult<Option<Feature>> {
        self.maybe_stall().await;
        let mut inner = self.lock();

        let Some(stored) = inner.features.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        stored.title = changes.title.as_str().to_string();
        stored.description = changes.description.as_str().to_string();
        stored.updated_at = Utc::now();
        let stored = stored.clone();

        Ok(Some(inner.with_votes(&stored)))
    }

    async fn delete(&self, id: FeatureId) -> StoreResult<bool> {
        self.maybe_stall().await;
        let mut inner = self.lock();

        let before = inner.features.len();
        inner.features.retain(|f| f.id != id);
        if inner.features.len() == before {
            return Ok(false);
        }
        // ON DELETE CASCADE
        inner.votes.retain(|v| v.feature_id != id);
        Ok(true)
    }
}

impl VoteRepository for InMemoryVotingRepository {
    async fn insert_vote(&self, user_id: UserId, feature_id: FeatureId) -> StoreResult<Vote> {
        self.maybe_stall().await;
        let mut inner = self.lock();

        if !inner.users.contains_key(&user_id) {
            return Err(StoreError::foreign_key("votes_user_id_fkey"));
        }
        if !inner.features.iter().any(|f| f.id == feature_id) {
            return Err(StoreError::foreign_key("votes_feature_id_fkey"));
        }
        if inner
            .votes
            .iter()
            .any(|v| v.user_id == user_id && v.feature_id == feature_id)
        {
            return Err(StoreError::unique("votes_user_id_feature_id_key"));
        }

        inner.next_vote_id += 1;
        let vote = Vote {
            id: VoteId::from_i64(inner.next_vote_id),
            user_id,
            feature_id,
            created_at: Utc::now(),
        };
        inner.votes.push(vote.clone());
        Ok(vote)
    }

    async fn delete_vote(&self, user_id: UserId, feature_id: FeatureId) -> StoreResult<bool> {
        self.maybe_stall().await;
        let mut inner = self.lock();

        let before = inner.votes.len();
        inner
            .votes
            .retain(|v| !(v.user_id == user_id && v.feature_id == feature_id));
        Ok(inner.votes.len() < before)
    }

    async fn count_votes_for_feature(&self, feature_id: FeatureId) -> StoreResult<i64> {
        self.maybe_stall().await;
        Ok(self.lock().count(feature_id))
    }

    async fn has_voted(&self, user_id: UserId, feature_id: FeatureId) -> StoreResult<bool> {
        self.maybe_stall().await;
        let inner = self.lock();
        if inner.stale_vote_reads {
            return Ok(false);
        }
        Ok(inner
            .votes
            .iter()
            .any(|v| v.user_id == user_id && v.feature_id == feature_id))
    }

    async fn find_voters(&self, feature_id: FeatureId) -> StoreResult<Vec<Voter>> {
        self.maybe_stall().await;
        // Insertion order is vote order
        Ok(self
            .lock()
            .votes
            .iter()
            .filter(|v| v.feature_id == feature_id)
            .map(Voter::from)
            .collect())
    }
}
