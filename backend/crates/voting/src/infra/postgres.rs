//! PostgreSQL Repository Implementations
//!
//! Reads go through the `features_with_votes` view, so every count is a live
//! `COUNT` over `votes`. Writes return the same shape via a CTE.

use chrono::{DateTime, Utc};
use kernel::id::{FeatureId, UserId, VoteId};
use kernel::store::StoreResult;
use sqlx::PgPool;

use crate::domain::entities::{Feature, FeatureChanges, NewFeature, Vote, Voter};
use crate::domain::repository::{FeatureRepository, VoteRepository};

/// PostgreSQL-backed feature store and vote ledger
#[derive(Clone)]
pub struct PgVotingRepository {
    pool: PgPool,
}

impl PgVotingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Feature Repository Implementation
// ============================================================================

impl FeatureRepository for PgVotingRepository {
    async fn list_with_votes(&self) -> StoreResult<Vec<Feature>> {
        let rows = sqlx::query_as::<_, FeatureRow>(
            r#"
            SELECT id, title, description, created_by, created_by_username,
                   vote_count, created_at, updated_at
            FROM features_with_votes
            ORDER BY vote_count DESC, created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Feature::from).collect())
    }

    async fn find_with_votes(&self, id: FeatureId) -> StoreResult<Option<Feature>> {
        let row = sqlx::query_as::<_, FeatureRow>(
            r#"
            SELECT id, title, description, created_by, created_by_username,
                   vote_count, created_at, updated_at
            FROM features_with_votes
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Feature::from))
    }

    async fn find_owner(&self, id: FeatureId) -> StoreResult<Option<UserId>> {
        let owner: Option<i64> = sqlx::query_scalar("SELECT created_by FROM features WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(owner.map(UserId::from_i64))
    }

    async fn create(&self, feature: &NewFeature) -> StoreResult<Feature> {
        let row = sqlx::query_as::<_, FeatureRow>(
            r#"
            WITH inserted AS (
                INSERT INTO features (title, description, created_by)
                VALUES ($1, $2, $3)
                RETURNING id, title, description, created_by, created_at, updated_at
            )
            SELECT i.id, i.title, i.description, i.created_by,
                   u.username AS created_by_username,
                   0::BIGINT AS vote_count,
                   i.created_at, i.updated_at
            FROM inserted i
            LEFT JOIN users u ON u.id = i.created_by
            "#,
        )
        .bind(feature.title.as_str())
        .bind(feature.description.as_str())
        .bind(feature.created_by.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: FeatureId,
        changes: &FeatureChanges,
    ) -> StoreResult<Option<Feature>> {
        let row = sqlx::query_as::<_, FeatureRow>(
            r#"
            WITH updated AS (
                UPDATE features
                SET title = $1, description = $2, updated_at = NOW()
                WHERE id = $3
                RETURNING id, title, description, created_by, created_at, updated_at
            )
            SELECT f.id, f.title, f.description, f.created_by,
                   u.username AS created_by_username,
                   (SELECT COUNT(*) FROM votes v WHERE v.feature_id = f.id) AS vote_count,
                   f.created_at, f.updated_at
            FROM updated f
            LEFT JOIN users u ON u.id = f.created_by
            "#,
        )
        .bind(changes.title.as_str())
        .bind(changes.description.as_str())
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Feature::from))
    }

    async fn delete(&self, id: FeatureId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM features WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Vote Repository Implementation
// ============================================================================

impl VoteRepository for PgVotingRepository {
    async fn insert_vote(&self, user_id: UserId, feature_id: FeatureId) -> StoreResult<Vote> {
        let row = sqlx::query_as::<_, VoteRow>(
            r#"
            INSERT INTO votes (user_id, feature_id)
            VALUES ($1, $2)
            RETURNING id, user_id, feature_id, created_at
            "#,
        )
        .bind(user_id.as_i64())
        .bind(feature_id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete_vote(&self, user_id: UserId, feature_id: FeatureId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM votes WHERE user_id = $1 AND feature_id = $2")
            .bind(user_id.as_i64())
            .bind(feature_id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_votes_for_feature(&self, feature_id: FeatureId) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE feature_id = $1")
            .bind(feature_id.as_i64())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn has_voted(&self, user_id: UserId, feature_id: FeatureId) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM votes WHERE user_id = $1 AND feature_id = $2)",
        )
        .bind(user_id.as_i64())
        .bind(feature_id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_voters(&self, feature_id: FeatureId) -> StoreResult<Vec<Voter>> {
        let rows = sqlx::query_as::<_, VoterRow>(
            r#"
            SELECT user_id, created_at AS voted_at
            FROM votes
            WHERE feature_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(feature_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Voter::from).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct FeatureRow {
    id: i64,
    title: String,
    description: String,
    created_by: i64,
    created_by_username: Option<String>,
    vote_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FeatureRow> for Feature {
    fn from(row: FeatureRow) -> Self {
        Self {
            id: FeatureId::from_i64(row.id),
            title: row.title,
            description: row.description,
            created_by: UserId::from_i64(row.created_by),
            created_by_username: row.created_by_username,
            vote_count: row.vote_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VoteRow {
    id: i64,
    user_id: i64,
    feature_id: i64,
    created_at: DateTime<Utc>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Self {
            id: VoteId::from_i64(row.id),
            user_id: UserId::from_i64(row.user_id),
            feature_id: FeatureId::from_i64(row.feature_id),
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VoterRow {
    user_id: i64,
    voted_at: DateTime<Utc>,
}

impl From<VoterRow> for Voter {
    fn from(row: VoterRow) -> Self {
        Self {
            user_id: UserId::from_i64(row.user_id),
            voted_at: row.voted_at,
        }
    }
}
