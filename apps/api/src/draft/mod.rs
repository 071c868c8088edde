//! Draft persistence — one saved resume document per user.
//!
//! Storage keeps the collected document, not the raw form snapshot; a draft
//! read back is exactly what one collection pass produced. The Postgres
//! store serializes the document as JSONB and upserts on the user id, so
//! saves are last-write-wins.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::model::ResumeDocument;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored draft is not a valid document: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Per-user draft storage.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> Result<Option<ResumeDocument>, DraftError>;

    /// Inserts or replaces the user's draft.
    async fn upsert(&self, user_id: Uuid, doc: &ResumeDocument) -> Result<(), DraftError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres store
// ────────────────────────────────────────────────────────────────────────────

pub struct PgDraftStore {
    pool: PgPool,
}

impl PgDraftStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftStore for PgDraftStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<ResumeDocument>, DraftError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT document FROM drafts WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((value,)) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, user_id: Uuid, doc: &ResumeDocument) -> Result<(), DraftError> {
        let document = serde_json::to_value(doc)?;
        sqlx::query(
            "INSERT INTO drafts (user_id, document, updated_at)
             VALUES ($1, $2, now())
             ON CONFLICT (user_id)
             DO UPDATE SET document = EXCLUDED.document, updated_at = now()",
        )
        .bind(user_id)
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store used when no database is configured. Drafts do not
/// survive a restart.
#[derive(Default)]
pub struct MemoryDraftStore {
    drafts: Mutex<HashMap<Uuid, ResumeDocument>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<ResumeDocument>, DraftError> {
        let drafts = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        Ok(drafts.get(&user_id).cloned())
    }

    async fn upsert(&self, user_id: Uuid, doc: &ResumeDocument) -> Result<(), DraftError> {
        let mut drafts = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        drafts.insert(user_id, doc.clone());
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonalInfo;

    fn doc(name: &str) -> ResumeDocument {
        ResumeDocument {
            personal: PersonalInfo {
                full_name: name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_missing_draft_is_none() {
        let store = MemoryDraftStore::new();
        let got = store.get(Uuid::new_v4()).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_get_round_trips() {
        let store = MemoryDraftStore::new();
        let user = Uuid::new_v4();
        store.upsert(user, &doc("Jane")).await.unwrap();
        let got = store.get(user).await.unwrap().unwrap();
        assert_eq!(got.personal.full_name, "Jane");
    }

    #[tokio::test]
    async fn test_second_upsert_replaces_the_draft() {
        let store = MemoryDraftStore::new();
        let user = Uuid::new_v4();
        store.upsert(user, &doc("First")).await.unwrap();
        store.upsert(user, &doc("Second")).await.unwrap();
        let got = store.get(user).await.unwrap().unwrap();
        assert_eq!(got.personal.full_name, "Second");
    }

    #[tokio::test]
    async fn test_drafts_are_isolated_per_user() {
        let store = MemoryDraftStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.upsert(a, &doc("A")).await.unwrap();
        assert!(store.get(b).await.unwrap().is_none());
    }
}
