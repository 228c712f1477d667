//! # Contact Submission Repository
//!
//! Submissions are inserted once, with a server-side timestamp, and never
//! updated or deleted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use taraang_core::contact::ContactSubmission;

use crate::error::{DbError, DbResult};

/// A submission as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSubmission {
    pub id: String,
    pub submission: ContactSubmission,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    event_type: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<SubmissionRow> for StoredSubmission {
    fn from(row: SubmissionRow) -> Self {
        StoredSubmission {
            id: row.id,
            submission: ContactSubmission {
                name: row.name,
                email: row.email,
                phone: row.phone,
                event_type: row.event_type,
                message: row.message,
            },
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, email, phone, event_type, message, created_at FROM contact_submissions";

#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ContactRepository { pool }
    }

    /// Stores a submission stamped with the current time.
    pub async fn insert(&self, submission: &ContactSubmission) -> DbResult<StoredSubmission> {
        let stored = StoredSubmission {
            id: Uuid::new_v4().to_string(),
            submission: submission.clone(),
            created_at: Utc::now(),
        };
        debug!(id = %stored.id, event_type = %submission.event_type, "Storing contact submission");

        sqlx::query(
            r#"
            INSERT INTO contact_submissions (
                id, name, email, phone, event_type, message, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&stored.id)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.event_type)
        .bind(&submission.message)
        .bind(stored.created_at)
        .execute(&self.pool)
        .await?;

        Ok(stored)
    }

    pub async fn get(&self, id: &str) -> DbResult<StoredSubmission> {
        let row: Option<SubmissionRow> =
            sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(StoredSubmission::from)
            .ok_or_else(|| DbError::not_found("Contact submission", id))
    }

    /// Newest first.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<StoredSubmission>> {
        let rows: Vec<SubmissionRow> = sqlx::query_as(&format!(
            "{} ORDER BY created_at DESC, rowid DESC LIMIT ?1",
            SELECT_COLUMNS
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(StoredSubmission::from).collect())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_submissions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
