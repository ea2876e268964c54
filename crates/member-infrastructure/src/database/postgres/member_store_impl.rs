// ============================================================================
// Member Infrastructure - PostgreSQL Member Store
// File: crates/member-infrastructure/src/database/postgres/member_store_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use member_core::domain::MemberRecord;
use member_core::error::DomainError;
use member_core::repositories::MemberStore;
use member_shared::utils::mask_email;
use member_shared::MemberId;

pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, record: &MemberRecord) -> Result<MemberRecord, DomainError> {
        info!("Creating member with email: {}", mask_email(&record.email));

        let row: MemberRow = sqlx::query_as(
            r#"
            INSERT INTO member_table (member_email, member_password, member_name)
            VALUES ($1, $2, $3)
            RETURNING id, member_email, member_password, member_name
            "#
        )
        .bind(&record.email)
        .bind(&record.password)
        .bind(&record.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &record.email, "creating member"))?;

        info!("Member created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update_in_place(
        &self,
        id: MemberId,
        record: &MemberRecord,
    ) -> Result<Option<MemberRecord>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            UPDATE member_table
            SET
                member_email = $2,
                member_password = $3,
                member_name = $4
            WHERE id = $1
            RETURNING id, member_email, member_password, member_name
            "#
        )
        .bind(id)
        .bind(&record.email)
        .bind(&record.password)
        .bind(&record.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &record.email, "updating member"))?;

        Ok(row.map(|r| r.into()))
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MemberRow {
    pub id: MemberId,
    pub member_email: String,
    pub member_password: String,
    pub member_name: Option<String>,
}

impl From<MemberRow> for MemberRecord {
    fn from(row: MemberRow) -> Self {
        MemberRecord {
            id: Some(row.id),
            email: row.member_email,
            password: row.member_password,
            name: row.member_name,
        }
    }
}

fn map_write_error(e: sqlx::Error, email: &str, action: &str) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return DomainError::DuplicateEmail(email.to_string());
        }
    }
    error!("Database error {}: {}", action, e);
    DomainError::Storage(e.to_string())
}

fn map_query_error(e: sqlx::Error, action: &str) -> DomainError {
    error!("Database error {}: {}", action, e);
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl MemberStore for PgMemberStore {
    async fn save(&self, record: &MemberRecord) -> Result<MemberRecord, DomainError> {
        match record.id {
            None => self.insert(record).await,
            Some(id) => match self.update_in_place(id, record).await? {
                Some(updated) => Ok(updated),
                None => {
                    info!("Member {} not found on save, inserting as new", id);
                    self.insert(record).await
                }
            },
        }
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<MemberRecord>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, member_email, member_password, member_name
            FROM member_table
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_query_error(e, "finding member by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<MemberRecord>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, member_email, member_password, member_name
            FROM member_table
            WHERE member_email = $1
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_query_error(e, "finding member by email"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<MemberRecord>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, member_email, member_password, member_name
            FROM member_table
            ORDER BY id
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_query_error(e, "listing members"))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn delete_by_id(&self, id: MemberId) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            DELETE FROM member_table
            WHERE id = $1
            "#
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_query_error(e, "deleting member"))?;

        Ok(())
    }
}
