use async_trait::async_trait;
use chirp_core::models::{Association, AssociationKind, ImageRecord, NewImageRecord};
use chirp_core::AppError;
use sqlx::{FromRow, PgPool, Postgres};

/// Persistence contract for image records.
///
/// The upload pipeline only talks to this trait, so it can run against Postgres in
/// production and against [`crate::InMemoryImageRecords`] in tests.
#[async_trait]
pub trait ImageRecordStore: Send + Sync {
    /// Whether the tweet, comment or user an association points at exists.
    async fn target_exists(&self, association: &Association) -> Result<bool, AppError>;

    /// Insert a record. For profile images the owner's `profile_image` is updated in the
    /// same transaction.
    async fn insert(&self, record: NewImageRecord) -> Result<ImageRecord, AppError>;

    async fn get(&self, id: i32) -> Result<Option<ImageRecord>, AppError>;

    /// Delete a record, returning whether it existed.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

#[derive(Debug, FromRow)]
struct ImageRow {
    id: i32,
    user_id: i32,
    url: String,
    #[sqlx(rename = "type")]
    kind: String,
    tweet_id: Option<i32>,
    comment_id: Option<i32>,
    key: String,
}

impl TryFrom<ImageRow> for ImageRecord {
    type Error = AppError;

    fn try_from(row: ImageRow) -> Result<Self, Self::Error> {
        let kind: AssociationKind = row.kind.parse().map_err(|e: anyhow::Error| {
            AppError::Internal(format!("Image {} has invalid type: {}", row.id, e))
        })?;

        let missing = |field: &str| {
            AppError::Internal(format!(
                "Image {} has type {} but no {}",
                row.id, kind, field
            ))
        };

        let association = match kind {
            AssociationKind::Tweet => Association::Tweet {
                tweet_id: row.tweet_id.ok_or_else(|| missing("tweet_id"))?,
            },
            AssociationKind::Comment => Association::Comment {
                comment_id: row.comment_id.ok_or_else(|| missing("comment_id"))?,
            },
            AssociationKind::User => Association::User {
                user_id: row.user_id,
            },
        };

        Ok(ImageRecord {
            id: row.id,
            user_id: row.user_id,
            url: row.url,
            key: row.key,
            association,
        })
    }
}

const IMAGE_COLUMNS: &str = r#"id, user_id, url, "type", tweet_id, comment_id, "key""#;

/// Postgres-backed image records
#[derive(Clone)]
pub struct ImageRepository {
    pool: PgPool,
}

impl ImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRecordStore for ImageRepository {
    #[tracing::instrument(skip(self), fields(db.operation = "select"))]
    async fn target_exists(&self, association: &Association) -> Result<bool, AppError> {
        let sql = match association.kind() {
            AssociationKind::Tweet => "SELECT EXISTS(SELECT 1 FROM tweets WHERE id = $1)",
            AssociationKind::Comment => "SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1)",
            AssociationKind::User => "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)",
        };

        let exists = sqlx::query_scalar::<Postgres, bool>(sql)
            .bind(association.target_id())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "images", db.operation = "insert", key = %record.key))]
    async fn insert(&self, record: NewImageRecord) -> Result<ImageRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<Postgres, ImageRow>(&format!(
            r#"
            INSERT INTO images (user_id, url, "type", tweet_id, comment_id, "key")
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            IMAGE_COLUMNS
        ))
        .bind(record.user_id)
        .bind(&record.url)
        .bind(record.association.kind().as_str())
        .bind(record.association.tweet_id())
        .bind(record.association.comment_id())
        .bind(&record.key)
        .fetch_one(&mut *tx)
        .await?;

        if let Association::User { user_id } = record.association {
            let updated = sqlx::query("UPDATE users SET profile_image = $1 WHERE id = $2")
                .bind(&record.url)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

            if updated.rows_affected() == 0 {
                return Err(AppError::RecordNotFound("User not found".to_string()));
            }
        }

        tx.commit().await?;

        tracing::debug!(image_id = row.id, "Image record inserted");
        row.try_into()
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select", db.record_id = id))]
    async fn get(&self, id: i32) -> Result<Option<ImageRecord>, AppError> {
        let row = sqlx::query_as::<Postgres, ImageRow>(&format!(
            "SELECT {} FROM images WHERE id = $1",
            IMAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ImageRecord::try_from).transpose()
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "delete", db.record_id = id))]
    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
