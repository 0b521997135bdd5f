//! Place Repository Implementation
//!
//! PostgreSQL implementation of the PlaceRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Place, PlaceRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct PlaceRow {
    id: Uuid,
    name: String,
    google_place_id: Option<String>,
    address: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    image_url: Option<String>,
    created_at_utc: DateTime<Utc>,
    updated_at_utc: DateTime<Utc>,
    deleted_at_utc: Option<DateTime<Utc>>,
}

impl PlaceRow {
    fn into_place(self) -> Place {
        Place {
            id: self.id,
            name: self.name,
            google_place_id: self.google_place_id,
            address: self.address,
            lat: self.lat,
            lng: self.lng,
            image_url: self.image_url,
            created_at: self.created_at_utc,
            updated_at: self.updated_at_utc,
            deleted_at: self.deleted_at_utc,
        }
    }
}

/// Unique violations on the live Google id index become conflicts.
fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A place with this Google place id already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}

#[derive(Clone)]
pub struct PgPlaceRepository {
    pool: PgPool,
}

impl PgPlaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceRepository for PgPlaceRepository {
    async fn list(&self) -> Result<Vec<Place>, AppError> {
        let rows = sqlx::query_as::<_, PlaceRow>(
            r#"
            SELECT id, name, google_place_id, address, lat, lng, image_url,
                   created_at_utc, updated_at_utc, deleted_at_utc
            FROM places
            WHERE deleted_at_utc IS NULL
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_place()).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Place>, AppError> {
        let row = sqlx::query_as::<_, PlaceRow>(
            r#"
            SELECT id, name, google_place_id, address, lat, lng, image_url,
                   created_at_utc, updated_at_utc, deleted_at_utc
            FROM places
            WHERE id = $1 AND deleted_at_utc IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_place()))
    }

    async fn find_by_google_place_id(&self, google_place_id: &str) -> Result<Option<Place>, AppError> {
        let row = sqlx::query_as::<_, PlaceRow>(
            r#"
            SELECT id, name, google_place_id, address, lat, lng, image_url,
                   created_at_utc, updated_at_utc, deleted_at_utc
            FROM places
            WHERE google_place_id = $1 AND deleted_at_utc IS NULL
            "#,
        )
        .bind(google_place_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_place()))
    }

    async fn create(&self, place: &Place) -> Result<Place, AppError> {
        let row = sqlx::query_as::<_, PlaceRow>(
            r#"
            INSERT INTO places (id, name, google_place_id, address, lat, lng, image_url,
                                created_at_utc, updated_at_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, google_place_id, address, lat, lng, image_url,
                      created_at_utc, updated_at_utc, deleted_at_utc
            "#,
        )
        .bind(place.id)
        .bind(&place.name)
        .bind(&place.google_place_id)
        .bind(&place.address)
        .bind(place.lat)
        .bind(place.lng)
        .bind(&place.image_url)
        .bind(place.created_at)
        .bind(place.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into_place())
    }

    async fn update(&self, place: &Place) -> Result<Option<Place>, AppError> {
        let row = sqlx::query_as::<_, PlaceRow>(
            r#"
            UPDATE places
            SET name = $2, google_place_id = $3, address = $4, lat = $5, lng = $6,
                image_url = $7, updated_at_utc = $8
            WHERE id = $1 AND deleted_at_utc IS NULL
            RETURNING id, name, google_place_id, address, lat, lng, image_url,
                      created_at_utc, updated_at_utc, deleted_at_utc
            "#,
        )
        .bind(place.id)
        .bind(&place.name)
        .bind(&place.google_place_id)
        .bind(&place.address)
        .bind(place.lat)
        .bind(place.lng)
        .bind(&place.image_url)
        .bind(place.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.map(|r| r.into_place()))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE places
            SET deleted_at_utc = NOW(), updated_at_utc = NOW()
            WHERE id = $1 AND deleted_at_utc IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
