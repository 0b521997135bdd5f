//! Place entity and repository trait.
//!
//! Maps to the `places` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A geocoded point of interest.
///
/// Maps to the `places` table:
/// - id: UUID PRIMARY KEY
/// - name: VARCHAR(200) NOT NULL
/// - google_place_id: VARCHAR(255) NULL (unique among live rows)
/// - address: TEXT NULL
/// - lat / lng: DOUBLE PRECISION NULL
/// - image_url: TEXT NULL
/// - created_at_utc / updated_at_utc: TIMESTAMPTZ NOT NULL
/// - deleted_at_utc: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub google_place_id: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fields supplied when creating a place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPlace {
    pub name: String,
    pub google_place_id: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub image_url: Option<String>,
}

impl Place {
    pub fn create(new: NewPlace) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            google_place_id: normalize_google_place_id(new.google_place_id),
            address: new.address,
            lat: new.lat,
            lng: new.lng,
            image_url: new.image_url,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Blank Google ids are treated as absent.
pub fn normalize_google_place_id(id: Option<String>) -> Option<String> {
    id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Repository trait for places.
///
/// Reads never return soft-deleted places.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// All places ordered by name.
    async fn list(&self) -> Result<Vec<Place>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Place>, AppError>;

    async fn find_by_google_place_id(&self, google_place_id: &str) -> Result<Option<Place>, AppError>;

    /// Insert a place. A live duplicate Google id yields `AppError::Conflict`.
    async fn create(&self, place: &Place) -> Result<Place, AppError>;

    /// Returns `None` when the place no longer exists.
    async fn update(&self, place: &Place) -> Result<Option<Place>, AppError>;

    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_google_id_is_dropped() {
        let place = Place::create(NewPlace {
            name: "Cafe".into(),
            google_place_id: Some("   ".into()),
            ..Default::default()
        });
        assert_eq!(place.google_place_id, None);
    }

    #[test]
    fn google_id_is_trimmed() {
        assert_eq!(
            normalize_google_place_id(Some(" ChIJ123 ".into())),
            Some("ChIJ123".to_string())
        );
    }
}
