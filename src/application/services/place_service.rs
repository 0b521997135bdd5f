//! Place Service
//!
//! CRUD for the shared place catalogue. Google place ids are unique among
//! live places.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{normalize_google_place_id, NewPlace, Place, PlaceRepository};
use crate::shared::error::AppError;

/// Place service trait
#[async_trait]
pub trait PlaceService: Send + Sync {
    async fn list_places(&self) -> Result<Vec<Place>, PlaceError>;

    async fn get_place(&self, place_id: Uuid) -> Result<Place, PlaceError>;

    async fn get_by_google_place_id(&self, google_place_id: &str) -> Result<Place, PlaceError>;

    async fn create_place(&self, request: NewPlace) -> Result<Place, PlaceError>;

    async fn update_place(&self, place_id: Uuid, request: UpdatePlaceDto)
        -> Result<Place, PlaceError>;

    async fn delete_place(&self, place_id: Uuid) -> Result<(), PlaceError>;
}

/// Partial place update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlaceDto {
    pub name: Option<String>,
    pub google_place_id: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub image_url: Option<String>,
}

/// Place service errors
#[derive(Debug, thiserror::Error)]
pub enum PlaceError {
    #[error("Place not found")]
    NotFound,

    #[error("A place with Google place id '{0}' already exists")]
    DuplicateGooglePlaceId(String),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<PlaceError> for AppError {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::NotFound => AppError::NotFound(err.to_string()),
            PlaceError::DuplicateGooglePlaceId(_) => AppError::Conflict(err.to_string()),
            PlaceError::Repository(e) => e,
        }
    }
}

/// Reuse the live place carrying the same Google id, or insert a new one.
///
/// Places without a Google id are always inserted. A concurrent insert of
/// the same Google id surfaces as a conflict, in which case the winner is
/// loaded instead.
pub async fn find_or_create_place<R>(repo: &R, request: NewPlace) -> Result<Place, AppError>
where
    R: PlaceRepository + ?Sized,
{
    let place = Place::create(request);

    let Some(google_id) = place.google_place_id.clone() else {
        return repo.create(&place).await;
    };

    if let Some(existing) = repo.find_by_google_place_id(&google_id).await? {
        return Ok(existing);
    }

    match repo.create(&place).await {
        Err(AppError::Conflict(_)) => repo
            .find_by_google_place_id(&google_id)
            .await?
            .ok_or_else(|| AppError::Conflict(format!("Place '{}' is being created", google_id))),
        other => other,
    }
}

/// PlaceService implementation
pub struct PlaceServiceImpl<R: PlaceRepository> {
    place_repo: Arc<R>,
}

impl<R: PlaceRepository> PlaceServiceImpl<R> {
    pub fn new(place_repo: Arc<R>) -> Self {
        Self { place_repo }
    }

    /// Fails when `google_id` belongs to a live place other than `except`.
    async fn ensure_google_id_free(
        &self,
        google_id: &str,
        except: Option<Uuid>,
    ) -> Result<(), PlaceError> {
        match self.place_repo.find_by_google_place_id(google_id).await? {
            Some(other) if Some(other.id) != except => {
                Err(PlaceError::DuplicateGooglePlaceId(google_id.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R: PlaceRepository + 'static> PlaceService for PlaceServiceImpl<R> {
    async fn list_places(&self) -> Result<Vec<Place>, PlaceError> {
        Ok(self.place_repo.list().await?)
    }

    async fn get_place(&self, place_id: Uuid) -> Result<Place, PlaceError> {
        self.place_repo
            .find_by_id(place_id)
            .await?
            .ok_or(PlaceError::NotFound)
    }

    async fn get_by_google_place_id(&self, google_place_id: &str) -> Result<Place, PlaceError> {
        self.place_repo
            .find_by_google_place_id(google_place_id.trim())
            .await?
            .ok_or(PlaceError::NotFound)
    }

    async fn create_place(&self, request: NewPlace) -> Result<Place, PlaceError> {
        let place = Place::create(request);
        if let Some(google_id) = &place.google_place_id {
            self.ensure_google_id_free(google_id, None).await?;
        }

        let created = self.place_repo.create(&place).await?;
        tracing::info!(place_id = %created.id, "Place created");
        Ok(created)
    }

    async fn update_place(
        &self,
        place_id: Uuid,
        request: UpdatePlaceDto,
    ) -> Result<Place, PlaceError> {
        let mut place = self.get_place(place_id).await?;

        if let Some(google_id) = normalize_google_place_id(request.google_place_id) {
            if place.google_place_id.as_deref() != Some(google_id.as_str()) {
                self.ensure_google_id_free(&google_id, Some(place.id)).await?;
                place.google_place_id = Some(google_id);
            }
        }
        if let Some(name) = request.name {
            place.name = name;
        }
        if let Some(address) = request.address {
            place.address = Some(address);
        }
        if let Some(lat) = request.lat {
            place.lat = Some(lat);
        }
        if let Some(lng) = request.lng {
            place.lng = Some(lng);
        }
        if let Some(image_url) = request.image_url {
            place.image_url = Some(image_url);
        }
        place.updated_at = Utc::now();

        self.place_repo
            .update(&place)
            .await?
            .ok_or(PlaceError::NotFound)
    }

    async fn delete_place(&self, place_id: Uuid) -> Result<(), PlaceError> {
        if !self.place_repo.soft_delete(place_id).await? {
            return Err(PlaceError::NotFound);
        }
        tracing::info!(%place_id, "Place deleted");
        Ok(())
    }
}
