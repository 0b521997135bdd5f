//! Request DTOs
//!
//! Data structures for API request bodies. Field names are camelCase on the
//! wire.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::application::services::{
    CreateBookingDto, CreateChecklistItemDto, CreatePlanDto, CreatePlanPlaceDto,
    UpdateBookingDto, UpdateChecklistItemDto, UpdatePlaceDto, UpdatePlanDto, UpdatePlanPlaceDto,
};
use crate::domain::services::BasicInfoUpdate;
use crate::domain::{NewPlace, ReferenceUpdate};
use crate::shared::validation::{validate_currency_code, validate_password};

// ============================================================================
// Auth
// ============================================================================

/// Registration request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_password"))]
    pub password: String,

    #[validate(length(max = 100, message = "Display name must be at most 100 characters"))]
    pub display_name: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,

    /// The (possibly expired) access token being replaced
    pub access_token: Option<String>,
}

/// Logout request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Change password request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(custom(function = "validate_password"))]
    pub new_password: String,
}

// ============================================================================
// Plans
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    pub status_id: i32,

    #[serde(default)]
    pub is_public: bool,
}

impl From<CreatePlanRequest> for CreatePlanDto {
    fn from(req: CreatePlanRequest) -> Self {
        Self {
            title: req.title,
            status_id: req.status_id,
            is_public: req.is_public,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    pub status_id: Option<i32>,
    pub is_public: Option<bool>,
    pub cover_image_url: Option<String>,
}

impl From<UpdatePlanRequest> for UpdatePlanDto {
    fn from(req: UpdatePlanRequest) -> Self {
        Self {
            title: req.title,
            status_id: req.status_id,
            is_public: req.is_public,
            cover_image_url: req.cover_image_url,
        }
    }
}

// ============================================================================
// Places
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 255, message = "Google place id must be at most 255 characters"))]
    pub google_place_id: Option<String>,

    pub address: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub lng: Option<f64>,

    pub image_url: Option<String>,
}

impl From<CreatePlaceRequest> for NewPlace {
    fn from(req: CreatePlaceRequest) -> Self {
        Self {
            name: req.name,
            google_place_id: req.google_place_id,
            address: req.address,
            lat: req.lat,
            lng: req.lng,
            image_url: req.image_url,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlaceRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 255, message = "Google place id must be at most 255 characters"))]
    pub google_place_id: Option<String>,

    pub address: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub lng: Option<f64>,

    pub image_url: Option<String>,
}

impl From<UpdatePlaceRequest> for UpdatePlaceDto {
    fn from(req: UpdatePlaceRequest) -> Self {
        Self {
            name: req.name,
            google_place_id: req.google_place_id,
            address: req.address,
            lat: req.lat,
            lng: req.lng,
            image_url: req.image_url,
        }
    }
}

// ============================================================================
// Plan places
// ============================================================================

/// Attach a place to a plan. Any plan id in the body is ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanPlaceRequest {
    pub places_id: Option<Uuid>,

    #[validate(nested)]
    pub place: Option<CreatePlaceRequest>,

    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 50, message = "Kind must be at most 50 characters"))]
    pub kind: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Level must be a non-negative number"))]
    pub level: i32,

    pub parent_id: Option<Uuid>,
}

impl From<CreatePlanPlaceRequest> for CreatePlanPlaceDto {
    fn from(req: CreatePlanPlaceRequest) -> Self {
        Self {
            place_id: req.places_id,
            place: req.place.map(NewPlace::from),
            name: req.name,
            kind: req.kind,
            level: req.level,
            parent_id: req.parent_id,
        }
    }
}

/// `parentId`: absent or null keeps the parent, the nil UUID detaches it.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanPlaceRequest {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 50, message = "Kind must be at most 50 characters"))]
    pub kind: Option<String>,

    #[validate(range(min = 0, message = "Level must be a non-negative number"))]
    pub level: Option<i32>,

    pub parent_id: Option<Uuid>,
}

impl From<UpdatePlanPlaceRequest> for UpdatePlanPlaceDto {
    fn from(req: UpdatePlanPlaceRequest) -> Self {
        Self {
            name: req.name,
            kind: req.kind,
            level: req.level,
            parent: ReferenceUpdate::from_wire(req.parent_id),
        }
    }
}

// ============================================================================
// Basic info
// ============================================================================

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBasicInfoRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    pub cover_image_url: Option<String>,
    pub cover_img_url: Option<String>,
    pub description: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 200, message = "Destination must be at most 200 characters"))]
    pub destination: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub trip_type_id: Option<Uuid>,

    #[validate(range(min = 0.0, message = "Budget amount must be a non-negative number"))]
    pub budget_amount: Option<f64>,

    #[validate(custom(function = "validate_currency_code"))]
    pub budget_currency: Option<String>,

    pub notes: Option<String>,
}

impl From<UpdateBasicInfoRequest> for BasicInfoUpdate {
    fn from(req: UpdateBasicInfoRequest) -> Self {
        Self {
            title: req.title,
            cover_image_url: req.cover_image_url,
            cover_img_url: req.cover_img_url,
            description: req.description,
            location: req.location,
            destination: req.destination,
            start_date: req.start_date,
            end_date: req.end_date,
            trip_type: ReferenceUpdate::from_wire(req.trip_type_id),
            budget_amount: req.budget_amount,
            budget_currency: req.budget_currency,
            notes: req.notes,
        }
    }
}

// ============================================================================
// Bookings
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 50, message = "Kind must be 1-50 characters"))]
    pub kind: String,

    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,

    #[validate(range(min = 0.0, message = "Amount must be a non-negative number"))]
    pub amount: f64,

    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,

    pub link_url: Option<String>,
    pub reservation_pdf: Option<String>,
}

impl From<CreateBookingRequest> for CreateBookingDto {
    fn from(req: CreateBookingRequest) -> Self {
        Self {
            kind: req.kind,
            name: req.name,
            start_date: req.start_date,
            end_date: req.end_date,
            start_time: req.start_time,
            end_time: req.end_time,
            amount: req.amount,
            currency: req.currency,
            link_url: req.link_url,
            reservation_pdf: req.reservation_pdf,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[validate(length(min = 1, max = 50, message = "Kind must be 1-50 characters"))]
    pub kind: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,

    #[validate(range(min = 0.0, message = "Amount must be a non-negative number"))]
    pub amount: Option<f64>,

    #[validate(custom(function = "validate_currency_code"))]
    pub currency: Option<String>,

    pub link_url: Option<String>,
    pub reservation_pdf: Option<String>,
}

impl From<UpdateBookingRequest> for UpdateBookingDto {
    fn from(req: UpdateBookingRequest) -> Self {
        Self {
            kind: req.kind,
            name: req.name,
            start_date: req.start_date,
            end_date: req.end_date,
            start_time: req.start_time,
            end_time: req.end_time,
            amount: req.amount,
            currency: req.currency,
            link_url: req.link_url,
            reservation_pdf: req.reservation_pdf,
        }
    }
}

// ============================================================================
// Checklist
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChecklistItemRequest {
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(range(min = 0, max = 1_000_000, message = "Position must be between 0 and 1000000"))]
    pub position: Option<i32>,

    pub note: Option<String>,
}

impl From<CreateChecklistItemRequest> for CreateChecklistItemDto {
    fn from(req: CreateChecklistItemRequest) -> Self {
        Self {
            category: req.category,
            title: req.title,
            position: req.position,
            note: req.note,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChecklistItemRequest {
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    pub is_done: Option<bool>,

    #[validate(range(min = 0, max = 1_000_000, message = "Position must be between 0 and 1000000"))]
    pub position: Option<i32>,

    pub note: Option<String>,
}

impl From<UpdateChecklistItemRequest> for UpdateChecklistItemDto {
    fn from(req: UpdateChecklistItemRequest) -> Self {
        Self {
            category: req.category,
            title: req.title,
            is_done: req.is_done,
            position: req.position,
            note: req.note,
        }
    }
}
