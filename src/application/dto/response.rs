//! Response DTOs
//!
//! Data structures for API response bodies. Field names are camelCase on the
//! wire and ids keep the names clients already use (`plansId`, `placesId`).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::services::{AuthTokens, BasicInfoView, UserProfileDto};
use crate::domain::services::PlanPlaceNode;
use crate::domain::{
    Booking, ChecklistItem, Place, PlaceSummary, Plan, PlanMember, PlanPlace, PlanStatus,
    StoredFile, TripType, User,
};

// ============================================================================
// Auth & users
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl From<AuthTokens> for TokenResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

/// Registration response (includes user and tokens)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl RegisterResponse {
    pub fn new(user: User, tokens: AuthTokens) -> Self {
        Self {
            user: user.into(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

/// Account as returned after registration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub registered_at_utc: DateTime<Utc>,
    pub last_login_at_utc: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
            registered_at_utc: user.registered_at,
            last_login_at_utc: user.last_login_at,
        }
    }
}

/// `GET /api/user/me`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub profile_image_url: Option<String>,
}

impl From<UserProfileDto> for ProfileResponse {
    fn from(dto: UserProfileDto) -> Self {
        Self {
            id: dto.id,
            full_name: dto.full_name,
            email: dto.email,
            profile_image_url: dto.profile_image_url,
        }
    }
}

// ============================================================================
// Plans
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub plans_id: Uuid,
    pub owner_id: Uuid,
    pub title: Option<String>,
    pub destination: Option<String>,
    pub status_id: i32,
    pub status_name: String,
    pub is_public: bool,
    pub cover_image_url: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
    pub deleted_at_utc: Option<DateTime<Utc>>,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            plans_id: plan.id,
            owner_id: plan.owner_id,
            title: plan.title,
            destination: plan.destination,
            status_id: plan.status_id,
            status_name: plan.status_name,
            is_public: plan.is_public,
            cover_image_url: plan.cover_image_url,
            created_at_utc: plan.created_at,
            updated_at_utc: plan.updated_at,
            deleted_at_utc: plan.deleted_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMemberResponse {
    pub plans_id: Uuid,
    pub users_id: Uuid,
    pub role: String,
    pub added_at_utc: DateTime<Utc>,
}

impl From<PlanMember> for PlanMemberResponse {
    fn from(member: PlanMember) -> Self {
        Self {
            plans_id: member.plan_id,
            users_id: member.user_id,
            role: member.role.as_str().to_string(),
            added_at_utc: member.added_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCheckResponse {
    pub is_owner: bool,
}

// ============================================================================
// Reference data
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStatusResponse {
    pub status_id: i32,
    pub name: String,
}

impl From<PlanStatus> for PlanStatusResponse {
    fn from(status: PlanStatus) -> Self {
        Self {
            status_id: status.id,
            name: status.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripTypeResponse {
    pub trip_type_id: Uuid,
    pub name: String,
}

impl From<TripType> for TripTypeResponse {
    fn from(trip_type: TripType) -> Self {
        Self {
            trip_type_id: trip_type.id,
            name: trip_type.name,
        }
    }
}

// ============================================================================
// Places
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResponse {
    pub places_id: Uuid,
    pub name: String,
    pub google_place_id: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub image_url: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
    pub deleted_at_utc: Option<DateTime<Utc>>,
}

impl From<Place> for PlaceResponse {
    fn from(place: Place) -> Self {
        Self {
            places_id: place.id,
            name: place.name,
            google_place_id: place.google_place_id,
            address: place.address,
            lat: place.lat,
            lng: place.lng,
            image_url: place.image_url,
            created_at_utc: place.created_at,
            updated_at_utc: place.updated_at,
            deleted_at_utc: place.deleted_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSummaryResponse {
    pub places_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl From<PlaceSummary> for PlaceSummaryResponse {
    fn from(place: PlaceSummary) -> Self {
        Self {
            places_id: place.id,
            name: place.name,
            address: place.address,
            image_url: place.image_url,
            lat: place.lat,
            lng: place.lng,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPlaceResponse {
    pub plans_places_id: Uuid,
    pub plans_id: Uuid,
    pub places_id: Uuid,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub level: i32,
    pub parent_id: Option<Uuid>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
    pub deleted_at_utc: Option<DateTime<Utc>>,
    pub place: Option<PlaceSummaryResponse>,
    /// Only present in the tree view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PlanPlaceResponse>>,
}

impl From<PlanPlace> for PlanPlaceResponse {
    fn from(entry: PlanPlace) -> Self {
        Self {
            plans_places_id: entry.id,
            plans_id: entry.plan_id,
            places_id: entry.place_id,
            name: entry.name,
            kind: entry.kind,
            level: entry.level,
            parent_id: entry.parent_id,
            created_at_utc: entry.created_at,
            updated_at_utc: entry.updated_at,
            deleted_at_utc: entry.deleted_at,
            place: entry.place.map(PlaceSummaryResponse::from),
            children: None,
        }
    }
}

impl From<PlanPlaceNode> for PlanPlaceResponse {
    fn from(node: PlanPlaceNode) -> Self {
        let children = node.children.into_iter().map(Self::from).collect();
        Self {
            children: Some(children),
            ..Self::from(node.entry)
        }
    }
}

// ============================================================================
// Basic info
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoResponse {
    pub plan_id: Uuid,
    pub title: Option<String>,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub trip_type_id: Option<Uuid>,
    pub cover_img_url: Option<String>,
    pub budget_amount: Option<f64>,
    pub budget_currency: Option<String>,
    pub notes: Option<String>,
}

impl From<BasicInfoView> for BasicInfoResponse {
    fn from(view: BasicInfoView) -> Self {
        let BasicInfoView { plan, info } = view;
        let mut response = Self {
            plan_id: plan.id,
            title: plan.title,
            cover_image_url: plan.cover_image_url,
            description: None,
            location: None,
            destination: None,
            start_date: None,
            end_date: None,
            trip_type_id: None,
            cover_img_url: None,
            budget_amount: None,
            budget_currency: None,
            notes: None,
        };

        if let Some(info) = info {
            response.description = info.description;
            response.location = info.location;
            response.destination = info.destination;
            response.start_date = info.start_date;
            response.end_date = info.end_date;
            response.trip_type_id = info.trip_type_id;
            response.cover_img_url = info.cover_img_url;
            response.budget_amount = info.budget_amount;
            response.budget_currency = info.budget_currency;
            response.notes = info.notes;
        }
        response
    }
}

// ============================================================================
// Bookings & checklist
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub plans_bookings_id: Uuid,
    pub plans_id: Uuid,
    pub kind: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub amount: f64,
    pub currency: String,
    pub link_url: Option<String>,
    pub reservation_pdf: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            plans_bookings_id: booking.id,
            plans_id: booking.plan_id,
            kind: booking.kind,
            name: booking.name,
            start_date: booking.start_date,
            end_date: booking.end_date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            amount: booking.amount,
            currency: booking.currency,
            link_url: booking.link_url,
            reservation_pdf: booking.reservation_pdf,
            created_at_utc: booking.created_at,
            updated_at_utc: booking.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemResponse {
    pub checklist_item_id: Uuid,
    pub plan_id: Uuid,
    pub category: Option<String>,
    pub title: String,
    pub is_done: bool,
    pub position: i32,
    pub note: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub completed_at_utc: Option<DateTime<Utc>>,
}

impl From<ChecklistItem> for ChecklistItemResponse {
    fn from(item: ChecklistItem) -> Self {
        Self {
            checklist_item_id: item.id,
            plan_id: item.plan_id,
            category: item.category,
            title: item.title,
            is_done: item.is_done,
            position: item.position,
            note: item.note,
            created_at_utc: item.created_at,
            completed_at_utc: item.completed_at,
        }
    }
}

// ============================================================================
// Files & misc
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    pub file_name: String,
    pub file_url: String,
    pub file_size: u64,
    pub content_type: Option<String>,
}

impl From<StoredFile> for FileUploadResponse {
    fn from(file: StoredFile) -> Self {
        Self {
            file_name: file.file_name,
            file_url: file.file_url,
            file_size: file.file_size,
            content_type: file.content_type,
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlanBasicInfo;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn plan_uses_client_field_names() {
        let mut plan = Plan::new(Uuid::new_v4(), Some("Oslo".into()), 1, true);
        plan.status_name = "Draft".into();
        let value = serde_json::to_value(PlanResponse::from(plan.clone())).unwrap();

        assert_eq!(value["plansId"], json!(plan.id));
        assert_eq!(value["statusName"], json!("Draft"));
        assert_eq!(value["isPublic"], json!(true));
        assert!(value["deletedAtUtc"].is_null());
    }

    #[test]
    fn flat_plan_place_omits_children() {
        let entry = PlanPlace::new(Uuid::new_v4(), Uuid::new_v4(), None, None, 0, None);
        let value = serde_json::to_value(PlanPlaceResponse::from(entry)).unwrap();

        assert!(value.get("children").is_none());
        assert!(value.get("plansPlacesId").is_some());
    }

    #[test]
    fn tree_node_lists_children() {
        let root = PlanPlace::new(Uuid::new_v4(), Uuid::new_v4(), None, None, 0, None);
        let node = PlanPlaceNode {
            entry: root,
            children: vec![],
        };
        let value = serde_json::to_value(PlanPlaceResponse::from(node)).unwrap();

        assert_eq!(value["children"], json!([]));
    }

    #[test]
    fn basic_info_without_row_only_has_plan_fields() {
        let mut plan = Plan::new(Uuid::new_v4(), Some("Trip".into()), 1, false);
        plan.cover_image_url = Some("/uploads/a.png".into());
        let response = BasicInfoResponse::from(BasicInfoView {
            plan: plan.clone(),
            info: None,
        });

        assert_eq!(response.plan_id, plan.id);
        assert_eq!(response.cover_image_url.as_deref(), Some("/uploads/a.png"));
        assert_eq!(response.cover_img_url, None);
        assert_eq!(response.description, None);
    }

    #[test]
    fn basic_info_merges_row() {
        let plan = Plan::new(Uuid::new_v4(), None, 1, false);
        let mut info = PlanBasicInfo::empty(plan.id, Utc::now());
        info.budget_currency = Some("EUR".into());
        info.start_date = NaiveDate::from_ymd_opt(2025, 1, 2);

        let value = serde_json::to_value(BasicInfoResponse::from(BasicInfoView {
            plan,
            info: Some(info),
        }))
        .unwrap();

        assert_eq!(value["budgetCurrency"], json!("EUR"));
        assert_eq!(value["startDate"], json!("2025-01-02"));
    }
}
