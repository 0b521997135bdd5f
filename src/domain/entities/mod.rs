//! # Domain Entities
//!
//! Core domain entities of the travel planner. Every entity maps directly to
//! its database table; soft-deletable entities carry a `deleted_at` marker.
//!
//! ## Core Entities
//!
//! - **User**: Account with authentication data and profile
//! - **Plan**: A trip owned by a user, plus its members
//! - **Place**: A geocoded point of interest
//! - **PlanPlace**: A place attached to a plan inside a hierarchy
//! - **PlanBasicInfo**: Dates, budget and description of a plan
//!
//! ## Supporting Entities
//!
//! - **Booking**: Reservations attached to a plan
//! - **ChecklistItem**: Preparation to-dos
//! - **PlanStatus / TripType**: Reference data
//! - **Session**: Refresh token sessions
//! - **StoredFile**: Uploaded images and their storage backend
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod basic_info;
mod booking;
mod checklist;
mod lookup;
mod place;
mod plan;
mod plan_place;
mod session;
mod stored_file;
mod user;

pub use basic_info::{BasicInfoRepository, PlanBasicInfo};
pub use booking::{Booking, BookingRepository};
pub use checklist::{ChecklistItem, ChecklistRepository, MAX_CHECKLIST_POSITION};
pub use lookup::{default_status, LookupRepository, PlanStatus, TripType, DEFAULT_STATUS_NAME};
pub use place::{normalize_google_place_id, NewPlace, Place, PlaceRepository};
pub use plan::{Plan, PlanMember, PlanRepository};
pub use plan_place::{PlaceSummary, PlanPlace, PlanPlaceRepository};
pub use session::{Session, SessionRepository};
pub use stored_file::{is_safe_file_name, FileStorage, StoredFile};
pub use user::{default_display_name, User, UserRepository};

#[cfg(test)]
pub use basic_info::MockBasicInfoRepository;
#[cfg(test)]
pub use booking::MockBookingRepository;
#[cfg(test)]
pub use checklist::MockChecklistRepository;
#[cfg(test)]
pub use lookup::MockLookupRepository;
#[cfg(test)]
pub use place::MockPlaceRepository;
#[cfg(test)]
pub use plan::MockPlanRepository;
#[cfg(test)]
pub use plan_place::MockPlanPlaceRepository;
#[cfg(test)]
pub use session::MockSessionRepository;
#[cfg(test)]
pub use stored_file::MockFileStorage;
#[cfg(test)]
pub use user::MockUserRepository;
