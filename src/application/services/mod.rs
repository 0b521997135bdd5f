//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, token refresh and password changes
//! - **UserService**: Profile of the signed-in user
//! - **PlanService**: Plan lifecycle and visibility
//! - **LookupService**: Plan statuses and trip types
//! - **PlaceService**: Shared place catalogue
//! - **PlanPlaceService**: Place hierarchy of a plan
//! - **BasicInfoService**: Dates, budget and description of a plan
//! - **BookingService**: Reservations
//! - **ChecklistService**: Preparation to-dos
//! - **FileService**: Image uploads

pub mod auth_service;
pub mod basic_info_service;
pub mod booking_service;
pub mod checklist_service;
pub mod file_service;
pub mod lookup_service;
pub mod place_service;
pub mod plan_place_service;
pub mod plan_service;
pub mod token_service;
pub mod user_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl};
pub use token_service::{AuthTokens, Claims, TokenService};

pub use user_service::{UserError, UserProfileDto, UserService, UserServiceImpl};

pub use plan_service::{
    find_managed_plan, CreatePlanDto, PlanError, PlanService, PlanServiceImpl, UpdatePlanDto,
};

pub use lookup_service::{LookupService, LookupServiceImpl};

pub use place_service::{
    find_or_create_place, PlaceError, PlaceService, PlaceServiceImpl, UpdatePlaceDto,
};

pub use plan_place_service::{
    CreatePlanPlaceDto, PlanPlaceError, PlanPlaceService, PlanPlaceServiceImpl,
    UpdatePlanPlaceDto,
};

pub use basic_info_service::{BasicInfoError, BasicInfoService, BasicInfoServiceImpl, BasicInfoView};

pub use booking_service::{
    BookingError, BookingService, BookingServiceImpl, CreateBookingDto, UpdateBookingDto,
};

pub use checklist_service::{
    ChecklistError, ChecklistService, ChecklistServiceImpl, CreateChecklistItemDto,
    UpdateChecklistItemDto,
};

pub use file_service::{FileError, FileService, FileServiceImpl, UploadedFile};
