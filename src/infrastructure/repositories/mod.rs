//! Repository Implementations
//!
//! PostgreSQL implementations of the repository traits defined in the
//! domain layer. Every table except the lookups is soft deleted, so reads
//! filter on `deleted_at_utc IS NULL`.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use travel_planner::infrastructure::repositories::{PgPlanRepository, PgUserRepository};
//!
//! fn setup_repositories(pool: PgPool) {
//!     let users = PgUserRepository::new(pool.clone());
//!     let plans = PgPlanRepository::new(pool);
//! }
//! ```

// Accounts
pub mod user_repository;
pub mod session_repository;

// Plans and their sub-resources
pub mod plan_repository;
pub mod lookup_repository;
pub mod basic_info_repository;
pub mod place_repository;
pub mod plan_place_repository;
pub mod booking_repository;
pub mod checklist_repository;

pub use user_repository::PgUserRepository;
pub use session_repository::PgSessionRepository;

pub use plan_repository::PgPlanRepository;
pub use lookup_repository::PgLookupRepository;
pub use basic_info_repository::PgBasicInfoRepository;
pub use place_repository::PgPlaceRepository;
pub use plan_place_repository::PgPlanPlaceRepository;
pub use booking_repository::PgBookingRepository;
pub use checklist_repository::PgChecklistRepository;

/// Seed rows shared by the database-backed repository tests.
///
/// Those tests run under `#[sqlx::test]` and are ignored by default; run them
/// with `DATABASE_URL` pointing at a PostgreSQL server and `cargo test -- --ignored`.
#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::PgPool;

    use crate::domain::{NewPlace, Place, PlaceRepository, Plan, PlanRepository, User, UserRepository};

    use super::{PgPlaceRepository, PgPlanRepository, PgUserRepository};

    pub async fn seed_plan(pool: &PgPool) -> Plan {
        let owner = PgUserRepository::new(pool.clone())
            .create(&User::register(
                &format!("{}@example.com", uuid::Uuid::new_v4()),
                "hash".into(),
                None,
            ))
            .await
            .unwrap();
        PgPlanRepository::new(pool.clone())
            .create(&Plan::new(owner.id, Some("Trip".into()), 1, false))
            .await
            .unwrap()
    }

    pub async fn seed_place(pool: &PgPool, name: &str) -> Place {
        PgPlaceRepository::new(pool.clone())
            .create(&Place::create(NewPlace {
                name: name.into(),
                ..Default::default()
            }))
            .await
            .unwrap()
    }
}
