//! # Domain Layer
//!
//! The domain layer contains the core business rules of the travel planner.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Plan, Place, PlanPlace, etc.)
//! - **value_objects**: Immutable value types (PlanRole, ReferenceUpdate)
//! - **services**: Domain services for rules spanning several entities
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Pure functions for hierarchy and synchronisation rules

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
