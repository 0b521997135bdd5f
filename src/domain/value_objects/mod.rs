//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **PlanRole**: A member's role within a plan
//! - **ReferenceUpdate**: Keep / clear / set instruction for an optional foreign key

mod plan_role;
mod reference_update;

pub use plan_role::*;
pub use reference_update::*;
