//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong to
//! a single entity. They are pure functions over domain entities.
//!
//! ## Services
//!
//! - **PlanAccessService**: Who may see or change a plan
//! - **PlaceHierarchy**: Tree assembly and cycle detection for plan places
//! - **BasicInfoSync**: Merge rules between `plans` and `plan_basic_info`

mod basic_info_sync;
mod place_hierarchy;
mod plan_access;

pub use basic_info_sync::*;
pub use place_hierarchy::*;
pub use plan_access::*;
