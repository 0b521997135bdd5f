//! Plan visibility and ownership rules.

use uuid::Uuid;

use crate::domain::entities::Plan;

/// Domain service deciding access to plans.
pub struct PlanAccessService;

impl PlanAccessService {
    /// Public plans are visible to everyone, private ones only to their owner.
    pub fn can_view(plan: &Plan, viewer: Option<Uuid>) -> bool {
        !plan.is_deleted() && (plan.is_public || viewer.is_some_and(|v| plan.is_owned_by(v)))
    }

    /// Only the owner may change a plan or its sub-resources.
    pub fn can_manage(plan: &Plan, user_id: Uuid) -> bool {
        !plan.is_deleted() && plan.is_owned_by(user_id)
    }

    /// Whether a listing of `owner_id`'s plans requested by `viewer` is
    /// limited to public plans.
    pub fn public_only_listing(owner_id: Uuid, viewer: Option<Uuid>) -> bool {
        viewer != Some(owner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn plan(owner: Uuid, is_public: bool) -> Plan {
        Plan::new(owner, Some("Trip".into()), 1, is_public)
    }

    #[test]
    fn public_plan_visible_to_anonymous() {
        assert!(PlanAccessService::can_view(&plan(Uuid::new_v4(), true), None));
    }

    #[test]
    fn private_plan_visible_to_owner_only() {
        let owner = Uuid::new_v4();
        let p = plan(owner, false);
        assert!(PlanAccessService::can_view(&p, Some(owner)));
        assert!(!PlanAccessService::can_view(&p, Some(Uuid::new_v4())));
        assert!(!PlanAccessService::can_view(&p, None));
    }

    #[test]
    fn deleted_plan_is_invisible_and_unmanageable() {
        let owner = Uuid::new_v4();
        let mut p = plan(owner, true);
        p.deleted_at = Some(Utc::now());
        assert!(!PlanAccessService::can_view(&p, Some(owner)));
        assert!(!PlanAccessService::can_manage(&p, owner));
    }

    #[test]
    fn listing_other_users_plans_is_public_only() {
        let owner = Uuid::new_v4();
        assert!(!PlanAccessService::public_only_listing(owner, Some(owner)));
        assert!(PlanAccessService::public_only_listing(owner, Some(Uuid::new_v4())));
        assert!(PlanAccessService::public_only_listing(owner, None));
    }
}
