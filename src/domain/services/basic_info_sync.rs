//! Synchronisation of denormalised fields between `plans` and
//! `plan_basic_info`.
//!
//! `title` lives only on the plan. `destination` and the cover image are kept
//! on both rows: the plan's `cover_image_url` and the info row's
//! `cover_img_url` always end up equal after an update.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::entities::{Plan, PlanBasicInfo};
use crate::domain::value_objects::ReferenceUpdate;

/// Partial update of a plan's basic info, as received from a client.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfoUpdate {
    pub title: Option<String>,
    /// Plan-side cover field
    pub cover_image_url: Option<String>,
    /// Info-side cover field, used when `cover_image_url` is absent
    pub cover_img_url: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub trip_type: ReferenceUpdate,
    pub budget_amount: Option<f64>,
    pub budget_currency: Option<String>,
    pub notes: Option<String>,
}

impl Default for BasicInfoUpdate {
    fn default() -> Self {
        Self {
            title: None,
            cover_image_url: None,
            cover_img_url: None,
            description: None,
            location: None,
            destination: None,
            start_date: None,
            end_date: None,
            trip_type: ReferenceUpdate::Keep,
            budget_amount: None,
            budget_currency: None,
            notes: None,
        }
    }
}

impl BasicInfoUpdate {
    /// The cover to store: `cover_image_url`, else `cover_img_url`.
    pub fn cover(&self) -> Option<String> {
        self.cover_image_url
            .clone()
            .or_else(|| self.cover_img_url.clone())
    }
}

/// Domain service applying [`BasicInfoUpdate`]s.
pub struct BasicInfoSync;

impl BasicInfoSync {
    /// Apply `update` to `plan` and to the existing info row (or a new one).
    ///
    /// The cover image is always overwritten on both sides, so omitting it
    /// clears it. Every other field only changes when supplied.
    pub fn apply(
        plan: &mut Plan,
        existing: Option<PlanBasicInfo>,
        update: BasicInfoUpdate,
        now: DateTime<Utc>,
    ) -> Result<PlanBasicInfo, &'static str> {
        let cover = update.cover();

        if let Some(title) = update.title.clone() {
            plan.title = Some(title);
        }
        if let Some(destination) = update.destination.clone() {
            plan.destination = Some(destination);
        }
        plan.cover_image_url = cover.clone();
        plan.updated_at = now;

        let mut info = existing.unwrap_or_else(|| PlanBasicInfo::empty(plan.id, now));

        if let Some(description) = update.description {
            info.description = Some(description);
        }
        if let Some(location) = update.location {
            info.location = Some(location);
        }
        if let Some(destination) = update.destination {
            info.destination = Some(destination);
        }
        if let Some(start_date) = update.start_date {
            info.start_date = Some(start_date);
        }
        if let Some(end_date) = update.end_date {
            info.end_date = Some(end_date);
        }
        info.trip_type_id = update.trip_type.apply(info.trip_type_id);
        if let Some(amount) = update.budget_amount {
            info.budget_amount = Some(amount);
        }
        if let Some(currency) = update.budget_currency {
            info.budget_currency = Some(currency.to_ascii_uppercase());
        }
        if let Some(notes) = update.notes {
            info.notes = Some(notes);
        }
        info.cover_img_url = cover;
        info.updated_at = now;

        if let (Some(start), Some(end)) = (info.start_date, info.end_date) {
            if end < start {
                return Err("End date cannot be before start date");
            }
        }
        if info.budget_amount.is_some_and(|a| !a.is_finite() || a < 0.0) {
            return Err("Budget amount must be a non-negative number");
        }

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn plan() -> Plan {
        let mut plan = Plan::new(Uuid::new_v4(), Some("Old title".into()), 1, false);
        plan.cover_image_url = Some("/uploads/old.png".into());
        plan.destination = Some("Rome".into());
        plan
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_update_creates_row_from_fields() {
        let mut plan = plan();
        let trip_type = Uuid::new_v4();
        let now = Utc::now();

        let info = BasicInfoSync::apply(
            &mut plan,
            None,
            BasicInfoUpdate {
                title: Some("Lisbon".into()),
                destination: Some("Lisbon, PT".into()),
                cover_img_url: Some("/uploads/new.png".into()),
                start_date: Some(date(2025, 6, 1)),
                end_date: Some(date(2025, 6, 7)),
                trip_type: ReferenceUpdate::Set(trip_type),
                budget_currency: Some("eur".into()),
                ..Default::default()
            },
            now,
        )
        .unwrap();

        assert_eq!(plan.title.as_deref(), Some("Lisbon"));
        assert_eq!(plan.destination.as_deref(), Some("Lisbon, PT"));
        assert_eq!(plan.cover_image_url.as_deref(), Some("/uploads/new.png"));
        assert_eq!(plan.updated_at, now);
        assert_eq!(info.plan_id, plan.id);
        assert_eq!(info.destination.as_deref(), Some("Lisbon, PT"));
        assert_eq!(info.cover_img_url.as_deref(), Some("/uploads/new.png"));
        assert_eq!(info.trip_type_id, Some(trip_type));
        assert_eq!(info.budget_currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn plan_cover_field_wins_over_info_cover_field() {
        let update = BasicInfoUpdate {
            cover_image_url: Some("a.png".into()),
            cover_img_url: Some("b.png".into()),
            ..Default::default()
        };
        assert_eq!(update.cover().as_deref(), Some("a.png"));
    }

    #[test]
    fn omitted_cover_clears_both_sides() {
        let mut plan = plan();
        let mut existing = PlanBasicInfo::empty(plan.id, Utc::now());
        existing.cover_img_url = Some("/uploads/old.png".into());
        existing.notes = Some("keep me".into());

        let info =
            BasicInfoSync::apply(&mut plan, Some(existing), BasicInfoUpdate::default(), Utc::now())
                .unwrap();

        assert_eq!(plan.cover_image_url, None);
        assert_eq!(info.cover_img_url, None);
        assert_eq!(info.notes.as_deref(), Some("keep me"));
        assert_eq!(plan.title.as_deref(), Some("Old title"));
        assert_eq!(plan.destination.as_deref(), Some("Rome"));
    }

    #[test]
    fn nil_trip_type_clears_existing() {
        let mut plan = plan();
        let mut existing = PlanBasicInfo::empty(plan.id, Utc::now());
        existing.trip_type_id = Some(Uuid::new_v4());

        let info = BasicInfoSync::apply(
            &mut plan,
            Some(existing),
            BasicInfoUpdate {
                trip_type: ReferenceUpdate::from_wire(Some(Uuid::nil())),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();

        assert_eq!(info.trip_type_id, None);
    }

    #[test]
    fn merged_dates_must_be_ordered() {
        let mut plan = plan();
        let mut existing = PlanBasicInfo::empty(plan.id, Utc::now());
        existing.start_date = Some(date(2025, 6, 10));

        let result = BasicInfoSync::apply(
            &mut plan,
            Some(existing),
            BasicInfoUpdate {
                end_date: Some(date(2025, 6, 1)),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(result, Err("End date cannot be before start date"));
    }

    #[test]
    fn negative_budget_rejected() {
        let mut plan = plan();
        let result = BasicInfoSync::apply(
            &mut plan,
            None,
            BasicInfoUpdate {
                budget_amount: Some(-5.0),
                ..Default::default()
            },
            Utc::now(),
        );
        assert!(result.is_err());
    }
}
