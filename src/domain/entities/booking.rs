//! Booking entity and repository trait.
//!
//! Maps to the `plan_bookings` table.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A reservation (flight, hotel, ticket...) attached to a plan.
///
/// Maps to the `plan_bookings` table:
/// - id: UUID PRIMARY KEY
/// - plan_id: UUID NOT NULL REFERENCES plans(id)
/// - kind: VARCHAR(50) NOT NULL
/// - name: VARCHAR(200) NOT NULL
/// - start_date / end_date: DATE NOT NULL (end >= start)
/// - start_time / end_time: TIME NULL
/// - amount: DOUBLE PRECISION NOT NULL (>= 0)
/// - currency: VARCHAR(3) NOT NULL
/// - link_url / reservation_pdf: TEXT NULL
/// - created_at_utc / updated_at_utc: TIMESTAMPTZ NOT NULL
/// - deleted_at_utc: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub plan_id: Uuid,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Date range and amount are consistent.
    pub fn check(&self) -> Result<(), &'static str> {
        if self.end_date < self.start_date {
            return Err("End date cannot be before start date");
        }
        if self.start_date == self.end_date {
            if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
                if end < start {
                    return Err("End time cannot be before start time on the same day");
                }
            }
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err("Amount must be a non-negative number");
        }
        Ok(())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Bookings of a plan ordered by start date and time.
    async fn list_by_plan(&self, plan_id: Uuid) -> Result<Vec<Booking>, AppError>;

    async fn find_by_id(&self, plan_id: Uuid, id: Uuid) -> Result<Option<Booking>, AppError>;

    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;

    async fn update(&self, booking: &Booking) -> Result<Option<Booking>, AppError>;

    async fn soft_delete(&self, plan_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(start: (i32, u32, u32), end: (i32, u32, u32)) -> Booking {
        let now = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            kind: "Hotel".into(),
            name: "Hotel Lisboa".into(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            start_time: None,
            end_time: None,
            amount: 120.0,
            currency: "EUR".into(),
            link_url: None,
            reservation_pdf: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn accepts_ordered_dates() {
        assert!(booking((2025, 5, 1), (2025, 5, 4)).check().is_ok());
    }

    #[test]
    fn rejects_end_before_start() {
        assert_eq!(
            booking((2025, 5, 4), (2025, 5, 1)).check(),
            Err("End date cannot be before start date")
        );
    }

    #[test]
    fn rejects_reversed_times_on_same_day() {
        let mut b = booking((2025, 5, 1), (2025, 5, 1));
        b.start_time = NaiveTime::from_hms_opt(18, 0, 0);
        b.end_time = NaiveTime::from_hms_opt(9, 0, 0);
        assert!(b.check().is_err());
    }

    #[test]
    fn rejects_negative_amount() {
        let mut b = booking((2025, 5, 1), (2025, 5, 2));
        b.amount = -1.0;
        assert!(b.check().is_err());
    }
}
