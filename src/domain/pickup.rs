//! Scrap pickup bookings and value estimation.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::{PickupId, PickupStatus, Rate};

/// A customer's request to have scrap collected.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Pickup {
    /// `PU` + UUID.
    #[schema(value_type = String)]
    pub id: PickupId,
    /// Booking customer's email.
    pub user_email: String,
    /// Booking customer's name.
    pub user_name: String,
    /// Material name as entered; not required to match a known rate.
    pub material: String,
    /// Weight in kilograms.
    pub weight: f64,
    /// Requested collection day.
    pub date: NaiveDate,
    /// Requested time slot.
    pub time: String,
    /// Collection address.
    pub address: String,
    /// `rate_per_kg * weight` at booking time, 0 when no rate matched.
    pub estimated_value: f64,
    /// Progress.
    pub status: PickupStatus,
    /// Booking day.
    pub booked_date: NaiveDate,
}

/// Value of `weight` kilograms at `rate`, or 0 when no rate is known.
#[must_use]
pub fn estimate_value(rate: Option<&Rate>, weight: f64) -> f64 {
    rate.map_or(0.0, |r| r.rate_per_kg * weight)
}
