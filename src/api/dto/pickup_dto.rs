//! DTOs for pickup booking and status updates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::{lenient_f64, required, required_number};
use crate::domain::{Pickup, PickupStatus};
use crate::error::MarketError;
use crate::service::PickupRequest;

/// Request body for `POST /api/pickups`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePickupRequest {
    /// Material name; need not match a known rate.
    pub material: Option<String>,
    /// Weight in kilograms, number or numeric string.
    #[serde(default, deserialize_with = "lenient_f64")]
    #[schema(value_type = Option<f64>)]
    pub weight: Option<f64>,
    /// Collection day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Time slot.
    pub time: Option<String>,
    /// Collection address.
    pub address: Option<String>,
}

impl CreatePickupRequest {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] for a missing field, a
    /// non-positive weight or a malformed date.
    pub fn into_request(self) -> Result<PickupRequest, MarketError> {
        let material = required(self.material, "material")?;
        let weight = required_number(self.weight, "weight")?;
        let date = required(self.date, "date")?;
        let time = required(self.time, "time")?;
        let address = required(self.address, "address")?;

        if !weight.is_finite() || weight <= 0.0 {
            return Err(MarketError::InvalidRequest(
                "Weight must be positive".to_string(),
            ));
        }
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            MarketError::InvalidRequest("date must be formatted as YYYY-MM-DD".to_string())
        })?;

        Ok(PickupRequest {
            material,
            weight,
            date,
            time,
            address,
        })
    }
}

/// Request body for `PUT /api/pickups/{id}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePickupRequest {
    /// `scheduled`, `completed` or `cancelled`.
    pub status: Option<String>,
}

impl UpdatePickupRequest {
    /// Parses the requested status.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] if absent or unknown.
    pub fn into_status(self) -> Result<PickupStatus, MarketError> {
        required(self.status, "status")?.parse()
    }
}

/// `{"message", "pickup"}` envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct PickupResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The booking after the change.
    pub pickup: Pickup,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(weight: Option<f64>, date: &str) -> CreatePickupRequest {
        CreatePickupRequest {
            material: Some("Copper".to_string()),
            weight,
            date: Some(date.to_string()),
            time: Some("10:00".to_string()),
            address: Some("x".to_string()),
        }
    }

    #[test]
    fn valid_booking_parses_date() {
        let req = body(Some(10.0), "2026-03-01").into_request().ok();
        assert_eq!(req.map(|r| r.date), NaiveDate::from_ymd_opt(2026, 3, 1));
    }

    #[test]
    fn bad_inputs_are_rejected() {
        assert_eq!(
            body(None, "2026-03-01").into_request().err().map(|e| e.to_string()),
            Some("weight is required".to_string())
        );
        assert!(body(Some(-1.0), "2026-03-01").into_request().is_err());
        assert!(body(Some(1.0), "01/03/2026").into_request().is_err());
    }

    #[test]
    fn status_must_be_known() {
        let ok = UpdatePickupRequest {
            status: Some("completed".to_string()),
        };
        assert_eq!(ok.into_status().ok(), Some(PickupStatus::Completed));
        let bad = UpdatePickupRequest {
            status: Some("teleported".to_string()),
        };
        assert!(bad.into_status().is_err());
    }
}
