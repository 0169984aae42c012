//! DTOs for rates, tips and the value calculator.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{lenient_f64, non_blank, required, required_number};
use crate::domain::reference::DEFAULT_RATE_ICON;
use crate::domain::{RateTrend, RateUpdate};
use crate::error::MarketError;

/// One entry of the `PUT /api/rates` body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RateUpdateEntry {
    /// Material to update, matched exactly.
    pub material: Option<String>,
    /// New price per kilogram.
    #[serde(rename = "ratePerKg", default, deserialize_with = "lenient_f64")]
    #[schema(value_type = Option<f64>)]
    pub rate_per_kg: Option<f64>,
    /// `up`, `down` or `stable`. Defaults to `stable`.
    pub trend: Option<String>,
    /// Emoji. Defaults to ♻️.
    pub icon: Option<String>,
}

impl RateUpdateEntry {
    /// Validates the entry and fills in defaults.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] for a missing material or price, a
    /// negative price or an unknown trend.
    pub fn into_update(self) -> Result<RateUpdate, MarketError> {
        let material = required(self.material, "material")?;
        let rate_per_kg = required_number(self.rate_per_kg, "ratePerKg")?;
        if !rate_per_kg.is_finite() || rate_per_kg < 0.0 {
            return Err(MarketError::InvalidRequest(
                "ratePerKg must not be negative".to_string(),
            ));
        }
        let trend = match non_blank(self.trend) {
            Some(raw) => raw.parse()?,
            None => RateTrend::default(),
        };
        Ok(RateUpdate {
            material,
            rate_per_kg,
            trend,
            icon: non_blank(self.icon).unwrap_or_else(|| DEFAULT_RATE_ICON.to_string()),
        })
    }
}

/// Query parameters for `GET /api/tips`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TipParams {
    /// Exact category match.
    pub category: Option<String>,
}

/// Request body for `POST /api/calculate-estimate`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EstimateRequest {
    /// Material name, matched exactly.
    pub material: Option<String>,
    /// Weight in kilograms.
    #[serde(default, deserialize_with = "lenient_f64")]
    #[schema(value_type = Option<f64>)]
    pub weight: Option<f64>,
}

impl EstimateRequest {
    /// Returns `(material, weight)`; absent values become empty and zero
    /// so the calculator reports them together.
    #[must_use]
    pub fn into_parts(self) -> (String, f64) {
        (
            non_blank(self.material).unwrap_or_default(),
            self.weight.unwrap_or(0.0),
        )
    }
}
