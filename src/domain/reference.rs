//! Reference tables: material rates and educational tips.

use serde::Serialize;
use utoipa::ToSchema;

use super::RateTrend;

/// Icon used for a rate when an update supplies none.
pub const DEFAULT_RATE_ICON: &str = "♻️";

/// Icon used for a tip when none is given.
pub const DEFAULT_TIP_ICON: &str = "💡";

/// Current buying price of one material.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Rate {
    /// Database-assigned identifier.
    pub id: i64,
    /// Unique material name, matched exactly.
    pub material: String,
    /// Price per kilogram.
    #[serde(rename = "ratePerKg")]
    pub rate_per_kg: f64,
    /// Market direction.
    pub trend: RateTrend,
    /// Emoji shown next to the material.
    pub icon: String,
}

/// Data needed to insert a rate.
#[derive(Debug, Clone)]
pub struct NewRate {
    /// Unique material name.
    pub material: String,
    /// Price per kilogram.
    pub rate_per_kg: f64,
    /// Market direction.
    pub trend: RateTrend,
    /// Emoji shown next to the material.
    pub icon: String,
}

/// One entry of an admin rate update, matched by material name.
///
/// Trend and icon are always overwritten; when omitted by the client they
/// are reset to their defaults.
#[derive(Debug, Clone)]
pub struct RateUpdate {
    /// Material to update.
    pub material: String,
    /// New price per kilogram.
    pub rate_per_kg: f64,
    /// New trend.
    pub trend: RateTrend,
    /// New icon.
    pub icon: String,
}

impl RateUpdate {
    /// Applies the update to a matching rate.
    pub fn apply(&self, rate: &mut Rate) {
        rate.rate_per_kg = self.rate_per_kg;
        rate.trend = self.trend;
        rate.icon.clone_from(&self.icon);
    }
}

/// A short piece of advice for sellers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Tip {
    /// Database-assigned identifier.
    pub id: i64,
    /// Headline.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Grouping (Preparation, Rates, Safety, ...).
    pub category: String,
    /// Emoji.
    pub icon: String,
    /// Expected benefit.
    pub impact: String,
}

/// Data needed to insert a tip.
#[derive(Debug, Clone)]
pub struct NewTip {
    /// Headline, used as the natural key when seeding.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Grouping.
    pub category: String,
    /// Emoji.
    pub icon: String,
    /// Expected benefit.
    pub impact: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_serializes_camel_case_price() {
        let rate = Rate {
            id: 1,
            material: "Steel".to_string(),
            rate_per_kg: 45.0,
            trend: RateTrend::Stable,
            icon: "🔩".to_string(),
        };
        let json = serde_json::to_value(&rate).unwrap_or_default();
        assert_eq!(json.get("ratePerKg").and_then(serde_json::Value::as_f64), Some(45.0));
        assert!(json.get("rate_per_kg").is_none());
        assert_eq!(json.get("trend").and_then(|v| v.as_str()), Some("stable"));
    }

    #[test]
    fn update_overwrites_trend_and_icon() {
        let mut rate = Rate {
            id: 1,
            material: "Copper".to_string(),
            rate_per_kg: 650.0,
            trend: RateTrend::Up,
            icon: "🔌".to_string(),
        };
        RateUpdate {
            material: "Copper".to_string(),
            rate_per_kg: 700.0,
            trend: RateTrend::Stable,
            icon: DEFAULT_RATE_ICON.to_string(),
        }
        .apply(&mut rate);
        assert!((rate.rate_per_kg - 700.0).abs() < f64::EPSILON);
        assert_eq!(rate.trend, RateTrend::Stable);
        assert_eq!(rate.icon, DEFAULT_RATE_ICON);
    }
}
