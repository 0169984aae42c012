//! Reference data: material rates, tips and the scrap value calculator.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Rate, RateUpdate, Tip, estimate_value};
use crate::error::MarketError;
use crate::persistence::MarketStore;

/// Result of the public value calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Estimate {
    /// `rate_per_kg * weight`.
    pub estimated_value: f64,
    /// Rate the estimate was computed with.
    pub rate_per_kg: f64,
    /// Weight the estimate was computed for.
    pub weight: f64,
}

/// Reads and maintains rates and tips.
#[derive(Debug, Clone)]
pub struct ReferenceService {
    store: Arc<dyn MarketStore>,
}

impl ReferenceService {
    /// Creates a new `ReferenceService`.
    #[must_use]
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Lists every material rate.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    pub async fn rates(&self) -> Result<Vec<Rate>, MarketError> {
        self.store.list_rates().await
    }

    /// Applies a batch of rate updates in one unit. Unknown materials are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure; nothing is applied.
    pub async fn update_rates(&self, updates: &[RateUpdate]) -> Result<u64, MarketError> {
        let changed = self.store.update_rates(updates).await?;
        tracing::info!(
            submitted = updates.len(),
            changed,
            "material rates updated"
        );
        Ok(changed)
    }

    /// Lists tips, optionally of one category.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    pub async fn tips(&self, category: Option<&str>) -> Result<Vec<Tip>, MarketError> {
        self.store.list_tips(category).await
    }

    /// Values `weight` kilograms of `material` at the current rate.
    ///
    /// # Errors
    ///
    /// - [`MarketError::InvalidRequest`] if the material is empty or the
    ///   weight is not positive.
    /// - [`MarketError::NotFound`] if the material has no rate.
    pub async fn estimate(&self, material: &str, weight: f64) -> Result<Estimate, MarketError> {
        if material.is_empty() || !weight.is_finite() || weight <= 0.0 {
            return Err(MarketError::InvalidRequest(
                "Material and weight are required".to_string(),
            ));
        }
        let Some(rate) = self.store.find_rate(material).await? else {
            return Err(MarketError::NotFound("Material rate not found".to_string()));
        };
        Ok(Estimate {
            estimated_value: estimate_value(Some(&rate), weight),
            rate_per_kg: rate.rate_per_kg,
            weight,
        })
    }
}
