//! Role-specific dashboard aggregates, computed on every request.

use serde::Serialize;
use utoipa::ToSchema;

/// Platform-wide totals shown to admins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct AdminStats {
    /// Number of accounts.
    pub total_users: i64,
    /// Number of listings at any status.
    pub total_products: i64,
    /// Sum of every order amount.
    pub total_revenue: f64,
    /// Number of pickup bookings.
    pub pickup_requests: i64,
}

/// Totals for one dealer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct DealerStats {
    /// Listings owned by the dealer.
    pub total_products: i64,
    /// Sum of the amounts of orders sold by the dealer.
    pub total_earnings: f64,
    /// Owned listings still pending approval.
    pub pending_approval: i64,
    /// Orders sold by the dealer.
    pub orders_received: i64,
}

/// Totals for one customer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct CustomerStats {
    /// Pickups booked by the customer.
    pub total_pickups: i64,
    /// Orders placed by the customer.
    pub total_orders: i64,
    /// Sum of the customer's order amounts.
    pub total_spent: f64,
}

/// Dashboard payload; serialized without a tag so each role sees its own
/// flat object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DashboardStats {
    /// Admin view.
    Admin(AdminStats),
    /// Dealer view.
    Dealer(DealerStats),
    /// Customer view.
    Customer(CustomerStats),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_serialization_is_flat() {
        let stats = DashboardStats::Customer(CustomerStats {
            total_pickups: 2,
            total_orders: 1,
            total_spent: 250.0,
        });
        let json = serde_json::to_value(stats).unwrap_or_default();
        assert_eq!(json.get("total_pickups").and_then(serde_json::Value::as_i64), Some(2));
        assert_eq!(json.get("total_spent").and_then(serde_json::Value::as_f64), Some(250.0));
        assert!(json.get("Customer").is_none());
    }
}
