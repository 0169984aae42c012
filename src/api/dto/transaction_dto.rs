//! DTOs for placing and listing orders.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::common_dto::{lenient_f64, required, required_number};
use crate::domain::Transaction;
use crate::error::MarketError;
use crate::service::OrderRequest;

/// Request body for `POST /api/transactions`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Cart lines; stored as given.
    #[schema(value_type = Option<Vec<Object>>)]
    pub items: Option<Value>,
    /// Order total, number or numeric string.
    #[serde(default, deserialize_with = "lenient_f64")]
    #[schema(value_type = Option<f64>)]
    pub amount: Option<f64>,
    /// Free-form payment method; `cod` leaves the order pending.
    pub payment_method: Option<String>,
    /// Delivery address.
    pub address: Option<String>,
    /// Selling dealer's email.
    pub dealer_email: Option<String>,
}

impl CreateTransactionRequest {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] for a missing field, a non-list or
    /// empty cart, or a non-positive amount.
    pub fn into_order(self) -> Result<OrderRequest, MarketError> {
        let items = match self.items {
            None | Some(Value::Null) => return Err(MarketError::missing_field("items")),
            Some(Value::Array(items)) if items.is_empty() => {
                return Err(MarketError::missing_field("items"));
            }
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(MarketError::InvalidRequest(
                    "items must be a list".to_string(),
                ));
            }
        };
        let amount = required_number(self.amount, "amount")?;
        let payment_method = required(self.payment_method, "payment_method")?;
        let address = required(self.address, "address")?;
        let dealer_email = required(self.dealer_email, "dealer_email")?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err(MarketError::InvalidRequest(
                "Amount must be positive".to_string(),
            ));
        }

        Ok(OrderRequest {
            dealer_email: dealer_email.trim().to_string(),
            items,
            amount,
            payment_method,
            address,
        })
    }
}

/// `{"message", "transaction"}` envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The recorded order.
    pub transaction: Transaction,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<OrderRequest, String> {
        serde_json::from_str::<CreateTransactionRequest>(raw)
            .map_err(|e| e.to_string())?
            .into_order()
            .map_err(|e| e.to_string())
    }

    #[test]
    fn full_order_is_accepted() {
        let order = parse(
            r#"{"items":[{"id":1,"qty":2}],"amount":"7600","payment_method":"cod",
                "address":"x","dealer_email":"d@x.com"}"#,
        );
        assert_eq!(order.as_ref().map(|o| o.items.len()), Ok(1));
        assert_eq!(order.map(|o| o.amount), Ok(7600.0));
    }

    #[test]
    fn cart_must_be_a_non_empty_list() {
        assert_eq!(
            parse(r#"{"items":[],"amount":1,"payment_method":"upi","address":"x","dealer_email":"d"}"#)
                .err(),
            Some("items is required".to_string())
        );
        assert_eq!(
            parse(r#"{"items":"lots","amount":1,"payment_method":"upi","address":"x","dealer_email":"d"}"#)
                .err(),
            Some("items must be a list".to_string())
        );
    }

    #[test]
    fn dealer_is_required() {
        assert_eq!(
            parse(r#"{"items":[1],"amount":1,"payment_method":"upi","address":"x"}"#).err(),
            Some("dealer_email is required".to_string())
        );
    }
}
