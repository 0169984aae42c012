//! DTOs for catalog browsing, listing management and moderation.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{lenient_f64, lenient_i64, non_blank, required, required_number};
use crate::domain::product::{DEFAULT_PRODUCT_LIMIT, MAX_PRODUCT_LIMIT};
use crate::domain::{Product, ProductChanges, ProductQuery, ProductVisibility, User};
use crate::error::MarketError;
use crate::service::ProductDraft;

/// Query parameters for `GET /api/products`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// Exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring of name, description or dealer name.
    pub search: Option<String>,
    /// Status filter, honored for admins only (`all` for every status).
    pub status: Option<String>,
    /// Page size, 1 to 100. Defaults to 50.
    pub limit: Option<u32>,
    /// Rows to skip. Defaults to 0.
    pub offset: Option<u32>,
}

impl ProductListParams {
    /// Resolves the parameters against the caller's visibility.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] if an admin asks for an unknown
    /// status.
    pub fn into_query(self, caller: Option<&User>) -> Result<ProductQuery, MarketError> {
        Ok(ProductQuery {
            visibility: ProductVisibility::for_caller(caller, self.status.as_deref())?,
            category: non_blank(self.category),
            search: non_blank(self.search),
            limit: self
                .limit
                .unwrap_or(DEFAULT_PRODUCT_LIMIT)
                .clamp(1, MAX_PRODUCT_LIMIT),
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// Request body for `POST /api/products`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    /// Title.
    pub name: Option<String>,
    /// Category (metals, plastics, ...).
    pub category: Option<String>,
    /// Unit price, number or numeric string.
    #[serde(default, deserialize_with = "lenient_f64")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<f64>,
    /// Long description.
    pub description: Option<String>,
    /// Units available, integer or numeric string.
    #[serde(default, deserialize_with = "lenient_i64")]
    #[schema(value_type = Option<i64>)]
    pub stock: Option<i64>,
    /// Emoji or image reference.
    pub image: Option<String>,
}

impl CreateProductRequest {
    /// Validates presence of every required field.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] naming the first missing field.
    pub fn into_draft(self) -> Result<ProductDraft, MarketError> {
        Ok(ProductDraft {
            name: required(self.name, "name")?,
            category: required(self.category, "category")?,
            price: required_number(self.price, "price")?,
            description: required(self.description, "description")?,
            stock: required_number(self.stock, "stock")?,
            image: non_blank(self.image),
        })
    }
}

/// Request body for `PUT /api/products/{id}`. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    /// New title.
    pub name: Option<String>,
    /// New unit price.
    #[serde(default, deserialize_with = "lenient_f64")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<f64>,
    /// New category.
    pub category: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New stock level.
    #[serde(default, deserialize_with = "lenient_i64")]
    #[schema(value_type = Option<i64>)]
    pub stock: Option<i64>,
    /// New image.
    pub image: Option<String>,
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            price: req.price,
            category: req.category,
            description: req.description,
            stock: req.stock,
            image: req.image,
        }
    }
}

/// `{"message", "product"}` envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The listing after the change.
    pub product: Product,
}
