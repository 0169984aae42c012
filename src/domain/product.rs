//! Marketplace listings and the visibility rules for browsing them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{ProductStatus, Role, User};

/// Image shown for a listing when the dealer supplies none.
pub const DEFAULT_PRODUCT_IMAGE: &str = "🔩";

/// A product listed by a dealer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Product {
    /// Database-assigned identifier.
    pub id: i64,
    /// Owning dealer's email.
    pub dealer_email: String,
    /// Owning dealer's display name, copied at creation.
    pub dealer_name: String,
    /// Title.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Free-form category (metals, plastics, ...).
    pub category: String,
    /// Long description.
    pub description: String,
    /// Approval state.
    pub status: ProductStatus,
    /// Units available.
    pub stock: i64,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    /// Emoji or image reference.
    pub image: String,
    /// Listing time.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns `true` if `needle` occurs case-insensitively in the name,
    /// description or dealer name.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.dealer_name.to_lowercase().contains(&needle)
    }
}

/// Data needed to insert a listing. New listings are always pending.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Owning dealer's email.
    pub dealer_email: String,
    /// Owning dealer's display name.
    pub dealer_name: String,
    /// Title.
    pub name: String,
    /// Unit price, strictly positive.
    pub price: f64,
    /// Category.
    pub category: String,
    /// Long description.
    pub description: String,
    /// Units available, non-negative.
    pub stock: i64,
    /// Emoji or image reference.
    pub image: String,
}

/// Partial listing edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    /// New title.
    pub name: Option<String>,
    /// New price.
    pub price: Option<f64>,
    /// New category.
    pub category: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New stock level.
    pub stock: Option<i64>,
    /// New image.
    pub image: Option<String>,
}

impl ProductChanges {
    /// Applies the change set in place.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = &self.category {
            product.category.clone_from(category);
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(image) = &self.image {
            product.image.clone_from(image);
        }
    }
}

/// Which rows a caller may see when browsing the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductVisibility {
    /// Anonymous callers and customers: approved rows only.
    ApprovedOnly,
    /// Dealers: their own rows at any status plus every approved row.
    DealerView {
        /// The dealer's email.
        dealer_email: String,
    },
    /// Admins: rows with the given status, or everything when `None`.
    AdminView {
        /// Status filter.
        status: Option<ProductStatus>,
    },
}

impl ProductVisibility {
    /// Resolves the visibility for `caller`. `requested_status` is honored
    /// for admins only: absent means approved, `"all"` or empty means no
    /// filter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::MarketError::InvalidRequest`] if an admin
    /// requests an unknown status.
    pub fn for_caller(
        caller: Option<&User>,
        requested_status: Option<&str>,
    ) -> Result<Self, crate::error::MarketError> {
        match caller.map(|u| (u.role, u)) {
            Some((Role::Admin, _)) => {
                let status = match requested_status {
                    None => Some(ProductStatus::Approved),
                    Some("" | "all") => None,
                    Some(raw) => Some(raw.parse::<ProductStatus>()?),
                };
                Ok(Self::AdminView { status })
            }
            Some((Role::Dealer, user)) => Ok(Self::DealerView {
                dealer_email: user.email.clone(),
            }),
            Some((Role::Customer, _)) | None => Ok(Self::ApprovedOnly),
        }
    }

    /// Returns `true` if `product` is visible under this rule.
    #[must_use]
    pub fn admits(&self, product: &Product) -> bool {
        match self {
            Self::ApprovedOnly => product.status == ProductStatus::Approved,
            Self::DealerView { dealer_email } => {
                product.status == ProductStatus::Approved || &product.dealer_email == dealer_email
            }
            Self::AdminView { status } => status.is_none_or(|s| product.status == s),
        }
    }
}

/// Default page size of the catalog listing.
pub const DEFAULT_PRODUCT_LIMIT: u32 = 50;

/// Largest page size a caller may request.
pub const MAX_PRODUCT_LIMIT: u32 = 100;

/// A catalog query after visibility has been resolved.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    /// Row-level visibility rule.
    pub visibility: ProductVisibility,
    /// Exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring over name, description, dealer name.
    pub search: Option<String>,
    /// Page size.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u32,
}

impl ProductQuery {
    /// Returns `true` if `product` passes every filter except paging.
    #[must_use]
    pub fn admits(&self, product: &Product) -> bool {
        self.visibility.admits(product)
            && self
                .category
                .as_deref()
                .is_none_or(|c| product.category == c)
            && self
                .search
                .as_deref()
                .is_none_or(|s| product.matches_search(s))
    }
}

#[cfg(test)]
pub(crate) fn sample_product(id: i64, dealer_email: &str, status: ProductStatus) -> Product {
    Product {
        id,
        dealer_email: dealer_email.to_string(),
        dealer_name: "Rajesh Kumar".to_string(),
        name: "Copper Wire Scraps".to_string(),
        price: 10_400.0,
        category: "metals".to_string(),
        description: "Pure copper wire".to_string(),
        status,
        stock: 25,
        rating: 0.0,
        image: DEFAULT_PRODUCT_IMAGE.to_string(),
        created_at: Utc::now(),
    }
}
