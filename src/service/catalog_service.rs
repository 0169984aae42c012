//! Catalog service: product listings and their approval workflow.

use std::sync::Arc;

use crate::domain::product::DEFAULT_PRODUCT_IMAGE;
use crate::domain::{NewProduct, Product, ProductChanges, ProductQuery, ProductStatus, User};
use crate::error::MarketError;
use crate::persistence::MarketStore;

/// A dealer's new listing before ownership is attached.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    /// Title.
    pub name: String,
    /// Unit price, must be positive.
    pub price: f64,
    /// Category.
    pub category: String,
    /// Long description.
    pub description: String,
    /// Units available, must not be negative.
    pub stock: i64,
    /// Emoji or image reference; defaults to a generic icon.
    pub image: Option<String>,
}

fn check_price(price: f64) -> Result<(), MarketError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(MarketError::InvalidRequest(
            "Price must be positive".to_string(),
        ))
    }
}

fn check_stock(stock: i64) -> Result<(), MarketError> {
    if stock >= 0 {
        Ok(())
    } else {
        Err(MarketError::InvalidRequest(
            "Stock cannot be negative".to_string(),
        ))
    }
}

fn product_not_found() -> MarketError {
    MarketError::NotFound("Product not found".to_string())
}

/// Browsing, editing and moderating listings.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Arc<dyn MarketStore>,
}

impl CatalogService {
    /// Creates a new `CatalogService`.
    #[must_use]
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Lists listings visible under `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] on storage failure.
    pub async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, MarketError> {
        self.store.list_products(query).await
    }

    /// Creates a pending listing owned by `dealer`.
    ///
    /// # Errors
    ///
    /// [`MarketError::InvalidRequest`] if the price is not positive or the
    /// stock is negative.
    pub async fn create(&self, dealer: &User, draft: ProductDraft) -> Result<Product, MarketError> {
        check_price(draft.price)?;
        check_stock(draft.stock)?;

        let product = self
            .store
            .insert_product(NewProduct {
                dealer_email: dealer.email.clone(),
                dealer_name: dealer.name.clone(),
                name: draft.name,
                price: draft.price,
                category: draft.category,
                description: draft.description,
                stock: draft.stock,
                image: draft
                    .image
                    .filter(|i| !i.is_empty())
                    .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
            })
            .await?;

        tracing::info!(product_id = product.id, dealer = %dealer.email, "product created");
        Ok(product)
    }

    /// Loads a listing and checks that `caller` owns it or is an admin.
    async fn owned_by(&self, caller: &User, product_id: i64) -> Result<Product, MarketError> {
        let product = self
            .store
            .find_product(product_id)
            .await?
            .ok_or_else(product_not_found)?;
        crate::auth::require_owner_or_admin(caller, &product.dealer_email)?;
        Ok(product)
    }

    /// Applies a partial edit. Only the owning dealer or an admin may edit.
    ///
    /// # Errors
    ///
    /// - [`MarketError::NotFound`] for an unknown id.
    /// - [`MarketError::Forbidden`] for anyone else.
    /// - [`MarketError::InvalidRequest`] for a non-positive price or a
    ///   negative stock.
    pub async fn update(
        &self,
        caller: &User,
        product_id: i64,
        changes: &ProductChanges,
    ) -> Result<Product, MarketError> {
        self.owned_by(caller, product_id).await?;
        if let Some(price) = changes.price {
            check_price(price)?;
        }
        if let Some(stock) = changes.stock {
            check_stock(stock)?;
        }

        let product = self
            .store
            .update_product(product_id, changes)
            .await?
            .ok_or_else(product_not_found)?;
        tracing::info!(product_id, user_id = caller.id, "product updated");
        Ok(product)
    }

    /// Deletes a listing. Only the owning dealer or an admin may delete.
    ///
    /// # Errors
    ///
    /// - [`MarketError::NotFound`] for an unknown id.
    /// - [`MarketError::Forbidden`] for anyone else.
    pub async fn delete(&self, caller: &User, product_id: i64) -> Result<(), MarketError> {
        self.owned_by(caller, product_id).await?;
        if !self.store.delete_product(product_id).await? {
            return Err(product_not_found());
        }
        tracing::info!(product_id, user_id = caller.id, "product deleted");
        Ok(())
    }

    /// Sets the approval status, whatever it was before.
    ///
    /// # Errors
    ///
    /// [`MarketError::NotFound`] for an unknown id.
    pub async fn moderate(
        &self,
        product_id: i64,
        status: ProductStatus,
    ) -> Result<Product, MarketError> {
        let product = self
            .store
            .set_product_status(product_id, status)
            .await?
            .ok_or_else(product_not_found)?;
        tracing::info!(product_id, status = %status, "product moderated");
        Ok(product)
    }
}
