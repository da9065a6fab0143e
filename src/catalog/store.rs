//! In-memory product index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CheckoutError;
use crate::ids::ProductId;

/// Product lookup by id.
///
/// Checkout re-validates cart line items against this live state: a
/// product may have expired or sold down between add-to-cart and
/// settlement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product, returning its id. Replaces any product with the
    /// same id.
    pub fn insert(&mut self, product: Product) -> ProductId {
        let id = product.id.clone();
        self.products.insert(id.clone(), product);
        id
    }

    /// Look up a product.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Look up a product for mutation.
    pub fn get_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.get_mut(id)
    }

    /// Remove a product.
    pub fn remove(&mut self, id: &ProductId) -> Option<Product> {
        self.products.remove(id)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate over all products.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Take a quantity of a product out of stock.
    ///
    /// For integrators that settle inventory after checkout; `settle`
    /// itself never touches stock.
    pub fn decrement_stock(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<(), CheckoutError> {
        let product = self
            .products
            .get_mut(id)
            .ok_or_else(|| CheckoutError::ProductNotFound(id.clone()))?;
        product.decrement_stock(quantity)
    }
}
