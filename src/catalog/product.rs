//! Product types.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::StockLevel;
use crate::error::CheckoutError;
use crate::ids::ProductId;
use crate::money::Money;

/// A sellable product.
///
/// Expiry and weight are both optional: a product with no expiry date
/// never expires, and a product with no weight never ships (gift cards,
/// digital goods).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name, shown on receipts and shipment notices.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// On-hand stock.
    pub stock: StockLevel,
    /// Last date the product is sellable. `None` means it never expires.
    pub expiry_date: Option<NaiveDate>,
    /// Weight in grams, for shipping. `None` means not shippable.
    pub weight_grams: Option<i64>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new product with the given starting stock.
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            name: name.into(),
            price,
            stock: StockLevel::new(quantity),
            expiry_date: None,
            weight_grams: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the expiry date.
    pub fn with_expiry(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }

    /// Set the shipping weight in grams.
    pub fn with_weight(mut self, grams: i64) -> Self {
        self.weight_grams = Some(grams);
        self
    }

    /// Check expiry against a specific date.
    ///
    /// True iff an expiry date is set and is strictly earlier than the
    /// given date; a product expiring today is still sellable.
    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < date)
    }

    /// Check expiry against today's UTC date.
    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Utc::now().date_naive())
    }

    /// Check if the product ships (has a weight).
    pub fn is_shippable(&self) -> bool {
        self.weight_grams.is_some()
    }

    /// Take a quantity out of stock.
    ///
    /// Fails with `InsufficientStock` if the request exceeds what is
    /// available; a request for exactly the available stock succeeds.
    pub fn decrement_stock(&mut self, quantity: i64) -> Result<(), CheckoutError> {
        if quantity <= 0 {
            return Err(CheckoutError::InvalidQuantity(quantity));
        }
        if !self.stock.can_fulfill(quantity) {
            return Err(CheckoutError::InsufficientStock {
                name: self.name.clone(),
                requested: quantity,
                available: self.stock.available(),
            });
        }
        self.stock.decrement(quantity);
        self.updated_at = current_timestamp();
        Ok(())
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
