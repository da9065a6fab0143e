//! Cart and line item types.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CheckoutError;
use crate::ids::{CartId, LineItemId, ProductId};
use crate::money::{Currency, Money};

/// A shopping cart.
///
/// Line items are kept in insertion order and never merged: adding the
/// same product twice yields two separate entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    id: CartId,
    items: Vec<LineItem>,
    currency: Currency,
    /// Customer note.
    pub note: Option<String>,
    /// Additional metadata.
    pub metadata: serde_json::Value,
    created_at: i64,
    updated_at: i64,
}

impl Cart {
    /// Create a new empty cart in the default currency.
    pub fn new() -> Self {
        Self::with_currency(Currency::default())
    }

    /// Create a new empty cart in the given currency.
    pub fn with_currency(currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            items: Vec::new(),
            currency,
            note: None,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a product to the cart.
    ///
    /// Returns an error if:
    /// - the quantity is not positive
    /// - the product is expired
    /// - the quantity exceeds the available stock (equal is allowed)
    /// - the product's price is in a different currency than the cart
    /// - the line total would overflow
    ///
    /// A failed add leaves the cart untouched.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
    ) -> Result<LineItemId, CheckoutError> {
        if quantity <= 0 {
            return Err(CheckoutError::InvalidQuantity(quantity));
        }
        if product.is_expired() {
            return Err(CheckoutError::ProductExpired {
                name: product.name.clone(),
            });
        }
        if !product.stock.can_fulfill(quantity) {
            return Err(CheckoutError::OutOfStock {
                name: product.name.clone(),
                requested: quantity,
                available: product.stock.available(),
            });
        }
        if product.price.currency != self.currency {
            return Err(CheckoutError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }

        let item = LineItem::new(product, quantity)?;
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    pub fn id(&self) -> &CartId {
        &self.id
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of line items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CheckoutError> {
        Money::try_sum(self.items.iter().map(|i| &i.total_price), self.currency)
            .ok_or(CheckoutError::Overflow)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// A line item in the cart.
///
/// A snapshot of the product taken at add time; checkout re-reads live
/// product state from the catalog before settling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Unique line item identifier.
    pub id: LineItemId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Quantity.
    pub quantity: i64,
    /// Unit price at add time.
    pub unit_price: Money,
    /// Total price (unit_price * quantity).
    pub total_price: Money,
}

impl LineItem {
    /// Create a new line item from a product snapshot.
    pub fn new(product: &Product, quantity: i64) -> Result<Self, CheckoutError> {
        let total_price = product
            .price
            .try_multiply(quantity)
            .ok_or(CheckoutError::Overflow)?;
        Ok(Self {
            id: LineItemId::generate(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
            total_price,
        })
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn cheese() -> Product {
        Product::new("Cheese", Money::new(10_000, Currency::USD), 10).with_weight(200)
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn add_item_appends() {
        let mut cart = Cart::new();
        cart.add_item(&cheese(), 2).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.items()[0].name, "Cheese");
        assert_eq!(cart.items()[0].total_price.amount_cents, 20_000);
    }

    #[test]
    fn duplicate_products_stay_separate_entries() {
        let product = cheese();
        let mut cart = Cart::new();
        cart.add_item(&product, 2).unwrap();
        cart.add_item(&product, 3).unwrap();

        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn add_expired_product_fails_and_cart_unchanged() {
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let expired_milk = Product::new("Expired Milk", Money::new(8000, Currency::USD), 5)
            .with_expiry(yesterday)
            .with_weight(500);

        let mut cart = Cart::new();
        let err = cart.add_item(&expired_milk, 1).unwrap_err();
        assert_eq!(
            err,
            CheckoutError::ProductExpired {
                name: "Expired Milk".to_string()
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn add_exactly_available_stock_succeeds() {
        let tv = Product::new("TV", Money::new(50_000, Currency::USD), 3).with_weight(15_000);
        let mut cart = Cart::new();
        cart.add_item(&tv, 3).unwrap();
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn add_more_than_stock_fails() {
        let tv = Product::new("TV", Money::new(50_000, Currency::USD), 3).with_weight(15_000);
        let mut cart = Cart::new();
        let err = cart.add_item(&tv, 4).unwrap_err();
        assert_eq!(
            err,
            CheckoutError::OutOfStock {
                name: "TV".to_string(),
                requested: 4,
                available: 3,
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(&cheese(), 0),
            Err(CheckoutError::InvalidQuantity(0))
        );
        assert_eq!(
            cart.add_item(&cheese(), -2),
            Err(CheckoutError::InvalidQuantity(-2))
        );
    }

    #[test]
    fn add_rejects_currency_mismatch() {
        let imported = Product::new("Imported Tea", Money::new(900, Currency::EUR), 5);
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(&imported, 1),
            Err(CheckoutError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn failed_add_keeps_earlier_items() {
        let tv = Product::new("TV", Money::new(50_000, Currency::USD), 3).with_weight(15_000);
        let mut cart = Cart::new();
        cart.add_item(&cheese(), 2).unwrap();
        assert!(cart.add_item(&tv, 4).is_err());
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let biscuits =
            Product::new("Biscuits", Money::new(15_000, Currency::USD), 5).with_weight(700);
        let card = Product::new("Mobile Scratch Card", Money::new(5000, Currency::USD), 100);

        let mut cart = Cart::new();
        cart.add_item(&cheese(), 2).unwrap();
        cart.add_item(&biscuits, 1).unwrap();
        cart.add_item(&card, 1).unwrap();

        assert_eq!(cart.subtotal().unwrap().amount_cents, 40_000);
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() {
        assert!(Cart::new().subtotal().unwrap().is_zero());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Subtotal is the sum of price*quantity regardless of the
            /// order items were added in.
            #[test]
            fn subtotal_is_order_independent(
                lines in prop::collection::vec((1i64..=500, 1i64..=20), 1..8)
            ) {
                let products: Vec<Product> = lines
                    .iter()
                    .enumerate()
                    .map(|(i, (price, qty))| {
                        Product::new(
                            format!("Product {i}"),
                            Money::new(*price, Currency::USD),
                            *qty,
                        )
                    })
                    .collect();

                let mut forward = Cart::new();
                for (product, (_, qty)) in products.iter().zip(lines.iter()) {
                    forward.add_item(product, *qty).unwrap();
                }

                let mut reverse = Cart::new();
                for (product, (_, qty)) in products.iter().zip(lines.iter()).rev() {
                    reverse.add_item(product, *qty).unwrap();
                }

                let expected: i64 = lines.iter().map(|(price, qty)| price * qty).sum();
                prop_assert_eq!(forward.subtotal().unwrap().amount_cents, expected);
                prop_assert_eq!(
                    forward.subtotal().unwrap(),
                    reverse.subtotal().unwrap()
                );
            }
        }
    }
}
