//! Checkout error types.

use thiserror::Error;

use crate::ids::ProductId;
use crate::money::Money;

/// Errors that can occur in cart and checkout operations.
///
/// Every error is raised synchronously and caught at the checkout
/// boundary, where it becomes a `Failed` outcome carrying the message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckoutError {
    /// Cart has no line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Product is past its expiry date.
    #[error("Product {name} has expired")]
    ProductExpired { name: String },

    /// Requested more than the available stock.
    #[error("Product {name} is out of stock: requested {requested}, available {available}")]
    OutOfStock {
        name: String,
        requested: i64,
        available: i64,
    },

    /// Customer balance cannot cover the amount due.
    #[error("Customer's balance is insufficient: required {required}, available {available}")]
    InsufficientBalance { required: Money, available: Money },

    /// A direct stock decrement asked for more than is on hand.
    #[error("Cannot take {requested}x {name} from stock: only {available} available")]
    InsufficientStock {
        name: String,
        requested: i64,
        available: i64,
    },

    /// Product no longer exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Quantity must be positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
