//! E-commerce checkout domain types and logic.
//!
//! This crate provides the types for a minimal checkout flow:
//!
//! - **Catalog**: products with price, stock, optional expiry and weight
//! - **Cart**: ordered line items with checked subtotals
//! - **Customer**: a prepaid balance that only moves through debit/credit
//! - **Checkout**: validate-everything-then-debit settlement with a
//!   shipping fee, shipment manifest, and printable receipt
//!
//! # Example
//!
//! ```rust,ignore
//! use quickcart::prelude::*;
//!
//! let mut catalog = Catalog::new();
//! let cheese_id = catalog.insert(
//!     Product::new("Cheese", Money::new(10_000, Currency::USD), 10).with_weight(200),
//! );
//!
//! let mut cart = Cart::new();
//! cart.add_item(catalog.get(&cheese_id).unwrap(), 2)?;
//!
//! let mut customer = Customer::new("Ali", Money::new(200_000, Currency::USD));
//! let receipt = settle(&mut customer, &cart, &catalog, &mut LogNotifier)?;
//! println!("{receipt}");
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customer;
pub mod error;
pub mod ids;
pub mod money;

pub use error::CheckoutError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, LineItem};
    pub use crate::catalog::{Catalog, Product, StockLevel};
    pub use crate::checkout::{
        build_manifest, calculate_fee, checkout, settle, CheckoutOutcome, LogNotifier,
        ManifestGroup, Receipt, ReceiptLine, ShipmentManifest, ShipmentNotifier, Shippable,
        ShippableUnit, RATE_PER_KG_CENTS,
    };
    pub use crate::customer::Customer;
    pub use crate::error::CheckoutError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
}
