//! Checkout: shipping fees, shipment manifests, settlement, receipts.

pub mod flow;
pub mod receipt;
pub mod shipping;

pub use flow::{checkout, settle, CheckoutOutcome, LogNotifier, ShipmentNotifier};
pub use receipt::{Receipt, ReceiptLine};
pub use shipping::{
    build_manifest, calculate_fee, ManifestGroup, ShipmentManifest, Shippable, ShippableUnit,
    RATE_PER_KG_CENTS,
};
