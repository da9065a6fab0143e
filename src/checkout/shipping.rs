//! Shipping fee calculation and shipment manifest.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;
use crate::money::{Currency, Money};

/// Shipping rate: $10.00 (1000 cents) per kilogram.
pub const RATE_PER_KG_CENTS: i64 = 1000;

/// Capability for anything that can go in a shipment.
///
/// Any entity exposing a label and a per-unit weight is shippable; there
/// is no hierarchy behind this.
pub trait Shippable {
    /// Name shown on the shipment notice.
    fn label(&self) -> &str;

    /// Weight of one unit, in grams.
    fn weight_grams(&self) -> i64;

    /// Weight of one unit, in kilograms.
    fn weight_kg(&self) -> f64 {
        self.weight_grams() as f64 / 1000.0
    }
}

/// One physical unit of a shippable product.
///
/// Line items expand into one unit per quantity during checkout; units
/// exist only for fee calculation and the manifest, and are never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippableUnit {
    /// Product name.
    pub name: String,
    /// Per-unit weight in grams.
    pub weight_grams: i64,
}

impl ShippableUnit {
    pub fn new(name: impl Into<String>, weight_grams: i64) -> Self {
        Self {
            name: name.into(),
            weight_grams,
        }
    }
}

impl Shippable for ShippableUnit {
    fn label(&self) -> &str {
        &self.name
    }

    fn weight_grams(&self) -> i64 {
        self.weight_grams
    }
}

/// Calculate the shipping fee for a set of units.
///
/// Total weight in kilograms times the per-kg rate; an empty set ships
/// free. Weights stay in integer grams until the final division, so no
/// float error reaches the fee.
pub fn calculate_fee<S: Shippable>(
    units: &[S],
    currency: Currency,
) -> Result<Money, CheckoutError> {
    let mut total_grams: i64 = 0;
    for unit in units {
        total_grams = total_grams
            .checked_add(unit.weight_grams())
            .ok_or(CheckoutError::Overflow)?;
    }
    let fee_cents = total_grams
        .checked_mul(RATE_PER_KG_CENTS)
        .ok_or(CheckoutError::Overflow)?
        / 1000;
    Ok(Money::new(fee_cents, currency))
}

/// All units of one product in a shipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestGroup {
    /// Product name.
    pub name: String,
    /// Number of units.
    pub count: i64,
    /// Combined weight of the group's units, in grams.
    pub weight_grams: i64,
}

impl ManifestGroup {
    /// Per-unit weight in whole grams (rounded down).
    pub fn unit_weight_grams(&self) -> i64 {
        self.weight_grams / self.count
    }
}

/// A shipment manifest: units grouped by product name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShipmentManifest {
    /// Groups in first-seen order.
    pub groups: Vec<ManifestGroup>,
    /// Total package weight in grams.
    pub total_weight_grams: i64,
}

impl ShipmentManifest {
    /// Total package weight in kilograms.
    pub fn total_weight_kg(&self) -> f64 {
        self.total_weight_grams as f64 / 1000.0
    }

    /// Total number of units across all groups.
    pub fn unit_count(&self) -> i64 {
        self.groups.iter().map(|g| g.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group units by name, preserving first-seen order of distinct names.
pub fn build_manifest<S: Shippable>(units: &[S]) -> ShipmentManifest {
    let mut groups: Vec<ManifestGroup> = Vec::new();
    let mut total_weight_grams: i64 = 0;
    for unit in units {
        total_weight_grams += unit.weight_grams();
        match groups.iter_mut().find(|g| g.name == unit.label()) {
            Some(group) => {
                group.count += 1;
                group.weight_grams += unit.weight_grams();
            }
            None => groups.push(ManifestGroup {
                name: unit.label().to_string(),
                count: 1,
                weight_grams: unit.weight_grams(),
            }),
        }
    }
    ShipmentManifest {
        groups,
        total_weight_grams,
    }
}

impl fmt::Display for ShipmentManifest {
    /// Shipment notice wire format:
    ///
    /// ```text
    /// ** Shipment notice **
    /// 2x Cheese 200g
    /// 1x Biscuits 700g
    /// Total package weight 1.1kg
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Shipment notice **")?;
        for group in &self.groups {
            writeln!(
                f,
                "{}x {} {}g",
                group.count,
                group.name,
                group.unit_weight_grams()
            )?;
        }
        write!(f, "Total package weight {}kg", self.total_weight_kg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(parts: &[(&str, i64, i64)]) -> Vec<ShippableUnit> {
        let mut out = Vec::new();
        for (name, count, grams) in parts {
            for _ in 0..*count {
                out.push(ShippableUnit::new(*name, *grams));
            }
        }
        out
    }

    #[test]
    fn fee_of_no_units_is_zero() {
        let fee = calculate_fee::<ShippableUnit>(&[], Currency::USD).unwrap();
        assert!(fee.is_zero());
    }

    #[test]
    fn fee_for_mixed_package() {
        // 2 x 200g + 1 x 700g = 1.1kg -> $11.00
        let units = units(&[("Cheese", 2, 200), ("Biscuits", 1, 700)]);
        let fee = calculate_fee(&units, Currency::USD).unwrap();
        assert_eq!(fee.amount_cents, 1100);
    }

    #[test]
    fn unit_weight_kg() {
        let unit = ShippableUnit::new("Cheese", 200);
        assert!((unit.weight_kg() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn manifest_groups_by_name_in_first_seen_order() {
        let units = units(&[("Cheese", 1, 200), ("Biscuits", 1, 700), ("Cheese", 1, 200)]);
        let manifest = build_manifest(&units);

        assert_eq!(manifest.groups.len(), 2);
        assert_eq!(manifest.groups[0].name, "Cheese");
        assert_eq!(manifest.groups[0].count, 2);
        assert_eq!(manifest.groups[0].unit_weight_grams(), 200);
        assert_eq!(manifest.groups[1].name, "Biscuits");
        assert_eq!(manifest.groups[1].count, 1);
        assert_eq!(manifest.total_weight_grams, 1100);
        assert_eq!(manifest.unit_count(), 3);
    }

    #[test]
    fn manifest_display_wire_format() {
        let units = units(&[("Cheese", 2, 200), ("Biscuits", 1, 700)]);
        let manifest = build_manifest(&units);
        assert_eq!(
            manifest.to_string(),
            "** Shipment notice **\n2x Cheese 200g\n1x Biscuits 700g\nTotal package weight 1.1kg"
        );
    }

    #[test]
    fn manifest_display_whole_kilograms() {
        let units = units(&[("TV", 1, 15_000)]);
        let manifest = build_manifest(&units);
        assert_eq!(
            manifest.to_string(),
            "** Shipment notice **\n1x TV 15000g\nTotal package weight 15kg"
        );
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Fee is linear: n units of w grams each cost n*w*10 per kg,
            /// i.e. n*w cents at the $10/kg rate.
            #[test]
            fn fee_is_linear(n in 0i64..100, grams in 0i64..100_000) {
                let units: Vec<ShippableUnit> = (0..n)
                    .map(|_| ShippableUnit::new("Widget", grams))
                    .collect();
                let fee = calculate_fee(&units, Currency::USD).unwrap();
                prop_assert_eq!(fee.amount_cents, n * grams);
            }

            /// Grouping never loses weight: manifest total equals the sum
            /// of all unit weights.
            #[test]
            fn manifest_preserves_total_weight(
                weights in prop::collection::vec(1i64..50_000, 0..20)
            ) {
                let units: Vec<ShippableUnit> = weights
                    .iter()
                    .enumerate()
                    .map(|(i, w)| ShippableUnit::new(format!("P{}", i % 3), *w))
                    .collect();
                let manifest = build_manifest(&units);
                let expected: i64 = weights.iter().sum();
                prop_assert_eq!(manifest.total_weight_grams, expected);
                prop_assert_eq!(manifest.unit_count(), weights.len() as i64);
            }
        }
    }
}
