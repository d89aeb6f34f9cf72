//! Escandallo: per-model material cost breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upholstery fabric consumed by a model. Customer-supplied fabric has
/// no material price; the factory charges a fixed make-up fee instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Fabric {
    Standard {
        supplier: String,
        color: String,
        composition: String,
        /// Meters consumed per unit.
        meters: Decimal,
        price_per_meter: Decimal,
        /// Supplier and internal reference codes.
        codes: Vec<String>,
    },
    CustomerSupplied {
        meters: Decimal,
        /// Fixed make-up fee charged in place of material cost.
        labor_fee: Decimal,
    },
}

impl Fabric {
    /// Material cost of one unit of this fabric line.
    pub fn material_cost(&self) -> Decimal {
        match self {
            Fabric::Standard {
                meters,
                price_per_meter,
                ..
            } => *meters * *price_per_meter,
            Fabric::CustomerSupplied { labor_fee, .. } => *labor_fee,
        }
    }
}

/// One escandallo line: a fabric and how many times it is consumed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub fabric: Fabric,
    pub quantity: Decimal,
}

impl BomLine {
    pub fn cost(&self) -> Decimal {
        self.fabric.material_cost() * self.quantity
    }
}

/// Bill of materials for a model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bom {
    pub lines: Vec<BomLine>,
}

impl Bom {
    /// One line per fabric, quantity 1.
    pub fn from_fabrics(fabrics: impl IntoIterator<Item = Fabric>) -> Self {
        Self {
            lines: fabrics
                .into_iter()
                .map(|fabric| BomLine {
                    fabric,
                    quantity: Decimal::ONE,
                })
                .collect(),
        }
    }

    pub fn total_cost(&self) -> Decimal {
        self.lines.iter().map(BomLine::cost).sum()
    }
}
