//! Inventory movement ledger with per-location and per-kind balances.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What kind of stock a movement touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StockKind {
    #[serde(rename = "MateriaPrima")]
    RawMaterial,
    #[serde(rename = "Modulo")]
    Module,
    #[serde(rename = "ProductoTerminado")]
    FinishedGood,
}

/// Direction of a movement. Adjustments carry their own sign in the
/// quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "Entrada")]
    Inbound,
    #[serde(rename = "Salida")]
    Outbound,
    #[serde(rename = "Ajuste")]
    Adjustment,
}

/// Warehouse shelf position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub warehouse: String,
    pub shelf: String,
}

impl Location {
    pub fn label(&self) -> String {
        format!("{}/{}", self.warehouse, self.shelf)
    }
}

/// A single recorded stock movement, optionally linked to the purchase
/// or production order that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: String,
    pub kind: StockKind,
    pub movement: MovementKind,
    pub quantity: i64,
    pub location: Location,
    pub occurred_at: NaiveDateTime,
    pub purchase_ref: Option<String>,
    pub production_ref: Option<String>,
    pub note: Option<String>,
}

impl StockMovement {
    /// Quantity with its balance sign: outbound counts negative.
    pub fn signed_quantity(&self) -> i64 {
        match self.movement {
            MovementKind::Outbound => -self.quantity,
            MovementKind::Inbound | MovementKind::Adjustment => self.quantity,
        }
    }

    pub fn link_purchase(&mut self, purchase_ref: impl Into<String>) {
        self.purchase_ref = Some(purchase_ref.into());
    }

    pub fn link_production(&mut self, production_ref: impl Into<String>) {
        self.production_ref = Some(production_ref.into());
    }
}

/// Append-only movement journal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLedger {
    pub movements: Vec<StockMovement>,
}

impl InventoryLedger {
    pub fn record(&mut self, movement: StockMovement) {
        self.movements.push(movement);
    }

    /// Net balance per location label.
    pub fn balance_by_location(&self) -> BTreeMap<String, i64> {
        let mut balances = BTreeMap::new();
        for movement in &self.movements {
            *balances.entry(movement.location.label()).or_insert(0) +=
                movement.signed_quantity();
        }
        balances
    }

    /// Net balance per stock kind.
    pub fn balance_by_kind(&self) -> BTreeMap<StockKind, i64> {
        let mut balances = BTreeMap::new();
        for movement in &self.movements {
            *balances.entry(movement.kind).or_insert(0) += movement.signed_quantity();
        }
        balances
    }

    pub fn movements_for_purchase(&self, purchase_ref: &str) -> Vec<&StockMovement> {
        self.movements
            .iter()
            .filter(|m| m.purchase_ref.as_deref() == Some(purchase_ref))
            .collect()
    }

    pub fn movements_for_production(&self, production_ref: &str) -> Vec<&StockMovement> {
        self.movements
            .iter()
            .filter(|m| m.production_ref.as_deref() == Some(production_ref))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn movement(id: &str, kind: MovementKind, quantity: i64, shelf: &str) -> StockMovement {
        StockMovement {
            id: id.to_string(),
            kind: StockKind::Module,
            movement: kind,
            quantity,
            location: Location {
                warehouse: "ALM-1".to_string(),
                shelf: shelf.to_string(),
            },
            occurred_at: at(5),
            purchase_ref: None,
            production_ref: None,
            note: None,
        }
    }

    #[test]
    fn location_label_joins_warehouse_and_shelf() {
        let loc = Location {
            warehouse: "ALM-1".to_string(),
            shelf: "B3".to_string(),
        };
        assert_eq!(loc.label(), "ALM-1/B3");
    }

    #[test]
    fn outbound_counts_negative() {
        let mut ledger = InventoryLedger::default();
        ledger.record(movement("M-1", MovementKind::Inbound, 40, "B3"));
        ledger.record(movement("M-2", MovementKind::Outbound, 15, "B3"));
        ledger.record(movement("M-3", MovementKind::Adjustment, -2, "B3"));
        let balances = ledger.balance_by_location();
        assert_eq!(balances["ALM-1/B3"], 23);
    }

    #[test]
    fn balances_split_by_location() {
        let mut ledger = InventoryLedger::default();
        ledger.record(movement("M-1", MovementKind::Inbound, 10, "B3"));
        ledger.record(movement("M-2", MovementKind::Inbound, 7, "C1"));
        let balances = ledger.balance_by_location();
        assert_eq!(balances["ALM-1/B3"], 10);
        assert_eq!(balances["ALM-1/C1"], 7);
    }

    #[test]
    fn balances_split_by_kind() {
        let mut ledger = InventoryLedger::default();
        let mut raw = movement("M-1", MovementKind::Inbound, 120, "B3");
        raw.kind = StockKind::RawMaterial;
        ledger.record(raw);
        ledger.record(movement("M-2", MovementKind::Outbound, 20, "B3"));
        let balances = ledger.balance_by_kind();
        assert_eq!(balances[&StockKind::RawMaterial], 120);
        assert_eq!(balances[&StockKind::Module], -20);
    }

    #[test]
    fn linked_movements_are_retrievable() {
        let mut ledger = InventoryLedger::default();
        let mut purchased = movement("M-1", MovementKind::Inbound, 30, "B3");
        purchased.link_purchase("OC-2001");
        let mut produced = movement("M-2", MovementKind::Inbound, 12, "C1");
        produced.link_production("PR-084");
        ledger.record(purchased);
        ledger.record(produced);

        let for_purchase = ledger.movements_for_purchase("OC-2001");
        assert_eq!(for_purchase.len(), 1);
        assert_eq!(for_purchase[0].id, "M-1");
        let for_production = ledger.movements_for_production("PR-084");
        assert_eq!(for_production.len(), 1);
        assert_eq!(for_production[0].id, "M-2");
        assert!(ledger.movements_for_purchase("OC-9999").is_empty());
    }
}
