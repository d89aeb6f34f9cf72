//! Net requirement planning with optional single-level BOM explosion.

use serde::Serialize;
use std::collections::BTreeMap;

/// Components consumed per unit of a finished product, keyed by product.
pub type BillOfMaterials = BTreeMap<String, BTreeMap<String, u32>>;

/// Net requirement for one item after stock is counted against demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub item: String,
    pub demand: u32,
    pub on_hand: u32,
    /// max(demand - on_hand, 0)
    pub net: u32,
}

/// Compute net requirements for the given demand, netting against
/// available stock.
///
/// When a BOM is supplied, demand for finished products is expanded into
/// component demand (one level) before netting; the finished products
/// themselves remain in the plan.
pub fn plan(
    demand: &BTreeMap<String, u32>,
    stock: &BTreeMap<String, u32>,
    bom: Option<&BillOfMaterials>,
) -> BTreeMap<String, Requirement> {
    let mut expanded: BTreeMap<String, u32> = demand.clone();

    if let Some(bom) = bom {
        for (product, &quantity) in demand {
            if let Some(components) = bom.get(product) {
                for (component, &per_unit) in components {
                    let add = quantity.saturating_mul(per_unit);
                    let entry = expanded.entry(component.clone()).or_insert(0);
                    *entry = entry.saturating_add(add);
                }
            }
        }
    }

    expanded
        .into_iter()
        .map(|(item, quantity)| {
            let on_hand = stock.get(&item).copied().unwrap_or(0);
            let requirement = Requirement {
                item: item.clone(),
                demand: quantity,
                on_hand,
                net: quantity.saturating_sub(on_hand),
            };
            (item, requirement)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn stock_nets_against_demand() {
        let plan = plan(
            &map(&[("MX-100", 50)]),
            &map(&[("MX-100", 20)]),
            None,
        );
        let req = &plan["MX-100"];
        assert_eq!(req.demand, 50);
        assert_eq!(req.on_hand, 20);
        assert_eq!(req.net, 30);
    }

    #[test]
    fn surplus_stock_nets_to_zero() {
        let plan = plan(&map(&[("QT-55", 5)]), &map(&[("QT-55", 40)]), None);
        assert_eq!(plan["QT-55"].net, 0);
    }

    #[test]
    fn bom_expands_finished_goods_into_components() {
        let mut bom = BillOfMaterials::new();
        bom.insert(
            "QT-55".to_string(),
            map(&[("tablero", 2), ("tejido", 4)]),
        );
        let plan = plan(
            &map(&[("QT-55", 10)]),
            &map(&[("tablero", 5)]),
            Some(&bom),
        );
        assert_eq!(plan["QT-55"].net, 10);
        assert_eq!(plan["tablero"].demand, 20);
        assert_eq!(plan["tablero"].net, 15);
        assert_eq!(plan["tejido"].demand, 40);
        assert_eq!(plan["tejido"].net, 40);
    }

    #[test]
    fn component_demand_accumulates_over_existing_demand() {
        let mut bom = BillOfMaterials::new();
        bom.insert("QT-55".to_string(), map(&[("tejido", 4)]));
        let plan = plan(
            &map(&[("QT-55", 10), ("tejido", 3)]),
            &BTreeMap::new(),
            Some(&bom),
        );
        assert_eq!(plan["tejido"].demand, 43);
    }

    #[test]
    fn unknown_items_default_to_zero_stock() {
        let plan = plan(&map(&[("VN-32", 7)]), &BTreeMap::new(), None);
        assert_eq!(plan["VN-32"].net, 7);
    }

    proptest! {
        #[test]
        fn net_never_exceeds_demand(demand in 0u32..100_000, on_hand in 0u32..100_000) {
            let plan = plan(
                &map(&[("item", demand)]),
                &map(&[("item", on_hand)]),
                None,
            );
            let req = &plan["item"];
            prop_assert!(req.net <= req.demand);
            prop_assert_eq!(req.net, demand.saturating_sub(on_hand));
        }
    }
}
