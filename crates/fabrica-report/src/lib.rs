#![deny(warnings)]

//! Filter/aggregate engine for the fabrica dashboard.
//!
//! This crate provides the pure read side of the system:
//! - Filtering of orders, production batches, and stock by date window,
//!   client, and model
//! - Headline metrics over the filtered subsets
//! - Per-model cost rollups with grand totals
//!
//! Empty filtered sets yield zeroed outputs, never errors.

use chrono::NaiveDate;
use fabrica_core::{
    FactoryState, FurnitureModel, ModelId, ProductionOrder, SalesOrder, StockItem,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod format;

/// Filter selection for the dashboard. `None` means "all"/unbounded, so
/// `FilterSpec::default()` is the reset state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub client: Option<String>,
    pub model: Option<ModelId>,
}

impl FilterSpec {
    /// True when no dimension or date bound is set.
    pub fn is_unbounded(&self) -> bool {
        *self == FilterSpec::default()
    }

    /// Inclusive day-granularity window test; absent bounds are open.
    pub fn date_within(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }

    fn matches_model(&self, model_id: &ModelId) -> bool {
        match &self.model {
            Some(wanted) => wanted == model_id,
            None => true,
        }
    }

    /// Orders match on client, model, and order date.
    pub fn matches_order(&self, order: &SalesOrder) -> bool {
        if let Some(client) = &self.client {
            if client != &order.client {
                return false;
            }
        }
        self.matches_model(&order.model_id) && self.date_within(order.date)
    }

    /// Batches match on model and start date.
    pub fn matches_production(&self, batch: &ProductionOrder) -> bool {
        self.matches_model(&batch.model_id) && self.date_within(batch.start_date)
    }

    /// Stock has no date field; only the model dimension applies.
    pub fn matches_stock(&self, item: &StockItem) -> bool {
        self.matches_model(&item.model_id)
    }
}

/// Result of applying a `FilterSpec` to the factory state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredView {
    pub orders: Vec<SalesOrder>,
    pub production: Vec<ProductionOrder>,
    pub stock: Vec<StockItem>,
}

/// Headline numbers shown above the tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Σ(on_hand - reserved); negative when reservations outrun stock.
    pub available_stock: i64,
    /// Σ(units) over filtered batches.
    pub units_in_production: u64,
    /// Filtered orders not yet delivered.
    pub open_orders: usize,
}

/// Materials/labor/time sums plus their combined total.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostTotals {
    pub materials: Decimal,
    pub labor: Decimal,
    pub time: Decimal,
    pub total: Decimal,
}

impl CostTotals {
    fn accumulate(&mut self, order: &SalesOrder) {
        self.materials += order.costs.materials;
        self.labor += order.costs.labor;
        self.time += order.costs.time;
        self.total += order.costs.total();
    }

    fn merge(&mut self, other: &CostTotals) {
        self.materials += other.materials;
        self.labor += other.labor;
        self.time += other.time;
        self.total += other.total;
    }
}

/// Cost rollup row for one catalog model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelCostRow {
    pub model_id: ModelId,
    pub model_name: String,
    pub totals: CostTotals,
}

/// Per-model cost rollup over a set of filtered orders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub rows: Vec<ModelCostRow>,
    pub grand_total: CostTotals,
}

/// Apply a filter to the state, producing the three filtered subsets.
pub fn apply_filters(state: &FactoryState, filter: &FilterSpec) -> FilteredView {
    FilteredView {
        orders: state
            .orders
            .iter()
            .filter(|o| filter.matches_order(o))
            .cloned()
            .collect(),
        production: state
            .production
            .iter()
            .filter(|b| filter.matches_production(b))
            .cloned()
            .collect(),
        stock: state
            .stock
            .iter()
            .filter(|s| filter.matches_stock(s))
            .cloned()
            .collect(),
    }
}

/// Headline metrics over a filtered view.
pub fn compute_metrics(view: &FilteredView) -> Metrics {
    Metrics {
        available_stock: view.stock.iter().map(StockItem::available).sum(),
        units_in_production: view.production.iter().map(|b| u64::from(b.units)).sum(),
        open_orders: view.orders.iter().filter(|o| o.status.is_open()).count(),
    }
}

/// Cost rollup with one row per catalog model (not only filtered ones),
/// summing the given orders; the grand total spans all rows.
pub fn cost_report(models: &[FurnitureModel], orders: &[SalesOrder]) -> CostReport {
    let mut report = CostReport::default();
    for model in models {
        let mut totals = CostTotals::default();
        for order in orders.iter().filter(|o| o.model_id == model.id) {
            totals.accumulate(order);
        }
        report.grand_total.merge(&totals);
        report.rows.push(ModelCostRow {
            model_id: model.id.clone(),
            model_name: model.name.clone(),
            totals,
        });
    }
    report
}

/// Distinct client names, sorted. Populates the client selector.
pub fn client_options(orders: &[SalesOrder]) -> Vec<String> {
    let clients: BTreeSet<&str> = orders.iter().map(|o| o.client.as_str()).collect();
    clients.into_iter().map(str::to_string).collect()
}
