#![deny(warnings)]

//! Core domain models and invariants for the fabrica dashboard.
//!
//! This crate defines the serializable entities shared by the filter
//! engine and the simulator, validation helpers to guarantee basic
//! invariants, and the fixed dataset the system is seeded with.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Unique identifier for a furniture model, e.g. "MX-100".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModelId(pub String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog entry. Immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureModel {
    /// Model identifier, e.g. "MX-100".
    pub id: ModelId,
    /// Display name, e.g. "Silla MX-100".
    pub name: String,
}

/// Inventory counts for a single model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub model_id: ModelId,
    /// Physical units in the warehouse. Only the simulator mutates this.
    pub on_hand: u32,
    /// Units allocated to orders but not yet shipped.
    pub reserved: u32,
}

impl StockItem {
    /// Units free to promise. Negative when reservations outpace
    /// physical stock.
    pub fn available(&self) -> i64 {
        i64::from(self.on_hand) - i64::from(self.reserved)
    }
}

/// Production pipeline step. The sequence is cyclic: after final
/// inspection a batch re-enters cutting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductionStage {
    #[serde(rename = "Corte y ensamblaje")]
    CutAndAssembly,
    #[serde(rename = "Barnizado")]
    Finishing,
    #[serde(rename = "Tapizado")]
    Upholstery,
    #[serde(rename = "Inspección final")]
    FinalInspection,
}

impl ProductionStage {
    /// All stages in pipeline order.
    pub const ALL: [ProductionStage; 4] = [
        ProductionStage::CutAndAssembly,
        ProductionStage::Finishing,
        ProductionStage::Upholstery,
        ProductionStage::FinalInspection,
    ];

    /// Successor in cyclic order.
    pub fn next(self) -> Self {
        match self {
            ProductionStage::CutAndAssembly => ProductionStage::Finishing,
            ProductionStage::Finishing => ProductionStage::Upholstery,
            ProductionStage::Upholstery => ProductionStage::FinalInspection,
            ProductionStage::FinalInspection => ProductionStage::CutAndAssembly,
        }
    }

    /// Shop-floor label.
    pub fn label(self) -> &'static str {
        match self {
            ProductionStage::CutAndAssembly => "Corte y ensamblaje",
            ProductionStage::Finishing => "Barnizado",
            ProductionStage::Upholstery => "Tapizado",
            ProductionStage::FinalInspection => "Inspección final",
        }
    }
}

impl fmt::Display for ProductionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sales order lifecycle state. Progression is one-directional;
/// `ReadyToShip` and `Delivered` are stable under the simulator
/// (delivery is recorded outside of it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En producción")]
    InProduction,
    #[serde(rename = "Listo para envío")]
    ReadyToShip,
    #[serde(rename = "Entregado")]
    Delivered,
}

impl OrderStatus {
    /// Successor in the lifecycle, or `None` for the terminal state.
    pub fn next(self) -> Option<Self> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::InProduction),
            OrderStatus::InProduction => Some(OrderStatus::ReadyToShip),
            OrderStatus::ReadyToShip => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// An order counts as open until it is delivered.
    pub fn is_open(self) -> bool {
        self != OrderStatus::Delivered
    }

    /// Customer-facing label.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::InProduction => "En producción",
            OrderStatus::ReadyToShip => "Listo para envío",
            OrderStatus::Delivered => "Entregado",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A batch moving through the workshop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionOrder {
    /// Batch identifier, e.g. "PR-084".
    pub id: String,
    pub model_id: ModelId,
    pub stage: ProductionStage,
    /// Units in the batch (> 0).
    pub units: u32,
    pub start_date: NaiveDate,
    pub eta: NaiveDate,
}

/// Cost components fixed when the order is taken; never recomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub materials: Decimal,
    pub labor: Decimal,
    pub time: Decimal,
}

impl CostBreakdown {
    pub fn total(&self) -> Decimal {
        self.materials + self.labor + self.time
    }
}

/// A customer order as displayed on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    /// Order identifier, e.g. "PD-311".
    pub id: String,
    pub client: String,
    pub model_id: ModelId,
    /// Ordered units (> 0).
    pub quantity: u32,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub costs: CostBreakdown,
}

/// The in-memory state container shared by the filter engine and the
/// simulator. Replaces the original free-floating global collections;
/// mutation is funneled through the store in `fabrica-sim`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactoryState {
    pub models: Vec<FurnitureModel>,
    pub stock: Vec<StockItem>,
    pub production: Vec<ProductionOrder>,
    pub orders: Vec<SalesOrder>,
}

impl FactoryState {
    /// Catalog name for a model id. Unknown ids fall back to the raw id;
    /// referential integrity is not enforced.
    pub fn model_name(&self, id: &ModelId) -> String {
        self.models
            .iter()
            .find(|m| &m.id == id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.0.clone())
    }
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Entity identifiers must not be blank.
    #[error("blank identifier")]
    BlankId,
    /// Model ids must be unique within the catalog.
    #[error("duplicate model id: {0}")]
    DuplicateModel(String),
    /// Cost components must be non-negative.
    #[error("negative monetary value is invalid")]
    NegativeMoney,
    /// Orders and batches must carry at least one unit.
    #[error("{0} has zero units")]
    ZeroUnits(String),
    /// A batch cannot finish before it starts.
    #[error("production order {0} has eta before start date")]
    EtaBeforeStart(String),
}

/// Validate a catalog entry.
pub fn validate_model(model: &FurnitureModel) -> Result<(), ValidationError> {
    if model.id.0.trim().is_empty() || model.name.trim().is_empty() {
        return Err(ValidationError::BlankId);
    }
    Ok(())
}

/// Validate a stock row.
pub fn validate_stock_item(item: &StockItem) -> Result<(), ValidationError> {
    if item.model_id.0.trim().is_empty() {
        return Err(ValidationError::BlankId);
    }
    Ok(())
}

/// Validate a production batch.
pub fn validate_production_order(batch: &ProductionOrder) -> Result<(), ValidationError> {
    if batch.id.trim().is_empty() || batch.model_id.0.trim().is_empty() {
        return Err(ValidationError::BlankId);
    }
    if batch.units == 0 {
        return Err(ValidationError::ZeroUnits(batch.id.clone()));
    }
    if batch.eta < batch.start_date {
        return Err(ValidationError::EtaBeforeStart(batch.id.clone()));
    }
    Ok(())
}

/// Validate a sales order, including its cost breakdown.
pub fn validate_sales_order(order: &SalesOrder) -> Result<(), ValidationError> {
    if order.id.trim().is_empty()
        || order.client.trim().is_empty()
        || order.model_id.0.trim().is_empty()
    {
        return Err(ValidationError::BlankId);
    }
    if order.quantity == 0 {
        return Err(ValidationError::ZeroUnits(order.id.clone()));
    }
    if order.costs.materials < Decimal::ZERO
        || order.costs.labor < Decimal::ZERO
        || order.costs.time < Decimal::ZERO
    {
        return Err(ValidationError::NegativeMoney);
    }
    Ok(())
}

/// Validate the whole state, including catalog uniqueness.
pub fn validate_state(state: &FactoryState) -> Result<(), ValidationError> {
    let mut ids: BTreeSet<&ModelId> = BTreeSet::new();
    for model in &state.models {
        validate_model(model)?;
        if !ids.insert(&model.id) {
            return Err(ValidationError::DuplicateModel(model.id.0.clone()));
        }
    }
    for item in &state.stock {
        validate_stock_item(item)?;
    }
    for batch in &state.production {
        validate_production_order(batch)?;
    }
    for order in &state.orders {
        validate_sales_order(order)?;
    }
    Ok(())
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The fixed dataset the dashboard is seeded with at start.
pub fn sample_state() -> FactoryState {
    let models = vec![
        FurnitureModel {
            id: ModelId::new("MX-100"),
            name: "Silla MX-100".to_string(),
        },
        FurnitureModel {
            id: ModelId::new("LX-210"),
            name: "Mesa LX-210".to_string(),
        },
        FurnitureModel {
            id: ModelId::new("QT-55"),
            name: "Sofá QT-55".to_string(),
        },
        FurnitureModel {
            id: ModelId::new("VN-32"),
            name: "Banco VN-32".to_string(),
        },
    ];

    let stock = vec![
        StockItem {
            model_id: ModelId::new("MX-100"),
            on_hand: 120,
            reserved: 24,
        },
        StockItem {
            model_id: ModelId::new("LX-210"),
            on_hand: 75,
            reserved: 12,
        },
        StockItem {
            model_id: ModelId::new("QT-55"),
            on_hand: 42,
            reserved: 8,
        },
        StockItem {
            model_id: ModelId::new("VN-32"),
            on_hand: 210,
            reserved: 30,
        },
    ];

    let production = vec![
        ProductionOrder {
            id: "PR-084".to_string(),
            model_id: ModelId::new("MX-100"),
            stage: ProductionStage::CutAndAssembly,
            units: 45,
            start_date: day(2026, 1, 5),
            eta: day(2026, 1, 16),
        },
        ProductionOrder {
            id: "PR-091".to_string(),
            model_id: ModelId::new("LX-210"),
            stage: ProductionStage::Finishing,
            units: 30,
            start_date: day(2026, 1, 8),
            eta: day(2026, 1, 20),
        },
        ProductionOrder {
            id: "PR-093".to_string(),
            model_id: ModelId::new("QT-55"),
            stage: ProductionStage::Upholstery,
            units: 18,
            start_date: day(2026, 1, 10),
            eta: day(2026, 1, 18),
        },
        ProductionOrder {
            id: "PR-094".to_string(),
            model_id: ModelId::new("VN-32"),
            stage: ProductionStage::FinalInspection,
            units: 60,
            start_date: day(2026, 1, 11),
            eta: day(2026, 1, 15),
        },
    ];

    let orders = vec![
        SalesOrder {
            id: "PD-311".to_string(),
            client: "Casa Urbana".to_string(),
            model_id: ModelId::new("MX-100"),
            quantity: 30,
            date: day(2026, 1, 9),
            status: OrderStatus::InProduction,
            costs: CostBreakdown {
                materials: Decimal::new(5400, 0),
                labor: Decimal::new(2100, 0),
                time: Decimal::new(900, 0),
            },
        },
        SalesOrder {
            id: "PD-312".to_string(),
            client: "Interior Lab".to_string(),
            model_id: ModelId::new("LX-210"),
            quantity: 20,
            date: day(2026, 1, 10),
            status: OrderStatus::Pending,
            costs: CostBreakdown {
                materials: Decimal::new(4800, 0),
                labor: Decimal::new(1900, 0),
                time: Decimal::new(750, 0),
            },
        },
        SalesOrder {
            id: "PD-313".to_string(),
            client: "Grupo Nexo".to_string(),
            model_id: ModelId::new("QT-55"),
            quantity: 14,
            date: day(2026, 1, 11),
            status: OrderStatus::InProduction,
            costs: CostBreakdown {
                materials: Decimal::new(6200, 0),
                labor: Decimal::new(2600, 0),
                time: Decimal::new(1100, 0),
            },
        },
        SalesOrder {
            id: "PD-314".to_string(),
            client: "Arq. Nova".to_string(),
            model_id: ModelId::new("VN-32"),
            quantity: 45,
            date: day(2026, 1, 12),
            status: OrderStatus::ReadyToShip,
            costs: CostBreakdown {
                materials: Decimal::new(4300, 0),
                labor: Decimal::new(1600, 0),
                time: Decimal::new(640, 0),
            },
        },
        SalesOrder {
            id: "PD-315".to_string(),
            client: "Casa Urbana".to_string(),
            model_id: ModelId::new("LX-210"),
            quantity: 12,
            date: day(2026, 1, 13),
            status: OrderStatus::Pending,
            costs: CostBreakdown {
                materials: Decimal::new(3100, 0),
                labor: Decimal::new(1200, 0),
                time: Decimal::new(420, 0),
            },
        },
    ];

    FactoryState {
        models,
        stock,
        production,
        orders,
    }
}
