#![deny(warnings)]

//! Periodic random-mutation simulator and the store that owns the
//! dashboard state.
//!
//! The simulator mimics live factory updates: production batches advance
//! through their stages, warehouse counts drift, and pending orders move
//! toward shipment. The RNG is injected so tests can drive deterministic
//! transitions; live runs use a seeded `ChaCha8Rng` for reproducibility.

use fabrica_core::{FactoryState, OrderStatus};
use fabrica_report::{
    apply_filters, client_options, compute_metrics, cost_report, CostReport, FilterSpec,
    FilteredView, Metrics,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-tick mutation probabilities and the stock perturbation range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutationRates {
    /// Chance a production batch advances to its next stage.
    pub stage_advance: f32,
    /// Chance a pending order enters production.
    pub start_production: f32,
    /// Chance an in-production order becomes ready to ship.
    pub finish_production: f32,
    /// Inclusive lower bound for the random on-hand adjustment.
    pub stock_delta_min: i32,
    /// Inclusive upper bound for the random on-hand adjustment.
    pub stock_delta_max: i32,
}

impl Default for MutationRates {
    fn default() -> Self {
        Self {
            stage_advance: 0.35,
            start_production: 0.30,
            finish_production: 0.20,
            stock_delta_min: -8,
            stock_delta_max: 6,
        }
    }
}

/// Simulation configuration, loadable from a YAML scenario file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Seed for the deterministic RNG.
    pub rng_seed: u64,
    /// Seconds between ticks when running live.
    pub tick_interval_secs: u64,
    #[serde(default)]
    pub rates: MutationRates,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            tick_interval_secs: 6,
            rates: MutationRates::default(),
        }
    }
}

impl SimConfig {
    /// Parse a scenario file.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

/// Run one mutation pass over the state.
///
/// Stages advance cyclically, `on_hand` takes a bounded random delta
/// clamped at zero (`reserved` is untouched), and order statuses move
/// one step toward `ReadyToShip`; `ReadyToShip` and `Delivered` are
/// stable.
pub fn tick<R: Rng>(state: &mut FactoryState, rates: &MutationRates, rng: &mut R) {
    for batch in &mut state.production {
        if rng.gen::<f32>() < rates.stage_advance {
            batch.stage = batch.stage.next();
        }
    }

    for item in &mut state.stock {
        let delta = rng.gen_range(rates.stock_delta_min..=rates.stock_delta_max);
        let adjusted = (i64::from(item.on_hand) + i64::from(delta)).max(0);
        item.on_hand = u32::try_from(adjusted).unwrap_or(u32::MAX);
    }

    for order in &mut state.orders {
        order.status = match order.status {
            OrderStatus::Pending if rng.gen::<f32>() < rates.start_production => {
                OrderStatus::InProduction
            }
            OrderStatus::InProduction if rng.gen::<f32>() < rates.finish_production => {
                OrderStatus::ReadyToShip
            }
            status => status,
        };
    }
}

/// Read models re-derived after every mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct Derived {
    pub view: FilteredView,
    pub metrics: Metrics,
    pub costs: CostReport,
    /// Distinct client names for the selector.
    pub clients: Vec<String>,
}

/// Owns the dashboard state and funnels every mutation through a single
/// update path; the filter engine is re-run immediately afterwards so
/// derived views never go stale.
pub struct Store {
    state: FactoryState,
    filter: FilterSpec,
    rates: MutationRates,
    rng: ChaCha8Rng,
    derived: Derived,
    ticks: u64,
}

impl Store {
    pub fn new(state: FactoryState, config: &SimConfig) -> Self {
        let filter = FilterSpec::default();
        let derived = derive(&state, &filter);
        Self {
            state,
            filter,
            rates: config.rates,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            derived,
            ticks: 0,
        }
    }

    pub fn state(&self) -> &FactoryState {
        &self.state
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Replace the filter and refresh the derived views.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.refresh();
    }

    /// Restore all filters to "unbounded/all". State mutated by past
    /// ticks stays as-is; resets do not re-seed the sample data.
    pub fn reset_filters(&mut self) {
        self.set_filter(FilterSpec::default());
    }

    /// Apply one simulator pass and refresh the derived views.
    pub fn tick(&mut self) {
        tick(&mut self.state, &self.rates, &mut self.rng);
        self.ticks += 1;
        self.refresh();
        debug!(
            tick = self.ticks,
            available_stock = self.derived.metrics.available_stock,
            open_orders = self.derived.metrics.open_orders,
            "simulator tick applied"
        );
    }

    /// Convenience loop for headless runs.
    pub fn run_ticks(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    fn refresh(&mut self) {
        self.derived = derive(&self.state, &self.filter);
    }
}

fn derive(state: &FactoryState, filter: &FilterSpec) -> Derived {
    let view = apply_filters(state, filter);
    let metrics = compute_metrics(&view);
    let costs = cost_report(&state.models, &view.orders);
    let clients = client_options(&state.orders);
    Derived {
        view,
        metrics,
        costs,
        clients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabrica_core::{sample_state, ModelId, ProductionStage, StockItem};
    use proptest::prelude::*;

    fn all_rates() -> MutationRates {
        MutationRates {
            stage_advance: 1.0,
            start_production: 1.0,
            finish_production: 1.0,
            ..MutationRates::default()
        }
    }

    fn no_rates() -> MutationRates {
        MutationRates {
            stage_advance: 0.0,
            start_production: 0.0,
            finish_production: 0.0,
            ..MutationRates::default()
        }
    }

    #[test]
    fn certain_rates_advance_every_stage() {
        let mut state = sample_state();
        let rates = all_rates();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let before: Vec<ProductionStage> = state.production.iter().map(|b| b.stage).collect();
        tick(&mut state, &rates, &mut rng);
        for (batch, prev) in state.production.iter().zip(before) {
            assert_eq!(batch.stage, prev.next());
        }
    }

    #[test]
    fn four_certain_ticks_complete_the_cycle() {
        let mut state = sample_state();
        let rates = all_rates();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let before: Vec<ProductionStage> = state.production.iter().map(|b| b.stage).collect();
        for _ in 0..4 {
            tick(&mut state, &rates, &mut rng);
        }
        let after: Vec<ProductionStage> = state.production.iter().map(|b| b.stage).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn statuses_step_toward_ready_and_stop() {
        let mut state = sample_state();
        let rates = all_rates();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..3 {
            tick(&mut state, &rates, &mut rng);
        }
        for order in &state.orders {
            assert_eq!(order.status, OrderStatus::ReadyToShip);
        }
    }

    #[test]
    fn delivered_orders_are_stable() {
        let mut state = sample_state();
        state.orders[0].status = OrderStatus::Delivered;
        let rates = all_rates();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        tick(&mut state, &rates, &mut rng);
        assert_eq!(state.orders[0].status, OrderStatus::Delivered);
    }

    #[test]
    fn reserved_is_never_touched() {
        let mut state = sample_state();
        let before: Vec<u32> = state.stock.iter().map(|s| s.reserved).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..50 {
            tick(&mut state, &MutationRates::default(), &mut rng);
        }
        let after: Vec<u32> = state.stock.iter().map(|s| s.reserved).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn same_seed_same_history() {
        let config = SimConfig::default();
        let mut a = Store::new(sample_state(), &config);
        let mut b = Store::new(sample_state(), &config);
        a.run_ticks(25);
        b.run_ticks(25);
        assert_eq!(a.state(), b.state());
        assert_eq!(a.derived().metrics, b.derived().metrics);
    }

    #[test]
    fn tick_refreshes_derived_views() {
        let mut store = Store::new(sample_state(), &SimConfig::default());
        store.set_filter(FilterSpec {
            model: Some(ModelId::new("MX-100")),
            ..FilterSpec::default()
        });
        assert_eq!(store.derived().view.orders.len(), 1);
        store.run_ticks(10);
        let expected = apply_filters(store.state(), store.filter());
        assert_eq!(store.derived().view, expected);
        assert_eq!(store.derived().metrics, compute_metrics(&expected));
    }

    #[test]
    fn reset_restores_full_collections() {
        let mut store = Store::new(sample_state(), &SimConfig::default());
        store.set_filter(FilterSpec {
            client: Some("Casa Urbana".to_string()),
            ..FilterSpec::default()
        });
        assert_eq!(store.derived().view.orders.len(), 2);
        store.reset_filters();
        assert!(store.filter().is_unbounded());
        assert_eq!(store.derived().view.orders.len(), 5);
        let ids: Vec<&str> = store
            .derived()
            .view
            .orders
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert!(ids.contains(&"PD-311"));
        assert!(ids.contains(&"PD-315"));
    }

    #[test]
    fn zero_rates_only_move_stock() {
        let mut state = sample_state();
        let expected_orders = state.orders.clone();
        let expected_production = state.production.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        tick(&mut state, &no_rates(), &mut rng);
        assert_eq!(state.orders, expected_orders);
        assert_eq!(state.production, expected_production);
    }

    #[test]
    fn scenario_yaml_parses_with_default_rates() {
        let config = SimConfig::from_yaml_str("rng_seed: 7\ntick_interval_secs: 2\n").unwrap();
        assert_eq!(config.rng_seed, 7);
        assert_eq!(config.tick_interval_secs, 2);
        assert_eq!(config.rates, MutationRates::default());
    }

    proptest! {
        #[test]
        fn empty_shelf_never_goes_negative(seed in any::<u64>(), ticks in 1u64..40) {
            let mut state = sample_state();
            state.stock.push(StockItem {
                model_id: ModelId::new("MX-100"),
                on_hand: 0,
                reserved: 5,
            });
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let rates = MutationRates::default();
            for _ in 0..ticks {
                tick(&mut state, &rates, &mut rng);
                // u32 cannot go negative; the clamp must also keep a drained
                // shelf from wrapping upward past a single tick's delta.
                let drained = state.stock.last().unwrap();
                prop_assert!(i64::from(drained.on_hand) <= i64::from(rates.stock_delta_max) * ticks as i64);
            }
        }

        #[test]
        fn stock_moves_at_most_delta_per_tick(seed in any::<u64>()) {
            let mut state = sample_state();
            let before: Vec<u32> = state.stock.iter().map(|s| s.on_hand).collect();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let rates = MutationRates::default();
            tick(&mut state, &rates, &mut rng);
            for (item, prev) in state.stock.iter().zip(before) {
                let delta = i64::from(item.on_hand) - i64::from(prev);
                prop_assert!(delta >= i64::from(rates.stock_delta_min));
                prop_assert!(delta <= i64::from(rates.stock_delta_max));
            }
        }
    }
}
