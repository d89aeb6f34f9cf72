#![deny(warnings)]

//! Headless CLI: seeds the dashboard store, applies a filter, runs
//! simulator ticks, and prints the derived metrics and cost report.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fabrica_core::{sample_state, validate_state, ModelId};
use fabrica_report::{format, FilterSpec};
use fabrica_sim::{SimConfig, Store};
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Args {
    scenario: Option<String>,
    ticks: Option<u64>,
    seed: Option<u64>,
    start: Option<String>,
    end: Option<String>,
    client: Option<String>,
    model: Option<String>,
    interval_ms: Option<u64>,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => args.scenario = it.next(),
            "--ticks" => args.ticks = it.next().and_then(|s| s.parse().ok()),
            "--seed" => args.seed = it.next().and_then(|s| s.parse().ok()),
            "--start" => args.start = it.next(),
            "--end" => args.end = it.next(),
            "--client" => args.client = it.next(),
            "--model" => args.model = it.next(),
            "--interval-ms" => args.interval_ms = it.next().and_then(|s| s.parse().ok()),
            _ => {}
        }
    }
    args
}

fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date: {value} (expected YYYY-MM-DD)"))
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    info!(git_sha = env!("GIT_SHA"), "starting dashboard CLI");

    let mut config = match &args.scenario {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading scenario: {path}"))?;
            SimConfig::from_yaml_str(&text)
                .with_context(|| format!("parsing scenario: {path}"))?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }

    let filter = FilterSpec {
        start_date: args.start.as_deref().map(parse_day).transpose()?,
        end_date: args.end.as_deref().map(parse_day).transpose()?,
        client: args.client.clone(),
        model: args.model.clone().map(ModelId::new),
    };

    let state = sample_state();
    validate_state(&state)?;
    let mut store = Store::new(state, &config);
    store.set_filter(filter);

    let ticks = args.ticks.unwrap_or(0);
    let interval = Duration::from_millis(args.interval_ms.unwrap_or(0));
    info!(ticks, seed = config.rng_seed, "running simulator");
    for _ in 0..ticks {
        store.tick();
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }

    let derived = store.derived();
    println!(
        "Métricas | stock disponible: {} | unidades en producción: {} | pedidos abiertos: {}",
        derived.metrics.available_stock,
        derived.metrics.units_in_production,
        derived.metrics.open_orders
    );

    println!("Producción:");
    for batch in &derived.view.production {
        println!(
            "  {} | {} | {} | {} uds | {} -> {}",
            batch.id,
            store.state().model_name(&batch.model_id),
            batch.stage,
            batch.units,
            format::short_date(batch.start_date),
            format::short_date(batch.eta)
        );
    }

    println!("Pedidos:");
    for order in &derived.view.orders {
        println!(
            "  {} | {} | {} | {} uds | {} | {}",
            order.id,
            order.client,
            store.state().model_name(&order.model_id),
            order.quantity,
            format::short_date(order.date),
            order.status
        );
    }

    println!("Costes por modelo:");
    for row in &derived.costs.rows {
        println!(
            "  {} | materiales {} | mano de obra {} | tiempo {} | total {}",
            row.model_name,
            format::eur(row.totals.materials),
            format::eur(row.totals.labor),
            format::eur(row.totals.time),
            format::eur(row.totals.total)
        );
    }
    let grand = &derived.costs.grand_total;
    println!(
        "Totales | materiales {} | mano de obra {} | tiempo {} | total {}",
        format::eur(grand.materials),
        format::eur(grand.labor),
        format::eur(grand.time),
        format::eur(grand.total)
    );

    Ok(())
}
