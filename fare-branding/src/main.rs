use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use fare_branding::diagnostics::TracingSink;
use fare_branding::selector::{BrandEligibilityResolver, MarketOutcome, TransactionKind};
use fare_branding::snapshot::Snapshot;

/// Snapshot used when `FARE_BRANDING_SNAPSHOT` is not set.
const DEFAULT_SNAPSHOT: &str = "snapshot.json";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::var("FARE_BRANDING_SNAPSHOT").unwrap_or_else(|_| {
        eprintln!("Warning: FARE_BRANDING_SNAPSHOT not set, using {DEFAULT_SNAPSHOT}");
        DEFAULT_SNAPSHOT.to_string()
    });

    let snapshot = match Snapshot::load(&path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Failed to load snapshot: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (tx, mut markets) = snapshot.into_transaction();
    let tx = tx.with_sink(Arc::new(TracingSink));
    let resolver = BrandEligibilityResolver::new(&tx);
    let registry = tx.registry.clone();

    for (i, batch) in markets.iter_mut().enumerate() {
        println!("Market {i}: {}", describe(&batch.market));

        if tx.evaluation.kind == TransactionKind::FareDisplay {
            for fare in batch.fares.iter_mut() {
                let usable = resolver.resolve_fare_display(fare);
                println!("  fare {} {} usable={usable}", fare.id, fare.fare_class);
                for m in &fare.display_brands {
                    println!("    {} {} {}", m.program_id, m.brand_code, m.status.as_str());
                }
            }
            continue;
        }

        match resolver.resolve_fare_market(&mut batch.fares) {
            MarketOutcome::Evaluated { fares, usable } => {
                println!("  {usable} of {fares} fares usable");
            }
            other => println!("  not evaluated: {other:?}"),
        }

        for fare in &batch.fares {
            println!(
                "  fare {} {} {} usable={} requested={}",
                fare.id,
                fare.fare_class,
                fare.directionality,
                fare.valid_for_branding,
                resolver.offers_requested_brand(fare)
            );
            for (slot, &index) in fare.brand_status.iter().zip(fare.brand_program_indices()) {
                let Some(qualified) = registry.get(index) else {
                    continue;
                };
                println!(
                    "    {} {} {} {}",
                    qualified.program.id,
                    qualified.brand.code,
                    slot.status.as_str(),
                    slot.direction
                );
            }
        }
    }

    ExitCode::SUCCESS
}

fn describe(market: &fare_branding::domain::TravelMarket) -> String {
    let mut points: Vec<String> = Vec::new();
    for seg in market.air_segments() {
        if points.is_empty() {
            points.push(seg.board_city.to_string());
        }
        points.push(seg.off_city.to_string());
    }
    format!("{} ({})", points.join("-"), market.governing_carrier)
}
