//! # Floor Demo
//!
//! Opens the floor, serves one espresso on Vereda 1 and prints what each
//! screen would show along the way.
//!
//! ## Usage
//! ```bash
//! cargo run -p barrio-floor --bin floor-demo
//!
//! # Only show the sidewalk tables on the floor map
//! cargo run -p barrio-floor --bin floor-demo -- --zone vereda
//!
//! # Use a specific config file
//! cargo run -p barrio-floor --bin floor-demo -- --config ./floor.toml
//! ```
//!
//! ## Scenario (table "5", Vereda 1)
//! 1. Add Espresso ─► OCCUPIED, 1 person, $1.800, line PENDING
//! 2. Kitchen marks it ready (and is refused when it tries to free the table)
//! 3. Waiter asks for the bill ─► WAITING_PAYMENT
//! 4. Waiter frees the table ─► FREE, empty, $0
//!
//! Failed floor calls surface as `ApiError`, the shape a screen receives:
//! `{ "code": "FORBIDDEN", "message": "..." }`.

use std::env;
use std::path::PathBuf;

use barrio_core::{Catalog, TableCommand, TableStatus, Zone, ZoneFilter};
use barrio_floor::{init_tracing, ApiError, FloorConfig, FloorState, Role};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

const DEMO_TABLE: &str = "5";
const ESPRESSO: &str = "c1";

fn parse_zone(value: &str) -> Option<ZoneFilter> {
    match value.to_lowercase().as_str() {
        "all" => Some(ZoneFilter::All),
        "salon" => Some(ZoneFilter::Only(Zone::Salon)),
        "vereda" => Some(ZoneFilter::Only(Zone::Vereda)),
        "barra" => Some(ZoneFilter::Only(Zone::Barra)),
        _ => None,
    }
}

fn print_json<T: Serialize>(title: &str, value: &T) -> Result<(), serde_json::Error> {
    println!("== {} ==", title);
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut zone = ZoneFilter::All;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--zone" | "-z" => {
                if i + 1 < args.len() {
                    zone = parse_zone(&args[i + 1])
                        .ok_or_else(|| format!("unknown zone: {}", args[i + 1]))?;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Barrio Floor Demo");
                println!();
                println!("Usage: floor-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -z, --zone <ZONE>    all | salon | vereda | barra (default: all)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = FloorConfig::load_or_default(config_path);
    info!(venue = %config.venue.name, "Opening floor");

    let floor = FloorState::seeded(Catalog::standard(), Utc::now()).map_err(ApiError::from)?;

    // Kitchen-side listener, the way a second screen would follow changes.
    let mut events = floor.subscribe();
    let listener = tokio::spawn(async move {
        let mut seen = Vec::new();
        while let Ok(event) = events.recv().await {
            seen.push(event);
        }
        seen
    });

    print_json("floor (opening)", &floor.floor_view(&config, zone))?;

    let added = floor
        .add_item(DEMO_TABLE, ESPRESSO)
        .map_err(ApiError::from)?;
    let item_id = added
        .table
        .orders()
        .last()
        .map(|item| item.id().to_string())
        .ok_or("espresso line missing after add")?;

    print_json("kitchen", &floor.kitchen_view(&config, Utc::now()))?;

    floor
        .apply_as(Role::Kitchen, DEMO_TABLE, TableCommand::MarkItemReady { item_id })
        .map_err(ApiError::from)?;

    let close = TableCommand::SetStatus {
        status: TableStatus::Free,
    };
    if let Err(err) = floor.apply_as(Role::Kitchen, DEMO_TABLE, close) {
        print_json("kitchen (rejected)", &ApiError::from(err))?;
    }

    floor
        .set_status(DEMO_TABLE, TableStatus::WaitingPayment)
        .map_err(ApiError::from)?;
    print_json("admin (bill requested)", &floor.admin_view(&config))?;

    floor
        .set_status(DEMO_TABLE, TableStatus::Free)
        .map_err(ApiError::from)?;
    print_json("floor (closing)", &floor.floor_view(&config, zone))?;

    let revision = floor.revision();
    // Dropping the last sender closes the channel and ends the listener.
    drop(floor);
    let seen = listener.await?;
    print_json("events", &seen)?;

    info!(revision, events = seen.len(), "Demo finished");
    Ok(())
}
