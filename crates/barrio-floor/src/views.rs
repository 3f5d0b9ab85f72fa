//! # Role Views
//!
//! Serializable read models, one per screen, derived from the store on demand.
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────────────┐   ┌──────────────────────┐
//! │ FloorView (waiter)   │   │ KitchenView          │   │ AdminView            │
//! │  zone filter         │   │  tickets, oldest     │   │  session sales       │
//! │  tables in layout    │   │  first, late flag    │   │  + historical        │
//! │  status counts       │   │                      │   │  = estimated daily   │
//! └──────────────────────┘   └──────────────────────┘   └──────────────────────┘
//! ```
//!
//! Views hold copies; nothing here can change a table.

use barrio_core::floor::{filter_tables, floor_stats};
use barrio_core::kitchen::kitchen_queue_with_threshold;
use barrio_core::sales::sales_summary;
use barrio_core::{FloorStats, KitchenTicket, SalesSummary, Table, TableStore, ZoneFilter};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::FloorConfig;
use crate::state::FloorState;

/// The waiter's floor map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorView {
    pub venue: String,
    pub zone: ZoneFilter,
    pub tables: Vec<Table>,
    /// Counts over the whole floor, not just the filtered zone.
    pub stats: FloorStats,
}

impl FloorView {
    pub fn build(store: &TableStore, config: &FloorConfig, zone: ZoneFilter) -> Self {
        FloorView {
            venue: config.venue.name.clone(),
            zone,
            tables: filter_tables(store.tables(), zone)
                .into_iter()
                .cloned()
                .collect(),
            stats: floor_stats(store.tables()),
        }
    }
}

/// The kitchen display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenView {
    pub tickets: Vec<KitchenTicket>,
    pub pending_table_count: usize,
    pub late_count: usize,
}

impl KitchenView {
    pub fn build(store: &TableStore, config: &FloorConfig, now: DateTime<Utc>) -> Self {
        let tickets = kitchen_queue_with_threshold(store.tables(), now, config.late_after());
        KitchenView {
            pending_table_count: tickets.len(),
            late_count: tickets.iter().filter(|ticket| ticket.is_late).count(),
            tickets,
        }
    }
}

/// The admin's sales panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    pub sales: SalesSummary,
    pub formatted_current: String,
    pub formatted_historical: String,
    pub formatted_daily: String,
}

impl AdminView {
    pub fn build(store: &TableStore, config: &FloorConfig) -> Self {
        let sales = sales_summary(store.tables(), config.historical_baseline());
        AdminView {
            formatted_current: config.format_money(sales.current_session),
            formatted_historical: config.format_money(sales.historical_baseline),
            formatted_daily: config.format_money(sales.estimated_daily),
            sales,
        }
    }
}

impl FloorState {
    pub fn floor_view(&self, config: &FloorConfig, zone: ZoneFilter) -> FloorView {
        self.with_store(|store| FloorView::build(store, config, zone))
    }

    pub fn kitchen_view(&self, config: &FloorConfig, now: DateTime<Utc>) -> KitchenView {
        self.with_store(|store| KitchenView::build(store, config, now))
    }

    pub fn admin_view(&self, config: &FloorConfig) -> AdminView {
        self.with_store(|store| AdminView::build(store, config))
    }
}
