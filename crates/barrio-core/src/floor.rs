//! # Floor Plan Queries
//!
//! Zone filtering and per-status counts for the waiter's floor screen.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Table, TableStatus, Zone};

/// Which part of the floor is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "zone", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneFilter {
    /// The whole map.
    #[default]
    All,
    Only(Zone),
}

impl ZoneFilter {
    pub fn matches(&self, table: &Table) -> bool {
        match self {
            ZoneFilter::All => true,
            ZoneFilter::Only(zone) => table.zone() == *zone,
        }
    }
}

/// Table counts per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FloorStats {
    pub free: usize,
    pub occupied: usize,
    pub waiting_payment: usize,
    pub reserved: usize,
}

impl FloorStats {
    pub fn total(&self) -> usize {
        self.free + self.occupied + self.waiting_payment + self.reserved
    }

    pub fn count(&self, status: TableStatus) -> usize {
        match status {
            TableStatus::Free => self.free,
            TableStatus::Occupied => self.occupied,
            TableStatus::WaitingPayment => self.waiting_payment,
            TableStatus::Reserved => self.reserved,
        }
    }
}

/// Tables matching `filter`, in collection order.
pub fn filter_tables<'a, I>(tables: I, filter: ZoneFilter) -> Vec<&'a Table>
where
    I: IntoIterator<Item = &'a Table>,
{
    tables
        .into_iter()
        .filter(|table| filter.matches(table))
        .collect()
}

/// Tables currently in `status`, in collection order.
pub fn tables_with_status<'a, I>(tables: I, status: TableStatus) -> Vec<&'a Table>
where
    I: IntoIterator<Item = &'a Table>,
{
    tables
        .into_iter()
        .filter(|table| table.status() == status)
        .collect()
}

/// Counts tables per status.
pub fn floor_stats<'a, I>(tables: I) -> FloorStats
where
    I: IntoIterator<Item = &'a Table>,
{
    tables
        .into_iter()
        .fold(FloorStats::default(), |mut stats, table| {
            match table.status() {
                TableStatus::Free => stats.free += 1,
                TableStatus::Occupied => stats.occupied += 1,
                TableStatus::WaitingPayment => stats.waiting_payment += 1,
                TableStatus::Reserved => stats.reserved += 1,
            }
            stats
        })
}
