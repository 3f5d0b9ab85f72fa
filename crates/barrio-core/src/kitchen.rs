//! # Kitchen Queue
//!
//! Derives the kitchen's work list from the table collection.
//!
//! ```text
//! tables ──► status != FREE ──► has PENDING line ──► sort by oldest PENDING
//!                                                         │
//!                       first-in, first-served across tables ▼
//!                                                   [ticket, ticket, ...]
//! ```
//!
//! A ticket is *late* once its oldest pending line has waited strictly longer
//! than the late threshold (15 minutes unless configured). Late is a display
//! flag; it never feeds back into table state.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::types::{OrderItem, Table, Zone};
use crate::LATE_AFTER_MINUTES;

/// One table's outstanding kitchen work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicket {
    pub table_id: String,
    pub table_name: String,
    pub zone: Zone,
    /// PENDING lines in the order they were added.
    pub pending: Vec<OrderItem>,
    #[ts(as = "String")]
    pub oldest_pending_at: DateTime<Utc>,
    /// Whole minutes since the oldest pending line was ordered.
    pub wait_minutes: i64,
    pub is_late: bool,
}

impl KitchenTicket {
    fn from_table(
        table: &Table,
        oldest: DateTime<Utc>,
        now: DateTime<Utc>,
        late_after: Duration,
    ) -> Self {
        let waited = now - oldest;
        KitchenTicket {
            table_id: table.id().to_string(),
            table_name: table.name().to_string(),
            zone: table.zone(),
            pending: table.pending_items().cloned().collect(),
            oldest_pending_at: oldest,
            wait_minutes: waited.num_minutes(),
            is_late: waited > late_after,
        }
    }

    /// Total units still owed for this table.
    pub fn pending_units(&self) -> u32 {
        self.pending.iter().map(OrderItem::quantity).sum()
    }
}

/// Default late threshold.
pub fn default_late_after() -> Duration {
    Duration::minutes(LATE_AFTER_MINUTES)
}

/// Builds the kitchen queue with the default late threshold.
pub fn kitchen_queue<'a, I>(tables: I, now: DateTime<Utc>) -> Vec<KitchenTicket>
where
    I: IntoIterator<Item = &'a Table>,
{
    kitchen_queue_with_threshold(tables, now, default_late_after())
}

/// Builds the kitchen queue, oldest outstanding order first.
///
/// Tables whose oldest pending lines share a timestamp keep their collection
/// order (stable sort).
pub fn kitchen_queue_with_threshold<'a, I>(
    tables: I,
    now: DateTime<Utc>,
    late_after: Duration,
) -> Vec<KitchenTicket>
where
    I: IntoIterator<Item = &'a Table>,
{
    let mut tickets: Vec<KitchenTicket> = tables
        .into_iter()
        .filter(|table| !table.is_free())
        .filter_map(|table| {
            table
                .oldest_pending_at()
                .map(|oldest| KitchenTicket::from_table(table, oldest, now, late_after))
        })
        .collect();

    tickets.sort_by_key(|ticket| ticket.oldest_pending_at);
    tickets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::engine::{add_item_at, mark_item_ready, set_status};
    use crate::types::TableStatus;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, hour, minute, 0).unwrap()
    }

    fn table_with_order(id: &str, product_id: &str, when: DateTime<Utc>) -> Table {
        let catalog = Catalog::standard();
        let product = catalog.find(product_id).unwrap();
        add_item_at(&Table::new(id, format!("Mesa {}", id), Zone::Salon), product, when)
    }

    #[test]
    fn test_oldest_pending_first() {
        let b = table_with_order("B", "c1", at(10, 5));
        let a = table_with_order("A", "c3", at(10, 0));

        let queue = kitchen_queue([&b, &a], at(10, 10));

        let ids: Vec<&str> = queue.iter().map(|t| t.table_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_ready_only_and_free_tables_excluded() {
        let served = table_with_order("1", "c1", at(9, 0));
        let item = served.orders()[0].id().to_string();
        let served = mark_item_ready(&served, &item);

        let free = Table::new("2", "Mesa 2", Zone::Salon);
        let waiting = table_with_order("3", "p1", at(9, 30));

        let queue = kitchen_queue([&served, &free, &waiting], at(9, 35));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].table_id, "3");
    }

    #[test]
    fn test_ready_lines_do_not_count_toward_age() {
        let catalog = Catalog::standard();
        let table = table_with_order("1", "c1", at(9, 0));
        let first = table.orders()[0].id().to_string();
        let table = mark_item_ready(&table, &first);
        let table = add_item_at(&table, catalog.find("p1").unwrap(), at(9, 50));

        let queue = kitchen_queue([&table], at(10, 0));
        assert_eq!(queue[0].oldest_pending_at, at(9, 50));
        assert_eq!(queue[0].pending.len(), 1);
        assert!(!queue[0].is_late);
    }

    #[test]
    fn test_pending_lines_keep_insertion_order() {
        let catalog = Catalog::standard();
        let table = table_with_order("1", "l1", at(12, 0));
        let table = add_item_at(&table, catalog.find("b3").unwrap(), at(12, 1));
        let table = add_item_at(&table, catalog.find("p4").unwrap(), at(12, 2));

        let queue = kitchen_queue([&table], at(12, 3));
        let names: Vec<&str> = queue[0]
            .pending
            .iter()
            .map(|item| item.product().name.as_str())
            .collect();
        assert_eq!(names, vec!["Tostado Jamón y Queso", "Coca Cola", "Cookie Choco"]);
        assert_eq!(queue[0].pending_units(), 3);
    }

    #[test]
    fn test_late_flag_is_strict() {
        let table = table_with_order("1", "c1", at(10, 0));

        let on_time = kitchen_queue([&table], at(10, 15));
        assert!(!on_time[0].is_late);
        assert_eq!(on_time[0].wait_minutes, 15);

        let late = kitchen_queue([&table], at(10, 15) + Duration::seconds(1));
        assert!(late[0].is_late);
    }

    #[test]
    fn test_custom_threshold() {
        let table = table_with_order("1", "c1", at(10, 0));
        let queue = kitchen_queue_with_threshold([&table], at(10, 6), Duration::minutes(5));
        assert!(queue[0].is_late);
    }

    #[test]
    fn test_reserved_table_with_pending_is_queued() {
        let reserved = set_status(&Table::new("9", "Barra 2", Zone::Barra), TableStatus::Reserved);
        let catalog = Catalog::standard();
        let reserved = add_item_at(&reserved, catalog.find("c2").unwrap(), at(8, 0));

        let queue = kitchen_queue([&reserved], at(8, 1));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].zone, Zone::Barra);
    }

    #[test]
    fn test_equal_timestamps_keep_collection_order() {
        let first = table_with_order("X", "c1", at(11, 0));
        let second = table_with_order("Y", "c1", at(11, 0));

        let queue = kitchen_queue([&first, &second], at(11, 1));
        assert_eq!(queue[0].table_id, "X");
        assert_eq!(queue[1].table_id, "Y");
    }
}
