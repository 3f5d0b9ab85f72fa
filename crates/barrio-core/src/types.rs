//! # Domain Types
//!
//! Core domain types shared by the engine, the store and the role views.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   OrderItem     │   │     Table       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id ("c1")      │──►│  id (UUID)      │──►│  id ("5")       │       │
//! │  │  name           │   │  product (copy) │   │  zone           │       │
//! │  │  price          │   │  quantity       │   │  status         │       │
//! │  │  category       │   │  status         │   │  orders, total  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductCategory │   │   OrderStatus   │   │  TableStatus    │       │
//! │  │  Cafe, Pastry   │   │  Pending        │   │  Free, Occupied │       │
//! │  │  Lunch, Drinks  │   │  Ready          │   │  WaitingPayment │       │
//! │  └─────────────────┘   └─────────────────┘   │  Reserved       │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An `OrderItem` holds a *copy* of the product as it was when ordered.
//! Later catalog changes never reach items already on a table.
//!
//! ## Guarded Fields
//! `Table` keeps its fields crate-private: `total` is derived from `orders`,
//! so only the engine (and the invariant-checking constructors) produce
//! tables. Screens read through accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Product Category
// =============================================================================

/// Menu section a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Cafe,
    Pastry,
    Lunch,
    Drinks,
}

impl ProductCategory {
    /// Every category in menu order.
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::Cafe,
        ProductCategory::Pastry,
        ProductCategory::Lunch,
        ProductCategory::Drinks,
    ];

    /// Label shown on the menu tabs.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductCategory::Cafe => "Cafetería",
            ProductCategory::Pastry => "Pastelería",
            ProductCategory::Lunch => "Almuerzo",
            ProductCategory::Drinks => "Bebidas",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Zone
// =============================================================================

/// Physical area of the floor. A table's zone never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    /// Indoor dining room.
    Salon,
    /// Sidewalk / patio.
    Vereda,
    /// Bar counter.
    Barra,
}

impl Zone {
    /// Every zone in floor-plan order.
    pub const ALL: [Zone; 3] = [Zone::Salon, Zone::Vereda, Zone::Barra];

    pub const fn label(&self) -> &'static str {
        match self {
            Zone::Salon => "Salón Interior",
            Zone::Vereda => "Vereda / Patio",
            Zone::Barra => "Barra",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Table Status
// =============================================================================

/// Lifecycle state of a table.
///
/// ## Service Cycle
/// ```text
///   FREE ──(first item)──► OCCUPIED ──(bill asked)──► WAITING_PAYMENT
///     ▲                                                     │
///     └──────────────────(close table: clears all)──────────┘
///
///   Staff may set ANY status from ANY status to correct mistakes.
///   Setting FREE is destructive: orders, total and people are wiped.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
    WaitingPayment,
    Reserved,
}

impl TableStatus {
    /// Every status, in the order the status buttons are shown.
    pub const ALL: [TableStatus; 4] = [
        TableStatus::Free,
        TableStatus::Occupied,
        TableStatus::WaitingPayment,
        TableStatus::Reserved,
    ];

    /// Short label for table cards.
    pub const fn label(&self) -> &'static str {
        match self {
            TableStatus::Free => "Libre",
            TableStatus::Occupied => "Ocupada",
            TableStatus::WaitingPayment => "Cobrar",
            TableStatus::Reserved => "Reserva",
        }
    }

    /// Whether a table in this status counts toward current-session sales.
    pub const fn counts_toward_sales(&self) -> bool {
        match self {
            TableStatus::Occupied | TableStatus::WaitingPayment => true,
            TableStatus::Free | TableStatus::Reserved => false,
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Kitchen fulfilment state of an order line. Only moves Pending → Ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Still owed by the kitchen.
    #[default]
    Pending,
    /// Delivered to the table.
    Ready,
}

// =============================================================================
// Product
// =============================================================================

/// A menu entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier ("c1", "p3", ...).
    pub id: String,
    pub name: String,
    /// Unit price in whole currency units.
    pub price: Money,
    pub category: ProductCategory,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: i64,
        category: ProductCategory,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price: Money::from_units(price),
            category,
        }
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// One line of a table's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub(crate) id: String,
    /// Product data at time of ordering (frozen).
    pub(crate) product: Product,
    pub(crate) quantity: u32,
    pub(crate) notes: Option<String>,
    #[ts(as = "String")]
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) status: OrderStatus,
}

impl OrderItem {
    /// Creates a fresh PENDING line of quantity 1 for `product`, ordered at `at`.
    pub fn new(product: &Product, at: DateTime<Utc>) -> Self {
        OrderItem {
            id: Uuid::new_v4().to_string(),
            product: product.clone(),
            quantity: 1,
            notes: None,
            timestamp: at,
            status: OrderStatus::Pending,
        }
    }

    /// Replaces the generated id (used by fixed floor layouts).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the line quantity. Zero is raised to 1.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the kitchen status of a line that is not yet on a table.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// When the line was ordered.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Unit price × quantity, using the frozen product price.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Table
// =============================================================================

/// A physical table and everything currently ordered at it.
///
/// ## Invariants
/// - `total` equals the sum of `line_total()` over `orders`
/// - `status == Free` ⇒ `orders` is empty and `total` is zero
/// - `people_count` is never negative (unsigned)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) zone: Zone,
    pub(crate) status: TableStatus,
    pub(crate) orders: Vec<OrderItem>,
    pub(crate) total: Money,
    pub(crate) people_count: u32,
}

impl Table {
    /// Creates an empty FREE table.
    pub fn new(id: impl Into<String>, name: impl Into<String>, zone: Zone) -> Self {
        Table {
            id: id.into(),
            name: name.into(),
            zone,
            status: TableStatus::Free,
            orders: Vec::new(),
            total: Money::zero(),
            people_count: 0,
        }
    }

    /// Creates a table that is already in service (floor layouts, demos).
    ///
    /// The total is computed from `orders`. The result is not checked here;
    /// `validation::check_table` rejects combinations such as a FREE table
    /// with orders before they reach a store.
    pub fn in_service(
        id: impl Into<String>,
        name: impl Into<String>,
        zone: Zone,
        status: TableStatus,
        orders: Vec<OrderItem>,
        people_count: u32,
    ) -> Self {
        let mut table = Table {
            id: id.into(),
            name: name.into(),
            zone,
            status,
            orders,
            total: Money::zero(),
            people_count,
        };
        table.recompute_total();
        table
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn status(&self) -> TableStatus {
        self.status
    }

    /// Order lines in insertion order.
    pub fn orders(&self) -> &[OrderItem] {
        &self.orders
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn people_count(&self) -> u32 {
        self.people_count
    }

    pub fn is_free(&self) -> bool {
        self.status == TableStatus::Free
    }

    pub fn find_item(&self, item_id: &str) -> Option<&OrderItem> {
        self.orders.iter().find(|item| item.id == item_id)
    }

    /// PENDING lines in insertion order.
    pub fn pending_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.orders.iter().filter(|item| item.is_pending())
    }

    pub fn has_pending(&self) -> bool {
        self.orders.iter().any(OrderItem::is_pending)
    }

    /// Timestamp of the oldest PENDING line, if any.
    pub fn oldest_pending_at(&self) -> Option<DateTime<Utc>> {
        self.pending_items().map(OrderItem::timestamp).min()
    }

    /// Sum of line totals, recomputed from scratch.
    pub fn computed_total(&self) -> Money {
        self.orders.iter().map(OrderItem::line_total).sum()
    }

    pub(crate) fn recompute_total(&mut self) {
        self.total = self.computed_total();
    }

    /// Wipes orders, total and party size and marks the table FREE.
    pub(crate) fn clear(&mut self) {
        self.status = TableStatus::Free;
        self.orders.clear();
        self.total = Money::zero();
        self.people_count = 0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn latte() -> Product {
        Product::new("c3", "Latte", 2800, ProductCategory::Cafe)
    }

    #[test]
    fn test_new_table_is_free_and_empty() {
        let table = Table::new("1", "Mesa 1", Zone::Salon);
        assert!(table.is_free());
        assert!(table.orders().is_empty());
        assert!(table.total().is_zero());
        assert_eq!(table.people_count(), 0);
    }

    #[test]
    fn test_in_service_computes_total() {
        let now = Utc::now();
        let table = Table::in_service(
            "3",
            "Mesa 3",
            Zone::Salon,
            TableStatus::Occupied,
            vec![OrderItem::new(&latte(), now).with_quantity(2)],
            2,
        );
        assert_eq!(table.total().units(), 5600);
        assert_eq!(table.total(), table.computed_total());
    }

    #[test]
    fn test_order_item_defaults() {
        let item = OrderItem::new(&latte(), Utc::now());
        assert_eq!(item.quantity(), 1);
        assert!(item.is_pending());
        assert!(item.notes().is_none());
        assert!(Uuid::parse_str(item.id()).is_ok());
    }

    #[test]
    fn test_with_quantity_never_zero() {
        let item = OrderItem::new(&latte(), Utc::now()).with_quantity(0);
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_oldest_pending_ignores_ready_items() {
        let now = Utc::now();
        let earlier = now - Duration::minutes(30);
        let table = Table::in_service(
            "3",
            "Mesa 3",
            Zone::Salon,
            TableStatus::Occupied,
            vec![
                OrderItem::new(&latte(), earlier).with_status(OrderStatus::Ready),
                OrderItem::new(&latte(), now),
            ],
            1,
        );
        assert_eq!(table.oldest_pending_at(), Some(now));
        assert_eq!(table.pending_items().count(), 1);
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&TableStatus::WaitingPayment).unwrap();
        assert_eq!(json, "\"WAITING_PAYMENT\"");
    }

    #[test]
    fn test_labels() {
        assert_eq!(TableStatus::WaitingPayment.label(), "Cobrar");
        assert_eq!(Zone::Vereda.to_string(), "Vereda / Patio");
        assert_eq!(ProductCategory::Pastry.label(), "Pastelería");
    }

    #[test]
    fn test_sales_eligibility() {
        assert!(TableStatus::Occupied.counts_toward_sales());
        assert!(TableStatus::WaitingPayment.counts_toward_sales());
        assert!(!TableStatus::Reserved.counts_toward_sales());
        assert!(!TableStatus::Free.counts_toward_sales());
    }
}
