//! # Table State Engine
//!
//! Every staff or kitchen action on a table is a pure function:
//! current table snapshot + requested change → next table snapshot.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation          Who       Effect on the table                       │
//! │  ─────────────────  ────────  ──────────────────────────────────────    │
//! │  add_item           waiter    + PENDING line; FREE → OCCUPIED;          │
//! │                               FREE with 0 people → 1 person             │
//! │  remove_item        waiter    - line; last line gone → FREE, total 0    │
//! │  set_status         waiter    any → any; FREE wipes orders/people       │
//! │  adjust_party_size  waiter    people = max(0, people + delta)           │
//! │  mark_item_ready    kitchen   PENDING → READY (one way)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Nothing Fails
//! A click on the floor never errors. When a request cannot change anything
//! (removing a line that is gone, re-marking a ready line) the engine returns
//! the table unchanged and reports `Effect::NoOp`; when a request is cut to
//! the valid range (party size below zero) it reports `Effect::Clamped`.
//! The `Effect` is only visible through [`apply`]; the single-operation
//! functions return the table alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::types::{OrderItem, OrderStatus, Product, Table, TableStatus};

// =============================================================================
// Commands and Transitions
// =============================================================================

/// A requested change to one table, as sent by a screen.
///
/// ```json
/// { "type": "add_item", "product_id": "c1" }
/// { "type": "adjust_party_size", "delta": -1 }
/// ```
///
/// Products travel by catalog id; the price always comes from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableCommand {
    AddItem { product_id: String },
    RemoveItem { item_id: String },
    SetStatus { status: TableStatus },
    AdjustPartySize { delta: i32 },
    MarkItemReady { item_id: String },
}

impl TableCommand {
    /// Stable operation name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            TableCommand::AddItem { .. } => "add_item",
            TableCommand::RemoveItem { .. } => "remove_item",
            TableCommand::SetStatus { .. } => "set_status",
            TableCommand::AdjustPartySize { .. } => "adjust_party_size",
            TableCommand::MarkItemReady { .. } => "mark_item_ready",
        }
    }

    /// Whether the kitchen role may issue this command.
    pub const fn is_kitchen_command(&self) -> bool {
        matches!(self, TableCommand::MarkItemReady { .. })
    }
}

/// How a command landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    /// The table changed as requested.
    Applied,
    /// The table already satisfied the request; returned unchanged.
    NoOp,
    /// The requested value was cut to the valid range.
    Clamped,
}

impl Effect {
    /// Whether the returned snapshot can differ from the input.
    pub const fn changed(&self) -> bool {
        !matches!(self, Effect::NoOp)
    }
}

/// The next table snapshot plus how the command landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub table: Table,
    pub effect: Effect,
}

impl Transition {
    fn applied(table: Table) -> Self {
        Transition {
            table,
            effect: Effect::Applied,
        }
    }

    fn unchanged(table: &Table) -> Self {
        Transition {
            table: table.clone(),
            effect: Effect::NoOp,
        }
    }
}

/// Runs one command against a table snapshot.
///
/// `AddItem` resolves its product in `catalog`; an id the catalog does not
/// know leaves the table untouched (`Effect::NoOp`). `now` is the order
/// timestamp for `AddItem` and ignored otherwise.
pub fn apply(
    table: &Table,
    command: &TableCommand,
    catalog: &Catalog,
    now: DateTime<Utc>,
) -> Transition {
    match command {
        TableCommand::AddItem { product_id } => match catalog.find(product_id) {
            Some(product) => add_item_transition(table, product, now),
            None => Transition::unchanged(table),
        },
        TableCommand::RemoveItem { item_id } => remove_item_transition(table, item_id),
        TableCommand::SetStatus { status } => set_status_transition(table, *status),
        TableCommand::AdjustPartySize { delta } => adjust_party_size_transition(table, *delta),
        TableCommand::MarkItemReady { item_id } => mark_item_ready_transition(table, item_id),
    }
}

// =============================================================================
// Single Operations
// =============================================================================

/// Adds one PENDING unit of `product`, ordered now.
pub fn add_item(table: &Table, product: &Product) -> Table {
    add_item_at(table, product, Utc::now())
}

/// Adds one PENDING unit of `product`, ordered at `at`.
///
/// ## Status and People Rules
/// ```text
/// before                     after
/// ─────────────────────────  ─────────────────────────────
/// FREE, 0 people          →  OCCUPIED, 1 person
/// FREE, 3 people          →  OCCUPIED, 3 people
/// OCCUPIED / WAITING_PAY  →  unchanged
/// RESERVED                →  RESERVED (stays, see DESIGN.md)
/// ```
///
/// Repeated additions of the same product create separate lines; lines are
/// never merged.
pub fn add_item_at(table: &Table, product: &Product, at: DateTime<Utc>) -> Table {
    add_item_transition(table, product, at).table
}

/// Removes the line with `item_id`.
///
/// Removing the last line turns the table FREE with a zero total. The party
/// size is kept; the next `set_status(FREE)` resets it.
pub fn remove_item(table: &Table, item_id: &str) -> Table {
    remove_item_transition(table, item_id).table
}

/// Sets the table status. `TableStatus::Free` closes the table: orders,
/// total and party size are wiped whatever they were.
pub fn set_status(table: &Table, status: TableStatus) -> Table {
    set_status_transition(table, status).table
}

/// Adds `delta` guests (negative to remove), never going below zero.
pub fn adjust_party_size(table: &Table, delta: i32) -> Table {
    adjust_party_size_transition(table, delta).table
}

/// Marks the line with `item_id` as READY. Idempotent.
pub fn mark_item_ready(table: &Table, item_id: &str) -> Table {
    mark_item_ready_transition(table, item_id).table
}

// =============================================================================
// Transitions
// =============================================================================

fn add_item_transition(table: &Table, product: &Product, at: DateTime<Utc>) -> Transition {
    let mut next = table.clone();
    next.orders.push(OrderItem::new(product, at));
    next.recompute_total();

    if table.status == TableStatus::Free {
        next.status = TableStatus::Occupied;
        if table.people_count == 0 {
            next.people_count = 1;
        }
    }

    Transition::applied(next)
}

fn remove_item_transition(table: &Table, item_id: &str) -> Transition {
    let Some(index) = table.orders.iter().position(|item| item.id == item_id) else {
        return Transition::unchanged(table);
    };

    let mut next = table.clone();
    next.orders.remove(index);

    next.recompute_total();
    if next.orders.is_empty() {
        next.status = TableStatus::Free;
    }

    Transition::applied(next)
}

fn set_status_transition(table: &Table, status: TableStatus) -> Transition {
    match status {
        TableStatus::Free => {
            let already_clear =
                table.is_free() && table.orders.is_empty() && table.people_count == 0;
            if already_clear {
                return Transition::unchanged(table);
            }

            let mut next = table.clone();
            next.clear();
            Transition::applied(next)
        }
        TableStatus::Occupied | TableStatus::WaitingPayment | TableStatus::Reserved => {
            if table.status == status {
                return Transition::unchanged(table);
            }

            let mut next = table.clone();
            next.status = status;
            Transition::applied(next)
        }
    }
}

fn adjust_party_size_transition(table: &Table, delta: i32) -> Transition {
    let requested = i64::from(table.people_count) + i64::from(delta);
    let people = u32::try_from(requested.max(0)).unwrap_or(u32::MAX);

    let effect = if i64::from(people) != requested {
        Effect::Clamped
    } else if delta == 0 {
        return Transition::unchanged(table);
    } else {
        Effect::Applied
    };

    let mut next = table.clone();
    next.people_count = people;
    Transition {
        table: next,
        effect,
    }
}

fn mark_item_ready_transition(table: &Table, item_id: &str) -> Transition {
    let pending = table
        .orders
        .iter()
        .position(|item| item.id == item_id && item.is_pending());

    let Some(index) = pending else {
        return Transition::unchanged(table);
    };

    let mut next = table.clone();
    next.orders[index].status = OrderStatus::Ready;
    Transition::applied(next)
}

// =============================================================================
// Unit Tests
// =============================================================================
