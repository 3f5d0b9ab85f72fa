//! # Floor State
//!
//! The one table collection all three screens share.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. The floor, kitchen and admin screens all read it
//! 2. Only one change may be installed at a time
//! 3. Screens hold cheap clones of the same `FloorState`
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Floor State Operations                               │
//! │                                                                         │
//! │  Screen Action            FloorState              Effect                │
//! │  ─────────────            ──────────              ──────                │
//! │                                                                         │
//! │  Tap product ────────────► add_item() ──────────► line added, total up  │
//! │                                                                         │
//! │  Tap trash ──────────────► remove_item() ───────► line gone, total down │
//! │                                                                         │
//! │  Tap status ─────────────► set_status() ────────► FREE clears the table │
//! │                                                                         │
//! │  Tap + / - ──────────────► adjust_party_size() ─► clamped at zero       │
//! │                                                                         │
//! │  Kitchen "listo" ────────► mark_item_ready() ───► PENDING → READY       │
//! │                                                                         │
//! │  Every call: lock ─► TableStore::apply ─► revision++ ─► FloorEvent      │
//! │  A NoOp still emits an event but keeps the revision.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use barrio_core::seed::initial_tables;
use barrio_core::{Catalog, Effect, Table, TableCommand, TableStatus, TableStore, Transition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::error::{FloorError, FloorResult};

/// Buffered notifications per subscriber before it starts lagging.
const EVENT_CAPACITY: usize = 256;

/// The screen a command comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Waiter,
    /// May only mark lines ready.
    Kitchen,
    /// Read-only.
    Admin,
}

impl Role {
    pub fn may_issue(&self, command: &TableCommand) -> bool {
        match self {
            Role::Waiter => true,
            Role::Kitchen => command.is_kitchen_command(),
            Role::Admin => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Waiter => write!(f, "waiter"),
            Role::Kitchen => write!(f, "kitchen"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Sent to subscribers after each command lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorEvent {
    pub table_id: String,
    pub command: &'static str,
    pub effect: Effect,
    /// Floor revision after the command. Unchanged for `Effect::NoOp`.
    pub revision: u64,
}

/// Shared floor state.
///
/// Cloning is cheap and every clone sees the same tables.
#[derive(Debug, Clone)]
pub struct FloorState {
    store: Arc<Mutex<TableStore>>,
    revision: Arc<AtomicU64>,
    events: broadcast::Sender<FloorEvent>,
}

impl FloorState {
    pub fn new(store: TableStore) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        FloorState {
            store: Arc::new(Mutex::new(store)),
            revision: Arc::new(AtomicU64::new(0)),
            events,
        }
    }

    /// Opens the floor with the standard layout.
    pub fn seeded(catalog: Catalog, now: DateTime<Utc>) -> FloorResult<Self> {
        let tables = initial_tables(&catalog, now)?;
        let store = TableStore::new(catalog, tables)?;

        info!(tables = store.len(), "Floor seeded");
        Ok(Self::new(store))
    }

    /// Receives a `FloorEvent` for every command applied from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<FloorEvent> {
        self.events.subscribe()
    }

    /// Number of changes installed so far.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let free = floor.with_store(|store| store.tables().filter(|t| t.is_free()).count());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TableStore) -> R,
    {
        f(&self.lock())
    }

    /// Owned copy of every table, in layout order.
    pub fn snapshot(&self) -> Vec<Table> {
        self.with_store(TableStore::snapshot)
    }

    pub fn table(&self, table_id: &str) -> Option<Table> {
        self.with_store(|store| store.get(table_id).cloned())
    }

    /// Runs `command` on one table, stamped with the current time.
    pub fn apply(&self, table_id: &str, command: TableCommand) -> FloorResult<Transition> {
        self.apply_at(table_id, command, Utc::now())
    }

    /// Runs `command` on behalf of `role`, refusing commands that screen may not send.
    pub fn apply_as(
        &self,
        role: Role,
        table_id: &str,
        command: TableCommand,
    ) -> FloorResult<Transition> {
        if !role.may_issue(&command) {
            return Err(FloorError::NotPermitted {
                role,
                command: command.name(),
            });
        }
        self.apply(table_id, command)
    }

    /// Runs `command` on one table at `now`.
    pub fn apply_at(
        &self,
        table_id: &str,
        command: TableCommand,
        now: DateTime<Utc>,
    ) -> FloorResult<Transition> {
        let name = command.name();
        self.mutate(table_id, name, |store| store.apply(table_id, &command, now))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Adds one unit of catalog product `product_id`.
    pub fn add_item(&self, table_id: &str, product_id: &str) -> FloorResult<Transition> {
        let now = Utc::now();
        self.mutate(table_id, "add_item", |store| {
            store.add_item(table_id, product_id, now)
        })
    }

    pub fn remove_item(&self, table_id: &str, item_id: &str) -> FloorResult<Transition> {
        self.mutate(table_id, "remove_item", |store| {
            store.remove_item(table_id, item_id)
        })
    }

    pub fn set_status(&self, table_id: &str, status: TableStatus) -> FloorResult<Transition> {
        self.mutate(table_id, "set_status", |store| {
            store.set_status(table_id, status)
        })
    }

    pub fn adjust_party_size(&self, table_id: &str, delta: i32) -> FloorResult<Transition> {
        self.mutate(table_id, "adjust_party_size", |store| {
            store.adjust_party_size(table_id, delta)
        })
    }

    pub fn mark_item_ready(&self, table_id: &str, item_id: &str) -> FloorResult<Transition> {
        self.mutate(table_id, "mark_item_ready", |store| {
            store.mark_item_ready(table_id, item_id)
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, TableStore> {
        // Every write replaces a whole table, so a poisoned store is still consistent.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate<F>(&self, table_id: &str, command: &'static str, f: F) -> FloorResult<Transition>
    where
        F: FnOnce(&mut TableStore) -> barrio_core::CoreResult<Transition>,
    {
        let mut store = self.lock();
        let transition = f(&mut store)?;

        let revision = if transition.effect.changed() {
            self.revision.fetch_add(1, Ordering::SeqCst) + 1
        } else {
            self.revision.load(Ordering::SeqCst)
        };

        debug!(table_id, command, effect = ?transition.effect, revision, "floor updated");

        // No subscribers is fine; the change is already installed.
        let _ = self.events.send(FloorEvent {
            table_id: table_id.to_string(),
            command,
            effect: transition.effect,
            revision,
        });

        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrio_core::{CoreError, OrderStatus};

    fn floor() -> FloorState {
        FloorState::seeded(Catalog::standard(), Utc::now()).unwrap()
    }

    #[test]
    fn test_seeded_floor() {
        let floor = floor();
        assert_eq!(floor.snapshot().len(), 9);
        assert_eq!(floor.revision(), 0);
        assert_eq!(floor.table("3").unwrap().total().units(), 7400);
    }

    #[test]
    fn test_espresso_scenario() {
        let floor = floor();

        let t = floor.add_item("5", "c1").unwrap();
        assert_eq!(t.table.status(), TableStatus::Occupied);
        assert_eq!(t.table.people_count(), 1);
        assert_eq!(t.table.total().units(), 1800);

        let item_id = t.table.orders()[0].id().to_string();
        let t = floor.mark_item_ready("5", &item_id).unwrap();
        assert_eq!(t.table.orders()[0].status(), OrderStatus::Ready);

        let t = floor.set_status("5", TableStatus::WaitingPayment).unwrap();
        assert_eq!(t.table.total().units(), 1800);

        let t = floor.set_status("5", TableStatus::Free).unwrap();
        assert!(t.table.orders().is_empty());
        assert_eq!(t.table.people_count(), 0);
        assert!(t.table.total().is_zero());

        assert_eq!(floor.revision(), 4);
    }

    #[test]
    fn test_clones_share_tables() {
        let floor = floor();
        let kitchen = floor.clone();

        floor.add_item("8", "b2").unwrap();
        assert_eq!(kitchen.table("8").unwrap().status(), TableStatus::Occupied);
        assert_eq!(kitchen.revision(), 1);
    }

    #[test]
    fn test_unknown_table_is_error() {
        let floor = floor();
        let err = floor.adjust_party_size("42", 1).unwrap_err();
        assert!(matches!(err, FloorError::Core(CoreError::TableNotFound(_))));
        assert_eq!(floor.revision(), 0);
    }

    #[test]
    fn test_noop_keeps_revision_but_notifies() {
        let floor = floor();
        let mut rx = floor.subscribe();

        // o1 on Mesa 3 is already ready.
        let t = floor.mark_item_ready("3", "o1").unwrap();
        assert_eq!(t.effect, Effect::NoOp);
        assert_eq!(floor.revision(), 0);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.effect, Effect::NoOp);
        assert_eq!(event.revision, 0);
    }

    #[test]
    fn test_apply_command_form() {
        let floor = floor();
        let t = floor
            .apply("6", TableCommand::AdjustPartySize { delta: -5 })
            .unwrap();
        assert_eq!(t.effect, Effect::Clamped);
        assert_eq!(t.table.people_count(), 0);
    }

    #[test]
    fn test_wire_add_item_must_name_catalog_product() {
        let floor = floor();
        let mut rx = floor.subscribe();

        let command: TableCommand =
            serde_json::from_str(r#"{"type":"add_item","product_id":"zz"}"#).unwrap();
        let err = floor.apply("5", command).unwrap_err();
        assert!(matches!(err, FloorError::Core(CoreError::ProductNotFound(id)) if id == "zz"));

        let priced = r#"{"type":"add_item","product":{"id":"zz","name":"","price":-5000,"category":"CAFE"}}"#;
        assert!(serde_json::from_str::<TableCommand>(priced).is_err());

        assert!(floor.table("5").unwrap().is_free());
        assert_eq!(floor.revision(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_wire_add_item_uses_catalog_price() {
        let floor = floor();
        let command: TableCommand =
            serde_json::from_str(r#"{"type":"add_item","product_id":"l3"}"#).unwrap();

        let t = floor.apply("5", command).unwrap();
        assert_eq!(t.table.total().units(), 8500);
    }

    #[test]
    fn test_kitchen_role_may_only_mark_ready() {
        let floor = floor();

        let close = TableCommand::SetStatus {
            status: TableStatus::Free,
        };
        let err = floor.apply_as(Role::Kitchen, "3", close).unwrap_err();
        assert!(matches!(
            err,
            FloorError::NotPermitted {
                role: Role::Kitchen,
                command: "set_status"
            }
        ));
        assert_eq!(floor.table("3").unwrap().orders().len(), 2);

        let t = floor
            .apply_as(
                Role::Kitchen,
                "3",
                TableCommand::MarkItemReady {
                    item_id: "o2".into(),
                },
            )
            .unwrap();
        assert_eq!(t.effect, Effect::Applied);
    }

    #[test]
    fn test_admin_role_is_read_only() {
        let floor = floor();
        let command = TableCommand::AdjustPartySize { delta: 1 };
        assert!(floor.apply_as(Role::Admin, "1", command.clone()).is_err());
        assert!(floor.apply_as(Role::Waiter, "1", command).is_ok());
    }

    #[tokio::test]
    async fn test_subscribers_receive_events_in_order() {
        let floor = floor();
        let mut rx = floor.subscribe();

        floor.add_item("1", "c2").unwrap();
        floor.adjust_party_size("1", 2).unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.table_id, "1");
        assert_eq!(first.command, "add_item");
        assert_eq!(first.revision, 1);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.command, "adjust_party_size");
        assert_eq!(second.effect, Effect::Applied);
        assert_eq!(second.revision, 2);
    }
}
