//! # Table Store
//!
//! The authoritative table collection and its single mutation entry point.
//!
//! ## Snapshot Replacement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.apply("5", AddItem("c1"), now)                                   │
//! │      │                                                                  │
//! │      ├── catalog["c1"]          unknown product → ProductNotFound       │
//! │      ├── tables["5"]            O(1) lookup by id                       │
//! │      ├── engine::apply(...)     pure: old snapshot → new snapshot       │
//! │      └── tables["5"] = new      whole table replaced, never patched     │
//! │                                                                         │
//! │  Layout order lives in a separate Vec<id>, so the floor always renders  │
//! │  tables in the order they were configured.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::catalog::Catalog;
use crate::engine::{self, TableCommand, Transition};
use crate::error::{CoreError, CoreResult};
use crate::types::{Table, TableStatus};
use crate::validation;

/// Tables keyed by id, in layout order, plus the catalog orders draw from.
#[derive(Debug, Clone)]
pub struct TableStore {
    catalog: Catalog,
    tables: HashMap<String, Table>,
    order: Vec<String>,
}

impl TableStore {
    /// Builds a store from a layout.
    ///
    /// ## Errors
    /// - `DuplicateTable` if two tables share an id
    /// - `InvariantViolation` if a table's total or status is inconsistent
    pub fn new(catalog: Catalog, tables: Vec<Table>) -> CoreResult<Self> {
        validation::validate_layout(&tables)?;

        let order = tables.iter().map(|table| table.id().to_string()).collect();
        let tables = tables
            .into_iter()
            .map(|table| (table.id().to_string(), table))
            .collect();

        Ok(TableStore {
            catalog,
            tables,
            order,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Every table, in layout order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.order.iter().filter_map(|id| self.tables.get(id))
    }

    /// Owned copy of the collection, in layout order.
    pub fn snapshot(&self) -> Vec<Table> {
        self.tables().cloned().collect()
    }

    pub fn get(&self, table_id: &str) -> Option<&Table> {
        self.tables.get(table_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Runs `command` on one table and installs the resulting snapshot.
    ///
    /// The only way a table in the store changes.
    ///
    /// ## Errors
    /// - `TableNotFound` for an unknown `table_id`
    /// - `ProductNotFound` when `AddItem` names a product outside the catalog
    pub fn apply(
        &mut self,
        table_id: &str,
        command: &TableCommand,
        now: DateTime<Utc>,
    ) -> CoreResult<Transition> {
        if let TableCommand::AddItem { product_id } = command {
            if self.catalog.find(product_id).is_none() {
                return Err(CoreError::ProductNotFound(product_id.clone()));
            }
        }

        let current = self
            .tables
            .get_mut(table_id)
            .ok_or_else(|| CoreError::TableNotFound(table_id.to_string()))?;

        let transition = engine::apply(current, command, &self.catalog, now);

        debug!(
            table_id,
            command = command.name(),
            effect = ?transition.effect,
            status = ?transition.table.status(),
            total = transition.table.total().units(),
            "table transition"
        );

        if transition.effect.changed() {
            *current = transition.table.clone();
        }

        Ok(transition)
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Adds one unit of the catalog product `product_id` to a table.
    pub fn add_item(
        &mut self,
        table_id: &str,
        product_id: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<Transition> {
        let command = TableCommand::AddItem {
            product_id: product_id.to_string(),
        };
        self.apply(table_id, &command, now)
    }

    pub fn remove_item(&mut self, table_id: &str, item_id: &str) -> CoreResult<Transition> {
        let command = TableCommand::RemoveItem {
            item_id: item_id.to_string(),
        };
        self.apply(table_id, &command, Utc::now())
    }

    pub fn set_status(&mut self, table_id: &str, status: TableStatus) -> CoreResult<Transition> {
        self.apply(table_id, &TableCommand::SetStatus { status }, Utc::now())
    }

    pub fn adjust_party_size(&mut self, table_id: &str, delta: i32) -> CoreResult<Transition> {
        self.apply(table_id, &TableCommand::AdjustPartySize { delta }, Utc::now())
    }

    pub fn mark_item_ready(&mut self, table_id: &str, item_id: &str) -> CoreResult<Transition> {
        let command = TableCommand::MarkItemReady {
            item_id: item_id.to_string(),
        };
        self.apply(table_id, &command, Utc::now())
    }
}
