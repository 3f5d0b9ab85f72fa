//! # barrio-core: Table & Order Lifecycle Engine
//!
//! This crate is the **heart** of Barrio Floor. It decides how a table and
//! its order lines change when a waiter or the kitchen acts, and derives
//! the read-only figures each screen shows. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Barrio Floor Architecture                          │
//! │                                                                         │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐             │
//! │  │  Floor screen │   │ Kitchen screen│   │ Admin screen  │             │
//! │  │   (waiter)    │   │               │   │  (read-only)  │             │
//! │  └───────┬───────┘   └───────┬───────┘   └───────┬───────┘             │
//! │          │ commands          │ mark ready        │ reads               │
//! │  ┌───────▼───────────────────▼───────────────────▼─────────────────┐   │
//! │  │            barrio-floor (FloorState + notifications)            │   │
//! │  └───────────────────────────────┬─────────────────────────────────┘   │
//! │                                  │                                      │
//! │  ┌───────────────────────────────▼─────────────────────────────────┐   │
//! │  │               ★ barrio-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   catalog   types   engine   store   kitchen   sales   floor   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK READS IN DERIVATIONS • PURE TRANSITIONS    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, OrderItem, Table and their status enums
//! - [`money`] - Whole-unit money with thousands-grouped display
//! - [`catalog`] - The fixed menu
//! - [`engine`] - The five table operations and the command form
//! - [`store`] - Tables keyed by id, the single mutation entry point
//! - [`kitchen`] - Oldest-first queue of tables with pending lines
//! - [`sales`] - Current-session and estimated daily sales
//! - [`floor`] - Zone filtering and status counts
//! - [`seed`] - Opening floor layout
//! - [`validation`] - Catalog and layout checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use barrio_core::{engine, Catalog, Table, TableStatus, Zone};
//!
//! let catalog = Catalog::standard();
//! let espresso = catalog.find("c1").unwrap();
//!
//! let table = Table::new("5", "Vereda 1", Zone::Vereda);
//! let table = engine::add_item(&table, espresso);
//!
//! assert_eq!(table.status(), TableStatus::Occupied);
//! assert_eq!(table.people_count(), 1);
//! assert_eq!(table.total().units(), 1800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod error;
pub mod floor;
pub mod kitchen;
pub mod money;
pub mod sales;
pub mod seed;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use engine::{Effect, TableCommand, Transition};
pub use error::{CoreError, CoreResult, ValidationError};
pub use floor::{FloorStats, ZoneFilter};
pub use kitchen::KitchenTicket;
pub use money::Money;
pub use sales::SalesSummary;
pub use store::TableStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minutes a pending line may wait before its ticket is flagged late.
pub const LATE_AFTER_MINUTES: i64 = 15;

/// Historical sales figure used when none is configured.
///
/// ## Why a constant?
/// There is no sales history store; the admin screen adds this simulated
/// figure to the live session total to estimate the day.
pub const DEFAULT_HISTORICAL_SALES: Money = Money::from_units(154_300);

/// Longest accepted product or table name, in characters.
pub const MAX_NAME_LEN: usize = 60;
